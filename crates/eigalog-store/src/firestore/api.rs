//! Raw request/response plumbing for the Firestore REST surface.
//!
//! Documents travel as typed value maps (`stringValue`, `integerValue`,
//! `timestampValue`, `booleanValue`); `integerValue` is string-encoded on
//! the wire.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use eigalog_models::{MovieId, NewReview, Review, ReviewId, UserId, UserProfile};

use crate::error::StoreError;

pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Root resource path for a project's default database documents.
pub fn documents_root(project_id: &str) -> String {
    format!(
        "{}/projects/{}/databases/(default)/documents",
        FIRESTORE_BASE_URL, project_id
    )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldValue {
    string_value: Option<String>,
    integer_value: Option<String>,
    boolean_value: Option<bool>,
    timestamp_value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: HashMap<String, FieldValue>,
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    // runQuery rows without a document carry only a readTime; skip them.
    document: Option<Document>,
}

fn check_response(status: StatusCode, body: &str) -> Result<(), StoreError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(StoreError::PermissionDenied(body.to_string()));
    }
    if !status.is_success() {
        return Err(StoreError::Api {
            status,
            body: body.to_string(),
        });
    }
    Ok(())
}

fn encode_review_fields(review: &NewReview, created_at: DateTime<Utc>) -> Value {
    json!({
        "fields": {
            "movieId": { "stringValue": review.movie_id.to_string() },
            "uid": { "stringValue": review.author_id.0 },
            "text": { "stringValue": review.text },
            "rating": { "integerValue": review.rating.to_string() },
            "timestamp": {
                "timestampValue": created_at.to_rfc3339_opts(SecondsFormat::Micros, true)
            },
        }
    })
}

/// Trailing path segment of a document resource name.
fn document_id(name: &str) -> Result<&str, StoreError> {
    name.rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| StoreError::Malformed(format!("document name without id: {}", name)))
}

fn require_string(
    fields: &HashMap<String, FieldValue>,
    field: &str,
) -> Result<String, StoreError> {
    fields
        .get(field)
        .and_then(|v| v.string_value.clone())
        .ok_or_else(|| StoreError::Malformed(format!("missing string field {}", field)))
}

fn decode_review(doc: &Document) -> Result<Review, StoreError> {
    let id = ReviewId(document_id(&doc.name)?.to_string());

    let movie_id = require_string(&doc.fields, "movieId")?
        .parse::<u64>()
        .map(MovieId)
        .map_err(|e| StoreError::Malformed(format!("bad movieId: {}", e)))?;

    let rating = doc
        .fields
        .get("rating")
        .and_then(|v| v.integer_value.as_deref())
        .ok_or_else(|| StoreError::Malformed("missing integer field rating".to_string()))?
        .parse::<u8>()
        .map_err(|e| StoreError::Malformed(format!("bad rating: {}", e)))?;

    let created_at = doc
        .fields
        .get("timestamp")
        .and_then(|v| v.timestamp_value.as_deref())
        .ok_or_else(|| StoreError::Malformed("missing timestamp field".to_string()))
        .and_then(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| StoreError::Malformed(format!("bad timestamp: {}", e)))
        })?;

    Ok(Review {
        id,
        movie_id,
        author_id: UserId(require_string(&doc.fields, "uid")?),
        text: require_string(&doc.fields, "text")?,
        rating,
        created_at,
    })
}

fn decode_profile(doc: &Document) -> UserProfile {
    let admin = doc
        .fields
        .get("admin")
        .and_then(|v| v.boolean_value)
        .unwrap_or(false);
    UserProfile { admin }
}

/// Insert a review document; returns the store-assigned id.
pub async fn create_review(
    client: &Client,
    token: &str,
    root: &str,
    collection: &str,
    review: &NewReview,
    created_at: DateTime<Utc>,
) -> Result<ReviewId, StoreError> {
    let url = format!("{}/{}", root, collection);

    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", token))
        .json(&encode_review_fields(review, created_at))
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    check_response(status, &body)?;

    let doc: Document = serde_json::from_str(&body)
        .map_err(|e| StoreError::Malformed(format!("create response: {}", e)))?;
    Ok(ReviewId(document_id(&doc.name)?.to_string()))
}

/// Query the review collection for one movie, newest first.
pub async fn list_reviews(
    client: &Client,
    token: &str,
    root: &str,
    collection: &str,
    movie_id: &MovieId,
) -> Result<Vec<Review>, StoreError> {
    let url = format!("{}:runQuery", root);
    let query = json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": "movieId" },
                    "op": "EQUAL",
                    "value": { "stringValue": movie_id.to_string() },
                }
            },
            "orderBy": [
                { "field": { "fieldPath": "timestamp" }, "direction": "DESCENDING" }
            ],
        }
    });

    let response = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", token))
        .json(&query)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    check_response(status, &body)?;

    parse_query_rows(&body)
}

fn parse_query_rows(body: &str) -> Result<Vec<Review>, StoreError> {
    let rows: Vec<QueryRow> = serde_json::from_str(body)
        .map_err(|e| StoreError::Malformed(format!("query response: {}", e)))?;

    rows.iter()
        .filter_map(|row| row.document.as_ref())
        .map(decode_review)
        .collect()
}

/// Fetch one review document; `None` when it does not exist.
pub async fn get_review(
    client: &Client,
    token: &str,
    root: &str,
    collection: &str,
    id: &ReviewId,
) -> Result<Option<Review>, StoreError> {
    let url = format!("{}/{}/{}", root, collection, urlencoding::encode(&id.0));

    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let body = response.text().await?;
    check_response(status, &body)?;

    let doc: Document = serde_json::from_str(&body)
        .map_err(|e| StoreError::Malformed(format!("document response: {}", e)))?;
    decode_review(&doc).map(Some)
}

/// Delete one document. The store treats missing documents as deleted, so
/// this is idempotent.
pub async fn delete_document(
    client: &Client,
    token: &str,
    root: &str,
    collection: &str,
    id: &str,
) -> Result<(), StoreError> {
    let url = format!("{}/{}/{}", root, collection, urlencoding::encode(id));

    let response = client
        .delete(&url)
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(());
    }
    let body = response.text().await?;
    check_response(status, &body)
}

/// Fetch a user's profile document; `None` when absent.
pub async fn get_profile(
    client: &Client,
    token: &str,
    root: &str,
    collection: &str,
    user_id: &UserId,
) -> Result<Option<UserProfile>, StoreError> {
    let url = format!(
        "{}/{}/{}",
        root,
        collection,
        urlencoding::encode(&user_id.0)
    );

    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let body = response.text().await?;
    check_response(status, &body)?;

    let doc: Document = serde_json::from_str(&body)
        .map_err(|e| StoreError::Malformed(format!("profile response: {}", e)))?;
    Ok(Some(decode_profile(&doc)))
}

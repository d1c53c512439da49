use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

use eigalog_models::{MovieId, NewReview, Review, ReviewId, Session, UserId, UserProfile};

use crate::error::StoreError;
use crate::firestore::api;
use crate::traits::{can_delete, validate_new_review, ProfileStore, ReviewStore};

/// Cloud document store backend over the Firestore REST surface.
///
/// Reviews and user profiles live in two flat collections under the
/// project's default database. The creation timestamp is stamped here, at
/// the store boundary, never taken from the submitting client.
#[derive(Clone)]
pub struct FirestoreStore {
    client: Arc<Client>,
    token: String,
    root: String,
    reviews_collection: String,
    users_collection: String,
}

impl FirestoreStore {
    pub fn new(
        project_id: String,
        token: String,
        reviews_collection: String,
        users_collection: String,
    ) -> Self {
        Self {
            client: Arc::new(Client::new()),
            token,
            root: api::documents_root(&project_id),
            reviews_collection,
            users_collection,
        }
    }
}

#[async_trait]
impl ReviewStore for FirestoreStore {
    async fn create(&self, review: NewReview) -> Result<ReviewId, StoreError> {
        validate_new_review(&review)?;

        let created_at = Utc::now();
        let id = api::create_review(
            &self.client,
            &self.token,
            &self.root,
            &self.reviews_collection,
            &review,
            created_at,
        )
        .await?;
        debug!("Created review {} for movie {}", id, review.movie_id);
        Ok(id)
    }

    async fn list_for_movie(&self, movie_id: &MovieId) -> Result<Vec<Review>, StoreError> {
        api::list_reviews(
            &self.client,
            &self.token,
            &self.root,
            &self.reviews_collection,
            movie_id,
        )
        .await
    }

    async fn delete(&self, id: &ReviewId, session: &Session) -> Result<(), StoreError> {
        // Read the document first so authorization compares against the
        // stored author, not anything the caller claims.
        let existing = api::get_review(
            &self.client,
            &self.token,
            &self.root,
            &self.reviews_collection,
            id,
        )
        .await?;

        let Some(existing) = existing else {
            return Ok(());
        };
        if !can_delete(session, &existing) {
            return Err(StoreError::PermissionDenied(format!(
                "user {} may not delete review {}",
                session.user_id, id
            )));
        }

        api::delete_document(
            &self.client,
            &self.token,
            &self.root,
            &self.reviews_collection,
            &id.0,
        )
        .await
    }
}

#[async_trait]
impl ProfileStore for FirestoreStore {
    async fn profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        api::get_profile(
            &self.client,
            &self.token,
            &self.root,
            &self.users_collection,
            user_id,
        )
        .await
    }
}

use eigalog_models::MovieId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("movie {0} not found in the catalog")]
    NotFound(MovieId),

    #[error("catalog request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("catalog API error: {status} - {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected catalog response: {0}")]
    Malformed(String),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("store denied the operation: {0}")]
    PermissionDenied(String),

    #[error("store API error: {status} - {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected store response: {0}")]
    Malformed(String),

    #[error("invalid review: {0}")]
    InvalidReview(String),
}

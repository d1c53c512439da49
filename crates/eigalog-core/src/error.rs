use eigalog_catalog::CatalogError;
use eigalog_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Submit or delete attempted without a signed-in user. Surfaced as a
    /// blocking message, never silently dropped.
    #[error("sign in to continue")]
    AuthRequired,

    #[error("review text is limited to {max} characters")]
    TextTooLong { max: usize },

    #[error("rating must be between 1 and 5 stars, got {0}")]
    RatingOutOfRange(u8),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

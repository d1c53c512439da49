use async_trait::async_trait;
use eigalog_models::{Movie, MovieId};

use crate::error::CatalogError;
use crate::providers::LinkedProvider;

/// Read-only view of the external movie catalog.
///
/// The three reads are independent and may be issued concurrently; there is
/// no ordering requirement between them.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Movie metadata by identifier.
    async fn movie(&self, id: MovieId) -> Result<Movie, CatalogError>;

    /// Whether the movie is in the region's current now-playing listing.
    ///
    /// Fail-open: implementations resolve to `false` when the listing
    /// cannot be fetched, logging the failure instead of propagating it.
    async fn is_now_playing(&self, id: MovieId) -> bool;

    /// The movie's flatrate providers, filtered to the supported
    /// storefronts with deep links attached.
    async fn watch_providers(&self, id: MovieId) -> Result<Vec<LinkedProvider>, CatalogError>;
}

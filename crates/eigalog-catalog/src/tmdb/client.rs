use async_trait::async_trait;
use eigalog_models::{Movie, MovieId};
use reqwest::Client;
use std::sync::Arc;
use tracing::warn;

use crate::error::CatalogError;
use crate::providers::{self, LinkedProvider};
use crate::tmdb::api;
use crate::traits::Catalog;

/// Bearer-token client for the TMDB read endpoints the detail page uses.
///
/// Locale and region are fixed per instance; the observed site pins them to
/// `ja-JP` / `JP`.
#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    access_token: String,
    language: String,
    region: String,
}

impl TmdbClient {
    pub fn new(access_token: String, language: String, region: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            access_token,
            language,
            region,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub async fn movie(&self, id: MovieId) -> Result<Movie, CatalogError> {
        api::get_movie(&self.client, &self.access_token, &self.language, id).await
    }

    /// Membership test against the region's now-playing listing.
    ///
    /// Fail-open: an unreachable listing reads as "not now playing" so the
    /// page still renders. The failure is logged, not swallowed.
    pub async fn is_now_playing(&self, id: MovieId) -> bool {
        match api::get_now_playing_ids(&self.client, &self.access_token, &self.language, &self.region)
            .await
        {
            Ok(ids) => ids.contains(&id),
            Err(e) => {
                warn!("Now-playing check failed for movie {}: {}", id, e);
                false
            }
        }
    }

    /// Flatrate providers for the region, filtered to supported storefronts.
    pub async fn watch_providers(&self, id: MovieId) -> Result<Vec<LinkedProvider>, CatalogError> {
        let raw =
            api::get_watch_providers(&self.client, &self.access_token, &self.region, id).await?;
        Ok(providers::link_providers(raw))
    }
}

#[async_trait]
impl Catalog for TmdbClient {
    async fn movie(&self, id: MovieId) -> Result<Movie, CatalogError> {
        TmdbClient::movie(self, id).await
    }

    async fn is_now_playing(&self, id: MovieId) -> bool {
        TmdbClient::is_now_playing(self, id).await
    }

    async fn watch_providers(&self, id: MovieId) -> Result<Vec<LinkedProvider>, CatalogError> {
        TmdbClient::watch_providers(self, id).await
    }
}

use serde::{Deserialize, Serialize};

/// A flatrate streaming provider offering the movie in the configured region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchProvider {
    pub provider_id: u32,
    pub provider_name: String,
    pub logo_path: Option<String>,
}

impl WatchProvider {
    /// TMDB-hosted logo image URL at the given pixel width.
    pub fn logo_url(&self, width: u32) -> Option<String> {
        self.logo_path
            .as_ref()
            .map(|path| format!("https://image.tmdb.org/t/p/w{}{}", width, path))
    }
}

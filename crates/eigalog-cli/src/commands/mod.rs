pub mod config;
pub mod delete;
pub mod review;
pub mod show;

use std::sync::Arc;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use eigalog_catalog::TmdbClient;
use eigalog_config::{Config, CredentialStore, PathManager};
use eigalog_core::resolve_session;
use eigalog_models::{Session, UserId};
use eigalog_store::{FirestoreStore, MemoryStore, ProfileStore, ReviewStore};

/// Everything a page command needs: the loaded config, the catalog client
/// (absent in offline mode) and the two store handles.
pub struct AppContext {
    pub config: Config,
    pub catalog: Option<TmdbClient>,
    pub reviews: Arc<dyn ReviewStore>,
    pub profiles: Arc<dyn ProfileStore>,
}

pub fn build_context(offline: bool) -> Result<AppContext> {
    let path_manager = PathManager::default();
    let config = Config::load_or_default(&path_manager.config_file())
        .map_err(|e| eyre!("Failed to load config: {}", e))?;
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration: {}", e))?;

    if offline {
        let store = Arc::new(MemoryStore::new());
        return Ok(AppContext {
            config,
            catalog: None,
            reviews: store.clone(),
            profiles: store,
        });
    }

    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store.load().map_err(|e| {
        eyre!(
            "Failed to load credentials from {}: {}",
            credentials_file.display(),
            e
        )
    })?;

    let tmdb_token = cred_store
        .get_tmdb_access_token()
        .cloned()
        .ok_or_else(|| eyre!("TMDB access token not configured; run `eigalog config tmdb`"))?;
    let catalog = TmdbClient::new(
        tmdb_token,
        config.tmdb.language.clone(),
        config.tmdb.region.clone(),
    );

    if !config.is_firestore_configured() {
        return Err(eyre!(
            "Document store project not configured; run `eigalog config store`"
        ));
    }
    let store_token = cred_store
        .get_store_token()
        .cloned()
        .ok_or_else(|| eyre!("Document store token not configured; run `eigalog config store`"))?;

    let store = Arc::new(FirestoreStore::new(
        config.firestore.project_id.clone(),
        store_token,
        config.firestore.reviews_collection.clone(),
        config.firestore.users_collection.clone(),
    ));

    Ok(AppContext {
        config,
        catalog: Some(catalog),
        reviews: store.clone(),
        profiles: store,
    })
}

/// Resolve the acting session from the `--user` flag, if given.
pub async fn resolve_cli_session(
    user: Option<&str>,
    profiles: &dyn ProfileStore,
) -> Option<Session> {
    match user {
        Some(uid) => Some(resolve_session(UserId(uid.to_string()), profiles).await),
        None => None,
    }
}

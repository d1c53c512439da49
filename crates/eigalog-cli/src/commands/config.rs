use clap::Subcommand;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

use eigalog_config::{Config, CredentialStore, PathManager};

use crate::output::{Output, OutputFormat};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks sensitive data)
    Show,

    /// Configure the TMDB access token and locale
    #[command(long_about = "Store the TMDB API read access token (prompted when not passed) and optionally override the catalog language and region.")]
    Tmdb {
        /// TMDB API read access token (if not provided, will prompt)
        #[arg(long)]
        token: Option<String>,

        /// Catalog language tag (e.g. ja-JP)
        #[arg(long)]
        language: Option<String>,

        /// Catalog region code (e.g. JP)
        #[arg(long)]
        region: Option<String>,
    },

    /// Configure the document store (project and token)
    #[command(long_about = "Store the document-store project id and bearer token used for the review and user-profile collections.")]
    Store {
        /// Document store project id
        #[arg(long)]
        project_id: Option<String>,

        /// Document store bearer token (if not provided, will prompt)
        #[arg(long)]
        token: Option<String>,
    },
}

pub async fn run_config(cmd: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => run_show(output),
        ConfigCommands::Tmdb {
            token,
            language,
            region,
        } => run_tmdb(token, language, region, output),
        ConfigCommands::Store { project_id, token } => run_store(project_id, token, output),
    }
}

fn mask(secret: Option<&String>) -> String {
    match secret {
        Some(s) if s.len() > 4 => format!("****{}", &s[s.len() - 4..]),
        Some(_) => "****".to_string(),
        None => "(not set)".to_string(),
    }
}

fn run_show(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config = Config::load_or_default(&path_manager.config_file())
        .map_err(|e| eyre!("Failed to load config: {}", e))?;

    let mut cred_store = CredentialStore::new(path_manager.credentials_file());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    if output.format() != OutputFormat::Human {
        output.json(&json!({
            "config_file": path_manager.config_file(),
            "tmdb": {
                "language": config.tmdb.language,
                "region": config.tmdb.region,
                "access_token": mask(cred_store.get_tmdb_access_token()),
            },
            "firestore": {
                "project_id": config.firestore.project_id,
                "reviews_collection": config.firestore.reviews_collection,
                "users_collection": config.firestore.users_collection,
                "token": mask(cred_store.get_store_token()),
            },
            "promo": {
                "images": config.promo.images,
                "link": config.promo.link,
            },
        }));
        return Ok(());
    }

    output.println(format!(
        "Config file: {}",
        path_manager.config_file().display()
    ));
    output.println("");
    output.println("[tmdb]");
    output.println(format!("  language     = {}", config.tmdb.language));
    output.println(format!("  region       = {}", config.tmdb.region));
    output.println(format!(
        "  access_token = {}",
        mask(cred_store.get_tmdb_access_token())
    ));
    output.println("");
    output.println("[firestore]");
    output.println(format!("  project_id         = {}", config.firestore.project_id));
    output.println(format!(
        "  reviews_collection = {}",
        config.firestore.reviews_collection
    ));
    output.println(format!(
        "  users_collection   = {}",
        config.firestore.users_collection
    ));
    output.println(format!(
        "  token              = {}",
        mask(cred_store.get_store_token())
    ));
    output.println("");
    output.println("[promo]");
    output.println(format!("  images = {}", config.promo.images.join(", ")));
    output.println(format!("  link   = {}", config.promo.link));
    Ok(())
}

fn run_tmdb(
    token: Option<String>,
    language: Option<String>,
    region: Option<String>,
    output: &Output,
) -> Result<()> {
    let path_manager = PathManager::default();
    let mut config = Config::load_or_default(&path_manager.config_file())
        .map_err(|e| eyre!("Failed to load config: {}", e))?;

    let token = match token {
        Some(token) => token,
        None => rpassword::prompt_password("TMDB API read access token: ")?,
    };
    if token.trim().is_empty() {
        return Err(eyre!("TMDB access token must not be empty"));
    }

    if let Some(language) = language {
        config.tmdb.language = language;
    }
    if let Some(region) = region {
        config.tmdb.region = region;
    }
    config.validate().map_err(|e| eyre!("{}", e))?;
    config
        .save_to_file(&path_manager.config_file())
        .map_err(|e| eyre!("Failed to save config: {}", e))?;

    let mut cred_store = CredentialStore::new(path_manager.credentials_file());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    cred_store.set_tmdb_access_token(token.trim().to_string());
    cred_store
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success("TMDB configuration saved");
    Ok(())
}

fn run_store(project_id: Option<String>, token: Option<String>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let mut config = Config::load_or_default(&path_manager.config_file())
        .map_err(|e| eyre!("Failed to load config: {}", e))?;

    let project_id = match project_id {
        Some(project_id) => project_id,
        None => dialoguer::Input::<String>::new()
            .with_prompt("Document store project id")
            .with_initial_text(config.firestore.project_id.clone())
            .interact_text()?,
    };
    if project_id.trim().is_empty() {
        return Err(eyre!("Project id must not be empty"));
    }

    let token = match token {
        Some(token) => token,
        None => rpassword::prompt_password("Document store bearer token: ")?,
    };
    if token.trim().is_empty() {
        return Err(eyre!("Document store token must not be empty"));
    }

    config.firestore.project_id = project_id.trim().to_string();
    config
        .save_to_file(&path_manager.config_file())
        .map_err(|e| eyre!("Failed to save config: {}", e))?;

    let mut cred_store = CredentialStore::new(path_manager.credentials_file());
    cred_store
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    cred_store.set_store_token(token.trim().to_string());
    cred_store
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success("Document store configuration saved");
    Ok(())
}

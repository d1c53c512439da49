use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub firestore: FirestoreConfig,
    #[serde(default)]
    pub promo: PromoConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// BCP 47 tag sent as the `language` query parameter.
    #[serde(default = "default_language")]
    pub language: String,
    /// ISO 3166-1 region used for now-playing and watch-provider lookups.
    #[serde(default = "default_region")]
    pub region: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FirestoreConfig {
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_reviews_collection")]
    pub reviews_collection: String,
    #[serde(default = "default_users_collection")]
    pub users_collection: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromoConfig {
    /// Image pool the post-submit overlay picks from, uniformly.
    #[serde(default = "default_promo_images")]
    pub images: Vec<String>,
    /// Where the overlay links out to.
    #[serde(default = "default_promo_link")]
    pub link: String,
}

fn default_language() -> String {
    "ja-JP".to_string()
}

fn default_region() -> String {
    "JP".to_string()
}

fn default_reviews_collection() -> String {
    "reviews".to_string()
}

fn default_users_collection() -> String {
    "users".to_string()
}

fn default_promo_images() -> Vec<String> {
    vec![
        "ad1.jpg".to_string(),
        "ad2.jpg".to_string(),
        "ad3.jpg".to_string(),
        "ad4.jpg".to_string(),
    ]
}

fn default_promo_link() -> String {
    "https://elog.tokyo/".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            region: default_region(),
        }
    }
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            reviews_collection: default_reviews_collection(),
            users_collection: default_users_collection(),
        }
    }
}

impl Default for PromoConfig {
    fn default() -> Self {
        Self {
            images: default_promo_images(),
            link: default_promo_link(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults when it does not
    /// exist yet.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb.language.is_empty() {
            return Err(anyhow::anyhow!("tmdb.language must not be empty"));
        }
        if self.tmdb.region.is_empty() {
            return Err(anyhow::anyhow!("tmdb.region must not be empty"));
        }
        if self.firestore.reviews_collection.is_empty()
            || self.firestore.users_collection.is_empty()
        {
            return Err(anyhow::anyhow!("firestore collection names must not be empty"));
        }
        if self.promo.images.is_empty() {
            return Err(anyhow::anyhow!("promo.images must list at least one image"));
        }
        Ok(())
    }

    /// Whether the document store section points at a real project.
    pub fn is_firestore_configured(&self) -> bool {
        !self.firestore.project_id.is_empty() && self.firestore.project_id != "YOUR_PROJECT_ID"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            tmdb: TmdbConfig::default(),
            firestore: FirestoreConfig {
                project_id: "eigalog-test".to_string(),
                ..FirestoreConfig::default()
            },
            promo: PromoConfig::default(),
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.tmdb.language, "ja-JP");
        assert_eq!(loaded.tmdb.region, "JP");
        assert_eq!(loaded.firestore.project_id, "eigalog-test");
        assert_eq!(loaded.firestore.reviews_collection, "reviews");
        assert_eq!(loaded.promo.images.len(), 4);
    }

    #[test]
    fn test_config_defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.tmdb.language, "ja-JP");
        assert_eq!(config.firestore.users_collection, "users");
        assert_eq!(config.promo.link, "https://elog.tokyo/");
        assert!(!config.is_firestore_configured());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.tmdb.region = String::new();
        assert!(config.validate().is_err());

        config.tmdb.region = "JP".to_string();
        config.promo.images.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_firestore_configured_rejects_placeholder() {
        let mut config = Config::default();
        config.firestore.project_id = "YOUR_PROJECT_ID".to_string();
        assert!(!config.is_firestore_configured());

        config.firestore.project_id = "eigalog-prod".to_string();
        assert!(config.is_firestore_configured());
    }
}

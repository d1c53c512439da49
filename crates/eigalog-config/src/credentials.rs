use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use toml;

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Key-value credential file kept outside the main config so tokens never
/// end up in a shareable config dump.
pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    // Convenience methods for specific credentials
    pub fn get_tmdb_access_token(&self) -> Option<&String> {
        self.get("tmdb_access_token")
    }

    pub fn set_tmdb_access_token(&mut self, token: String) {
        self.set("tmdb_access_token".to_string(), token);
    }

    pub fn get_store_token(&self) -> Option<&String> {
        self.get("store_token")
    }

    pub fn set_store_token(&mut self, token: String) {
        self.set("store_token".to_string(), token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_credentials_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.toml");

        let mut store = CredentialStore::new(path.clone());
        store.load().unwrap();
        assert_eq!(store.get_tmdb_access_token(), None);

        store.set_tmdb_access_token("tmdb-token".to_string());
        store.set_store_token("store-token".to_string());
        store.save().unwrap();

        let mut reloaded = CredentialStore::new(path);
        reloaded.load().unwrap();
        assert_eq!(
            reloaded.get_tmdb_access_token().map(String::as_str),
            Some("tmdb-token")
        );
        assert_eq!(
            reloaded.get_store_token().map(String::as_str),
            Some("store-token")
        );

        reloaded.remove("store_token");
        assert_eq!(reloaded.get_store_token(), None);
    }
}

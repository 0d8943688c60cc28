//! Application configuration management.
//!
//! This module handles loading and saving the client configuration: the
//! backend URL, where the session token is kept, and the last e-mail used
//! to log in.
//!
//! Configuration is stored at `~/.config/hotelier/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::auth::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "hotelier";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Backend used when nothing is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Environment override for the backend URL
pub const BACKEND_URL_ENV: &str = "HOTELIER_BACKEND_URL";

/// Where the bearer token is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenStorage {
    #[default]
    File,
    Keyring,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend_url: Option<String>,
    #[serde(default)]
    pub token_storage: TokenStorage,
    #[serde(default)]
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Backend URL: environment first, then config file, then the default.
    pub fn backend_url(&self) -> String {
        self.resolve_backend_url(std::env::var(BACKEND_URL_ENV).ok())
    }

    fn resolve_backend_url(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.backend_url.clone())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// Build the token store this configuration asks for.
    pub fn token_store(&self) -> Result<Box<dyn TokenStore>> {
        Ok(match self.token_storage {
            TokenStorage::File => Box::new(FileTokenStore::new(self.cache_dir()?)),
            TokenStorage::Keyring => Box::new(KeyringTokenStore),
            TokenStorage::Memory => Box::new(MemoryTokenStore::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_url_precedence() {
        let mut config = Config::default();
        assert_eq!(config.resolve_backend_url(None), DEFAULT_BACKEND_URL);

        config.backend_url = Some("https://api.hotel.test/".to_string());
        assert_eq!(config.resolve_backend_url(None), "https://api.hotel.test");
        assert_eq!(
            config.resolve_backend_url(Some("http://env:8080".to_string())),
            "http://env:8080"
        );
        assert_eq!(config.resolve_backend_url(Some("  ".to_string())), "https://api.hotel.test");
    }

    #[test]
    fn test_parse_config_defaults() {
        let config: Config = serde_json::from_str("{}").expect("empty config parses");
        assert_eq!(config.token_storage, TokenStorage::File);
        assert!(config.last_email.is_none());

        let config: Config = serde_json::from_str(r#"{"token_storage":"keyring"}"#)
            .expect("config parses");
        assert_eq!(config.token_storage, TokenStorage::Keyring);
    }

    #[test]
    fn test_memory_token_store_selected() {
        let config = Config {
            token_storage: TokenStorage::Memory,
            ..Default::default()
        };
        let store = config.token_store().expect("store builds");
        assert_eq!(store.describe(), "memory");
    }
}

//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (KJV_SEARCH_*)
//! 2. TOML config file (if KJV_SEARCH_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::model::DEFAULT_LIMIT;

mod validation;

pub use validation::ConfigError;

/// Which [`CacheStore`](crate::store::CacheStore) backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Json,
    Memory,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (KJV_SEARCH_*)
/// 2. TOML config file (if KJV_SEARCH_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Search endpoint URL.
    ///
    /// Set via KJV_SEARCH_SEARCH_URL environment variable.
    /// Required only when searching remotely.
    #[serde(default)]
    pub search_url: Option<String>,

    /// Bearer token attached to search requests.
    ///
    /// Set via KJV_SEARCH_API_TOKEN environment variable.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Cache backend: sqlite, json or memory.
    ///
    /// Set via KJV_SEARCH_STORE environment variable.
    #[serde(default)]
    pub store: StoreBackend,

    /// Path to SQLite cache database.
    ///
    /// Set via KJV_SEARCH_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Path to the JSON cache file.
    ///
    /// Set via KJV_SEARCH_JSON_PATH environment variable.
    #[serde(default = "default_json_path")]
    pub json_path: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via KJV_SEARCH_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via KJV_SEARCH_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Result count used when a search does not give one.
    ///
    /// Set via KJV_SEARCH_DEFAULT_LIMIT environment variable.
    #[serde(default = "default_limit")]
    pub default_limit: u16,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./kjv-search-cache.sqlite")
}

fn default_json_path() -> PathBuf {
    PathBuf::from("./kjv-search-cache.json")
}

fn default_user_agent() -> String {
    "kjv-search/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_limit() -> u16 {
    DEFAULT_LIMIT
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search_url: None,
            api_token: None,
            store: StoreBackend::default(),
            db_path: default_db_path(),
            json_path: default_json_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            default_limit: default_limit(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `KJV_SEARCH_`
    /// 2. TOML file from `KJV_SEARCH_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("KJV_SEARCH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("KJV_SEARCH_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        Self::from_figment(figment)
    }

    fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Search URL, required before any remote search.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the search URL is not set.
    pub fn require_search_url(&self) -> Result<&str, ConfigError> {
        self.search_url.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "search_url".into(),
            hint: "Set KJV_SEARCH_SEARCH_URL environment variable".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, PathBuf::from("./kjv-search-cache.sqlite"));
        assert_eq!(config.json_path, PathBuf::from("./kjv-search-cache.json"));
        assert_eq!(config.user_agent, "kjv-search/0.1");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.default_limit, DEFAULT_LIMIT);
        assert_eq!(config.store, StoreBackend::Sqlite);
        assert!(config.search_url.is_none());
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
    }

    #[test]
    fn test_require_search_url_missing() {
        let config = AppConfig::default();
        let result = config.require_search_url();
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_search_url_present() {
        let config = AppConfig { search_url: Some("https://search.example.com/v1/search".into()), ..Default::default() };
        assert_eq!(config.require_search_url().unwrap(), "https://search.example.com/v1/search");
    }

    #[test]
    fn test_toml_layer_overrides_defaults() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::string(
            r#"
            store = "json"
            default_limit = 25
            search_url = "https://search.example.com"
            "#,
        ));

        let config = AppConfig::from_figment(figment).unwrap();

        assert_eq!(config.store, StoreBackend::Json);
        assert_eq!(config.default_limit, 25);
        assert_eq!(config.search_url.as_deref(), Some("https://search.example.com"));
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn test_invalid_layer_fails_validation() {
        let figment =
            Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::string("default_limit = 0"));

        let result = AppConfig::from_figment(figment);

        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "default_limit"));
    }

    #[test]
    fn test_unknown_store_backend_fails_to_load() {
        let figment =
            Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::string(r#"store = "redis""#));

        assert!(matches!(AppConfig::from_figment(figment), Err(ConfigError::LoadFailed(_))));
    }
}

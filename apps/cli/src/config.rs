//! # CLI Configuration
//!
//! Where the catalog API lives and where the cart is stored.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ROCKETSHOES_API_URL=http://api.example.com                         │
//! │     ROCKETSHOES_API_TIMEOUT_SECS=5                                     │
//! │     ROCKETSHOES_DB_PATH=/var/lib/rocketshoes/cart.db                   │
//! │     ROCKETSHOES_CART_KEY=@RocketShoes:cart                             │
//! │                                                                         │
//! │  2. TOML Config File (--config PATH, or the platform default)          │
//! │     ~/.config/rocketshoes/rocketshoes.toml (Linux)                     │
//! │     ~/Library/Application Support/com.rocketshoes.cart/... (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:3333, 10s timeout, platform data dir              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # rocketshoes.toml
//! [api]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10
//!
//! [storage]
//! database_path = "/home/me/.local/share/rocketshoes/cart.db"
//! cart_key = "@RocketShoes:cart"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use rocketshoes_api::{ClientConfig, DEFAULT_BASE_URL};
use rocketshoes_core::CART_STORAGE_KEY;

const CONFIG_FILE_NAME: &str = "rocketshoes.toml";
const DATABASE_FILE_NAME: &str = "cart.db";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No data directory available on this platform")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the catalog and stock API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. Defaults to `cart.db` in the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Key the cart snapshot is stored under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_cart_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            cart_key: default_cart_key(),
        }
    }
}

// =============================================================================
// CartConfig
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `ROCKETSHOES_*` overrides read through `var`.
    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("ROCKETSHOES_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = var("ROCKETSHOES_API_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid ROCKETSHOES_API_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = var("ROCKETSHOES_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = var("ROCKETSHOES_CART_KEY") {
            self.storage.cart_key = key;
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "API URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.storage.cart_key.trim().is_empty() {
            return Err(ConfigError::Invalid("cart_key must not be empty".into()));
        }

        Ok(())
    }

    /// Settings for the HTTP lookup client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api.base_url.clone())
            .timeout(Duration::from_secs(self.api.timeout_secs))
    }

    /// Resolved SQLite path: configured, or `cart.db` in the data directory.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .ok_or(ConfigError::NoDataDir)
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "rocketshoes", "cart")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CartConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.storage.cart_key, "@RocketShoes:cart");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CartConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://api.rocketshoes.dev"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://api.rocketshoes.dev");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.storage.cart_key, CART_STORAGE_KEY);
        assert!(config.storage.database_path.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CartConfig::default();
        config.apply_overrides(env(&[
            ("ROCKETSHOES_API_URL", "http://10.0.0.5:3333"),
            ("ROCKETSHOES_API_TIMEOUT_SECS", "3"),
            ("ROCKETSHOES_DB_PATH", "/tmp/rs.db"),
            ("ROCKETSHOES_CART_KEY", "test:cart"),
        ]));

        assert_eq!(config.api.base_url, "http://10.0.0.5:3333");
        assert_eq!(config.client_config().timeout, Duration::from_secs(3));
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/rs.db"));
        assert_eq!(config.storage.cart_key, "test:cart");
    }

    #[test]
    fn test_invalid_timeout_override_is_ignored() {
        let mut config = CartConfig::default();
        config.apply_overrides(env(&[("ROCKETSHOES_API_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_config_validation() {
        let mut config = CartConfig::default();

        config.api.base_url = "localhost:3333".into();
        assert!(config.validate().is_err());

        config.api.base_url = "https://localhost:3333".into();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.api.timeout_secs = 1;
        config.storage.cart_key = "  ".into();
        assert!(config.validate().is_err());

        config.storage.cart_key = "k".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let path = std::env::temp_dir().join(format!("rocketshoes-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[storage]\ncart_key = \"file:cart\"\ndatabase_path = \"/tmp/file.db\"\n",
        )
        .unwrap();

        let config = CartConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.storage.cart_key, "file:cart");
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/file.db"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = CartConfig::load(Some(PathBuf::from("/nonexistent/rocketshoes.toml")));
        assert!(matches!(err, Err(ConfigError::Io(_))));
    }
}

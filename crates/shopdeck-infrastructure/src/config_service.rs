//! Configuration service implementation.
//!
//! Loads the remote endpoint configuration from the user config file
//! (`~/.config/shopdeck/config.toml`), applies environment overrides, and
//! caches the result to avoid repeated file IO.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use shopdeck_core::error::{Result, ShopdeckError};

const CONFIG_DIR: &str = "shopdeck";
const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the remote base URL.
pub const ENV_BASE_URL: &str = "SHOPDECK_API_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "SHOPDECK_TIMEOUT_SECS";

fn default_base_url() -> String {
    "https://fakestoreapi.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Remote catalog endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the catalog service of record.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Configuration service that loads and caches the remote settings.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<RemoteConfig>>>,
}

impl ConfigService {
    /// Creates a new ConfigService.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the remote configuration, loading from file if not cached.
    ///
    /// A missing or unreadable config file falls back to the defaults;
    /// environment overrides are applied on top either way.
    pub fn get_config(&self) -> RemoteConfig {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let mut loaded = Self::load_config().unwrap_or_else(|e| {
            tracing::warn!("failed to load config file, using defaults: {e}");
            RemoteConfig::default()
        });
        Self::apply_env_overrides(&mut loaded);

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    /// Loads RemoteConfig from the user config file.
    fn load_config() -> Result<RemoteConfig> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(RemoteConfig::default());
        }
        Self::load_from(&path)
    }

    /// Parses a config file at an explicit path.
    fn load_from(path: &Path) -> Result<RemoteConfig> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| ShopdeckError::config("no user config directory available"))?;
        Ok(base.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    fn apply_env_overrides(config: &mut RemoteConfig) {
        Self::apply_overrides(
            config,
            std::env::var(ENV_BASE_URL).ok(),
            std::env::var(ENV_TIMEOUT_SECS).ok(),
        );
    }

    fn apply_overrides(config: &mut RemoteConfig, base_url: Option<String>, timeout: Option<String>) {
        if let Some(url) = base_url
            && !url.trim().is_empty()
        {
            config.base_url = url;
        }
        if let Some(raw) = timeout
            && let Ok(secs) = raw.trim().parse::<u64>()
        {
            config.timeout_secs = secs;
        }
    }
}

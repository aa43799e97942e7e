//! Configuration management for Reviewlens
//!
//! Parses an optional TOML file, applies environment-variable overrides for
//! the upstream service URLs, and provides typed access to settings. A
//! missing config file with no overrides yields a working configuration with
//! every upstream pointed at localhost.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Environment variable naming the model prediction endpoint.
pub const MODEL_SERVICE_URL_VAR: &str = "MODEL_SERVICE_URL";
/// Environment variable naming the model version endpoint.
pub const MODEL_VERSION_URL_VAR: &str = "MODEL_VERSION_URL";
/// Environment variable naming the data collection endpoint.
pub const DATA_COLLECTION_URL_VAR: &str = "DATA_COLLECTION_URL";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Upstream service configuration
///
/// Fields are private to prevent post-validation mutation. Configuration is
/// loaded via deserialization (or env overrides) and checked by
/// `Config::validate()`; after that, accessors are the only way in.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServicesConfig {
    #[serde(default = "default_model_url")]
    model_url: String,
    #[serde(default = "default_model_version_url")]
    model_version_url: String,
    #[serde(default = "default_collection_url")]
    collection_url: String,
    #[serde(default = "default_timeout_seconds")]
    timeout_seconds: u64,
}

impl ServicesConfig {
    /// Model prediction endpoint URL
    pub fn model_url(&self) -> &str {
        &self.model_url
    }

    /// Model version endpoint URL
    pub fn model_version_url(&self) -> &str {
        &self.model_version_url
    }

    /// Data collection endpoint URL
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    /// Upstream timeout in seconds
    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    /// Upstream timeout as a [`Duration`], applied to every upstream call
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            model_url: default_model_url(),
            model_version_url: default_model_version_url(),
            collection_url: default_collection_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_model_url() -> String {
    "http://localhost:5001/predict".to_string()
}

fn default_model_version_url() -> String {
    "http://localhost:5001/version".to_string()
}

fn default_collection_url() -> String {
    "http://localhost:5002/collect".to_string()
}

fn default_timeout_seconds() -> u64 {
    5
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration for startup
    ///
    /// The file is optional: when it does not exist, defaults are used.
    /// Environment variables `MODEL_SERVICE_URL`, `MODEL_VERSION_URL`, and
    /// `DATA_COLLECTION_URL` override the corresponding service URLs
    /// regardless of where the rest of the configuration came from, and the
    /// combined result is validated last.
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let path_display = path.display().to_string();

            // Phase 1: Read file (preserves io::Error context)
            let content =
                std::fs::read_to_string(path).map_err(|source| AppError::ConfigFileRead {
                    path: path_display.clone(),
                    source,
                })?;

            // Phase 2: Parse TOML (preserves toml::de::Error context)
            toml::from_str::<Self>(&content).map_err(|source| AppError::ConfigParseFailed {
                path: path_display,
                source,
            })?
        } else {
            Self::default()
        };

        // Phase 3: Environment overrides for the upstream URLs
        config.apply_env_overrides();

        // Phase 4: Validate the combined result
        config.validate()?;

        Ok(config)
    }

    /// Apply upstream URL overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(MODEL_SERVICE_URL_VAR) {
            self.services.model_url = url;
        }
        if let Some(url) = lookup(MODEL_VERSION_URL_VAR) {
            self.services.model_version_url = url;
        }
        if let Some(url) = lookup(DATA_COLLECTION_URL_VAR) {
            self.services.collection_url = url;
        }
    }

    /// Validate configuration after parsing and overrides
    ///
    /// This is called automatically by `load()` and `from_str()`, but can
    /// also be called explicitly when constructing Config via other means
    /// (e.g., in tests).
    pub fn validate(&self) -> AppResult<()> {
        for (field, url) in [
            ("services.model_url", self.services.model_url.as_str()),
            (
                "services.model_version_url",
                self.services.model_version_url.as_str(),
            ),
            (
                "services.collection_url",
                self.services.collection_url.as_str(),
            ),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AppError::Config(format!(
                    "{} has invalid URL '{}'. URLs must start with 'http://' or 'https://'.",
                    field, url
                )));
            }
        }

        if self.services.timeout_seconds == 0 || self.services.timeout_seconds > 300 {
            return Err(AppError::Config(format!(
                "services.timeout_seconds is {}. Upstream timeouts must be between 1 and 300 seconds.",
                self.services.timeout_seconds
            )));
        }

        const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !VALID_LEVELS.contains(&self.observability.log_level.as_str()) {
            return Err(AppError::Config(format!(
                "observability.log_level '{}' is not one of: trace, debug, info, warn, error",
                self.observability.log_level
            )));
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = AppError;

    /// Parse and validate a TOML string without touching the environment
    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config =
            toml::from_str(toml_str).map_err(|source| AppError::ConfigParseFailed {
                path: "<string>".to_string(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }
}

//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `fleetdash.toml` in the working directory unless `--config`
//! names another file. Every field has a default so the file is optional.
//! Environment variables take precedence over file values. For the log
//! filter, `FLEETDASH_LOG` wins over `RUST_LOG`.

use std::path::Path;
use std::time::Duration;

use fleetdash_app::network::NetworkConfig;
use serde::Deserialize;

const DEFAULT_PATH: &str = "fleetdash.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Session store settings.
    pub storage: StorageConfig,
    /// Simulated network settings.
    pub network: NetworkSettings,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// `SQLite` session store configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// `SQLite` connection URL.
    pub url: String,
}

/// Latency and failure injection of the mock dispatcher.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    pub latency_min_ms: u64,
    pub latency_max_ms: u64,
    pub failure_probability: f64,
    /// Fixed random seed; unset means seeded from the OS.
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path`, or from `fleetdash.toml` if present,
    /// then apply environment-variable overrides.
    ///
    /// An explicitly given file must exist; the default one may be missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is malformed, or holds
    /// an invalid network setup.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_required_file(path)?,
            None => Self::from_file(Path::new(DEFAULT_PATH))?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn from_required_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides looked up by variable name. Later writes win.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("FLEETDASH_DATABASE_URL") {
            self.storage.url = val;
        }
        if let Some(ms) = parsed(var("FLEETDASH_LATENCY_MIN_MS")) {
            self.network.latency_min_ms = ms;
        }
        if let Some(ms) = parsed(var("FLEETDASH_LATENCY_MAX_MS")) {
            self.network.latency_max_ms = ms;
        }
        if let Some(p) = parsed(var("FLEETDASH_FAILURE_PROBABILITY")) {
            self.network.failure_probability = p;
        }
        if let Some(seed) = parsed(var("FLEETDASH_SEED")) {
            self.network.seed = Some(seed);
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("FLEETDASH_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "storage url must not be empty".to_string(),
            ));
        }
        self.network_config()
            .validate()
            .map_err(|err| ConfigError::Validation(err.to_string()))
    }

    /// The simulated network setup described by `[network]`.
    #[must_use]
    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfig {
            latency_min: Duration::from_millis(self.network.latency_min_ms),
            latency_max: Duration::from_millis(self.network.latency_max_ms),
            failure_probability: self.network.failure_probability,
        }
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.storage.url
    }
}

/// Unparsable values are ignored and the file value is kept.
fn parsed<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value?.parse().ok()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:fleetdash.db?mode=rwc".to_string(),
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            latency_min_ms: 500,
            latency_max_ms: 2000,
            failure_probability: 0.1,
            seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "fleetdash=warn".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

//! Configuration structures for Taleweaver.
//!
//! This module provides TOML-based configuration for the image provider, the
//! retry policy, the proxy, the HTTP server and the exporter. The
//! configuration system supports:
//! - Bundled defaults (include_str! from taleweaver.toml)
//! - User overrides (~/.config/taleweaver/taleweaver.toml, then ./taleweaver.toml)
//! - Environment overrides (`TALEWEAVER__PROVIDER__MAX_WAIT_SECS=60`)
//!
//! The provider secret is never part of the configuration; see
//! [`API_SECRET_ENV`](crate::API_SECRET_ENV).

use crate::RetryPolicy;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use taleweaver_error::{ConfigError, TaleweaverError, TaleweaverResult};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../taleweaver.toml");

/// Shortest allowed delay between task status checks.
pub const MIN_POLL_INTERVAL_MS: u64 = 1000;

/// Image provider settings.
///
/// # Example
///
/// ```toml
/// [provider]
/// base_url = "https://api.dev.runwayml.com"
/// poll_interval_ms = 1000
/// max_wait_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the provider API, without a trailing slash
    pub base_url: String,
    /// Value sent in the `X-Runway-Version` header
    pub api_version: String,
    /// Image model identifier
    pub model: String,
    /// Output aspect ratio
    pub ratio: String,
    /// Tag attached to the reference image
    pub reference_tag: String,
    /// Delay before each task status check, in milliseconds
    pub poll_interval_ms: u64,
    /// Upper bound on waiting for a task to finish, in seconds
    pub max_wait_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dev.runwayml.com".to_string(),
            api_version: "2024-11-06".to_string(),
            model: "gen4_image".to_string(),
            ratio: "1024:1024".to_string(),
            reference_tag: "child".to_string(),
            poll_interval_ms: MIN_POLL_INTERVAL_MS,
            max_wait_secs: 120,
        }
    }
}

impl ProviderConfig {
    /// Delay before each status check.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Deadline for the polling phase of one task.
    pub fn max_wait(&self) -> Duration {
        Duration::from_secs(self.max_wait_secs)
    }
}

/// Retry settings for transient provider failures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: usize,
    /// Fixed delay between attempts, in milliseconds
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_ms: 2000,
        }
    }
}

impl RetryConfig {
    /// Build the runtime retry policy.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.backoff_ms))
    }
}

/// Proxy client settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Full URL of the proxy endpoint; direct provider access when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Style hint sent with every proxy request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            url: None,
            style: Some("whimsical_cartoon".to_string()),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Document export settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Timeout for fetching one page illustration, in seconds
    pub fetch_timeout_secs: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 30,
        }
    }
}

impl ExportConfig {
    /// Timeout for fetching one page illustration.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Complete Taleweaver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TaleweaverConfig {
    /// Image provider settings
    pub provider: ProviderConfig,
    /// Retry settings
    pub retry: RetryConfig,
    /// Proxy client settings
    pub proxy: ProxyConfig,
    /// HTTP server settings
    pub server: ServerConfig,
    /// Export settings
    pub export: ExportConfig,
}

impl TaleweaverConfig {
    /// Parse the bundled defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file is malformed.
    pub fn bundled() -> TaleweaverResult<Self> {
        Self::finish(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Load configuration from a specific file path.
    ///
    /// Values missing from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> TaleweaverResult<Self> {
        debug!("Loading configuration from file");

        Self::finish(Config::builder().add_source(File::from(path.as_ref())))
    }

    /// Load configuration with precedence: environment > user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (taleweaver.toml shipped with the library)
    /// 2. User config in home directory (~/.config/taleweaver/taleweaver.toml)
    /// 3. User config in current directory (./taleweaver.toml)
    /// 4. Environment variables prefixed with `TALEWEAVER__`
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use taleweaver_models::TaleweaverConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = TaleweaverConfig::load()?;
    /// println!("{}", config.provider.base_url);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> TaleweaverResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/taleweaver/taleweaver.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("taleweaver").required(false))
            .add_source(
                Environment::with_prefix("TALEWEAVER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigError::new("provider.base_url must not be empty"));
        }
        if self.provider.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            return Err(ConfigError::new(format!(
                "provider.poll_interval_ms must be at least {} (got {})",
                MIN_POLL_INTERVAL_MS, self.provider.poll_interval_ms
            )));
        }
        if self.provider.max_wait_secs == 0 {
            return Err(ConfigError::new("provider.max_wait_secs must be positive"));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::new("server.max_upload_bytes must be positive"));
        }
        if let Some(url) = &self.proxy.url
            && url.trim().is_empty()
        {
            return Err(ConfigError::new("proxy.url must not be empty when set"));
        }
        Ok(())
    }

    fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> TaleweaverResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                TaleweaverError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                TaleweaverError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }
}

//! Configuration for the Giphy MCP server
//!
//! There is no configuration file. Everything is read from the process
//! environment, and the credential itself is resolved on every outbound call
//! so a missing key surfaces as a per-invocation error rather than a startup
//! failure.

use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default upstream origin; the gateway appends `/v1<path>`
pub const DEFAULT_BASE_URL: &str = "https://api.giphy.com";

/// Environment variable holding the Giphy API key
pub const API_KEY_ENV: &str = "GIPHY_API_KEY";

/// Environment variable overriding the upstream origin
pub const BASE_URL_ENV: &str = "GIPHY_BASE_URL";

/// Environment variable overriding the minimum spacing between upstream calls
pub const RATE_LIMIT_ENV: &str = "GIPHY_RATE_LIMIT_MS";

/// Where Giphy keys are issued; shown to users who have not set one
pub const SIGNUP_URL: &str = "https://developers.giphy.com/";

/// Minimum spacing between two outbound requests
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(200);

/// Runtime configuration for the request gateway
#[derive(Debug, Clone, PartialEq)]
pub struct GiphyConfig {
    /// Upstream origin, without the `/v1` prefix
    pub base_url: Url,
    /// How the API key is obtained for each call
    pub api_key: ApiKeySource,
    /// Minimum spacing enforced by the rate limiter
    pub min_interval: Duration,
    /// User-Agent header sent upstream
    pub user_agent: String,
}

/// Source of the upstream credential
#[derive(Debug, Clone, PartialEq)]
pub enum ApiKeySource {
    /// Read the named environment variable on every call
    Env(String),
    /// Use a fixed key (embedding and tests)
    Fixed(String),
}

impl ApiKeySource {
    /// Resolve the credential. Empty values count as missing.
    pub fn resolve(&self) -> Result<String, ConfigError> {
        match self {
            ApiKeySource::Env(var) => std::env::var(var)
                .ok()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| ConfigError::MissingApiKey {
                    env_var: var.clone(),
                }),
            ApiKeySource::Fixed(key) if !key.is_empty() => Ok(key.clone()),
            ApiKeySource::Fixed(_) => Err(ConfigError::MissingApiKey {
                env_var: API_KEY_ENV.to_string(),
            }),
        }
    }
}

impl Default for GiphyConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: ApiKeySource::Env(API_KEY_ENV.to_string()),
            min_interval: DEFAULT_MIN_INTERVAL,
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

fn default_user_agent() -> String {
    format!("giphy-mcp/{}", env!("CARGO_PKG_VERSION"))
}

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{env_var} required. Free at {signup}", signup = SIGNUP_URL)]
    MissingApiKey { env_var: String },
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GiphyConfig {
    /// Build configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(base_url) = Self::get_env_var_optional(BASE_URL_ENV) {
            config = config.with_base_url(&base_url)?;
        }

        if let Some(raw) = Self::get_env_var_optional(RATE_LIMIT_ENV) {
            config.min_interval = parse_interval_ms(&raw)?;
        }

        Ok(config)
    }

    /// Replace the upstream origin after validating it
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Use a fixed credential instead of the environment
    pub fn with_api_key<S: Into<String>>(mut self, key: S) -> Self {
        self.api_key = ApiKeySource::Fixed(key.into());
        self
    }

    /// Read the credential from a different environment variable
    pub fn with_api_key_env<S: Into<String>>(mut self, var: S) -> Self {
        self.api_key = ApiKeySource::Env(var.into());
        self
    }

    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    fn get_env_var_optional(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.trim().is_empty())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(url)
}

fn parse_interval_ms(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| {
            ConfigError::InvalidConfig(format!(
                "{RATE_LIMIT_ENV} must be a whole number of milliseconds, got '{raw}'"
            ))
        })
}

//! Client configuration structures
//!
//! Deserialized from JSON or TOML by the infra loader, or built directly.
//! Everything except the credentials has a default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SpApiError};
use crate::types::{Credentials, Endpoints};

/// Default report polling budget: 60 polls, 5 seconds apart.
pub const DEFAULT_POLL_ATTEMPTS: u32 = 60;
pub const DEFAULT_POLL_DELAY_MS: u64 = 5_000;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TOKEN_REFRESH_BUFFER_SECS: u64 = 300;
pub const DEFAULT_USER_AGENT: &str =
    concat!("spgate/", env!("CARGO_PKG_VERSION"), " (Language=Rust)");

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpApiConfig {
    pub credentials: Credentials,
    /// Replaces the region's API host (proxies, local mocks)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_override: Option<String>,
    /// Replaces the LWA token endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url_override: Option<String>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub polling: PollingPolicy,
    #[serde(default)]
    pub token: TokenConfig,
}

impl SpApiConfig {
    /// Configuration with defaults for everything but the credentials.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint_override: None,
            token_url_override: None,
            http: HttpConfig::default(),
            polling: PollingPolicy::default(),
            token: TokenConfig::default(),
        }
    }

    /// Validate the credentials and resolve endpoints, applying overrides.
    ///
    /// # Errors
    /// Returns `SpApiError::Config` for blank secrets, malformed override
    /// URLs or a zero HTTP timeout.
    pub fn resolve_endpoints(&self) -> Result<Endpoints> {
        self.credentials.validate()?;
        if self.http.timeout_secs == 0 {
            return Err(SpApiError::Config("http.timeout_secs must be greater than zero".into()));
        }

        let mut endpoints = self.credentials.endpoints();
        if let Some(base) = self.endpoint_override.as_deref() {
            endpoints = endpoints.with_api_base(base)?;
        }
        if let Some(url) = self.token_url_override.as_deref() {
            endpoints = endpoints.with_token_url(url)?;
        }
        Ok(endpoints)
    }
}

/// Transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: default_timeout_secs(), user_agent: default_user_agent() }
    }
}

/// Report status polling budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingPolicy {
    #[serde(default = "default_poll_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_poll_delay_ms")]
    pub delay_ms: u64,
}

impl PollingPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX) }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for PollingPolicy {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_POLL_ATTEMPTS, delay_ms: DEFAULT_POLL_DELAY_MS }
    }
}

/// Token cache settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    #[serde(default = "default_refresh_buffer_secs")]
    pub refresh_buffer_secs: u64,
}

impl TokenConfig {
    pub fn refresh_buffer(&self) -> Duration {
        Duration::from_secs(self.refresh_buffer_secs)
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self { refresh_buffer_secs: default_refresh_buffer_secs() }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_poll_attempts() -> u32 {
    DEFAULT_POLL_ATTEMPTS
}

fn default_poll_delay_ms() -> u64 {
    DEFAULT_POLL_DELAY_MS
}

fn default_refresh_buffer_secs() -> u64 {
    DEFAULT_TOKEN_REFRESH_BUFFER_SECS
}

//! Session configuration.
//!
//! Read once at startup from the environment; every knob has a default so an
//! empty environment yields a working local setup.

use crate::{Error, ErrorContext, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

const ENV_BASE_URL: &str = "VOICE_STUDIO_API_URL";
const ENV_POLL_INTERVAL_MS: &str = "VOICE_STUDIO_POLL_INTERVAL_MS";
const ENV_CONNECT_TIMEOUT_SECS: &str = "VOICE_STUDIO_CONNECT_TIMEOUT_SECS";
const ENV_POOL_MAX_IDLE: &str = "VOICE_STUDIO_HTTP_POOL_MAX_IDLE_PER_HOST";
const ENV_PROXY_URL: &str = "VOICE_STUDIO_PROXY_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioConfig {
    /// Backend base URL, without trailing slash.
    pub base_url: String,
    /// Period between progress polls while a job runs.
    pub poll_interval: Duration,
    pub connect_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub proxy_url: Option<String>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            connect_timeout: Duration::from_secs(10),
            pool_max_idle_per_host: 8,
            proxy_url: None,
        }
    }
}

impl StudioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `VOICE_STUDIO_*` environment variables.
    ///
    /// Unparsable numbers fall back to their defaults; only an invalid base
    /// URL is an error.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let base_url = env::var(ENV_BASE_URL)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.base_url);

        let poll_interval = env::var(ENV_POLL_INTERVAL_MS)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(|ms| Duration::from_millis(ms.max(1)))
            .unwrap_or(defaults.poll_interval);

        let connect_timeout = env::var(ENV_CONNECT_TIMEOUT_SECS)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(|secs| Duration::from_secs(secs.max(1)))
            .unwrap_or(defaults.connect_timeout);

        let pool_max_idle_per_host = env::var(ENV_POOL_MAX_IDLE)
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(defaults.pool_max_idle_per_host);

        let proxy_url = env::var(ENV_PROXY_URL)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let config = Self {
            base_url,
            poll_interval,
            connect_timeout,
            pool_max_idle_per_host,
            proxy_url,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_proxy_url(mut self, proxy: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy.into());
        self
    }

    /// Check that the base URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let invalid = |details: String| {
            Error::configuration_with_context(
                "invalid backend base URL",
                ErrorContext::new()
                    .with_field_path(ENV_BASE_URL)
                    .with_details(details)
                    .with_source("config"),
            )
        };
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| invalid(format!("{}: {}", self.base_url, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("unsupported scheme '{}'", other))),
        }
    }
}

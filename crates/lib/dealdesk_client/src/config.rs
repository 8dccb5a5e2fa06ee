//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Default API origin when `DEALDESK_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8700/api";

/// Configuration for [`crate::ApiClient`].
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ClientConfig {
    pub(crate) base_url: Url,
    pub(crate) timeout: Option<Duration>,
    pub(crate) connect_timeout: Duration,
    pub(crate) user_agent: String,
}

impl ClientConfig {
    /// Create a configuration for the given API origin.
    ///
    /// No overall request timeout is set; a hung request waits on transport
    /// defaults unless [`ClientConfig::with_timeout`] is used.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: normalize_base(base_url),
            timeout: None,
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("dealdesk_client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Parse the base URL from a string.
    pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "not a base URL".into(),
            });
        }
        Ok(Self::new(url))
    }

    /// Reads configuration from environment variables.
    ///
    /// | Variable                | Default                      |
    /// |-------------------------|------------------------------|
    /// | `DEALDESK_API_URL`      | `http://localhost:8700/api`  |
    /// | `DEALDESK_TIMEOUT_SECS` | unset (no client timeout)    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = std::env::var("DEALDESK_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let mut config = Self::parse(&base)?;
        if let Ok(raw) = std::env::var("DEALDESK_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidVar {
                var: "DEALDESK_TIMEOUT_SECS",
                value: raw.clone(),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Set an overall per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the TCP connect timeout (default: 10s).
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// API origin every path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Resolve an endpoint path against the base URL.
    ///
    /// The base path (e.g. `/api`) is kept: `"/auth/login/"` on
    /// `http://host/api` becomes `http://host/api/auth/login/`.
    pub fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }
}

/// Drop query/fragment and trailing slash so joining stays predictable.
fn normalize_base(mut url: Url) -> Url {
    url.set_query(None);
    url.set_fragment(None);
    let trimmed = url.path().trim_end_matches('/').to_string();
    url.set_path(&trimmed);
    url
}

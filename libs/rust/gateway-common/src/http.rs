//! HTTP client configuration and building.
//!
//! No request timeout is applied unless one is configured.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Whole-request timeout (default: none)
    pub timeout: Option<Duration>,
    /// Connection timeout (default: none)
    pub connect_timeout: Option<Duration>,
    /// Pool idle timeout (default: 90s)
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections per host (default: 4)
    pub pool_max_idle_per_host: usize,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 4,
            user_agent: concat!("crypto-gateway/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    /// Set a whole-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Build a configured HTTP client.
///
/// Creates a reqwest client with rustls TLS and connection pooling. Timeouts
/// are only applied when set on the config.
///
/// # Errors
///
/// Returns an error if the client cannot be built (e.g., TLS initialization fails).
///
/// # Examples
///
/// ```
/// use gateway_common::{HttpConfig, build_http_client};
/// use std::time::Duration;
///
/// let config = HttpConfig::default().with_connect_timeout(Duration::from_secs(2));
/// let _client = build_http_client(&config).expect("Failed to build client");
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut builder = ClientBuilder::new()
        .pool_idle_timeout(config.pool_idle_timeout)
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .user_agent(&config.user_agent)
        .use_rustls_tls();

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(timeout) = config.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }

    tracing::debug!(
        timeout = ?config.timeout,
        connect_timeout = ?config.connect_timeout,
        "Building HTTP client"
    );
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_timeouts() {
        let config = HttpConfig::default();
        assert!(config.timeout.is_none());
        assert!(config.connect_timeout.is_none());
        assert!(config.user_agent.starts_with("crypto-gateway/"));
    }

    #[test]
    fn test_config_builder() {
        let config = HttpConfig::default()
            .with_timeout(Duration::from_secs(60))
            .with_connect_timeout(Duration::from_secs(3))
            .with_user_agent("test-agent");

        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(3)));
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_build_client() {
        let config = HttpConfig::default().with_timeout(Duration::from_secs(5));
        assert!(build_http_client(&config).is_ok());
    }
}

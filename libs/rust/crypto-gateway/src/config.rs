//! Gateway client configuration.

use crate::error::{GatewayError, GatewayResult};
use gateway_common::HttpConfig;
use std::time::Duration;
use url::Url;

/// Default backend API base.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Gateway client configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// API base, e.g. `http://localhost:8080/api`
    pub base_url: String,
    /// Whole-request timeout; none means the transport decides
    pub timeout: Option<Duration>,
    /// Connect timeout
    pub connect_timeout: Option<Duration>,
    /// User agent
    pub user_agent: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            connect_timeout: None,
            user_agent: None,
        }
    }
}

impl GatewayConfig {
    /// Create a configuration for `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Load from the environment, reading `.env` first when present.
    ///
    /// Reads `CRYPTO_GATEWAY_URL`, `CRYPTO_GATEWAY_TIMEOUT_SECS` and
    /// `CRYPTO_GATEWAY_CONNECT_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidConfig`] for a non-numeric timeout or
    /// a configuration that fails [`GatewayConfig::validate`].
    pub fn from_env() -> GatewayResult<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(url) = std::env::var("CRYPTO_GATEWAY_URL") {
            config.base_url = url;
        }
        config.timeout = parse_secs("CRYPTO_GATEWAY_TIMEOUT_SECS")?;
        config.connect_timeout = parse_secs("CRYPTO_GATEWAY_CONNECT_TIMEOUT_SECS")?;

        config.validate()?;
        Ok(config)
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidConfig`] for an unparsable or non-HTTP
    /// base URL, or a zero timeout.
    pub fn validate(&self) -> GatewayResult<()> {
        self.parsed_base_url()?;
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(GatewayError::InvalidConfig("timeout must be non-zero".to_string()));
        }
        if self.connect_timeout.is_some_and(|t| t.is_zero()) {
            return Err(GatewayError::InvalidConfig(
                "connect timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL parsed and checked for an HTTP scheme.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidConfig`] when the URL is unusable.
    pub fn parsed_base_url(&self) -> GatewayResult<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| GatewayError::InvalidConfig(format!("base URL {}: {e}", self.base_url)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(GatewayError::InvalidConfig(format!(
                "base URL scheme must be http or https, got {other}"
            ))),
        }
    }

    /// HTTP client settings derived from this configuration.
    #[must_use]
    pub fn http_config(&self) -> HttpConfig {
        let mut http = HttpConfig::default();
        if let Some(timeout) = self.timeout {
            http = http.with_timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            http = http.with_connect_timeout(timeout);
        }
        if let Some(agent) = &self.user_agent {
            http = http.with_user_agent(agent.clone());
        }
        http
    }
}

fn parse_secs(var: &str) -> GatewayResult<Option<Duration>> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|e| GatewayError::InvalidConfig(format!("{var}: {e}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert!(config.timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(GatewayConfig::new("not a url").validate().is_err());
        let err = GatewayConfig::new("ftp://backend/api").validate().unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = GatewayConfig::default().with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_http_config_mapping() {
        let http = GatewayConfig::default()
            .with_timeout(Duration::from_secs(9))
            .with_user_agent("workbench")
            .http_config();
        assert_eq!(http.timeout, Some(Duration::from_secs(9)));
        assert!(http.connect_timeout.is_none());
        assert_eq!(http.user_agent, "workbench");
    }
}

//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Tracing configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub log_level: String,
    /// Whether to output JSON format
    pub json_output: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_level: "info,crypto_gateway=debug".to_string(),
            json_output: false,
        }
    }
}

impl TracingConfig {
    /// Set the default filter directive.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON output.
    #[must_use]
    pub const fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Returns `false` when a global
/// subscriber was already installed, which happens when several tests in
/// one binary initialise tracing.
pub fn init_tracing(config: &TracingConfig) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.log_level, "info,crypto_gateway=debug");
        assert!(!config.json_output);
    }

    #[test]
    fn test_config_builder() {
        let config = TracingConfig::default()
            .with_log_level("debug")
            .with_json_output();

        assert_eq!(config.log_level, "debug");
        assert!(config.json_output);
    }

    #[test]
    fn test_second_init_is_rejected() {
        let config = TracingConfig::default().with_log_level("warn");
        let _ = init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}

//! Gateway error types using thiserror 2.0.
//!
//! Every failure of a single user action lands in one of three classes:
//! validation (never sent), backend-reported (`status != 0`) or transport
//! (connection, HTTP status, malformed body). The class decides which text
//! a form shows.

use thiserror::Error;

/// Gateway errors.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// A required field was empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A parameter was outside the range the backend accepts
    #[error("Invalid {field}: {reason}")]
    InvalidParameter {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// The algorithm does not offer this operation
    #[error("{algorithm} does not support {operation}")]
    Unsupported {
        /// Algorithm display name
        algorithm: &'static str,
        /// Operation name
        operation: &'static str,
    },

    /// Backend answered with a non-zero status
    #[error("{message}")]
    Backend {
        /// Backend status code
        status: i64,
        /// Backend message, verbatim
        message: String,
    },

    /// Backend could not be reached
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Backend answered with a non-2xx HTTP status
    #[error("Status {status}: {message}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Message from the body, or the raw body
        message: String,
    },

    /// Success envelope lacked the field the operation reads
    #[error("Response is missing field `{0}`")]
    MalformedResponse(&'static str),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The form already has a request in flight
    #[error("A request is already in progress")]
    Busy,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Coarse failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before dispatch
    Validation,
    /// Backend reported `status != 0`
    Backend,
    /// Network, HTTP or parse failure
    Transport,
    /// Local state prevented the action
    Local,
}

impl GatewayError {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) | Self::InvalidParameter { .. } | Self::Unsupported { .. } => {
                ErrorKind::Validation
            }
            Self::Backend { .. } => ErrorKind::Backend,
            Self::Unavailable(_)
            | Self::HttpStatus { .. }
            | Self::MalformedResponse(_)
            | Self::Serialization(_)
            | Self::Http(_) => ErrorKind::Transport,
            Self::Busy | Self::InvalidConfig(_) => ErrorKind::Local,
        }
    }

    /// Whether the request never left the client.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation)
    }

    /// Text a form shows for this failure.
    ///
    /// Backend failures surface the backend message untouched; everything
    /// else uses its display text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Create a backend failure.
    #[must_use]
    pub fn backend(status: i64, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("backend returned status {status}"));
        Self::Backend { status, message }
    }

    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

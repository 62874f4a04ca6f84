//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Weblate API operations.
///
/// Every transport and provider operation reports exactly one of three
/// kinds, classified by HTTP status family:
/// - `Client` — the request was answered with a 4xx status (bad slug,
///   expired or invalid token, not found)
/// - `Server` — the request was answered with a 5xx status
/// - `Processing` — no usable response was obtained: network or I/O
///   failure, malformed JSON, or a body missing an expected field
///
/// Neither the transport nor the provider retries; retry policy is a
/// caller concern.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum WeblateError {
    /// The request was rejected with a 4xx status
    #[error("client error (HTTP {status}): {detail}")]
    Client {
        /// HTTP status code in the 4xx range
        status: u16,
        /// Response body text, passed through for diagnostics
        detail: String,
    },

    /// The request failed server-side with a 5xx status
    #[error("server error (HTTP {status}): {detail}")]
    Server {
        /// HTTP status code in the 5xx range
        status: u16,
        /// Response body text, passed through for diagnostics
        detail: String,
    },

    /// No usable response: network failure, malformed body, or a
    /// missing expected field
    #[error("processing error: {0}")]
    Processing(String),
}

impl WeblateError {
    /// Classify a non-success HTTP status into an error.
    ///
    /// 4xx maps to `Client`, 5xx to `Server`. Anything else (1xx/3xx
    /// leaking through redirect handling) is a protocol violation for
    /// this API and maps to `Processing`.
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        match status {
            400..=499 => Self::Client { status, detail },
            500..=599 => Self::Server { status, detail },
            _ => Self::Processing(format!("unexpected HTTP status {status}: {detail}")),
        }
    }

    /// HTTP status carried by this error, if it was derived from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Processing(_) => None,
        }
    }
}

/// Result type alias for Weblate operations
pub type Result<T> = std::result::Result<T, WeblateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_client_statuses() {
        let err = WeblateError::from_status(404, "not found");
        assert!(matches!(err, WeblateError::Client { status: 404, .. }));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn classifies_server_statuses() {
        let err = WeblateError::from_status(503, "unavailable");
        assert!(matches!(err, WeblateError::Server { status: 503, .. }));
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn out_of_family_status_is_processing() {
        let err = WeblateError::from_status(301, "moved");
        assert!(matches!(err, WeblateError::Processing(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn display_includes_status_and_detail() {
        let err = WeblateError::from_status(401, "invalid token");
        assert_eq!(err.to_string(), "client error (HTTP 401): invalid token");
    }
}

//! # Common Error Types
//!
//! Consolidated error handling for the IPL client.
//!
//! This module provides a centralized error type [`AppError`] that covers every
//! failure the client can run into, from transport errors to form validation.
//!
//! ## Error Categories
//!
//! - **Network / Timeout**: no usable response from the backend
//! - **Http**: the backend answered with a non-2xx status
//! - **Decode**: a 2xx body did not match the expected shape
//! - **Validation**: input rejected before it was sent
//! - **Session / Config**: missing login, corrupt token file, bad environment
//! - **Io**: local file access (session file, CSV export)
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use ipl_client::core::error::AppError;
//!
//! fn validate_amount(amount: i64) -> Result<i64, AppError> {
//!     if amount <= 0 {
//!         return Err(AppError::Validation("Nominal harus lebih dari 0".to_string()));
//!     }
//!     Ok(amount)
//! }
//! ```
//!
//! ## Error Conversion
//!
//! - `reqwest::Error` → `Timeout` / `Network` / `Decode`
//! - `serde_json::Error` → `Decode`
//! - `std::io::Error` → `Io`
//!
//! User-facing text for an error is produced by [`crate::feedback`], not here.

use std::collections::BTreeMap;

use reqwest::StatusCode;
use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request never produced a response (DNS, refused connection, TLS).
    #[error("Network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The backend answered with a non-success status.
    ///
    /// `message` is the backend's own message when the error body parsed,
    /// the canonical reason phrase otherwise. `field_errors` carries the
    /// per-field messages of a validation failure.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
        field_errors: BTreeMap<String, Vec<String>>,
    },

    /// A success body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Input rejected locally before any request was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Session persistence or missing-login problems.
    #[error("Session error: {0}")]
    Session(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local file access failed.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Convenience type alias for `Result<T, AppError>`.
///
/// ```rust
/// use ipl_client::core::error::Result;
///
/// fn operation() -> Result<String> {
///     Ok("success".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Build an HTTP error from a bare status with no parsed body.
    pub fn from_status(status: StatusCode) -> Self {
        AppError::Http {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string(),
            field_errors: BTreeMap::new(),
        }
    }

    /// HTTP status code, when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether retrying the same request later could succeed.
    ///
    /// Transport failures, timeouts, 408, 429 and 5xx are transient.
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::Network(_) | AppError::Timeout(_) => true,
            AppError::Http { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Whether the error means the session is no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Http { status: 401, .. })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else if err.is_decode() {
            AppError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::from_status(status)
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_uses_reason_phrase() {
        let err = AppError::from_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }

    #[test]
    fn test_transient_classification() {
        assert!(AppError::Network("refused".into()).is_transient());
        assert!(AppError::Timeout("10s".into()).is_transient());
        assert!(AppError::from_status(StatusCode::TOO_MANY_REQUESTS).is_transient());
        assert!(AppError::from_status(StatusCode::BAD_GATEWAY).is_transient());
        assert!(!AppError::from_status(StatusCode::NOT_FOUND).is_transient());
        assert!(!AppError::Validation("x".into()).is_transient());
    }

    #[test]
    fn test_unauthorized() {
        assert!(AppError::from_status(StatusCode::UNAUTHORIZED).is_unauthorized());
        assert!(!AppError::from_status(StatusCode::FORBIDDEN).is_unauthorized());
        assert!(AppError::Session("no token".into()).status().is_none());
    }

    #[test]
    fn test_json_error_converts_to_decode() {
        let err: AppError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn test_io_error_converts_to_io() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into();
        assert!(matches!(err, AppError::Io(_)));
        assert!(!err.is_transient());
    }
}

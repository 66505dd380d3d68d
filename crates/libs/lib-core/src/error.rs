//! # Centralized Error Handling
//!
//! This module defines the workspace-wide error type [`AppError`]. Every client,
//! the fee calculator and the state store return it, so a single `?` chain can
//! carry an HTTP failure from the transport layer up to the UI notifier.
//!
//! ## Error Categories
//!
//! 1. **Transport** - the request did not produce a usable response
//!    - [`Http`](AppError::Http) → non-2xx status, carries status and body text
//!    - [`Network`](AppError::Network) → connection, DNS or timeout failure
//!    - [`Cancelled`](AppError::Cancelled) → aborted by its cancellation token
//!
//! 2. **Application** - the service answered with an error payload
//!    - [`Rpc`](AppError::Rpc) → JSON-RPC `error` or GraphQL `errors`
//!    - [`Decoding`](AppError::Decoding) → response body did not match the schema
//!    - [`NotFound`](AppError::NotFound) → expected entry missing from a response
//!
//! 3. **Configuration / input** - detected before any I/O
//!    - [`Config`](AppError::Config) → unconfigured endpoint or bad environment
//!    - [`MissingInput`](AppError::MissingInput) → absent fee inputs
//!    - [`InvalidInput`](AppError::InvalidInput) → unparseable asset, bad address
//!
//! ## UI Mapping
//!
//! [`AppError::is_transient`] splits errors into toast notifications (the user
//! can retry) and error-boundary failures. Nothing in the workspace retries on
//! its own.
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_fee(fee: Option<u128>) -> Result<u128> {
//!     fee.ok_or_else(|| AppError::MissingInput("native outbound fee".to_string()))
//! }
//!
//! assert!(require_fee(None).is_err());
//! ```

use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Workspace-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Non-2xx HTTP response.
    ///
    /// The message embeds both the status code and the response body so a
    /// toast shows what the service said.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Request never produced a response (connection refused, timeout, DNS).
    #[error("Network error: {0}")]
    Network(String),

    /// JSON-RPC or GraphQL application error, carrying the provider's message.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Missing or invalid configuration, e.g. no RPC endpoint for a chain.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required computation input was not supplied.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Input failed validation or parsing.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested entry is absent from an otherwise valid response.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body could not be decoded.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// The request was aborted through its cancellation token.
    #[error("Request cancelled")]
    Cancelled,

    /// Unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for transport errors, `None` otherwise.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether a manual retry may succeed. Transient errors are shown as
    /// toasts; the rest surface through the page-level error boundary.
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::Http { status, .. } => *status == 429 || *status >= 500,
            AppError::Network(_) | AppError::Rpc(_) | AppError::Cancelled => true,
            AppError::NotFound(_) => true,
            AppError::Config(_)
            | AppError::MissingInput(_)
            | AppError::InvalidInput(_)
            | AppError::Decoding(_)
            | AppError::Internal(_) => false,
        }
    }

    /// Short user-facing message. Internal details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Http { status, .. } if *status >= 500 => {
                "Service temporarily unavailable".to_string()
            }
            AppError::Http { status, .. } => format!("Request failed ({})", status),
            AppError::Network(_) => "Network unavailable, please retry".to_string(),
            AppError::Rpc(msg) => msg.clone(),
            AppError::NotFound(msg) | AppError::InvalidInput(msg) | AppError::MissingInput(msg) => {
                msg.clone()
            }
            AppError::Cancelled => "Request cancelled".to_string(),
            AppError::Config(_) | AppError::Decoding(_) | AppError::Internal(_) => {
                "An internal error occurred".to_string()
            }
        }
    }

    /// Whether this error is a cancellation, which callers usually swallow.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Cancelled)
    }
}

/// Convert `reqwest::Error` to `AppError`.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs may embed provider keys
        let err = err.without_url();
        if err.is_decode() {
            AppError::Decoding(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::Http {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            AppError::Network(err.to_string())
        }
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decoding(format!("JSON error: {}", err))
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message_embeds_status_and_body() {
        let err = AppError::Http {
            status: 404,
            body: "pool not found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: pool not found");
        assert_eq!(err.status_code(), Some(404));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_transient_classification() {
        assert!(AppError::Http { status: 503, body: String::new() }.is_transient());
        assert!(AppError::Network("refused".into()).is_transient());
        assert!(!AppError::Config("no endpoint".into()).is_transient());
        assert!(!AppError::MissingInput("gas pool".into()).is_transient());
    }

    #[test]
    fn test_user_message_hides_internal_details() {
        let err = AppError::Config("INFURA_ETH_URL=secret".into());
        assert_eq!(err.user_message(), "An internal error occurred");
        let err = AppError::Rpc("execution reverted".into());
        assert_eq!(err.user_message(), "execution reverted");
    }

    #[test]
    fn test_json_error_converts_to_decoding() {
        let err: AppError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, AppError::Decoding(_)));
    }
}

//! Client error types.

use thiserror::Error;

/// Errors that can occur when calling the relay.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Relay answered with a non-success status
    #[error("relay error (status {status}): {message}")]
    Relay { status: u16, message: String },

    /// Relay answered 200 without reply text
    #[error("relay response has no reply text")]
    EmptyReply,
}

/// Errors from changing the session's selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unknown subject '{subject}' in category '{category}'")]
    UnknownSubject {
        category: &'static str,
        subject: String,
    },
}

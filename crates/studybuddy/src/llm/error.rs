//! LLM error types.

use thiserror::Error;

/// Errors that can occur when making LLM API calls.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request failed
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned an error response
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not JSON
    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// Response was JSON but carried no reply text
    #[error("no reply text in provider response")]
    Extraction { payload: String },
}

//! HTTP client for the relay's `/api/chat` endpoint.

use reqwest::Client;
use studybuddy_types::{ConversationRequest, ErrorReply};

use crate::error::ClientError;

/// Sends conversation requests to a relay.
#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    pub const DEFAULT_URL: &'static str = "http://localhost:8080";

    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the request and return the reply text.
    pub async fn chat(&self, request: &ConversationRequest) -> Result<String, ClientError> {
        let url = format!("{}/api/chat", self.base_url);

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorReply>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ClientError::Relay {
                status: status.as_u16(),
                message,
            });
        }

        let body: serde_json::Value = response.json().await?;
        match body.get("text").and_then(|t| t.as_str()) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(ClientError::EmptyReply),
        }
    }
}

//! LLM provider trait, provider selection, and shared HTTP plumbing.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use studybuddy_types::ConversationRequest;
use tracing::info;

use super::anthropic::AnthropicProvider;
use super::error::LLMError;
use super::gemini::GeminiProvider;
use super::openai::OpenAIProvider;
use crate::config::{ConfigError, ProviderConfig};

/// Trait for LLM providers with different API formats.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Which wire format this provider speaks.
    fn kind(&self) -> ProviderKind;

    /// Send the conversation upstream and return the reply text.
    async fn chat(&self, request: &ConversationRequest) -> Result<String, LLMError>;
}

/// Supported upstream wire formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// `system` + `messages`
    #[default]
    Anthropic,
    /// `system_instruction` + `contents`
    Gemini,
    /// `messages` with a leading system message
    OpenAI,
}

impl ProviderKind {
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "claude-sonnet-4-20250514",
            ProviderKind::Gemini => "gemini-1.5-flash",
            ProviderKind::OpenAI => "gpt-4o-mini",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "https://api.anthropic.com",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com",
            ProviderKind::OpenAI => "https://api.openai.com/v1",
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAI => "OPENAI_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAI => "openai",
        };
        f.write_str(name)
    }
}

/// Generation settings shared by all adapters.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

impl ModelSettings {
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            model: config.model().to_string(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// Build the adapter selected by `config`. Fails if no credential is available.
pub fn build_provider(
    config: &ProviderConfig,
    client: Client,
) -> Result<Arc<dyn LLMProvider>, ConfigError> {
    let api_key = config.resolve_api_key()?;
    let base_url = config.base_url().to_string();
    let settings = ModelSettings::from_config(config);

    info!(
        provider = %config.kind,
        model = %settings.model,
        base_url = %base_url,
        "Registered LLM provider"
    );

    let provider: Arc<dyn LLMProvider> = match config.kind {
        ProviderKind::Anthropic => {
            Arc::new(AnthropicProvider::new(client, api_key, base_url, settings))
        }
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(client, api_key, base_url, settings)),
        ProviderKind::OpenAI => Arc::new(OpenAIProvider::new(client, api_key, base_url, settings)),
    };
    Ok(provider)
}

// --- Shared plumbing ---

/// Send a prepared request and parse the body as JSON.
///
/// Non-2xx statuses become [`LLMError::Api`]; a non-JSON body becomes
/// [`LLMError::Parse`].
pub(super) async fn send_json(builder: RequestBuilder) -> Result<serde_json::Value, LLMError> {
    let response = builder.send().await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        return Err(LLMError::Api { status, message });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Pull the reply text out of `payload` by deserializing it as `T`.
///
/// Missing or empty text yields [`LLMError::Extraction`] carrying the
/// serialized payload.
pub(super) fn extract_text<T, F>(payload: serde_json::Value, text: F) -> Result<String, LLMError>
where
    T: DeserializeOwned,
    F: FnOnce(T) -> Option<String>,
{
    let reply = T::deserialize(&payload)
        .ok()
        .and_then(text)
        .filter(|t| !t.is_empty());

    reply.ok_or_else(|| LLMError::Extraction {
        payload: payload.to_string(),
    })
}

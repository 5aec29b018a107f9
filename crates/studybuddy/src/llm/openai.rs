//! OpenAI-compatible provider.
//!
//! Works with OpenAI and any API that accepts the `chat/completions` shape.

use async_trait::async_trait;
use reqwest::Client;
use studybuddy_types::ConversationRequest;

use super::error::LLMError;
use super::provider::{LLMProvider, ModelSettings, ProviderKind, extract_text, send_json};

/// OpenAI-compatible provider (`/chat/completions`).
pub struct OpenAIProvider {
    client: Client,
    base_url: String,
    api_key: String,
    settings: ModelSettings,
}

impl OpenAIProvider {
    #[must_use]
    pub fn new(client: Client, api_key: String, base_url: String, settings: ModelSettings) -> Self {
        Self {
            client,
            base_url,
            api_key,
            settings,
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    async fn chat(&self, request: &ConversationRequest) -> Result<String, LLMError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = to_request(request, &self.settings);

        let builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body);

        let payload = send_json(builder).await?;
        extract_text(payload, from_response)
    }
}

// --- Request/Response types ---

#[derive(serde::Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(serde::Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(serde::Deserialize)]
struct Response {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(serde::Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(serde::Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

// --- Conversions ---

fn to_request<'a>(request: &'a ConversationRequest, settings: &'a ModelSettings) -> Request<'a> {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);

    if !request.instruction.is_empty() {
        messages.push(RequestMessage {
            role: "system",
            content: &request.instruction,
        });
    }

    messages.extend(request.messages.iter().map(|msg| RequestMessage {
        role: msg.role.as_str(),
        content: &msg.content,
    }));

    Request {
        model: &settings.model,
        messages,
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    }
}

fn from_response(response: Response) -> Option<String> {
    response.choices.into_iter().next()?.message.content
}

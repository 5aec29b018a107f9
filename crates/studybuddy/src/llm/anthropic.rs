//! Anthropic provider with native API format.

use async_trait::async_trait;
use reqwest::Client;
use studybuddy_types::ConversationRequest;

use super::error::LLMError;
use super::provider::{LLMProvider, ModelSettings, ProviderKind, extract_text, send_json};

/// Anthropic provider (`/v1/messages`).
pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    api_key: String,
    api_version: String,
    settings: ModelSettings,
}

impl AnthropicProvider {
    pub const DEFAULT_API_VERSION: &'static str = "2023-06-01";

    #[must_use]
    pub fn new(client: Client, api_key: String, base_url: String, settings: ModelSettings) -> Self {
        Self {
            client,
            base_url,
            api_key,
            api_version: Self::DEFAULT_API_VERSION.to_string(),
            settings,
        }
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn chat(&self, request: &ConversationRequest) -> Result<String, LLMError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = to_request(request, &self.settings);

        let builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body);

        let payload = send_json(builder).await?;
        extract_text(payload, from_response)
    }
}

// --- Request/Response types ---

#[derive(serde::Serialize)]
struct Request<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<RequestMessage<'a>>,
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
    content: Vec<Content>,
}

#[derive(serde::Deserialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: Option<String>,
}

// --- Conversions ---

fn to_request<'a>(request: &'a ConversationRequest, settings: &'a ModelSettings) -> Request<'a> {
    let system = Some(request.instruction.as_str()).filter(|s| !s.is_empty());

    let messages = request
        .messages
        .iter()
        .map(|msg| RequestMessage {
            role: msg.role.as_str(),
            content: &msg.content,
        })
        .collect();

    Request {
        model: &settings.model,
        max_tokens: settings.max_tokens,
        system,
        messages,
        temperature: settings.temperature,
    }
}

fn from_response(response: Response) -> Option<String> {
    let text = response
        .content
        .into_iter()
        .filter(|c| c.content_type == "text")
        .filter_map(|c| c.text)
        .collect::<Vec<_>>()
        .join("");
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use studybuddy_types::Message;

    fn settings() -> ModelSettings {
        ModelSettings {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 1000,
            temperature: None,
        }
    }

    #[test]
    fn test_request_shape() {
        let request = ConversationRequest {
            instruction: "tutor mode".to_string(),
            messages: vec![
                Message::user("What is photosynthesis?"),
                Message::assistant("Plants make food from light."),
                Message::user("Why are leaves green?"),
            ],
        };
        let settings = settings();

        let json = serde_json::to_value(to_request(&request, &settings)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "claude-sonnet-4-20250514",
                "max_tokens": 1000,
                "system": "tutor mode",
                "messages": [
                    {"role": "user", "content": "What is photosynthesis?"},
                    {"role": "assistant", "content": "Plants make food from light."},
                    {"role": "user", "content": "Why are leaves green?"}
                ]
            })
        );
    }

    #[test]
    fn test_empty_instruction_omits_system() {
        let request = ConversationRequest {
            instruction: String::new(),
            messages: vec![Message::user("Hi")],
        };
        let settings = ModelSettings {
            temperature: Some(0.5),
            ..settings()
        };

        let json = serde_json::to_value(to_request(&request, &settings)).unwrap();
        assert!(json.get("system").is_none());
        assert_eq!(json["temperature"], 0.5);
    }

    #[test]
    fn test_roles_round_trip() {
        let request = ConversationRequest {
            instruction: String::new(),
            messages: vec![
                Message::assistant("a"),
                Message::user("b"),
                Message::assistant("c"),
            ],
        };
        let settings = settings();

        let json = serde_json::to_value(to_request(&request, &settings)).unwrap();
        let back: Vec<Message> = serde_json::from_value(json["messages"].clone()).unwrap();
        assert_eq!(back, request.messages);
    }

    #[test]
    fn test_extract_joins_text_blocks() {
        let payload = serde_json::json!({
            "id": "msg_01",
            "type": "message",
            "content": [
                {"type": "text", "text": "Photosynthesis is "},
                {"type": "tool_use", "id": "t1", "name": "x", "input": {}},
                {"type": "text", "text": "how plants eat."}
            ],
            "stop_reason": "end_turn"
        });

        let text = extract_text(payload, from_response).unwrap();
        assert_eq!(text, "Photosynthesis is how plants eat.");
    }

    #[test]
    fn test_extract_without_text_blocks_fails() {
        let payload = serde_json::json!({"type": "error", "error": {"message": "overloaded"}});
        let err = extract_text(payload, from_response).unwrap_err();
        match err {
            LLMError::Extraction { payload } => assert!(payload.contains("overloaded")),
            other => panic!("unexpected error: {other}"),
        }
    }
}

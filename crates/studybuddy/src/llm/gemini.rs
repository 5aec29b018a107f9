//! Gemini provider (`generateContent`).
//!
//! Gemini names the assistant turn `model` and wants the instruction in a
//! separate `system_instruction` block rather than in the turn list.

use async_trait::async_trait;
use reqwest::Client;
use studybuddy_types::{ConversationRequest, Role};

use super::error::LLMError;
use super::provider::{LLMProvider, ModelSettings, ProviderKind, extract_text, send_json};

pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    settings: ModelSettings,
}

impl GeminiProvider {
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
impl LLMProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn chat(&self, request: &ConversationRequest) -> Result<String, LLMError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.settings.model
        );
        let body = to_request(request, &self.settings);

        let builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body);

        let payload = send_json(builder).await?;
        extract_text(payload, from_response)
    }
}

// --- Request/Response types ---

#[derive(serde::Serialize)]
struct Request<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(serde::Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(serde::Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(serde::Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(serde::Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(serde::Deserialize)]
struct Response {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(serde::Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(serde::Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

// --- Conversions ---

fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

fn to_request<'a>(request: &'a ConversationRequest, settings: &ModelSettings) -> Request<'a> {
    let system_instruction = Some(request.instruction.as_str())
        .filter(|s| !s.is_empty())
        .map(|text| SystemInstruction {
            parts: vec![Part { text }],
        });

    let contents = request
        .messages
        .iter()
        .map(|msg| Content {
            role: role_label(msg.role),
            parts: vec![Part {
                text: &msg.content,
            }],
        })
        .collect();

    Request {
        system_instruction,
        contents,
        generation_config: GenerationConfig {
            max_output_tokens: settings.max_tokens,
            temperature: settings.temperature,
        },
    }
}

fn from_response(response: Response) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text = content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");
    Some(text)
}

//! Upstream LLM provider adapters.
//!
//! Every adapter translates a [`ConversationRequest`](studybuddy_types::ConversationRequest)
//! into its provider's request body, makes one HTTP call, and extracts the
//! reply text from the provider's response body.

mod anthropic;
mod error;
mod gemini;
mod openai;
mod provider;

pub use anthropic::AnthropicProvider;
pub use error::LLMError;
pub use gemini::GeminiProvider;
pub use openai::OpenAIProvider;
pub use provider::{LLMProvider, ModelSettings, ProviderKind, build_provider};

//! Stateless relay from the client request shape to one upstream provider.

use std::sync::Arc;

use studybuddy_types::{ConversationRequest, ProviderReply};
use tracing::{debug, error, warn};

use crate::llm::{LLMError, LLMProvider};

/// Forwards conversations to the configured provider.
#[derive(Clone)]
pub struct Relay {
    provider: Arc<dyn LLMProvider>,
}

impl Relay {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }

    /// Forward `request` upstream and return the reply.
    ///
    /// A provider response without reply text is not an error here: the raw
    /// payload is returned as the text and logged. Every other failure is
    /// returned to the caller.
    pub async fn forward(&self, request: &ConversationRequest) -> Result<ProviderReply, LLMError> {
        let kind = self.provider.kind();
        debug!(
            provider = %kind,
            messages = request.messages.len(),
            instruction_len = request.instruction.len(),
            "Forwarding conversation"
        );

        match self.provider.chat(request).await {
            Ok(text) => Ok(ProviderReply { text }),
            Err(LLMError::Extraction { payload }) => {
                warn!(
                    provider = %kind,
                    payload_len = payload.len(),
                    "No reply text in provider response, returning raw payload"
                );
                Ok(ProviderReply { text: payload })
            }
            Err(e) => {
                error!(provider = %kind, error = %e, "Upstream request failed");
                Err(e)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Canned, StubProvider};
    use super::*;
    use studybuddy_types::Message;

    fn request() -> ConversationRequest {
        ConversationRequest {
            instruction: "tutor mode".to_string(),
            messages: vec![Message::user("What is photosynthesis?")],
        }
    }

    #[tokio::test]
    async fn test_forward_returns_text() {
        let provider = Arc::new(StubProvider::new(Canned::Text("Plants eat light.")));
        let relay = Relay::new(provider.clone());

        let reply = relay.forward(&request()).await.unwrap();
        assert_eq!(reply.text, "Plants eat light.");
        assert_eq!(provider.seen.lock().unwrap()[0], request());
    }

    #[tokio::test]
    async fn test_forward_degrades_extraction_failure() {
        let relay = Relay::new(Arc::new(StubProvider::new(Canned::Extraction(
            r#"{"candidates":[]}"#,
        ))));

        let reply = relay.forward(&request()).await.unwrap();
        assert_eq!(reply.text, r#"{"candidates":[]}"#);
    }

    #[tokio::test]
    async fn test_forward_propagates_api_error() {
        let relay = Relay::new(Arc::new(StubProvider::new(Canned::Api(503))));

        let err = relay.forward(&request()).await.unwrap_err();
        assert!(matches!(err, LLMError::Api { status: 503, .. }));
        assert!(!err.to_string().is_empty());
    }
}

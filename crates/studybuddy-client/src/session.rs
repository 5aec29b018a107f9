//! Chat session state.
//!
//! A session owns the selected category and subject, the pending input, and
//! the transcript. At most one request is outstanding at a time: while one is
//! in flight, further submissions are ignored.

use studybuddy_types::{ConversationRequest, Message};
use tracing::{debug, warn};

use crate::catalog::{self, Category, Subject};
use crate::client::RelayClient;
use crate::error::{ClientError, SessionError};

/// Transcript entry appended when a request fails for any reason.
pub const FAILURE_REPLY: &str = "⚠️ Something went wrong. Please try again!";

/// Proof that a submission was accepted. Hand it back to
/// [`ChatSession::finish_submit`] together with the outcome.
#[derive(Debug)]
#[must_use = "a submission stays in flight until the ticket is finished"]
pub struct SendTicket {
    generation: u64,
}

pub struct ChatSession {
    category: &'static Category,
    subject: &'static Subject,
    input: String,
    transcript: Vec<Message>,
    in_flight: bool,
    /// Bumped whenever the transcript is cleared, so late replies can be dropped.
    generation: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        let category = catalog::default_category();
        Self {
            category,
            subject: category.default_subject(),
            input: String::new(),
            transcript: Vec::new(),
            in_flight: false,
            generation: 0,
        }
    }

    pub fn category(&self) -> &'static Category {
        self.category
    }

    pub fn subject(&self) -> &'static Subject {
        self.subject
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Instruction string derived from the current category and subject.
    pub fn instruction(&self) -> String {
        self.category.persona.instruction(self.subject)
    }

    /// Switch category. Resets the subject to the category's first one and
    /// clears the transcript.
    pub fn select_category(&mut self, name: &str) -> Result<(), SessionError> {
        let category = catalog::find_category(name)
            .ok_or_else(|| SessionError::UnknownCategory(name.to_string()))?;
        self.category = category;
        self.subject = category.default_subject();
        self.clear_transcript();
        Ok(())
    }

    /// Switch subject within the current category and clear the transcript.
    pub fn select_subject(&mut self, name: &str) -> Result<(), SessionError> {
        let subject =
            self.category
                .subject(name)
                .ok_or_else(|| SessionError::UnknownSubject {
                    category: self.category.name,
                    subject: name.to_string(),
                })?;
        self.subject = subject;
        self.clear_transcript();
        Ok(())
    }

    /// Accept `text` as the next user turn.
    ///
    /// Returns `None` without touching the session if `text` is blank or a
    /// request is already in flight.
    pub fn begin_submit(&mut self, text: &str) -> Option<(SendTicket, ConversationRequest)> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if self.in_flight {
            debug!("Submission ignored, request already in flight");
            return None;
        }

        self.input.clear();
        self.transcript.push(Message::user(text));
        self.in_flight = true;

        let request = ConversationRequest {
            instruction: self.instruction(),
            messages: self.transcript.clone(),
        };
        Some((
            SendTicket {
                generation: self.generation,
            },
            request,
        ))
    }

    /// [`begin_submit`](Self::begin_submit) using the pending input.
    pub fn begin_submit_input(&mut self) -> Option<(SendTicket, ConversationRequest)> {
        let text = std::mem::take(&mut self.input);
        let accepted = self.begin_submit(&text);
        if accepted.is_none() {
            self.input = text;
        }
        accepted
    }

    /// Record the outcome of a submission and return the appended assistant
    /// message. Nothing is appended if the transcript was cleared since the
    /// ticket was issued.
    pub fn finish_submit(
        &mut self,
        ticket: SendTicket,
        outcome: Result<String, ClientError>,
    ) -> Option<&Message> {
        self.in_flight = false;

        let content = match outcome {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Chat request failed");
                FAILURE_REPLY.to_string()
            }
        };

        if ticket.generation != self.generation {
            debug!("Reply dropped, transcript was cleared while in flight");
            return None;
        }

        self.transcript.push(Message::assistant(content));
        self.transcript.last()
    }

    /// Submit `text` through `client` and wait for the reply.
    pub async fn submit(&mut self, client: &RelayClient, text: &str) -> Option<&Message> {
        let (ticket, request) = self.begin_submit(text)?;
        let outcome = client.chat(&request).await;
        self.finish_submit(ticket, outcome)
    }

    fn clear_transcript(&mut self) {
        self.transcript.clear();
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studybuddy_types::Role;

    #[test]
    fn test_new_session_defaults() {
        let session = ChatSession::new();
        assert_eq!(session.category().name, "School");
        assert_eq!(session.subject().name, "All Subjects");
        assert!(session.transcript().is_empty());
        assert!(!session.is_in_flight());
    }

    #[test]
    fn test_blank_submission_is_noop() {
        let mut session = ChatSession::new();
        assert!(session.begin_submit("   \n").is_none());
        assert!(session.transcript().is_empty());
        assert!(!session.is_in_flight());
    }

    #[test]
    fn test_submit_builds_request_from_transcript() {
        let mut session = ChatSession::new();
        session.select_subject("Science").unwrap();

        let (ticket, request) = session.begin_submit("  What is photosynthesis?  ").unwrap();
        assert!(session.is_in_flight());
        assert_eq!(request.messages, vec![Message::user("What is photosynthesis?")]);
        assert!(request.instruction.ends_with("Focus on: Science."));

        let reply = session
            .finish_submit(ticket, Ok("Plants turn light into food.".to_string()))
            .unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert!(!session.is_in_flight());

        let (_, request) = session.begin_submit("Why green?").unwrap();
        let roles: Vec<_> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
    }

    #[test]
    fn test_submission_while_in_flight_is_ignored() {
        let mut session = ChatSession::new();
        let (_ticket, _) = session.begin_submit("What is photosynthesis?").unwrap();
        let len = session.transcript().len();

        assert!(session.begin_submit("Another question").is_none());
        assert_eq!(session.transcript().len(), len);
    }

    #[test]
    fn test_failure_appends_fixed_reply() {
        let mut session = ChatSession::new();
        let (ticket, _) = session.begin_submit("Hello").unwrap();

        let reply = session
            .finish_submit(ticket, Err(ClientError::EmptyReply))
            .unwrap();
        assert_eq!(reply.content, FAILURE_REPLY);
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_category_switch_clears_transcript_and_resets_subject() {
        let mut session = ChatSession::new();
        session.select_subject("History").unwrap();
        let (ticket, _) = session.begin_submit("Who was Napoleon?").unwrap();
        let _ = session.finish_submit(ticket, Ok("A French emperor.".to_string()));
        assert_eq!(session.transcript().len(), 2);

        session.select_category("Life Skills").unwrap();
        assert!(session.transcript().is_empty());
        assert_eq!(session.category().name, "Life Skills");
        assert_eq!(session.subject().name, "Cooking");
    }

    #[test]
    fn test_unknown_selection_changes_nothing() {
        let mut session = ChatSession::new();
        let (ticket, _) = session.begin_submit("Hi").unwrap();
        let _ = session.finish_submit(ticket, Ok("Hello!".to_string()));

        assert_eq!(
            session.select_category("Sports"),
            Err(SessionError::UnknownCategory("Sports".to_string()))
        );
        assert!(session.select_subject("Cooking").is_err());
        assert_eq!(session.category().name, "School");
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_late_reply_after_switch_is_dropped() {
        let mut session = ChatSession::new();
        let (ticket, _) = session.begin_submit("What is a metaphor?").unwrap();

        session.select_subject("English").unwrap();
        assert!(session.finish_submit(ticket, Ok("late".to_string())).is_none());
        assert!(session.transcript().is_empty());
        assert!(!session.is_in_flight());
    }

    #[test]
    fn test_begin_submit_input_uses_pending_text() {
        let mut session = ChatSession::new();
        session.set_input("How do I solve fractions?");

        let (_ticket, request) = session.begin_submit_input().unwrap();
        assert_eq!(request.messages[0].content, "How do I solve fractions?");
        assert!(session.input().is_empty());

        session.set_input("queued");
        assert!(session.begin_submit_input().is_none());
        assert_eq!(session.input(), "queued");
    }
}

//! StudyBuddy chat client: catalog, session state, and relay client.

pub mod catalog;
mod client;
mod error;
mod session;

pub use client::RelayClient;
pub use error::{ClientError, SessionError};
pub use session::{ChatSession, FAILURE_REPLY, SendTicket};
pub use studybuddy_types::{ConversationRequest, Message, ProviderReply, Role};

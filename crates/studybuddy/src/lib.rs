//! StudyBuddy relay - a stateless chat relay in front of one upstream LLM provider.

pub mod config;
pub mod handlers;
pub mod llm;
pub mod relay;
pub mod response;
pub mod server;

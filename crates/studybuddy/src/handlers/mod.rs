//! HTTP request handlers.

mod chat;
mod health;

pub use chat::{chat, preflight};
pub use health::{livez, readyz};

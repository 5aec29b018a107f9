//! Subcommand implementations for the `studybuddy` binary.

pub mod chat;
pub mod serve;

//! patter-engine: Headless core for the patter chat assistant
//!
//! This crate provides the logic behind the chat UI, including:
//! - Conversation state (ordered messages plus the awaiting-response guard)
//! - Canned reply generation with simulated latency
//! - Configuration loading and saving

pub mod config;
pub mod conversation;
pub mod responder;

// Re-export commonly used types
pub use config::{Config, ConfigError, ThemeVariant};
pub use conversation::{Conversation, Message, Role, GREETING};
pub use responder::{generate, ResponseProducer, ScriptedResponder, JOKES};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

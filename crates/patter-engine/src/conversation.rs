//! Conversation state for a patter chat session.
//!
//! A conversation is an ordered list of messages plus a guard flag that
//! blocks overlapping submissions while a reply is pending. State is owned
//! by a single session and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Greeting seeded as the first message of every conversation.
pub const GREETING: &str = "Hello! I'm your personal assistant. How can I help you today?";

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message.
    User,
    /// Assistant response.
    Assistant,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message author.
    pub role: Role,
    /// Message content.
    pub content: String,
    /// Timestamp of the message.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Conversation state: ordered messages and the awaiting-response guard.
///
/// The guard is true strictly between an accepted [`Conversation::submit`]
/// and the matching [`Conversation::complete`] (or [`Conversation::cancel`]).
/// While it is set, further submissions are rejected unchanged.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    awaiting_response: bool,
}

impl Conversation {
    /// Create a conversation seeded with the default assistant greeting.
    pub fn new() -> Self {
        Self::with_greeting(GREETING)
    }

    /// Create a conversation seeded with a custom greeting.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::assistant(greeting)],
            awaiting_response: false,
        }
    }

    /// All messages in insertion order (earliest first).
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the conversation has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Whether a reply is pending for the last submission.
    pub fn is_awaiting_response(&self) -> bool {
        self.awaiting_response
    }

    /// Accept user input for this conversation.
    ///
    /// Returns `None` without touching state when the trimmed input is empty
    /// or a reply is already pending. Otherwise appends a user message with
    /// the trimmed text, sets the guard, and returns the accepted text so
    /// the caller can schedule reply production.
    pub fn submit(&mut self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() || self.awaiting_response {
            return None;
        }

        self.messages.push(Message::user(trimmed));
        self.awaiting_response = true;
        Some(trimmed.to_string())
    }

    /// Append the assistant reply for the in-flight submission and clear
    /// the guard.
    pub fn complete(&mut self, reply: impl Into<String>) {
        self.messages.push(Message::assistant(reply));
        self.awaiting_response = false;
    }

    /// Clear the guard without appending a reply.
    ///
    /// Used when the session tears down while a reply task is in flight.
    pub fn cancel(&mut self) {
        self.awaiting_response = false;
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let user_msg = Message::user("Hello");
        assert_eq!(user_msg.role, Role::User);
        assert_eq!(user_msg.content, "Hello");

        let assistant_msg = Message::assistant("Hi there!");
        assert_eq!(assistant_msg.role, Role::Assistant);
    }

    #[test]
    fn test_new_conversation_is_seeded() {
        let convo = Conversation::new();
        assert_eq!(convo.len(), 1);
        assert!(!convo.is_awaiting_response());

        let first = convo.last().unwrap();
        assert_eq!(first.role, Role::Assistant);
        assert_eq!(first.content, GREETING);
    }

    #[test]
    fn test_custom_greeting() {
        let convo = Conversation::with_greeting("Welcome back!");
        assert_eq!(convo.last().unwrap().content, "Welcome back!");
    }

    #[test]
    fn test_submit_appends_and_sets_guard() {
        let mut convo = Conversation::new();
        let accepted = convo.submit("hi");

        assert_eq!(accepted.as_deref(), Some("hi"));
        assert_eq!(convo.len(), 2);
        assert!(convo.is_awaiting_response());

        let last = convo.last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.content, "hi");
    }

    #[test]
    fn test_submit_trims_input() {
        let mut convo = Conversation::new();
        let accepted = convo.submit("  hello world  ");

        assert_eq!(accepted.as_deref(), Some("hello world"));
        assert_eq!(convo.last().unwrap().content, "hello world");
    }

    #[test]
    fn test_submit_rejects_empty_and_whitespace() {
        let mut convo = Conversation::new();

        assert!(convo.submit("").is_none());
        assert!(convo.submit("   ").is_none());
        assert!(convo.submit("\t\n").is_none());

        assert_eq!(convo.len(), 1);
        assert!(!convo.is_awaiting_response());
    }

    #[test]
    fn test_submit_rejected_while_awaiting() {
        let mut convo = Conversation::new();
        convo.submit("first").unwrap();

        assert!(convo.submit("second").is_none());
        assert_eq!(convo.len(), 2);
        assert!(convo.is_awaiting_response());
    }

    #[test]
    fn test_complete_clears_guard() {
        let mut convo = Conversation::new();
        convo.submit("hi").unwrap();
        convo.complete("Hello!");

        assert_eq!(convo.len(), 3);
        assert!(!convo.is_awaiting_response());

        let last = convo.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, "Hello!");

        // Guard is released, so the next submission is accepted
        assert!(convo.submit("again").is_some());
    }

    #[test]
    fn test_cancel_clears_guard_without_reply() {
        let mut convo = Conversation::new();
        convo.submit("hi").unwrap();
        convo.cancel();

        assert_eq!(convo.len(), 2);
        assert!(!convo.is_awaiting_response());
    }

    #[test]
    fn test_message_ordering_is_insertion_order() {
        let mut convo = Conversation::new();
        convo.submit("one").unwrap();
        convo.complete("reply one");
        convo.submit("two").unwrap();
        convo.complete("reply two");

        let contents: Vec<&str> = convo
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(
            contents,
            vec![GREETING, "one", "reply one", "two", "reply two"]
        );
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}

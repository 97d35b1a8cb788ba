//! Canned reply generation.
//!
//! Replies come from an ordered keyword table: the input is lower-cased and
//! tested against substring predicates, first match wins. The table order is
//! part of the contract: "hello"/"hi" stays ahead of "how are you", so an
//! input containing both gets the greeting.

use chrono::Local;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// The four fixed jokes, chosen uniformly at random.
pub const JOKES: [&str; 4] = [
    "Why did the scarecrow win an award? He was outstanding in his field!",
    "What do you call a bear with no teeth? A gummy bear!",
    "Why don't scientists trust atoms? Because they make up everything!",
    "What do you call a fake noodle? An impasta!",
];

const GREETING_REPLY: &str =
    "Hello! It's great to hear from you. What would you like to know or do today?";

const WEATHER_REPLY: &str = "I don't have access to real-time weather data, but I recommend \
     checking your local weather service for accurate information.";

const HELP_REPLY: &str = "I can help you with various tasks:\n\
     \u{2022} Answer general questions\n\
     \u{2022} Provide the current time and date\n\
     \u{2022} Have a friendly conversation\n\
     \u{2022} Assist with information and guidance\n\n\
     Just ask me anything!";

const THANKS_REPLY: &str = "You're welcome! I'm always here to help if you need anything else.";

const STATUS_REPLY: &str = "I'm doing great, thank you for asking! I'm here and ready to assist \
     you with whatever you need.";

const FALLBACK_REPLY: &str = "That's an interesting question! I'm here to help you with various \
     tasks and answer your questions. Could you provide more details or ask me something specific?";

/// Generate a reply for the given input.
///
/// Total over all inputs: anything that matches no keyword (including the
/// empty string) falls through to the fallback prompt.
pub fn generate(input: &str) -> String {
    let lower = input.to_lowercase();

    if lower.contains("hello") || lower.contains("hi") {
        return GREETING_REPLY.to_string();
    }

    if lower.contains("time") {
        let time = Local::now().format("%-I:%M:%S %p");
        return format!("The current time is {time}.");
    }

    if lower.contains("date") {
        let date = Local::now().format("%A, %B %-d, %Y");
        return format!("Today is {date}.");
    }

    if lower.contains("weather") {
        return WEATHER_REPLY.to_string();
    }

    if lower.contains("help") {
        return HELP_REPLY.to_string();
    }

    if lower.contains("thank") {
        return THANKS_REPLY.to_string();
    }

    if lower.contains("joke") {
        let idx = rand::thread_rng().gen_range(0..JOKES.len());
        return JOKES[idx].to_string();
    }

    if lower.contains("how are you") {
        return STATUS_REPLY.to_string();
    }

    FALLBACK_REPLY.to_string()
}

/// A source of assistant replies.
///
/// The scripted implementation below fakes a backend round-trip; a real
/// inference client can provide the same capability without the conversation
/// state machine changing.
pub trait ResponseProducer {
    /// Produce a reply for the given user input.
    fn produce(&self, input: &str) -> impl Future<Output = String> + Send + use<Self>;
}

/// Keyword responder with a simulated network delay.
#[derive(Debug, Clone)]
pub struct ScriptedResponder {
    latency: Duration,
}

impl ScriptedResponder {
    /// Create a responder that waits `latency` before each reply.
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Create a responder with no delay, for one-shot use and tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// The configured reply latency.
    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl ResponseProducer for ScriptedResponder {
    fn produce(&self, input: &str) -> impl Future<Output = String> + Send + use<> {
        let latency = self.latency;
        let input = input.to_string();
        async move {
            tokio::time::sleep(latency).await;
            debug!(?latency, "producing reply");
            generate(&input)
        }
    }
}

//! Application state and update logic for the patter TUI.

use crate::event::Action;
use crate::input::TextInputState;
use crate::theme::Theme;
use crate::transcript::TranscriptState;
use chrono::{DateTime, Local};
use patter_engine::{Config, Conversation, Role};
use std::path::{Path, PathBuf};

/// Lines scrolled per page action.
const PAGE_SCROLL: usize = 10;

/// Ticks a notification stays visible (~3s at the 250ms default tick rate).
const NOTIFICATION_TTL: usize = 12;

/// The current screen being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Chat,
    QuitConfirm,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Current screen.
    pub screen: Screen,

    /// The conversation owned by this session.
    pub conversation: Conversation,

    /// Text input state for the chat box.
    pub input_state: TextInputState,

    /// Transcript scroll state.
    pub transcript: TranscriptState,

    /// Resolved color theme.
    pub theme: Theme,

    /// Tick counter for animations.
    pub tick: usize,

    /// Notification message (displayed temporarily, cleared after some ticks).
    pub notification: Option<String>,

    /// Ticks remaining until notification is cleared.
    notification_ttl: usize,

    /// Loaded configuration.
    pub config: Config,
}

impl App {
    /// Create a new app instance from the loaded configuration.
    pub fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            screen: Screen::default(),
            conversation: Conversation::with_greeting(&config.greeting),
            input_state: TextInputState::new(),
            transcript: TranscriptState::new(),
            theme: Theme::for_variant(config.theme),
            tick: 0,
            notification: None,
            notification_ttl: 0,
            config,
        }
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        // Global actions
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else if self.screen == Screen::QuitConfirm {
                    self.should_quit = true;
                } else {
                    self.screen = Screen::QuitConfirm;
                }
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        match self.screen {
            Screen::Chat => self.handle_chat_action(action),
            Screen::QuitConfirm => self.handle_quit_confirm_action(action),
        }
    }

    fn handle_chat_action(&mut self, action: Action) {
        match action {
            Action::Back => {
                self.screen = Screen::QuitConfirm;
            }
            Action::Export => {
                self.export_transcript();
            }
            Action::Up => {
                self.transcript.scroll_up(1);
            }
            Action::Down => {
                self.transcript.scroll_down(1);
            }
            Action::PageUp => {
                self.transcript.scroll_up(PAGE_SCROLL);
            }
            Action::PageDown => {
                self.transcript.scroll_down(PAGE_SCROLL);
            }
            Action::Top => {
                self.transcript.jump_to_top();
            }
            Action::Bottom => {
                self.transcript.jump_to_bottom();
            }
            _ => {}
        }
    }

    fn handle_quit_confirm_action(&mut self, action: Action) {
        match action {
            Action::Select => {
                self.should_quit = true;
            }
            Action::Back => {
                self.screen = Screen::Chat;
            }
            _ => {}
        }
    }

    /// Submit the current input buffer to the conversation.
    ///
    /// Returns the accepted text when the conversation takes the submission,
    /// so the caller can schedule reply production. Empty input and
    /// submissions made while a reply is pending leave everything unchanged,
    /// including the typed text.
    pub fn submit_input(&mut self) -> Option<String> {
        let accepted = self.conversation.submit(self.input_state.content())?;
        self.input_state.submit();
        self.transcript.jump_to_bottom();
        Some(accepted)
    }

    /// Append the produced assistant reply and clear the pending flag.
    pub fn complete_reply(&mut self, reply: String) {
        self.conversation.complete(reply);
        self.transcript.jump_to_bottom();
    }

    /// Clear the pending flag without a reply (reply task died).
    pub fn cancel_reply(&mut self) {
        self.conversation.cancel();
    }

    /// Set a temporary notification message.
    fn set_notification(&mut self, msg: String) {
        self.notification = Some(msg);
        self.notification_ttl = NOTIFICATION_TTL;
    }

    /// Increment tick counter and update time-based state.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        // Clear notification after TTL expires
        if self.notification_ttl > 0 {
            self.notification_ttl -= 1;
            if self.notification_ttl == 0 {
                self.notification = None;
            }
        }
    }

    /// Export the transcript to a markdown file in the current directory.
    fn export_transcript(&mut self) {
        match std::env::current_dir().and_then(|dir| write_transcript(&self.conversation, &dir)) {
            Ok(path) => {
                self.set_notification(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                self.set_notification(format!("Export failed: {e}"));
            }
        }
    }
}

/// Write the conversation to `patter-transcript.md` in the given directory.
pub fn write_transcript(conversation: &Conversation, dir: &Path) -> std::io::Result<PathBuf> {
    use std::fmt::Write;

    let mut content = String::new();
    content.push_str("# patter transcript\n\n");

    for msg in conversation.messages() {
        let label = match msg.role {
            Role::User => "You",
            Role::Assistant => "Assistant",
        };
        let local: DateTime<Local> = msg.timestamp.into();
        let _ = writeln!(content, "### {label} ({})\n", local.format("%Y-%m-%d %H:%M"));
        content.push_str(&msg.content);
        content.push_str("\n\n");
    }

    let path = dir.join("patter-transcript.md");
    std::fs::write(&path, content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_app;

    #[test]
    fn test_new_app_defaults() {
        let app = create_test_app();
        assert_eq!(app.screen, Screen::Chat);
        assert!(!app.should_quit);
        assert!(!app.show_help);
        assert_eq!(app.conversation.len(), 1);
        assert!(!app.conversation.is_awaiting_response());
    }

    #[test]
    fn test_submit_input_flow() {
        let mut app = create_test_app();
        app.input_state.insert_str("hi");

        let accepted = app.submit_input();
        assert_eq!(accepted.as_deref(), Some("hi"));
        assert!(app.input_state.is_empty());
        assert_eq!(app.conversation.len(), 2);
        assert!(app.conversation.is_awaiting_response());
    }

    #[test]
    fn test_submit_empty_input_is_noop() {
        let mut app = create_test_app();
        assert!(app.submit_input().is_none());

        app.input_state.insert_str("   ");
        assert!(app.submit_input().is_none());
        assert_eq!(app.conversation.len(), 1);
        // Whitespace input is left in place, not consumed
        assert_eq!(app.input_state.content(), "   ");
    }

    #[test]
    fn test_submit_rejected_while_awaiting() {
        let mut app = create_test_app();
        app.input_state.insert_str("first");
        app.submit_input().unwrap();

        app.input_state.insert_str("second");
        assert!(app.submit_input().is_none());
        assert_eq!(app.conversation.len(), 2);
        assert!(app.conversation.is_awaiting_response());
        assert_eq!(app.input_state.content(), "second");
    }

    #[test]
    fn test_complete_reply_appends_and_follows() {
        let mut app = create_test_app();
        app.input_state.insert_str("hello");
        app.submit_input().unwrap();

        // User scrolled away while waiting
        app.transcript.scroll_up(3);
        assert!(!app.transcript.is_following());

        app.complete_reply("Hi!".to_string());
        assert_eq!(app.conversation.len(), 3);
        assert!(!app.conversation.is_awaiting_response());
        assert!(app.transcript.is_following());
    }

    #[test]
    fn test_cancel_reply_clears_guard() {
        let mut app = create_test_app();
        app.input_state.insert_str("hello");
        app.submit_input().unwrap();

        app.cancel_reply();
        assert!(!app.conversation.is_awaiting_response());
        assert_eq!(app.conversation.len(), 2);
    }

    #[test]
    fn test_quit_goes_through_confirmation() {
        let mut app = create_test_app();

        app.handle_action(Action::Quit);
        assert_eq!(app.screen, Screen::QuitConfirm);
        assert!(!app.should_quit);

        app.handle_action(Action::Select);
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_confirm_cancel_returns_to_chat() {
        let mut app = create_test_app();
        app.handle_action(Action::Back);
        assert_eq!(app.screen, Screen::QuitConfirm);

        app.handle_action(Action::Back);
        assert_eq!(app.screen, Screen::Chat);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_help_overlay_toggle() {
        let mut app = create_test_app();
        app.handle_action(Action::Help);
        assert!(app.show_help);

        // Any action closes help
        app.handle_action(Action::Down);
        assert!(!app.show_help);
        assert_eq!(app.screen, Screen::Chat);
    }

    #[test]
    fn test_help_closes_before_quit() {
        let mut app = create_test_app();
        app.show_help = true;

        app.handle_action(Action::Quit);
        assert!(!app.show_help);
        assert!(!app.should_quit);
        assert_eq!(app.screen, Screen::Chat);
    }

    #[test]
    fn test_notification_expires_after_ttl() {
        let mut app = create_test_app();
        app.set_notification("saved".to_string());
        assert!(app.notification.is_some());

        for _ in 0..NOTIFICATION_TTL {
            app.tick();
        }
        assert!(app.notification.is_none());
    }

    #[test]
    fn test_scroll_actions() {
        let mut app = create_test_app();

        app.handle_action(Action::Up);
        assert!(!app.transcript.is_following());

        app.handle_action(Action::Bottom);
        assert!(app.transcript.is_following());

        app.handle_action(Action::Top);
        assert_eq!(app.transcript.scroll_offset(), 0);
        assert!(!app.transcript.is_following());
    }

    #[test]
    fn test_write_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let mut convo = Conversation::new();
        convo.submit("what time is it?").unwrap();
        convo.complete("The current time is 9:00:00 AM.");

        let path = write_transcript(&convo, dir.path()).unwrap();
        assert!(path.ends_with("patter-transcript.md"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# patter transcript"));
        assert!(content.contains("### You"));
        assert!(content.contains("### Assistant"));
        assert!(content.contains("what time is it?"));
    }
}

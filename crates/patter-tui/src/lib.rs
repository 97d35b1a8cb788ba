//! patter-tui: Terminal UI for the patter chat assistant
//!
//! This crate provides the view layer for patter, including:
//! - The chat screen with transcript, input line, and overlays
//! - Event handling and the main render loop
//! - Catppuccin theming

mod app;
mod chat;
mod event;
mod input;
#[cfg(test)]
pub mod test_utils;
mod theme;
mod transcript;

pub use app::{App, Screen};
pub use event::{Action, Event, EventHandler};
pub use patter_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers,
        MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use patter_engine::{Config, ResponseProducer, ScriptedResponder};
use ratatui::{backend::CrosstermBackend, layout::Rect, widgets::StatefulWidget, Frame, Terminal};
use std::io::{self, stdout};

use crate::transcript::SCROLL_SPEED;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let responder = ScriptedResponder::new(config.latency());
    let mut events = EventHandler::new(config.tick_rate_ms);
    let mut app = App::new(config);

    let result = run_loop(&mut terminal, &mut app, &mut events, &responder).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    responder: &ScriptedResponder,
) -> Result<(), Box<dyn std::error::Error>> {
    // At most one reply is in flight; the conversation guard enforces it
    let mut reply_handle: Option<tokio::task::JoinHandle<String>> = None;

    loop {
        terminal.draw(|frame| draw(frame, app))?;

        // Check for a completed reply (non-blocking)
        if reply_handle.as_ref().is_some_and(|h| h.is_finished()) {
            if let Some(handle) = reply_handle.take() {
                match handle.await {
                    Ok(reply) => app.complete_reply(reply),
                    // The task only fails if it panicked or was aborted
                    Err(_) => app.cancel_reply(),
                }
            }
        }

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    // Text input has first pick while a reply is not pending
                    if app.screen == Screen::Chat
                        && !app.show_help
                        && !app.conversation.is_awaiting_response()
                        && handle_chat_key(app, key, responder, &mut reply_handle)
                    {
                        continue;
                    }
                    let action = event::key_to_action(key);
                    app.handle_action(action);
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        app.transcript.scroll_up(SCROLL_SPEED);
                    }
                    MouseEventKind::ScrollDown => {
                        app.transcript.scroll_down(SCROLL_SPEED);
                    }
                    _ => {}
                },
                Event::Tick => {
                    app.tick();
                }
                Event::Resize(_, _) => {
                    // Terminal will handle resize automatically
                }
            }
        }

        if app.should_quit {
            if let Some(handle) = reply_handle.take() {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}

/// Render the current frame.
fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();
    if area.height < 2 || area.width < 2 {
        return;
    }
    let buf = frame.buffer_mut();

    let pane_area = Rect::new(area.x, area.y, area.width, area.height - 1);
    let footer_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);

    let pane = chat::ChatPane::new(&app.conversation, &app.input_state, &app.theme).tick(app.tick);
    StatefulWidget::render(pane, pane_area, buf, &mut app.transcript);

    chat::render_footer(app.notification.as_deref(), &app.theme, footer_area, buf);

    if app.screen == Screen::QuitConfirm {
        chat::render_quit_confirm(&app.theme, area, buf);
    }

    if app.show_help {
        chat::render_help_overlay(&app.theme, area, buf);
    }
}

/// Handle key input for the chat text box.
/// Returns true if the key was handled (should not be processed as action).
fn handle_chat_key(
    app: &mut App,
    key: KeyEvent,
    responder: &ScriptedResponder,
    reply_handle: &mut Option<tokio::task::JoinHandle<String>>,
) -> bool {
    // Let the action handler deal with Ctrl+C, Ctrl+E, etc.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    match key.code {
        // Enter sends the message
        KeyCode::Enter => {
            if let Some(text) = app.submit_input() {
                *reply_handle = Some(tokio::spawn(responder.produce(&text)));
            }
            true
        }

        // Text input
        KeyCode::Char(c) => {
            app.input_state.insert(c);
            true
        }
        KeyCode::Backspace => {
            app.input_state.backspace();
            true
        }
        KeyCode::Delete => {
            app.input_state.delete();
            true
        }
        KeyCode::Left => {
            app.input_state.move_left();
            true
        }
        KeyCode::Right => {
            app.input_state.move_right();
            true
        }
        KeyCode::Home => {
            if app.input_state.is_empty() {
                false // Let the action handler jump the transcript
            } else {
                app.input_state.move_home();
                true
            }
        }
        KeyCode::End => {
            if app.input_state.is_empty() {
                false
            } else {
                app.input_state.move_end();
                true
            }
        }
        KeyCode::Up => {
            // History navigation when input is empty
            if app.input_state.is_empty() {
                app.input_state.history_prev();
                true
            } else {
                false // Let the action handler scroll the transcript
            }
        }
        KeyCode::Down => {
            if app.input_state.is_empty() {
                app.input_state.history_next();
                true
            } else {
                false
            }
        }

        _ => false,
    }
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_to_string, create_test_app};
    use crossterm::event::{KeyEventKind, KeyEventState};
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn draw_to_string(app: &mut App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }

    #[test]
    fn test_draw_chat_screen() {
        let mut app = create_test_app();
        let content = draw_to_string(&mut app);

        assert!(content.contains("patter"));
        assert!(content.contains("Ask me anything..."));
        assert!(content.contains("personal assistant"));
        assert!(content.contains("Enter send"));
    }

    #[test]
    fn test_draw_quit_confirm_overlay() {
        let mut app = create_test_app();
        app.handle_action(Action::Quit);
        let content = draw_to_string(&mut app);

        assert!(content.contains("Leave the conversation?"));
    }

    #[test]
    fn test_draw_help_overlay() {
        let mut app = create_test_app();
        app.handle_action(Action::Help);
        let content = draw_to_string(&mut app);

        assert!(content.contains("Help"));
        assert!(content.contains("export transcript"));
    }

    #[test]
    fn test_draw_tiny_terminal_does_not_panic() {
        let mut app = create_test_app();
        let backend = TestBackend::new(1, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
    }

    #[tokio::test]
    async fn test_enter_submits_and_spawns_reply() {
        let mut app = create_test_app();
        let responder = ScriptedResponder::instant();
        let mut reply_handle = None;

        for c in "hi".chars() {
            assert!(handle_chat_key(&mut app, key(KeyCode::Char(c)), &responder, &mut reply_handle));
        }
        assert!(handle_chat_key(&mut app, key(KeyCode::Enter), &responder, &mut reply_handle));

        assert_eq!(app.conversation.len(), 2);
        assert!(app.conversation.is_awaiting_response());

        let reply = reply_handle.take().unwrap().await.unwrap();
        assert!(!reply.is_empty());
        app.complete_reply(reply);

        assert_eq!(app.conversation.len(), 3);
        assert!(!app.conversation.is_awaiting_response());
    }

    #[tokio::test]
    async fn test_enter_on_empty_input_spawns_nothing() {
        let mut app = create_test_app();
        let responder = ScriptedResponder::instant();
        let mut reply_handle = None;

        assert!(handle_chat_key(&mut app, key(KeyCode::Enter), &responder, &mut reply_handle));
        assert!(reply_handle.is_none());
        assert_eq!(app.conversation.len(), 1);
    }

    #[test]
    fn test_escape_is_not_consumed_by_input() {
        let mut app = create_test_app();
        let responder = ScriptedResponder::instant();
        let mut reply_handle = None;

        assert!(!handle_chat_key(&mut app, key(KeyCode::Esc), &responder, &mut reply_handle));
    }
}

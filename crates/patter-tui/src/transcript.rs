//! Transcript pane: scrollable conversation history.
//!
//! Renders messages oldest-first with role-based styling and wraps long
//! content to the pane width. While a reply is pending, a transient
//! "Thinking" line is appended after the last message; it is display-only
//! and never part of the conversation.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};

use patter_engine::{Message, Role};

use crate::theme::Theme;

/// Lines scrolled per mouse wheel tick.
pub const SCROLL_SPEED: usize = 3;

/// Animation frames for the pending-reply indicator.
const THINKING_FRAMES: [&str; 4] = ["Thinking", "Thinking.", "Thinking..", "Thinking..."];

/// Transcript scroll state.
///
/// Follow mode pins the view to the newest entry; manual scrolling releases
/// it until the next jump to the bottom.
#[derive(Debug, Clone)]
pub struct TranscriptState {
    /// Index of the first visible line.
    scroll_offset: usize,
    /// Whether to auto-follow new content.
    follow: bool,
}

impl TranscriptState {
    /// Create a new transcript state with follow enabled.
    pub fn new() -> Self {
        Self {
            scroll_offset: 0,
            follow: true,
        }
    }

    /// Get the scroll offset.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Check if follow mode is enabled.
    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Scroll up by the given number of lines. Disables follow mode.
    pub fn scroll_up(&mut self, amount: usize) {
        self.follow = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// Scroll down by the given number of lines.
    ///
    /// The offset is clamped to the content length on the next render.
    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(amount);
    }

    /// Jump to the first line. Disables follow mode.
    pub fn jump_to_top(&mut self) {
        self.follow = false;
        self.scroll_offset = 0;
    }

    /// Jump to the newest content and re-enable follow mode.
    pub fn jump_to_bottom(&mut self) {
        self.follow = true;
    }
}

impl Default for TranscriptState {
    fn default() -> Self {
        Self::new()
    }
}

/// Transcript widget rendering the message history.
pub struct TranscriptWidget<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
    awaiting: bool,
    tick: usize,
}

impl<'a> TranscriptWidget<'a> {
    /// Create a new transcript widget over the given messages.
    pub fn new(messages: &'a [Message], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            awaiting: false,
            tick: 0,
        }
    }

    /// Set whether a reply is pending (shows the thinking indicator).
    #[must_use]
    pub fn awaiting(mut self, awaiting: bool) -> Self {
        self.awaiting = awaiting;
        self
    }

    /// Set the animation tick.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    /// Build the full list of display lines before scrolling is applied.
    fn build_lines(&self, wrap_width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for msg in self.messages {
            let (label, color) = match msg.role {
                Role::User => ("You", self.theme.user),
                Role::Assistant => ("Assistant", self.theme.assistant),
            };

            lines.push(Line::from(vec![
                Span::styled(time_str(msg.timestamp), Style::default().fg(self.theme.muted)),
                Span::raw("  "),
                Span::styled(
                    label,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]));

            for content_line in msg.content.lines() {
                if content_line.is_empty() {
                    lines.push(Line::raw(""));
                    continue;
                }
                for wrapped in textwrap::wrap(content_line, wrap_width) {
                    lines.push(Line::from(vec![
                        Span::raw("  "),
                        Span::styled(
                            wrapped.into_owned(),
                            Style::default().fg(self.theme.text),
                        ),
                    ]));
                }
            }

            lines.push(Line::raw(""));
        }

        if self.awaiting {
            let frame = THINKING_FRAMES[self.tick % THINKING_FRAMES.len()];
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    frame.to_string(),
                    Style::default()
                        .fg(self.theme.muted)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]));
        }

        lines
    }
}

impl StatefulWidget for TranscriptWidget<'_> {
    type State = TranscriptState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut TranscriptState) {
        if area.height < 1 || area.width < 1 {
            return;
        }

        let wrap_width = usize::from(area.width).saturating_sub(2).max(10);
        let lines = self.build_lines(wrap_width);

        let viewport = usize::from(area.height);
        let max_offset = lines.len().saturating_sub(viewport);

        // Follow pins to the bottom; manual offsets are clamped to content
        if state.follow {
            state.scroll_offset = max_offset;
        } else {
            state.scroll_offset = state.scroll_offset.min(max_offset);
        }

        let visible: Vec<Line<'static>> = lines
            .into_iter()
            .skip(state.scroll_offset)
            .take(viewport)
            .collect();

        Paragraph::new(visible).render(area, buf);
    }
}

/// Timestamp formatted for display (HH:MM in local time).
fn time_str(timestamp: DateTime<Utc>) -> String {
    let local: DateTime<Local> = timestamp.into();
    local.format("%H:%M").to_string()
}

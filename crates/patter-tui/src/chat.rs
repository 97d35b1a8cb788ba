//! Chat pane and overlay rendering.
//!
//! The chat pane combines the transcript with the input line at the bottom:
//! history above, divider, input below.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::line,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, StatefulWidget, Widget},
};

use patter_engine::Conversation;

use crate::input::{TextInput, TextInputState};
use crate::theme::Theme;
use crate::transcript::{TranscriptState, TranscriptWidget};

/// Fixed height for the input line.
const INPUT_HEIGHT: u16 = 1;

/// Height for the divider line.
const DIVIDER_HEIGHT: u16 = 1;

/// Get placeholder text for the input line based on the pending-reply state.
#[must_use]
pub fn input_placeholder(awaiting: bool) -> &'static str {
    if awaiting {
        "Waiting for a reply..."
    } else {
        "Ask me anything..."
    }
}

/// Chat pane widget combining transcript and input.
///
/// ```text
/// ┌─ patter ────────────────────────────┐
/// │ 09:15  Assistant                    │
/// │   Hello! I'm your personal...       │
/// │                                     │
/// │ 09:16  You                          │
/// │   what time is it?                  │
/// ├─────────────────────────────────────┤
/// │ > Ask me anything...                │
/// └─────────────────────────────────────┘
/// ```
pub struct ChatPane<'a> {
    conversation: &'a Conversation,
    input: &'a TextInputState,
    theme: &'a Theme,
    tick: usize,
}

impl<'a> ChatPane<'a> {
    /// Create a new chat pane.
    pub fn new(
        conversation: &'a Conversation,
        input: &'a TextInputState,
        theme: &'a Theme,
    ) -> Self {
        Self {
            conversation,
            input,
            theme,
            tick: 0,
        }
    }

    /// Set the animation tick.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    /// Render the input line.
    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let awaiting = self.conversation.is_awaiting_response();
        TextInput::new(self.input, self.theme)
            .enabled(!awaiting)
            .placeholder(input_placeholder(awaiting))
            .render(area, buf);
    }

    /// Render a horizontal divider line.
    fn render_divider(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 {
            return;
        }

        let divider_str = line::HORIZONTAL.repeat(usize::from(area.width));
        let divider = Line::from(Span::styled(
            divider_str,
            Style::default().fg(self.theme.border),
        ));
        Paragraph::new(vec![divider]).render(area, buf);
    }
}

impl StatefulWidget for ChatPane<'_> {
    type State = TranscriptState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut TranscriptState) {
        let block = Block::default()
            .title(" patter ")
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused))
            .style(Style::default().bg(self.theme.base));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < INPUT_HEIGHT + DIVIDER_HEIGHT + 1 {
            // Not enough space - just show input
            self.render_input(inner, buf);
            return;
        }

        let transcript_height = inner.height - INPUT_HEIGHT - DIVIDER_HEIGHT;
        let divider_y = inner.y + transcript_height;
        let input_y = divider_y + DIVIDER_HEIGHT;

        let transcript_area = Rect::new(inner.x, inner.y, inner.width, transcript_height);
        let divider_area = Rect::new(inner.x, divider_y, inner.width, DIVIDER_HEIGHT);
        let input_area = Rect::new(inner.x, input_y, inner.width, INPUT_HEIGHT);

        TranscriptWidget::new(self.conversation.messages(), self.theme)
            .awaiting(self.conversation.is_awaiting_response())
            .tick(self.tick)
            .render(transcript_area, buf, state);

        self.render_divider(divider_area, buf);
        self.render_input(input_area, buf);
    }
}

/// Render the one-line footer: a transient notification if set, key hints
/// otherwise.
pub fn render_footer(notification: Option<&str>, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let footer = match notification {
        Some(msg) => Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(theme.success),
        )),
        None => Line::from(Span::styled(
            " Enter send \u{b7} PgUp/PgDn scroll \u{b7} Ctrl+E export \u{b7} F1 help \u{b7} Esc quit",
            Style::default().fg(theme.muted),
        )),
    };
    Paragraph::new(vec![footer]).render(area, buf);
}

/// Render the help overlay.
pub fn render_help_overlay(theme: &Theme, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(46, 12, area);
    Clear.render(popup, buf);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(popup);
    block.render(popup, buf);

    let key_style = Style::default()
        .fg(theme.primary)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(theme.text);
    let lines = vec![
        Line::from(vec![
            Span::styled("Enter       ", key_style),
            Span::styled("send message", text_style),
        ]),
        Line::from(vec![
            Span::styled("Up/Down     ", key_style),
            Span::styled("input history / scroll", text_style),
        ]),
        Line::from(vec![
            Span::styled("PgUp/PgDn   ", key_style),
            Span::styled("scroll transcript", text_style),
        ]),
        Line::from(vec![
            Span::styled("Home/End    ", key_style),
            Span::styled("oldest / newest message", text_style),
        ]),
        Line::from(vec![
            Span::styled("Ctrl+E      ", key_style),
            Span::styled("export transcript", text_style),
        ]),
        Line::from(vec![
            Span::styled("F1          ", key_style),
            Span::styled("toggle this help", text_style),
        ]),
        Line::from(vec![
            Span::styled("Esc/Ctrl+C  ", key_style),
            Span::styled("quit", text_style),
        ]),
    ];
    Paragraph::new(lines).render(inner, buf);
}

/// Render the quit confirmation overlay.
pub fn render_quit_confirm(theme: &Theme, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(36, 5, area);
    Clear.render(popup, buf);

    let block = Block::default()
        .title(" Quit ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(popup);
    block.render(popup, buf);

    let lines = vec![
        Line::from(Span::styled(
            "Leave the conversation?",
            Style::default().fg(theme.text),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Enter confirm \u{b7} Esc cancel",
            Style::default().fg(theme.muted),
        )),
    ];
    Paragraph::new(lines).render(inner, buf);
}

/// Compute a centered rect of at most `width` x `height` within `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

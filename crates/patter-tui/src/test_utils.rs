//! Test utilities for patter-tui widget and app tests.

use crate::app::App;
use patter_engine::Config;
use ratatui::buffer::Buffer;

/// Create a test app with zero reply latency.
pub fn create_test_app() -> App {
    App::new(Config {
        latency_ms: 0,
        ..Default::default()
    })
}

/// Convert a buffer to a string representation for assertions.
///
/// This produces a simple text representation of the buffer content,
/// with trailing whitespace trimmed from each line.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert_eq!(app.config.latency_ms, 0);
        assert_eq!(app.conversation.len(), 1);
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        let result = buffer_to_string(&buffer);
        assert!(result.contains("Hello"));
        assert!(result.contains("World"));
    }
}

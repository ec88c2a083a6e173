use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let block = Block::default()
        .title(t.panel_title("TEXT"))
        .borders(Borders::ALL)
        .border_style(t.panel_border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let (line, col) = app.buffer.cursor_line_col();

    // Keep the caret inside the viewport
    let scroll_y = (line as u16).saturating_sub(inner.height.saturating_sub(1));
    let scroll_x = (col as u16).saturating_sub(inner.width.saturating_sub(1));

    let lines: Vec<Line> = app
        .buffer
        .text()
        .split('\n')
        .map(|raw| Line::styled(printable(raw), t.text_primary()))
        .collect();

    let text = Paragraph::new(lines).scroll((scroll_y, scroll_x));
    frame.render_widget(text, inner);

    frame.set_cursor(
        inner.x + col as u16 - scroll_x,
        inner.y + line as u16 - scroll_y,
    );
}

/// Tabs get a visible one-cell marker so cursor columns keep lining up with
/// the character count the buffer reports.
fn printable(raw: &str) -> String {
    raw.replace('\t', "⇥")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_keeps_char_count() {
        let raw = "a\tb";
        assert_eq!(printable(raw).chars().count(), raw.chars().count());
    }
}

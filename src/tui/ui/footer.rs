use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let status_style = if app.status.contains("failed") {
        t.status_error()
    } else {
        t.status_message()
    };
    let line1 = Line::from(vec![
        Span::styled("Status: ", t.text_muted()),
        Span::styled(app.status.clone(), status_style),
    ]);

    let line2 = Line::from(vec![
        Span::styled("type", t.key_hint()),
        Span::styled(":insert  ", t.text_muted()),
        Span::styled("click", t.key_hint()),
        Span::styled(":press on-screen keys  ", t.text_muted()),
        Span::styled("Ctrl+Alt", t.key_hint()),
        Span::styled(":locale  ", t.text_muted()),
        Span::styled("Esc", t.key_hint()),
        Span::styled(":quit", t.text_muted()),
    ]);

    let footer = Paragraph::new(vec![line1, line2]);
    frame.render_widget(footer, area);
}

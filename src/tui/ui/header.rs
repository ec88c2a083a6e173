use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let title = Line::from(vec![
        Span::styled("klava ", t.text_primary().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" {} ", app.state.locale()),
            t.locale_badge(),
        ),
        Span::raw(" "),
        Span::styled(format!("case:{}", app.state.case()), t.text_muted()),
        Span::raw("  "),
        Span::styled("Esc", t.key_hint()),
        Span::styled(":quit", t.text_muted()),
    ]);

    let description = Line::styled(
        "On-screen EN/RU keyboard ~ type, or click the keys below",
        t.text_secondary(),
    );

    let locale_hint = Line::from(vec![
        Span::styled("Ctrl", t.key_hint()),
        Span::styled("+", t.text_muted()),
        Span::styled("Alt", t.key_hint()),
        Span::styled(" switches locale", t.text_muted()),
    ]);

    let header = Paragraph::new(vec![title, description, locale_hint]);
    frame.render_widget(header, area);
}

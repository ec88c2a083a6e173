mod editor_panel;
mod footer;
mod header;
pub mod keyboard;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};

use crate::tui::app::App;

/// Screen regions, derived purely from the terminal area so the pointer
/// hit-test can recompute them without touching the renderer.
pub struct ScreenChunks {
    pub header: Rect,
    pub editor: Rect,
    pub keyboard: Rect,
    pub footer: Rect,
}

pub fn chunks(area: Rect) -> ScreenChunks {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title, description, locale line
            Constraint::Min(5),    // Text field
            Constraint::Length(7), // Key grid (5 rows + border)
            Constraint::Length(2), // Footer
        ])
        .split(area);

    ScreenChunks {
        header: parts[0],
        editor: parts[1],
        keyboard: parts[2],
        footer: parts[3],
    }
}

/// The drawable area inside the keyboard panel border.
pub fn keyboard_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let regions = chunks(frame.area());

    header::render(frame, app, regions.header);
    editor_panel::render(frame, app, regions.editor);
    keyboard::render(frame, app, regions.keyboard);
    footer::render(frame, app, regions.footer);
}

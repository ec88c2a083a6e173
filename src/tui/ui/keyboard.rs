use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use klava_core::{KeyId, Layout as BoardLayout};

use crate::tui::app::App;
use crate::tui::theme::theme;

/// Cell geometry for the key grid: one rect per key, in board order.
///
/// Pure function of the layout and the drawable area; the renderer paints
/// these rects and the mouse handler hit-tests the same ones, so the two can
/// never disagree. Cells that would fall outside the area are clipped away.
pub fn key_cells(layout: &BoardLayout, area: Rect) -> Vec<(Rect, KeyId)> {
    let mut cells = Vec::new();
    for (row_index, row) in layout.rows().iter().enumerate() {
        let y = area.y + row_index as u16;
        if y >= area.y + area.height {
            break;
        }
        let mut x = area.x;
        for def in row {
            let right = area.x + area.width;
            if x >= right {
                break;
            }
            let width = def.width().min(right - x);
            cells.push((Rect::new(x, y, width, 1), def.id()));
            x += def.width() + 1;
        }
    }
    cells
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let block = Block::default()
        .title(t.panel_title("KEYBOARD"))
        .borders(Borders::ALL)
        .border_style(t.panel_border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let locale = app.state.locale();
    let case = app.state.case();

    for (rect, id) in key_cells(&app.layout, inner) {
        let Some(def) = app.layout.get(id) else {
            continue;
        };
        let caption = fit_caption(def.glyph(locale, case), rect.width);
        let style = t.key_cap(app.key_highlight(id));
        frame.render_widget(Paragraph::new(caption).style(style), rect);
    }
}

/// Center a glyph in a cell of the given width, truncating if it is too long.
fn fit_caption(glyph: &str, width: u16) -> String {
    let width = width as usize;
    let text: String = glyph.chars().take(width).collect();
    let len = text.chars().count();
    let pad = width - len;
    let left = pad / 2;
    format!(
        "{}{}{}",
        " ".repeat(left),
        text,
        " ".repeat(pad - left)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_caption_centers_and_truncates() {
        assert_eq!(fit_caption("q", 4), " q  ");
        assert_eq!(fit_caption("Del", 5), " Del ");
        assert_eq!(fit_caption("Backspace", 4), "Back");
    }

    #[test]
    fn test_key_cells_cover_every_key() {
        let layout = BoardLayout::standard().unwrap();
        let area = Rect::new(0, 0, 80, 5);
        let cells = key_cells(&layout, area);
        assert_eq!(cells.len(), layout.key_count());
    }

    #[test]
    fn test_key_cells_do_not_overlap_in_a_row() {
        let layout = BoardLayout::standard().unwrap();
        let cells = key_cells(&layout, Rect::new(0, 0, 80, 5));
        for pair in cells.windows(2) {
            let (a, _) = pair[0];
            let (b, _) = pair[1];
            if a.y == b.y {
                assert!(a.x + a.width < b.x + 1);
            }
        }
    }

    #[test]
    fn test_key_cells_clip_to_small_area() {
        let layout = BoardLayout::standard().unwrap();
        let cells = key_cells(&layout, Rect::new(0, 0, 20, 2));
        assert!(cells.len() < layout.key_count());
        for (rect, _) in cells {
            assert!(rect.x + rect.width <= 20);
            assert!(rect.y < 2);
        }
    }
}

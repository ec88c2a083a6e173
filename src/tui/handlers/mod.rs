use std::io;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use klava_core::KeyId;

use crate::tui::app::App;
use crate::tui::ui;

/// Handle a key event and return true if the app should quit
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Esc {
        return key.kind == KeyEventKind::Press;
    }

    let chord = key.modifiers.contains(KeyModifiers::CONTROL)
        && key.modifiers.contains(KeyModifiers::ALT);

    // Terminals without key release reporting never deliver the shift keys
    // themselves; mirror the modifier bit instead so the case stays right.
    if !app.enhanced_keys {
        app.sync_shift(key.modifiers.contains(KeyModifiers::SHIFT));
    }

    let Some(id) = resolve_key(app, key.code) else {
        // Unknown keys are consumed silently
        return false;
    };

    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            app.key_pressed(id, key.kind == KeyEventKind::Repeat, chord);
            if !app.enhanced_keys {
                // No release will ever arrive; close the press immediately
                app.key_released(id);
            }
        }
        KeyEventKind::Release => app.key_released(id),
    }

    false
}

/// Handle a mouse event: left press/release on a key cell acts on that key.
pub fn handle_mouse(app: &mut App, event: MouseEvent) -> io::Result<()> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(id) = hit_key(app, event.column, event.row)? {
                app.pointer_pressed(id);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let target = hit_key(app, event.column, event.row)?;
            app.pointer_released(target);
        }
        _ => {}
    }
    Ok(())
}

/// Map a crossterm key code onto a key cell.
///
/// Printable characters resolve through the layout's reverse glyph lookup
/// (active locale first); editing, navigation and modifier keys map
/// directly. Anything else is not on the board.
fn resolve_key(app: &App, code: KeyCode) -> Option<KeyId> {
    match code {
        KeyCode::Char(c) => app.layout.key_for_char(c, app.state.locale()),
        KeyCode::Backspace => Some(KeyId::Backspace),
        KeyCode::Enter => Some(KeyId::Enter),
        KeyCode::Tab | KeyCode::BackTab => Some(KeyId::Tab),
        KeyCode::Delete => Some(KeyId::Delete),
        KeyCode::Left => Some(KeyId::ArrowLeft),
        KeyCode::Right => Some(KeyId::ArrowRight),
        KeyCode::Up => Some(KeyId::ArrowUp),
        KeyCode::Down => Some(KeyId::ArrowDown),
        KeyCode::CapsLock => Some(KeyId::CapsLock),
        KeyCode::Modifier(code) => modifier_key(code),
        _ => None,
    }
}

fn modifier_key(code: ModifierKeyCode) -> Option<KeyId> {
    match code {
        ModifierKeyCode::LeftShift => Some(KeyId::ShiftLeft),
        ModifierKeyCode::RightShift => Some(KeyId::ShiftRight),
        ModifierKeyCode::LeftControl => Some(KeyId::ControlLeft),
        ModifierKeyCode::RightControl => Some(KeyId::ControlRight),
        ModifierKeyCode::LeftAlt => Some(KeyId::AltLeft),
        ModifierKeyCode::RightAlt => Some(KeyId::AltRight),
        _ => None,
    }
}

/// Find the key cell under a terminal coordinate, recomputing the same
/// geometry the renderer painted from.
fn hit_key(app: &App, column: u16, row: u16) -> io::Result<Option<KeyId>> {
    let (width, height) = crossterm::terminal::size()?;
    let area = Rect::new(0, 0, width, height);
    let inner = ui::keyboard_inner(ui::chunks(area).keyboard);
    Ok(ui::keyboard::key_cells(&app.layout, inner)
        .into_iter()
        .find(|(rect, _)| rect.contains(Position::new(column, row)))
        .map(|(_, id)| id))
}

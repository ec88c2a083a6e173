use std::path::PathBuf;

use smallvec::SmallVec;

use klava_core::{
    pointer_release, press, release, KeyId, KeyboardState, Layout, PressedKey, Settings, TextBuffer,
};

use crate::tui::theme::KeyHighlight;

pub struct App {
    pub layout: Layout,
    pub state: KeyboardState,
    pub buffer: TextBuffer,
    pub settings_path: PathBuf,
    pub status: String,
    /// Whether the terminal reports key release events (and modifier keys).
    pub enhanced_keys: bool,
    /// Momentarily pressed keys, highlighted until their release arrives.
    held: SmallVec<[KeyId; 8]>,
    /// Press-time snapshot kept between pointer down and pointer up, so a
    /// release that misses every cell can replay the pressed key.
    pointer_grab: Option<PressedKey>,
}

impl App {
    pub fn new(
        settings: Settings,
        settings_path: PathBuf,
        enhanced_keys: bool,
    ) -> Result<Self, klava_core::LayoutError> {
        Ok(Self {
            layout: Layout::standard()?,
            state: KeyboardState::new(settings.locale),
            buffer: TextBuffer::new(),
            settings_path,
            status: "Ready".to_string(),
            enhanced_keys,
            held: SmallVec::new(),
            pointer_grab: None,
        })
    }

    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.status = msg.into();
    }

    /// Route a physical key press.
    pub fn key_pressed(&mut self, id: KeyId, repeat: bool, chord: bool) {
        let Some(outcome) = press(
            &self.layout,
            &mut self.state,
            &mut self.buffer,
            id,
            repeat,
            chord,
        ) else {
            return;
        };
        if !id.is_latching() && !self.held.contains(&id) {
            self.held.push(id);
        }
        if outcome.locale_toggled {
            self.persist_locale();
        }
    }

    /// Route a physical key release.
    pub fn key_released(&mut self, id: KeyId) {
        release(&mut self.state, id);
        self.held.retain(|held| *held != id);
    }

    /// Route a pointer press that hit a key cell.
    pub fn pointer_pressed(&mut self, id: KeyId) {
        let Some(outcome) = press(
            &self.layout,
            &mut self.state,
            &mut self.buffer,
            id,
            false,
            false,
        ) else {
            return;
        };
        if !id.is_latching() && !self.held.contains(&id) {
            self.held.push(id);
        }
        self.pointer_grab = Some(outcome.pressed);
    }

    /// Route a pointer release; `target` is the cell under the pointer, if
    /// any. A miss falls back to the press-time grab.
    pub fn pointer_released(&mut self, target: Option<KeyId>) {
        let grab = self.pointer_grab.take();
        if let Some((id, _)) = pointer_release(&mut self.state, target, grab.as_ref()) {
            self.held.retain(|held| *held != id);
        }
    }

    /// Mirror the shift modifier bit into the state machine, for terminals
    /// that never report the shift keys themselves.
    pub fn sync_shift(&mut self, down: bool) {
        use klava_core::ShiftSide;
        if down {
            if !self.state.shift_down() {
                self.state.press_shift(ShiftSide::Left);
            }
        } else if self.state.shift_down() {
            self.state.release_shift(ShiftSide::Left);
            self.state.release_shift(ShiftSide::Right);
        }
    }

    /// The highlight state the renderer should paint for one key.
    pub fn key_highlight(&self, id: KeyId) -> KeyHighlight {
        let latched = match id {
            KeyId::CapsLock => self.state.caps_lock(),
            _ => id
                .shift_side()
                .map(|side| self.state.shift_side_down(side))
                .unwrap_or(false),
        };
        if latched {
            KeyHighlight::Latched
        } else if self.held.contains(&id) {
            KeyHighlight::Pressed
        } else {
            KeyHighlight::Idle
        }
    }

    fn persist_locale(&mut self) {
        let locale = self.state.locale();
        match Settings::new(locale).save_to(&self.settings_path) {
            Ok(()) => self.set_status(format!("Locale {locale} (saved)")),
            Err(err) => {
                log::warn!("failed to persist locale: {err}");
                self.set_status(format!("Locale {locale} (save failed: {err})"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let path = std::env::temp_dir().join(format!("klava-app-test-{}.toml", std::process::id()));
        App::new(Settings::default(), path, true).unwrap()
    }

    #[test]
    fn test_momentary_highlight_follows_press_release() {
        let mut app = test_app();
        app.key_pressed(KeyId::KeyA, false, false);
        assert_eq!(app.key_highlight(KeyId::KeyA), KeyHighlight::Pressed);
        app.key_released(KeyId::KeyA);
        assert_eq!(app.key_highlight(KeyId::KeyA), KeyHighlight::Idle);
    }

    #[test]
    fn test_latched_highlight_survives_generic_release() {
        let mut app = test_app();
        app.key_pressed(KeyId::CapsLock, false, false);
        assert_eq!(app.key_highlight(KeyId::CapsLock), KeyHighlight::Latched);
        // The generic release path must not clear a latched highlight
        app.key_released(KeyId::CapsLock);
        assert_eq!(app.key_highlight(KeyId::CapsLock), KeyHighlight::Latched);
        app.key_pressed(KeyId::CapsLock, false, false);
        assert_eq!(app.key_highlight(KeyId::CapsLock), KeyHighlight::Idle);
    }

    #[test]
    fn test_shift_highlight_cleared_by_own_release() {
        let mut app = test_app();
        app.key_pressed(KeyId::ShiftLeft, false, false);
        assert_eq!(app.key_highlight(KeyId::ShiftLeft), KeyHighlight::Latched);
        assert_eq!(app.key_highlight(KeyId::ShiftRight), KeyHighlight::Idle);
        app.key_released(KeyId::ShiftLeft);
        assert_eq!(app.key_highlight(KeyId::ShiftLeft), KeyHighlight::Idle);
    }

    #[test]
    fn test_pointer_drag_off_releases_grabbed_shift() {
        let mut app = test_app();
        app.pointer_pressed(KeyId::ShiftLeft);
        assert!(app.state.shift_down());
        app.pointer_released(None);
        assert!(!app.state.shift_down());
    }

    #[test]
    fn test_sync_shift_round_trip() {
        let mut app = test_app();
        app.sync_shift(true);
        assert!(app.state.shift_down());
        app.sync_shift(true);
        app.sync_shift(false);
        assert!(!app.state.shift_down());
    }

    #[test]
    fn test_typing_updates_buffer() {
        let mut app = test_app();
        app.key_pressed(KeyId::KeyH, false, false);
        app.key_released(KeyId::KeyH);
        app.key_pressed(KeyId::KeyI, false, false);
        assert_eq!(app.buffer.text(), "hi");
    }
}

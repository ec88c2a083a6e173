mod palette;

use ratatui::prelude::*;

pub use palette::Palette;

/// How a key cell is highlighted right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyHighlight {
    /// Not pressed
    Idle,
    /// Momentary press (physical or pointer)
    Pressed,
    /// Latched modifier state (CapsLock on, Shift held)
    Latched,
}

pub struct Theme {
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::new(),
        }
    }

    // Panel border style
    pub fn panel_border(&self) -> Style {
        Style::default().fg(self.palette.border_default)
    }

    // Panel title
    pub fn panel_title(&self, title: &str) -> Line<'_> {
        Line::styled(
            format!(" {} ", title),
            Style::default()
                .fg(self.palette.accent_primary)
                .add_modifier(Modifier::BOLD),
        )
    }

    // Primary text
    pub fn text_primary(&self) -> Style {
        Style::default().fg(self.palette.text_primary)
    }

    // Secondary/dimmed text
    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.palette.text_secondary)
    }

    // Muted text (hints, labels)
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.palette.text_muted)
    }

    // Key hint style (the key part like "Esc")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.palette.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    // Status message style
    pub fn status_message(&self) -> Style {
        Style::default().fg(self.palette.accent_warning)
    }

    // Error text in the status line
    pub fn status_error(&self) -> Style {
        Style::default().fg(self.palette.accent_danger)
    }

    // Locale badge ("EN" / "RU")
    pub fn locale_badge(&self) -> Style {
        Style::default()
            .fg(self.palette.badge_fg)
            .bg(self.palette.badge_bg)
            .add_modifier(Modifier::BOLD)
    }

    // Key cap style for one highlight state
    pub fn key_cap(&self, highlight: KeyHighlight) -> Style {
        match highlight {
            KeyHighlight::Idle => Style::default()
                .fg(self.palette.key_cap_fg)
                .bg(self.palette.key_cap_bg),
            KeyHighlight::Pressed => Style::default()
                .fg(self.palette.key_pressed_fg)
                .bg(self.palette.key_pressed_bg)
                .add_modifier(Modifier::BOLD),
            KeyHighlight::Latched => Style::default()
                .fg(self.palette.key_latched_fg)
                .bg(self.palette.key_latched_bg)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::new)
}

mod app;
mod handlers;
mod theme;
mod ui;

use std::io;
use std::path::PathBuf;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::prelude::*;

use klava_core::Settings;

use app::App;
use handlers::{handle_key, handle_mouse};
use ui::draw_ui;

pub fn run(settings: Settings, settings_path: PathBuf) -> anyhow::Result<()> {
    // Key release reporting drives real shift/caps transitions where the
    // terminal supports it; elsewhere the handlers fall back to mirroring
    // the modifier bits.
    let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
    let mut app = App::new(settings, settings_path, enhanced_keys)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    if enhanced_keys {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = loop {
        if let Err(err) = terminal.draw(|f| draw_ui(f, &app)) {
            break Err(err.into());
        }

        if !event::poll(std::time::Duration::from_millis(200))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if handle_key(&mut app, key) {
                    break Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse(&mut app, mouse)?,
            _ => {}
        }
    };

    if enhanced_keys {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    disable_raw_mode()?;
    terminal.show_cursor()?;

    run_result
}

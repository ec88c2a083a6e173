// Klava Event Router
// Normalizes physical and pointer key events into state and editor actions

use log::debug;

use crate::editor::TextBuffer;
use crate::key::KeyId;
use crate::layout::Layout;
use crate::state::KeyboardState;

/// Snapshot of one resolved press: the key and the glyph it displayed at
/// press time. Threaded through handler calls as a plain value; the pointer
/// path keeps one alive between press and release so a release that misses
/// every key can replay the press-time action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PressedKey {
    pub id: KeyId,
    pub glyph: String,
}

/// What routing one event actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Characters entered the buffer.
    Inserted,
    /// Buffer or cursor edited (backspace, delete, arrows).
    Edited,
    /// The case/shift state machine transitioned.
    StateChanged,
    /// Nothing observable (chord keys, boundary no-ops, repeat CapsLock).
    None,
}

/// Result of routing one press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub pressed: PressedKey,
    pub effect: Effect,
    /// Set when a Ctrl+Alt chord swapped the locale; the caller persists it.
    pub locale_toggled: bool,
}

/// Route a key press (physical key-down or pointer press on a key cell).
///
/// The displayed glyph is resolved against the locale and case in effect
/// *before* any transition, exactly as the key cell showed it. Returns
/// `None` for identifiers the layout does not know; the event is consumed
/// either way.
pub fn press(
    layout: &Layout,
    state: &mut KeyboardState,
    buffer: &mut TextBuffer,
    id: KeyId,
    repeat: bool,
    chord: bool,
) -> Option<Outcome> {
    let def = layout.get(id)?;
    let glyph = def.glyph(state.locale(), state.case()).to_string();

    // A press carrying Ctrl+Alt swaps the locale before anything else.
    // Unlike CapsLock there is no repeat guard here.
    let locale_toggled = if chord {
        let locale = state.toggle_locale();
        debug!("locale toggled to {locale}");
        true
    } else {
        false
    };

    let effect = if id == KeyId::CapsLock {
        if state.press_caps(repeat) {
            Effect::StateChanged
        } else {
            Effect::None
        }
    } else if let Some(side) = id.shift_side() {
        if state.press_shift(side) {
            Effect::StateChanged
        } else {
            Effect::None
        }
    } else if id.is_chord_key() {
        Effect::None
    } else {
        match id {
            KeyId::Backspace => edited(buffer.backspace()),
            KeyId::Delete => edited(buffer.delete()),
            KeyId::ArrowLeft | KeyId::ArrowUp => edited(buffer.move_left()),
            KeyId::ArrowRight | KeyId::ArrowDown => edited(buffer.move_right()),
            KeyId::Tab => {
                buffer.insert("\t");
                Effect::Inserted
            }
            KeyId::Enter => {
                buffer.insert("\n");
                Effect::Inserted
            }
            _ => {
                buffer.insert(&glyph);
                Effect::Inserted
            }
        }
    };

    debug!("press {id}: {effect:?}");
    Some(Outcome {
        pressed: PressedKey { id, glyph },
        effect,
        locale_toggled,
    })
}

/// Route a physical key release. Only shift releases drive the state
/// machine; CapsLock latches and everything else releases silently.
pub fn release(state: &mut KeyboardState, id: KeyId) -> Effect {
    let Some(side) = id.shift_side() else {
        return Effect::None;
    };
    let case_before = state.case();
    state.release_shift(side);
    if state.case() == case_before {
        Effect::None
    } else {
        Effect::StateChanged
    }
}

/// Route a pointer release.
///
/// The release may land on a different cell than the press, or on none at
/// all. A miss replays the press-time snapshot so an on-screen modifier
/// dragged off its cell still releases; a hit on another key resolves to
/// that key, leaving the pressed modifier engaged until a later release
/// resolves to it. CapsLock is exempt: it latches until its own toggle.
///
/// Returns the key the release resolved to, with the state effect.
pub fn pointer_release(
    state: &mut KeyboardState,
    target: Option<KeyId>,
    grab: Option<&PressedKey>,
) -> Option<(KeyId, Effect)> {
    let id = target.or_else(|| grab.map(|snapshot| snapshot.id))?;
    if id == KeyId::CapsLock {
        return Some((id, Effect::None));
    }

    let mut effect = Effect::None;
    if let Some(side) = id.shift_side() {
        if state.shift_side_down(side) {
            let case_before = state.case();
            state.release_shift(side);
            if state.case() != case_before {
                effect = Effect::StateChanged;
            }
        }
    }
    debug!("pointer release resolved to {id}: {effect:?}");
    Some((id, effect))
}

fn edited(changed: bool) -> Effect {
    if changed {
        Effect::Edited
    } else {
        Effect::None
    }
}

// Klava Case/Shift State Machine
// Tracks CapsLock, both Shift keys and the active locale

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::key::ShiftSide;

/// The four case variants a key cell can display.
///
/// Always derived from (caps_lock, shift), never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CaseVariant {
    Lower,
    Upper,
    Caps,
    ShiftCaps,
}

/// Keyboard locale. The preference survives sessions via [`crate::Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[strum(serialize = "EN")]
    En,
    #[strum(serialize = "RU")]
    Ru,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

impl Locale {
    /// The other locale.
    pub fn toggled(self) -> Locale {
        match self {
            Locale::En => Locale::Ru,
            Locale::Ru => Locale::En,
        }
    }
}

/// Modifier and locale state for one keyboard session.
///
/// The active case is a pure function of the caps flag and the OR of the two
/// shift flags, so releasing one of two held shifts keeps ShiftCaps until the
/// second goes up as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardState {
    shift_left: bool,
    shift_right: bool,
    caps_lock: bool,
    locale: Locale,
}

impl KeyboardState {
    pub fn new(locale: Locale) -> Self {
        Self {
            shift_left: false,
            shift_right: false,
            caps_lock: false,
            locale,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn caps_lock(&self) -> bool {
        self.caps_lock
    }

    /// True while either shift key is held.
    pub fn shift_down(&self) -> bool {
        self.shift_left || self.shift_right
    }

    pub fn shift_side_down(&self, side: ShiftSide) -> bool {
        match side {
            ShiftSide::Left => self.shift_left,
            ShiftSide::Right => self.shift_right,
        }
    }

    /// The currently active case variant.
    pub fn case(&self) -> CaseVariant {
        match (self.caps_lock, self.shift_down()) {
            (false, false) => CaseVariant::Lower,
            (false, true) => CaseVariant::Upper,
            (true, false) => CaseVariant::Caps,
            (true, true) => CaseVariant::ShiftCaps,
        }
    }

    /// Register a shift press. The side's flag always goes down; since the
    /// derived case is the OR of both flags, only the first shift of a pair
    /// changes it.
    ///
    /// Returns true if the case changed.
    pub fn press_shift(&mut self, side: ShiftSide) -> bool {
        let first = !self.shift_down();
        match side {
            ShiftSide::Left => self.shift_left = true,
            ShiftSide::Right => self.shift_right = true,
        }
        first
    }

    /// Register a shift release. Clears that side's flag unconditionally.
    ///
    /// Returns true if the flag changed.
    pub fn release_shift(&mut self, side: ShiftSide) -> bool {
        let flag = match side {
            ShiftSide::Left => &mut self.shift_left,
            ShiftSide::Right => &mut self.shift_right,
        };
        let was_down = *flag;
        *flag = false;
        was_down
    }

    /// Toggle CapsLock on a press. Auto-repeat presses must not re-toggle.
    ///
    /// Returns true if the flag changed.
    pub fn press_caps(&mut self, repeat: bool) -> bool {
        if repeat {
            return false;
        }
        self.caps_lock = !self.caps_lock;
        true
    }

    /// Swap EN/RU, independent of the case state. Returns the new locale.
    pub fn toggle_locale(&mut self) -> Locale {
        self.locale = self.locale.toggled();
        self.locale
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new(Locale::En)
    }
}

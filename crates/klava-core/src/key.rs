// Klava Key Identifiers
// Physical key identity for the on-screen keyboard

use strum_macros::{Display, EnumString};

/// Identifies one physical key cell on the board.
///
/// Variants follow the conventional writing-system-neutral key codes, so a
/// key keeps its identity no matter which locale or case is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum KeyId {
    Backquote,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Digit0,
    Minus,
    Equal,
    Backspace,
    Tab,
    KeyQ,
    KeyW,
    KeyE,
    KeyR,
    KeyT,
    KeyY,
    KeyU,
    KeyI,
    KeyO,
    KeyP,
    BracketLeft,
    BracketRight,
    Backslash,
    Delete,
    CapsLock,
    KeyA,
    KeyS,
    KeyD,
    KeyF,
    KeyG,
    KeyH,
    KeyJ,
    KeyK,
    KeyL,
    Semicolon,
    Quote,
    Enter,
    ShiftLeft,
    KeyZ,
    KeyX,
    KeyC,
    KeyV,
    KeyB,
    KeyN,
    KeyM,
    Comma,
    Period,
    Slash,
    ArrowUp,
    ShiftRight,
    ControlLeft,
    AltLeft,
    Space,
    AltRight,
    ArrowLeft,
    ArrowDown,
    ArrowRight,
    ControlRight,
}

/// Which side a shift key sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftSide {
    Left,
    Right,
}

impl KeyId {
    /// The shift side for ShiftLeft/ShiftRight, `None` for everything else.
    pub fn shift_side(self) -> Option<ShiftSide> {
        match self {
            KeyId::ShiftLeft => Some(ShiftSide::Left),
            KeyId::ShiftRight => Some(ShiftSide::Right),
            _ => None,
        }
    }

    /// Pure modifiers whose highlight reflects latched state rather than a
    /// momentary press (cleared only by their own release/toggle).
    pub fn is_latching(self) -> bool {
        matches!(self, KeyId::CapsLock | KeyId::ShiftLeft | KeyId::ShiftRight)
    }

    /// Ctrl/Alt keys: they never reach the text buffer, only chords.
    pub fn is_chord_key(self) -> bool {
        matches!(
            self,
            KeyId::ControlLeft | KeyId::ControlRight | KeyId::AltLeft | KeyId::AltRight
        )
    }

    /// Look up the key cell for a base-layout letter.
    pub fn for_letter(letter: char) -> Option<KeyId> {
        let id = match letter {
            'q' => KeyId::KeyQ,
            'w' => KeyId::KeyW,
            'e' => KeyId::KeyE,
            'r' => KeyId::KeyR,
            't' => KeyId::KeyT,
            'y' => KeyId::KeyY,
            'u' => KeyId::KeyU,
            'i' => KeyId::KeyI,
            'o' => KeyId::KeyO,
            'p' => KeyId::KeyP,
            'a' => KeyId::KeyA,
            's' => KeyId::KeyS,
            'd' => KeyId::KeyD,
            'f' => KeyId::KeyF,
            'g' => KeyId::KeyG,
            'h' => KeyId::KeyH,
            'j' => KeyId::KeyJ,
            'k' => KeyId::KeyK,
            'l' => KeyId::KeyL,
            'z' => KeyId::KeyZ,
            'x' => KeyId::KeyX,
            'c' => KeyId::KeyC,
            'v' => KeyId::KeyV,
            'b' => KeyId::KeyB,
            'n' => KeyId::KeyN,
            'm' => KeyId::KeyM,
            _ => return None,
        };
        Some(id)
    }

    /// Look up the key cell for a digit.
    pub fn for_digit(digit: char) -> Option<KeyId> {
        let id = match digit {
            '1' => KeyId::Digit1,
            '2' => KeyId::Digit2,
            '3' => KeyId::Digit3,
            '4' => KeyId::Digit4,
            '5' => KeyId::Digit5,
            '6' => KeyId::Digit6,
            '7' => KeyId::Digit7,
            '8' => KeyId::Digit8,
            '9' => KeyId::Digit9,
            '0' => KeyId::Digit0,
            _ => return None,
        };
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_key_display_and_parse() {
        assert_eq!(KeyId::KeyQ.to_string(), "KeyQ");
        assert_eq!(KeyId::from_str("Digit1"), Ok(KeyId::Digit1));
        assert!(KeyId::from_str("NoSuchKey").is_err());
    }

    #[test]
    fn test_shift_side() {
        assert_eq!(KeyId::ShiftLeft.shift_side(), Some(ShiftSide::Left));
        assert_eq!(KeyId::ShiftRight.shift_side(), Some(ShiftSide::Right));
        assert_eq!(KeyId::KeyA.shift_side(), None);
    }

    #[test]
    fn test_latching_keys() {
        assert!(KeyId::CapsLock.is_latching());
        assert!(KeyId::ShiftLeft.is_latching());
        assert!(!KeyId::Enter.is_latching());
    }

    #[test]
    fn test_chord_keys() {
        assert!(KeyId::ControlLeft.is_chord_key());
        assert!(KeyId::AltRight.is_chord_key());
        assert!(!KeyId::Space.is_chord_key());
    }

    #[test]
    fn test_letter_lookup() {
        assert_eq!(KeyId::for_letter('q'), Some(KeyId::KeyQ));
        assert_eq!(KeyId::for_letter('m'), Some(KeyId::KeyM));
        assert_eq!(KeyId::for_letter('й'), None);
    }

    #[test]
    fn test_digit_lookup() {
        assert_eq!(KeyId::for_digit('1'), Some(KeyId::Digit1));
        assert_eq!(KeyId::for_digit('0'), Some(KeyId::Digit0));
        assert_eq!(KeyId::for_digit('x'), None);
    }
}

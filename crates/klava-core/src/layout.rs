// Klava Layout Table
// Static per-locale, per-case glyph table for the key grid

use indexmap::IndexMap;
use thiserror::Error;

use crate::key::KeyId;
use crate::state::{CaseVariant, Locale};

/// Default rendered width of an ordinary key cell, in terminal columns.
const KEY_WIDTH: u16 = 4;

/// Errors raised while building the layout table. These guard against
/// malformed row definitions and surface before the first event is handled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("no key cell for character '{0}'")]
    UnknownKeyChar(char),
    #[error("row mismatch: {expected} keys but {got} {what} characters")]
    RowLengthMismatch {
        expected: usize,
        got: usize,
        what: &'static str,
    },
    #[error("duplicate definition for key {0}")]
    DuplicateKey(KeyId),
}

/// The four case-variant glyphs for one locale of one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseGlyphs {
    lower: String,
    upper: String,
    caps: String,
    shift_caps: String,
}

impl CaseGlyphs {
    /// Defaults from a single lowercase form: upper and caps take the
    /// case-folded uppercase, shift+caps falls back to the lowercase form
    /// (shift cancels caps on letters). Folding is a no-op for digits and
    /// punctuation, which then show the same glyph in all four cases.
    pub fn folded(base: &str) -> Self {
        let upper = base.to_uppercase();
        if upper == base {
            Self {
                lower: base.to_string(),
                upper: base.to_string(),
                caps: base.to_string(),
                shift_caps: base.to_string(),
            }
        } else {
            Self {
                lower: base.to_string(),
                upper: upper.clone(),
                caps: upper,
                shift_caps: base.to_string(),
            }
        }
    }

    /// Explicit lower/upper pair: caps mirrors lower and shift+caps mirrors
    /// upper, so CapsLock leaves shifted punctuation and digits alone.
    pub fn shifted(lower: &str, upper: &str) -> Self {
        Self {
            lower: lower.to_string(),
            upper: upper.to_string(),
            caps: lower.to_string(),
            shift_caps: upper.to_string(),
        }
    }

    /// The glyph for one case variant.
    pub fn get(&self, case: CaseVariant) -> &str {
        match case {
            CaseVariant::Lower => &self.lower,
            CaseVariant::Upper => &self.upper,
            CaseVariant::Caps => &self.caps,
            CaseVariant::ShiftCaps => &self.shift_caps,
        }
    }

    fn contains_char(&self, ch: char) -> bool {
        [&self.lower, &self.upper, &self.caps, &self.shift_caps]
            .iter()
            .any(|glyph| {
                let mut chars = glyph.chars();
                chars.next() == Some(ch) && chars.next().is_none()
            })
    }
}

/// One key cell: identity, render width and the per-locale glyph sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDefinition {
    id: KeyId,
    width: u16,
    en: CaseGlyphs,
    ru: CaseGlyphs,
}

impl KeyDefinition {
    pub fn new(id: KeyId, en: CaseGlyphs, ru: CaseGlyphs) -> Self {
        Self {
            id,
            width: KEY_WIDTH,
            en,
            ru,
        }
    }

    /// A key showing the same glyphs in both locales.
    pub fn uniform(id: KeyId, glyphs: CaseGlyphs) -> Self {
        Self::new(id, glyphs.clone(), glyphs)
    }

    /// A control key captioned with a fixed label in both locales.
    pub fn label(id: KeyId, text: &str) -> Self {
        Self::uniform(id, CaseGlyphs::folded(text))
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn id(&self) -> KeyId {
        self.id
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn glyphs(&self, locale: Locale) -> &CaseGlyphs {
        match locale {
            Locale::En => &self.en,
            Locale::Ru => &self.ru,
        }
    }

    /// The single glyph displayed (and inserted) for a locale and case.
    pub fn glyph(&self, locale: Locale, case: CaseVariant) -> &str {
        self.glyphs(locale).get(case)
    }
}

/// The full board: ordered rows of key definitions plus an identity index.
///
/// Built once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Layout {
    rows: Vec<Vec<KeyDefinition>>,
    index: IndexMap<KeyId, (usize, usize)>,
}

impl Layout {
    /// The built-in EN/RU board, five rows.
    pub fn standard() -> Result<Layout, LayoutError> {
        let mut row1 = vec![KeyDefinition::new(
            KeyId::Backquote,
            CaseGlyphs::shifted("`", "~"),
            CaseGlyphs::folded("ё"),
        )];
        row1.extend(digit_keys("1234567890", "!@#$%^&*()", "!\"№;%:?*()")?);
        row1.push(KeyDefinition::uniform(
            KeyId::Minus,
            CaseGlyphs::shifted("-", "_"),
        ));
        row1.push(KeyDefinition::uniform(
            KeyId::Equal,
            CaseGlyphs::shifted("=", "+"),
        ));
        row1.push(KeyDefinition::label(KeyId::Backspace, "Backspace").with_width(9));

        let mut row2 = vec![KeyDefinition::label(KeyId::Tab, "Tab").with_width(5)];
        row2.extend(letter_keys("qwertyuiop", "йцукенгшщз")?);
        row2.push(KeyDefinition::new(
            KeyId::BracketLeft,
            CaseGlyphs::shifted("[", "{"),
            CaseGlyphs::folded("х"),
        ));
        row2.push(KeyDefinition::new(
            KeyId::BracketRight,
            CaseGlyphs::shifted("]", "}"),
            CaseGlyphs::folded("ъ"),
        ));
        row2.push(KeyDefinition::new(
            KeyId::Backslash,
            CaseGlyphs::shifted("\\", "|"),
            CaseGlyphs::shifted("\\", "/"),
        ));
        row2.push(KeyDefinition::label(KeyId::Delete, "Del").with_width(5));

        let mut row3 = vec![KeyDefinition::label(KeyId::CapsLock, "CapsLock").with_width(10)];
        row3.extend(letter_keys("asdfghjkl", "фывапролд")?);
        row3.push(KeyDefinition::new(
            KeyId::Semicolon,
            CaseGlyphs::shifted(";", ":"),
            CaseGlyphs::folded("ж"),
        ));
        row3.push(KeyDefinition::new(
            KeyId::Quote,
            CaseGlyphs::shifted("'", "\""),
            CaseGlyphs::folded("э"),
        ));
        row3.push(KeyDefinition::label(KeyId::Enter, "Enter").with_width(7));

        let mut row4 = vec![KeyDefinition::label(KeyId::ShiftLeft, "Shift").with_width(9)];
        row4.extend(letter_keys("zxcvbnm", "ячсмить")?);
        row4.push(KeyDefinition::new(
            KeyId::Comma,
            CaseGlyphs::shifted(",", "<"),
            CaseGlyphs::folded("б"),
        ));
        row4.push(KeyDefinition::new(
            KeyId::Period,
            CaseGlyphs::shifted(".", ">"),
            CaseGlyphs::folded("ю"),
        ));
        row4.push(KeyDefinition::new(
            KeyId::Slash,
            CaseGlyphs::shifted("/", "?"),
            CaseGlyphs::shifted(".", ","),
        ));
        row4.push(KeyDefinition::label(KeyId::ArrowUp, "↑"));
        row4.push(KeyDefinition::label(KeyId::ShiftRight, "Shift").with_width(9));

        let row5 = vec![
            KeyDefinition::label(KeyId::ControlLeft, "Ctrl").with_width(6),
            KeyDefinition::label(KeyId::AltLeft, "Alt").with_width(5),
            KeyDefinition::label(KeyId::Space, " ").with_width(30),
            KeyDefinition::label(KeyId::AltRight, "Alt").with_width(5),
            KeyDefinition::label(KeyId::ArrowLeft, "←"),
            KeyDefinition::label(KeyId::ArrowDown, "↓"),
            KeyDefinition::label(KeyId::ArrowRight, "→"),
            KeyDefinition::label(KeyId::ControlRight, "Ctrl").with_width(6),
        ];

        Layout::from_rows(vec![row1, row2, row3, row4, row5])
    }

    fn from_rows(rows: Vec<Vec<KeyDefinition>>) -> Result<Layout, LayoutError> {
        let mut index = IndexMap::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, def) in row.iter().enumerate() {
                if index.insert(def.id(), (r, c)).is_some() {
                    return Err(LayoutError::DuplicateKey(def.id()));
                }
            }
        }
        Ok(Layout { rows, index })
    }

    pub fn rows(&self) -> &[Vec<KeyDefinition>] {
        &self.rows
    }

    pub fn key_count(&self) -> usize {
        self.index.len()
    }

    pub fn get(&self, id: KeyId) -> Option<&KeyDefinition> {
        let (r, c) = *self.index.get(&id)?;
        Some(&self.rows[r][c])
    }

    /// Resolve a typed character back to its key cell.
    ///
    /// The active locale is searched first, then the other one, each in row
    /// order; first match wins. Characters the board does not produce map to
    /// nothing and the caller ignores the event.
    pub fn key_for_char(&self, ch: char, locale: Locale) -> Option<KeyId> {
        for loc in [locale, locale.toggled()] {
            for row in &self.rows {
                for def in row {
                    if def.glyphs(loc).contains_char(ch) {
                        return Some(def.id());
                    }
                }
            }
        }
        None
    }
}

/// Digit keys: the digit paired with its per-locale shifted character.
fn digit_keys(
    digits: &str,
    en_shift: &str,
    ru_shift: &str,
) -> Result<Vec<KeyDefinition>, LayoutError> {
    let digits: Vec<char> = digits.chars().collect();
    let en: Vec<char> = en_shift.chars().collect();
    let ru: Vec<char> = ru_shift.chars().collect();
    check_len(digits.len(), en.len(), "EN shifted")?;
    check_len(digits.len(), ru.len(), "RU shifted")?;

    digits
        .iter()
        .zip(en.iter().zip(ru.iter()))
        .map(|(&d, (&e, &r))| {
            let id = KeyId::for_digit(d).ok_or(LayoutError::UnknownKeyChar(d))?;
            Ok(KeyDefinition::new(
                id,
                CaseGlyphs::shifted(&d.to_string(), &e.to_string()),
                CaseGlyphs::shifted(&d.to_string(), &r.to_string()),
            ))
        })
        .collect()
}

/// Letter keys: EN base letters zipped with their RU counterparts, both
/// case-folded.
fn letter_keys(en: &str, ru: &str) -> Result<Vec<KeyDefinition>, LayoutError> {
    let en: Vec<char> = en.chars().collect();
    let ru: Vec<char> = ru.chars().collect();
    check_len(en.len(), ru.len(), "RU letter")?;

    en.iter()
        .zip(ru.iter())
        .map(|(&e, &r)| {
            let id = KeyId::for_letter(e).ok_or(LayoutError::UnknownKeyChar(e))?;
            Ok(KeyDefinition::new(
                id,
                CaseGlyphs::folded(&e.to_string()),
                CaseGlyphs::folded(&r.to_string()),
            ))
        })
        .collect()
}

fn check_len(expected: usize, got: usize, what: &'static str) -> Result<(), LayoutError> {
    if expected != got {
        return Err(LayoutError::RowLengthMismatch {
            expected,
            got,
            what,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout_builds() {
        let layout = Layout::standard().unwrap();
        assert_eq!(layout.rows().len(), 5);
        assert_eq!(layout.key_count(), 63);
    }

    #[test]
    fn test_digit_rule_caps_does_not_shift() {
        let layout = Layout::standard().unwrap();
        let key = layout.get(KeyId::Digit1).unwrap();
        assert_eq!(key.glyph(Locale::En, CaseVariant::Lower), "1");
        assert_eq!(key.glyph(Locale::En, CaseVariant::Upper), "!");
        assert_eq!(key.glyph(Locale::En, CaseVariant::Caps), "1");
        assert_eq!(key.glyph(Locale::En, CaseVariant::ShiftCaps), "!");
    }

    #[test]
    fn test_letter_folding() {
        let layout = Layout::standard().unwrap();
        let key = layout.get(KeyId::KeyQ).unwrap();
        assert_eq!(key.glyph(Locale::En, CaseVariant::Lower), "q");
        assert_eq!(key.glyph(Locale::En, CaseVariant::Upper), "Q");
        assert_eq!(key.glyph(Locale::En, CaseVariant::Caps), "Q");
        assert_eq!(key.glyph(Locale::En, CaseVariant::ShiftCaps), "q");
        assert_eq!(key.glyph(Locale::Ru, CaseVariant::Lower), "й");
        assert_eq!(key.glyph(Locale::Ru, CaseVariant::Caps), "Й");
    }

    #[test]
    fn test_punctuation_unaffected_by_folding() {
        let glyphs = CaseGlyphs::folded("-");
        assert_eq!(glyphs.get(CaseVariant::Lower), "-");
        assert_eq!(glyphs.get(CaseVariant::Upper), "-");
        assert_eq!(glyphs.get(CaseVariant::Caps), "-");
        assert_eq!(glyphs.get(CaseVariant::ShiftCaps), "-");
    }

    #[test]
    fn test_ru_punctuation_pairs_ignore_caps() {
        // RU slash cell types '.' and ',' regardless of CapsLock
        let layout = Layout::standard().unwrap();
        let key = layout.get(KeyId::Slash).unwrap();
        assert_eq!(key.glyph(Locale::Ru, CaseVariant::Lower), ".");
        assert_eq!(key.glyph(Locale::Ru, CaseVariant::Caps), ".");
        assert_eq!(key.glyph(Locale::Ru, CaseVariant::Upper), ",");
        assert_eq!(key.glyph(Locale::Ru, CaseVariant::ShiftCaps), ",");
    }

    #[test]
    fn test_label_keys_fold_like_letters() {
        let layout = Layout::standard().unwrap();
        let key = layout.get(KeyId::ShiftLeft).unwrap();
        assert_eq!(key.glyph(Locale::En, CaseVariant::Lower), "Shift");
        assert_eq!(key.glyph(Locale::En, CaseVariant::Upper), "SHIFT");
        assert_eq!(key.glyph(Locale::Ru, CaseVariant::Lower), "Shift");
    }

    #[test]
    fn test_key_for_char_prefers_active_locale() {
        let layout = Layout::standard().unwrap();
        assert_eq!(layout.key_for_char('q', Locale::En), Some(KeyId::KeyQ));
        assert_eq!(layout.key_for_char('й', Locale::En), Some(KeyId::KeyQ));
        // '/' is EN Slash lower but also RU Backslash upper
        assert_eq!(layout.key_for_char('/', Locale::En), Some(KeyId::Slash));
        assert_eq!(
            layout.key_for_char('/', Locale::Ru),
            Some(KeyId::Backslash)
        );
        // '.' is EN Period lower and RU Slash lower
        assert_eq!(layout.key_for_char('.', Locale::En), Some(KeyId::Period));
        assert_eq!(layout.key_for_char('.', Locale::Ru), Some(KeyId::Slash));
    }

    #[test]
    fn test_key_for_char_unknown() {
        let layout = Layout::standard().unwrap();
        assert_eq!(layout.key_for_char('€', Locale::En), None);
        assert_eq!(layout.key_for_char('\u{7}', Locale::Ru), None);
    }

    #[test]
    fn test_space_resolves() {
        let layout = Layout::standard().unwrap();
        assert_eq!(layout.key_for_char(' ', Locale::En), Some(KeyId::Space));
        let key = layout.get(KeyId::Space).unwrap();
        assert_eq!(key.glyph(Locale::Ru, CaseVariant::ShiftCaps), " ");
    }

    #[test]
    fn test_digit_row_length_mismatch_fails() {
        let err = digit_keys("123", "!@", "!@#").unwrap_err();
        assert_eq!(
            err,
            LayoutError::RowLengthMismatch {
                expected: 3,
                got: 2,
                what: "EN shifted",
            }
        );
    }

    #[test]
    fn test_letter_row_unknown_letter_fails() {
        let err = letter_keys("q1", "йц").unwrap_err();
        assert_eq!(err, LayoutError::UnknownKeyChar('1'));
    }

    #[test]
    fn test_duplicate_key_fails() {
        let dup = vec![vec![
            KeyDefinition::label(KeyId::Enter, "Enter"),
            KeyDefinition::label(KeyId::Enter, "Enter"),
        ]];
        assert_eq!(
            Layout::from_rows(dup).unwrap_err(),
            LayoutError::DuplicateKey(KeyId::Enter)
        );
    }
}

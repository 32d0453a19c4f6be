//! Keys with modifiers
//!
//! Provides [`KeyWithModifier`], the key a profile binds an action to, and
//! its canonical text form (`Shift+Ctrl+Alt+Super+<key>`).

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Non-alphanumeric keys addressable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Space,
    Enter,
    Tab,
    Escape,
    Backspace,
    Insert,
    Delete,
    Right,
    Left,
    Down,
    Up,
    PageUp,
    PageDown,
    Home,
    End,
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,
    Semicolon,
    Equal,
    LeftBracket,
    Backslash,
    RightBracket,
    GraveAccent,
}

/// Canonical names, matched case-insensitively on parse
const NAMED_KEYS: &[(NamedKey, &str)] = &[
    (NamedKey::Space, "Space"),
    (NamedKey::Enter, "Enter"),
    (NamedKey::Tab, "Tab"),
    (NamedKey::Escape, "Escape"),
    (NamedKey::Backspace, "Backspace"),
    (NamedKey::Insert, "Insert"),
    (NamedKey::Delete, "Delete"),
    (NamedKey::Right, "Right"),
    (NamedKey::Left, "Left"),
    (NamedKey::Down, "Down"),
    (NamedKey::Up, "Up"),
    (NamedKey::PageUp, "PageUp"),
    (NamedKey::PageDown, "PageDown"),
    (NamedKey::Home, "Home"),
    (NamedKey::End, "End"),
    (NamedKey::CapsLock, "CapsLock"),
    (NamedKey::ScrollLock, "ScrollLock"),
    (NamedKey::NumLock, "NumLock"),
    (NamedKey::PrintScreen, "PrintScreen"),
    (NamedKey::Pause, "Pause"),
    (NamedKey::Apostrophe, "Apostrophe"),
    (NamedKey::Comma, "Comma"),
    (NamedKey::Minus, "Minus"),
    (NamedKey::Period, "Period"),
    (NamedKey::Slash, "Slash"),
    (NamedKey::Semicolon, "Semicolon"),
    (NamedKey::Equal, "Equal"),
    (NamedKey::LeftBracket, "LeftBracket"),
    (NamedKey::Backslash, "Backslash"),
    (NamedKey::RightBracket, "RightBracket"),
    (NamedKey::GraveAccent, "GraveAccent"),
];

/// Alternative spellings accepted on parse, never rendered
///
/// `+` separates modifiers, so there is no single-character spelling for it.
const NAMED_KEY_ALIASES: &[(NamedKey, &str)] = &[
    (NamedKey::Escape, "Esc"),
    (NamedKey::Enter, "Return"),
    (NamedKey::Delete, "Del"),
    (NamedKey::Insert, "Ins"),
    (NamedKey::Apostrophe, "'"),
    (NamedKey::Comma, ","),
    (NamedKey::Minus, "-"),
    (NamedKey::Period, "."),
    (NamedKey::Slash, "/"),
    (NamedKey::Semicolon, ";"),
    (NamedKey::Equal, "="),
    (NamedKey::LeftBracket, "["),
    (NamedKey::Backslash, "\\"),
    (NamedKey::RightBracket, "]"),
    (NamedKey::GraveAccent, "`"),
];

impl NamedKey {
    /// Canonical name
    #[must_use]
    pub fn name(self) -> &'static str {
        NAMED_KEYS
            .iter()
            .find(|(key, _)| *key == self)
            .map_or("", |(_, name)| name)
    }

    fn from_name(name: &str) -> Option<Self> {
        NAMED_KEYS
            .iter()
            .chain(NAMED_KEY_ALIASES)
            .find(|(_, candidate)| candidate.eq_ignore_ascii_case(name))
            .map(|(key, _)| *key)
    }
}

/// A physical key, without modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// `A`–`Z`, stored uppercase
    Letter(char),
    /// Top-row digit `0`–`9`
    Digit(u8),
    /// Function key `F1`–`F25`
    Function(u8),
    /// Keypad digit `0`–`9`
    Keypad(u8),
    /// Any other named key
    Named(NamedKey),
}

/// Highest function key number
pub const MAX_FUNCTION_KEY: u8 = 25;

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letter(c) => write!(f, "{c}"),
            Self::Digit(d) => write!(f, "{d}"),
            Self::Function(n) => write!(f, "F{n}"),
            Self::Keypad(d) => write!(f, "Keypad{d}"),
            Self::Named(named) => f.write_str(named.name()),
        }
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || KeyParseError::UnknownKey(s.to_string());
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphabetic() {
                return Ok(Self::Letter(c.to_ascii_uppercase()));
            }
            if let Some(d) = c.to_digit(10) {
                return u8::try_from(d).map(Self::Digit).map_err(|_| unknown());
            }
        }

        if let Some(named) = NamedKey::from_name(s) {
            return Ok(Self::Named(named));
        }

        let upper = s.to_ascii_uppercase();
        if let Some(rest) = upper.strip_prefix("KEYPAD") {
            return match rest.parse::<u8>() {
                Ok(d) if d <= 9 && rest.len() == 1 => Ok(Self::Keypad(d)),
                _ => Err(unknown()),
            };
        }
        if let Some(rest) = upper.strip_prefix('F') {
            return match rest.parse::<u8>() {
                Ok(n) if (1..=MAX_FUNCTION_KEY).contains(&n) => Ok(Self::Function(n)),
                _ => Err(unknown()),
            };
        }

        Err(unknown())
    }
}

/// Modifier keys held together with a [`Key`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift
    pub shift: bool,
    /// Control
    pub control: bool,
    /// Alt / Option
    pub alt: bool,
    /// Super / Command / Windows
    pub super_key: bool,
}

impl KeyModifiers {
    /// No modifiers held
    #[inline]
    #[must_use]
    pub const fn none() -> Self {
        Self {
            shift: false,
            control: false,
            alt: false,
            super_key: false,
        }
    }

    /// Whether no modifier is held
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }

    /// Names of held modifiers in canonical order
    fn names(self) -> impl Iterator<Item = &'static str> {
        [
            (self.shift, "Shift"),
            (self.control, "Ctrl"),
            (self.alt, "Alt"),
            (self.super_key, "Super"),
        ]
        .into_iter()
        .filter_map(|(held, name)| held.then_some(name))
    }

    fn set(&mut self, name: &str) -> Result<(), KeyParseError> {
        match name.to_ascii_uppercase().as_str() {
            "SHIFT" => self.shift = true,
            "CTRL" | "CONTROL" => self.control = true,
            "ALT" | "OPTION" => self.alt = true,
            "SUPER" | "CMD" | "COMMAND" => self.super_key = true,
            _ => return Err(KeyParseError::UnknownModifier(name.to_string())),
        }
        Ok(())
    }
}

/// A key together with the modifiers that must be held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyWithModifier {
    /// The key
    pub key: Key,
    /// Held modifiers
    pub modifiers: KeyModifiers,
}

impl KeyWithModifier {
    /// Key without modifiers
    #[inline]
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::none(),
        }
    }

    /// Add modifiers
    #[inline]
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

impl Display for KeyWithModifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for name in self.modifiers.names() {
            write!(f, "{name}+")?;
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for KeyWithModifier {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split('+').map(str::trim).collect();
        if tokens.iter().any(|t| t.is_empty()) {
            return Err(KeyParseError::Empty(s.to_string()));
        }

        let (key, modifier_names) = match tokens.split_last() {
            Some(split) => split,
            None => return Err(KeyParseError::Empty(s.to_string())),
        };

        let mut modifiers = KeyModifiers::none();
        for name in modifier_names {
            modifiers.set(name)?;
        }

        Ok(Self {
            key: key.parse()?,
            modifiers,
        })
    }
}

/// Errors parsing a key text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    /// Empty text or empty `+`-separated token
    #[error("empty key in '{0}'")]
    Empty(String),

    /// Unrecognised modifier name
    #[error("unknown key modifier '{0}'")]
    UnknownModifier(String),

    /// Unrecognised key name
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> KeyWithModifier {
        s.parse().unwrap()
    }

    #[test]
    fn plain_letter() {
        let key = parse("a");
        assert_eq!(key.key, Key::Letter('A'));
        assert!(key.modifiers.is_empty());
        assert_eq!(key.to_string(), "A");
    }

    #[test]
    fn modifiers_render_in_canonical_order() {
        let key = parse("Ctrl+Shift+F1");
        assert!(key.modifiers.shift && key.modifiers.control);
        assert_eq!(key.key, Key::Function(1));
        assert_eq!(key.to_string(), "Shift+Ctrl+F1");
    }

    #[test]
    fn case_insensitive_names() {
        assert_eq!(parse("control+space"), parse("Ctrl+Space"));
        assert_eq!(parse("ESC").key, Key::Named(NamedKey::Escape));
        assert_eq!(parse("keypad7").key, Key::Keypad(7));
    }

    #[test]
    fn digits_and_named_keys() {
        assert_eq!(parse("Alt+5").to_string(), "Alt+5");
        assert_eq!(parse("super+PageDown").to_string(), "Super+PageDown");
        assert_eq!(parse("GraveAccent").key, Key::Named(NamedKey::GraveAccent));
    }

    #[test]
    fn rejects_unknown() {
        assert!(matches!(
            "Hyper+A".parse::<KeyWithModifier>(),
            Err(KeyParseError::UnknownModifier(_))
        ));
        assert!(matches!(
            "F26".parse::<KeyWithModifier>(),
            Err(KeyParseError::UnknownKey(_))
        ));
        assert!(matches!(
            "Keypad10".parse::<KeyWithModifier>(),
            Err(KeyParseError::UnknownKey(_))
        ));
        assert!(matches!(
            "Shift+".parse::<KeyWithModifier>(),
            Err(KeyParseError::Empty(_))
        ));
        assert!(matches!("".parse::<KeyWithModifier>(), Err(KeyParseError::Empty(_))));
    }

    #[test]
    fn punctuation_characters_name_their_keys() {
        assert_eq!(parse("-").key, Key::Named(NamedKey::Minus));
        assert_eq!(parse("Ctrl+=").to_string(), "Ctrl+Equal");
        assert_eq!(parse("Shift+,").to_string(), "Shift+Comma");
        assert_eq!(parse(".").key, Key::Named(NamedKey::Period));
        assert_eq!(parse("\\").key, Key::Named(NamedKey::Backslash));
        assert!(matches!(
            "Ctrl++".parse::<KeyWithModifier>(),
            Err(KeyParseError::Empty(_))
        ));
        assert!(matches!(
            "#".parse::<KeyWithModifier>(),
            Err(KeyParseError::UnknownKey(_))
        ));
    }

    #[test]
    fn every_named_key_round_trips() {
        for (named, name) in NAMED_KEYS {
            let key = KeyWithModifier::new(Key::Named(*named));
            assert_eq!(key.to_string(), *name);
            assert_eq!(parse(name), key);
        }
    }
}

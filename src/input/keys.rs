// Symbolic key codes
//
// The shell only cares about a handful of keys, so host key codes are
// folded into this small vocabulary by the platform backend.

use std::fmt;
use std::str::FromStr;

/// A key reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Space,
    Enter,
    Backspace,
    Tab,
    /// Letter or digit key, letters always uppercase
    Char(char),
    /// Anything the shell does not distinguish
    Other,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Escape => write!(f, "Escape"),
            Key::Space => write!(f, "Space"),
            Key::Enter => write!(f, "Enter"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Tab => write!(f, "Tab"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for Key {
    type Err = String;

    /// Parse a key name as written in config files and on the command line
    ///
    /// Accepts "Escape"/"Esc", "Space", "Enter"/"Return", "Backspace", "Tab"
    /// (case-insensitive) and single letters or digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphanumeric() {
                return Ok(Key::Char(c.to_ascii_uppercase()));
            }
        }

        match name.to_ascii_lowercase().as_str() {
            "escape" | "esc" => Ok(Key::Escape),
            "space" => Ok(Key::Space),
            "enter" | "return" => Ok(Key::Enter),
            "backspace" => Ok(Key::Backspace),
            "tab" => Ok(Key::Tab),
            _ => Err(format!("Unknown key name: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_keys() {
        assert_eq!("Escape".parse::<Key>(), Ok(Key::Escape));
        assert_eq!("esc".parse::<Key>(), Ok(Key::Escape));
        assert_eq!("SPACE".parse::<Key>(), Ok(Key::Space));
        assert_eq!("Return".parse::<Key>(), Ok(Key::Enter));
    }

    #[test]
    fn test_parse_single_characters() {
        assert_eq!("p".parse::<Key>(), Ok(Key::Char('P')));
        assert_eq!("7".parse::<Key>(), Ok(Key::Char('7')));
    }

    #[test]
    fn test_parse_unknown_key() {
        assert!("F13".parse::<Key>().is_err());
        assert!("?".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for key in [Key::Escape, Key::Space, Key::Enter, Key::Char('Q')] {
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        }
    }
}

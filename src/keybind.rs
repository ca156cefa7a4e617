/// Key Binding Module for cmdpal
///
/// Configured bindings arrive in several spellings: named keys ("up",
/// "enter"), modifier sequences ("ctrl+p" or "C-p"), caret shorthand ("^p"),
/// or a literal control character pasted straight into the config file. All
/// of them are normalized to a single canonical [`Key`] at config-load time,
/// so the session state machine only ever compares canonical keys.
use crate::core::{PaletteError, Result};

/// Canonical key representation used throughout the engine.
///
/// Presentation sinks translate their native key events into this type;
/// configuration parsing translates binding strings into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// A plain character key, with no control modifier.
    Char(char),
    /// A character key with the control modifier held (stored lowercase).
    Ctrl(char),
    Up,
    Down,
    Enter,
    Esc,
    Backspace,
    Tab,
    /// Any key the sink could not map (function keys, media keys, ...).
    Other,
}

impl Key {
    /// Returns the character to append to the query, if this key is a
    /// printable character: not a control chord, not a control character,
    /// and not a newline or carriage return.
    pub fn printable_char(&self) -> Option<char> {
        match self {
            Key::Char(c) if !c.is_control() && *c != '\n' && *c != '\r' => Some(*c),
            _ => None,
        }
    }
}

/// Parses a configured key-binding string into a canonical [`Key`].
///
/// Accepted forms:
/// - named keys: `up`, `down`, `enter`/`return`, `esc`/`escape`,
///   `backspace`/`bs`, `tab`, `space` (case-insensitive)
/// - control sequences: `ctrl+p`, `C-p`, `c-p`
/// - caret shorthand: `^p`
/// - a single literal character, including a raw control character
pub fn parse_binding(spec: &str) -> Result<Key> {
    if spec.is_empty() {
        return Err(PaletteError::Key("empty key binding".to_string()));
    }

    let lower = spec.to_lowercase();
    match lower.as_str() {
        "up" => return Ok(Key::Up),
        "down" => return Ok(Key::Down),
        "enter" | "return" => return Ok(Key::Enter),
        "esc" | "escape" => return Ok(Key::Esc),
        "backspace" | "bs" => return Ok(Key::Backspace),
        "tab" => return Ok(Key::Tab),
        "space" => return Ok(Key::Char(' ')),
        _ => {}
    }

    if let Some(rest) = lower
        .strip_prefix("ctrl+")
        .or_else(|| lower.strip_prefix("c-"))
    {
        return ctrl_key(rest, spec);
    }
    if let Some(rest) = spec.strip_prefix('^') {
        if !rest.is_empty() {
            return ctrl_key(&rest.to_lowercase(), spec);
        }
        // A bare caret is just the caret character.
        return Ok(Key::Char('^'));
    }

    let mut chars = spec.chars();
    let first = chars.next().ok_or_else(|| {
        PaletteError::Key(format!("cannot parse key binding '{}'", spec))
    })?;
    if chars.next().is_some() {
        return Err(PaletteError::Key(format!(
            "cannot parse key binding '{}'",
            spec
        )));
    }
    Ok(normalize_char(first))
}

/// Maps a single configured character to its canonical key, decoding raw
/// control characters into the chord they stand for (0x10 -> ctrl+p).
fn normalize_char(c: char) -> Key {
    match c {
        '\r' | '\n' => Key::Enter,
        '\t' => Key::Tab,
        '\x1b' => Key::Esc,
        '\x7f' | '\x08' => Key::Backspace,
        c if (c as u32) < 0x20 => Key::Ctrl(((c as u8) | 0x60) as char),
        c => Key::Char(c),
    }
}

fn ctrl_key(rest: &str, original: &str) -> Result<Key> {
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Ok(Key::Ctrl(c)),
        _ => Err(PaletteError::Key(format!(
            "cannot parse key binding '{}'",
            original
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keys() {
        assert_eq!(parse_binding("up").unwrap(), Key::Up);
        assert_eq!(parse_binding("Down").unwrap(), Key::Down);
        assert_eq!(parse_binding("ENTER").unwrap(), Key::Enter);
        assert_eq!(parse_binding("escape").unwrap(), Key::Esc);
        assert_eq!(parse_binding("bs").unwrap(), Key::Backspace);
    }

    #[test]
    fn test_ctrl_sequences_normalize_to_same_key() {
        let canonical = Key::Ctrl('p');
        assert_eq!(parse_binding("ctrl+p").unwrap(), canonical);
        assert_eq!(parse_binding("C-p").unwrap(), canonical);
        assert_eq!(parse_binding("^p").unwrap(), canonical);
        assert_eq!(parse_binding("\u{10}").unwrap(), canonical);
    }

    #[test]
    fn test_single_char() {
        assert_eq!(parse_binding("j").unwrap(), Key::Char('j'));
        assert_eq!(parse_binding("^").unwrap(), Key::Char('^'));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_binding("").is_err());
        assert!(parse_binding("ctrl+").is_err());
        assert!(parse_binding("ctrl+pq").is_err());
        assert!(parse_binding("meta+x").is_err());
    }

    #[test]
    fn test_printable_predicate() {
        assert_eq!(Key::Char('a').printable_char(), Some('a'));
        assert_eq!(Key::Char(' ').printable_char(), Some(' '));
        assert_eq!(Key::Char('\n').printable_char(), None);
        assert_eq!(Key::Ctrl('a').printable_char(), None);
        assert_eq!(Key::Enter.printable_char(), None);
    }
}

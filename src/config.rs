/// Configuration Module for cmdpal
///
/// The whole configuration surface is consumed once at setup and validated
/// before the palette can be registered: the command map, the toggle and
/// navigation key bindings, the style strings, and the window placement.
/// A non-string command invocation or an unparseable key binding is fatal
/// here; no session ever starts over a partially valid map.
use crate::core::Result;
use crate::keybind::{self, Key};
use crate::registry::CommandRegistry;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    commands: toml::value::Table,
    keys: Option<RawKeys>,
    style: Option<StyleConfig>,
    window: Option<WindowConfig>,
}

/// Key binding configuration as written in the file. Each binding accepts a
/// raw key sequence ("ctrl+p", "up"), caret shorthand ("^p"), or a literal
/// control character; all are normalized to [`Key`] at load time.
#[derive(Debug, Deserialize)]
struct RawKeys {
    toggle: Option<String>,
    up: Option<String>,
    down: Option<String>,
}

/// Normalized key bindings used by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub toggle: Key,
    pub up: Option<Key>,
    pub down: Option<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            toggle: Key::Ctrl('p'),
            up: None,
            down: None,
        }
    }
}

/// Style strings for the render projection.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StyleConfig {
    /// Fixed prefix of the prompt line, followed by the live query.
    pub prompt: String,
    /// Repeated (and truncated) to the window width to form the separator.
    pub separator: String,
    /// Marker in front of the entry under the cursor.
    pub selected_marker: String,
    /// Marker in front of every other entry.
    pub unselected_marker: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            prompt: "> ".to_string(),
            separator: "-".to_string(),
            selected_marker: "* ".to_string(),
            unselected_marker: "  ".to_string(),
        }
    }
}

/// Where the palette panel sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    Bottom,
    Center,
}

/// Border drawn around the panel, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    None,
    Single,
    Double,
    Rounded,
}

/// Window placement and sizing. Passed through to the presentation sink
/// opaquely; nothing in the core state machine reads these fields.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WindowConfig {
    pub position: Position,
    pub width: u16,
    pub height: u16,
    pub padding_top: u16,
    pub padding_bottom: u16,
    pub padding_left: u16,
    pub padding_right: u16,
    pub border: BorderStyle,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            position: Position::Bottom,
            width: 60,
            height: 12,
            padding_top: 0,
            padding_bottom: 0,
            padding_left: 1,
            padding_right: 1,
            border: BorderStyle::None,
        }
    }
}

/// Fully validated configuration: the command registry plus normalized
/// bindings and presentation settings.
#[derive(Debug, Clone)]
pub struct PaletteConfig {
    pub registry: CommandRegistry,
    pub bindings: KeyBindings,
    pub style: StyleConfig,
    pub window: WindowConfig,
}

impl PaletteConfig {
    /// Loads and validates configuration from a TOML file at the given
    /// path. Any validation failure aborts setup.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<PaletteConfig> {
        let content = fs::read_to_string(path)?;
        PaletteConfig::from_toml_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<PaletteConfig> {
        let raw: RawConfig = toml::from_str(content)?;
        let registry = CommandRegistry::from_toml_table(&raw.commands)?;

        let defaults = KeyBindings::default();
        let bindings = match raw.keys {
            Some(keys) => KeyBindings {
                toggle: match keys.toggle {
                    Some(spec) => keybind::parse_binding(&spec)?,
                    None => defaults.toggle,
                },
                up: keys.up.as_deref().map(keybind::parse_binding).transpose()?,
                down: keys
                    .down
                    .as_deref()
                    .map(keybind::parse_binding)
                    .transpose()?,
            },
            None => defaults,
        };

        Ok(PaletteConfig {
            registry,
            bindings,
            style: raw.style.unwrap_or_default(),
            window: raw.window.unwrap_or_default(),
        })
    }
}

/// Command Registry Module for cmdpal
///
/// The registry is the immutable name -> invocation mapping supplied by the
/// host before a session starts. Names are unique and case-sensitive; the
/// invocation is an opaque payload handed back to the host verbatim on
/// commit. Validation happens once, at construction, so a bad command map is
/// a fatal setup error rather than a per-keystroke surprise.
use crate::core::{PaletteError, Result};
use std::collections::BTreeMap;

/// Immutable mapping from command display name to invocation payload.
///
/// Backed by a `BTreeMap` so iteration order is already the lexicographic
/// order the filter needs.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, String>,
}

impl CommandRegistry {
    /// Builds a registry from (name, invocation) pairs.
    ///
    /// Rejects empty names and empty invocations. Duplicate names keep the
    /// last entry, matching TOML table semantics.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let mut commands = BTreeMap::new();
        for (name, invocation) in entries {
            let name = name.into();
            let invocation = invocation.into();
            if name.is_empty() {
                return Err(PaletteError::Config(
                    "command with empty name in command map".to_string(),
                ));
            }
            if invocation.is_empty() {
                return Err(PaletteError::Config(format!(
                    "command '{}' has an empty invocation",
                    name
                )));
            }
            commands.insert(name, invocation);
        }
        Ok(CommandRegistry { commands })
    }

    /// Builds a registry from a parsed TOML table, rejecting any value that
    /// is not a string.
    pub fn from_toml_table(table: &toml::value::Table) -> Result<Self> {
        let mut entries = Vec::with_capacity(table.len());
        for (name, value) in table {
            match value {
                toml::Value::String(invocation) => {
                    entries.push((name.clone(), invocation.clone()));
                }
                other => {
                    return Err(PaletteError::Config(format!(
                        "command '{}' has a non-string invocation ({})",
                        name,
                        other.type_str()
                    )));
                }
            }
        }
        CommandRegistry::new(entries)
    }

    /// Resolves a command name to its invocation payload.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.commands.get(name).map(String::as_str)
    }

    /// Iterates command names in ascending lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Palette Session Module for cmdpal
///
/// The session is the mutable heart of the palette: the accumulated search
/// query, the live-filtered candidate list, and the 1-based selection
/// cursor. Exactly one session exists while the palette is open; it is
/// created on open, mutated by every key event, and dropped on commit,
/// cancel, or re-toggle. All state lives in this value and is passed
/// explicitly, never through shared globals, so a second invocation cannot
/// corrupt an open session.
use crate::config::KeyBindings;
use crate::filter::filter_names;
use crate::keybind::Key;
use crate::registry::CommandRegistry;
use tracing::{debug, warn};

/// Navigation direction through the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// What the palette controller should do after a key has been dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// State may have changed; push a fresh render and keep reading keys.
    Render,
    /// The selected command resolved; tear down, then hand this invocation
    /// to the host.
    Commit(String),
    /// Cancel or re-toggle; tear down with no side effect.
    Close,
    /// Key had no meaning in this state; nothing to do.
    Ignored,
}

/// Live state of an open palette.
///
/// Invariants:
/// - `filtered` always equals `filter_names(query, registry)`.
/// - `cursor` is 1-based into `filtered`; `cursor == 0` iff `filtered` is
///   empty.
pub struct Session {
    registry: CommandRegistry,
    query: String,
    filtered: Vec<String>,
    cursor: usize,
}

impl Session {
    /// Opens a fresh session over the given registry: empty query, all
    /// commands listed, first match selected (cursor 0 when the registry is
    /// empty).
    pub fn open(registry: CommandRegistry) -> Self {
        let filtered = filter_names("", &registry);
        let cursor = if filtered.is_empty() { 0 } else { 1 };
        debug!(commands = filtered.len(), "palette session opened");
        Session {
            registry,
            query: String::new(),
            filtered,
            cursor,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filtered(&self) -> &[String] {
        &self.filtered
    }

    /// 1-based cursor position, 0 when there are no matches.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Recomputes the filtered list from scratch and resets the cursor to
    /// the first match. Runs after every query change; selection is not
    /// preserved across query edits.
    fn refilter(&mut self) {
        self.filtered = filter_names(&self.query, &self.registry);
        self.cursor = if self.filtered.is_empty() { 0 } else { 1 };
    }

    /// Moves the cursor circularly through the filtered list. No-op when
    /// the list is empty; wraparound is unconditional in both directions.
    pub fn navigate(&mut self, direction: Direction) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }
        self.cursor = match direction {
            Direction::Down => {
                if self.cursor >= len {
                    1
                } else {
                    self.cursor + 1
                }
            }
            Direction::Up => {
                if self.cursor <= 1 {
                    len
                } else {
                    self.cursor - 1
                }
            }
        };
        debug!(cursor = self.cursor, "palette cursor moved");
    }

    /// Resolves the cursor to an invocation payload. Returns `None` with no
    /// matches, and also when the selected name is missing from the
    /// registry (stale cursor) — that case fails closed rather than
    /// panicking.
    fn resolve(&self) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        let name = self.filtered.get(self.cursor - 1)?;
        match self.registry.lookup(name) {
            Some(invocation) => Some(invocation.to_string()),
            None => {
                warn!(name = %name, "selected command vanished from registry");
                None
            }
        }
    }

    /// Dispatches one key event against the state machine.
    ///
    /// Commit with zero matches is a deliberate no-op that leaves the
    /// palette open: no user intent was expressed, so nothing closes and
    /// nothing executes.
    pub fn handle_key(&mut self, key: &Key, bindings: &KeyBindings) -> KeyOutcome {
        if *key == bindings.toggle || *key == Key::Esc {
            debug!("palette session closing (cancel/toggle)");
            return KeyOutcome::Close;
        }
        if *key == Key::Enter {
            return match self.resolve() {
                Some(invocation) => {
                    debug!(invocation = %invocation, "palette commit");
                    KeyOutcome::Commit(invocation)
                }
                None => KeyOutcome::Ignored,
            };
        }
        if *key == Key::Up || bindings.up.as_ref() == Some(key) {
            self.navigate(Direction::Up);
            return KeyOutcome::Render;
        }
        if *key == Key::Down || bindings.down.as_ref() == Some(key) {
            self.navigate(Direction::Down);
            return KeyOutcome::Render;
        }
        if *key == Key::Backspace {
            if self.query.pop().is_some() {
                self.refilter();
            }
            return KeyOutcome::Render;
        }
        if let Some(c) = key.printable_char() {
            self.query.push(c);
            self.refilter();
            return KeyOutcome::Render;
        }
        KeyOutcome::Ignored
    }
}

//! End-to-end tests driving the palette loop through a scripted sink
//!
//! The sink serves a fixed key script and records everything the engine
//! pushes at it, so these tests observe exactly what a host would: the
//! rendered line blocks, the teardown calls, and the final hand-off.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use cmdpal::config::{KeyBindings, PaletteConfig, StyleConfig, WindowConfig};
use cmdpal::core::{PaletteError, Result};
use cmdpal::keybind::Key;
use cmdpal::palette::{HostExecutor, Palette, PresentationSink};
use cmdpal::registry::CommandRegistry;

#[derive(Default)]
struct Recording {
    frames: Vec<Vec<String>>,
    executed: Vec<String>,
    releases: usize,
}

struct ScriptSink {
    keys: VecDeque<Key>,
    recording: Rc<RefCell<Recording>>,
}

impl PresentationSink for ScriptSink {
    fn render(&mut self, lines: &[String]) -> Result<()> {
        self.recording.borrow_mut().frames.push(lines.to_vec());
        Ok(())
    }

    fn next_key(&mut self) -> Result<Key> {
        self.keys.pop_front().ok_or_else(|| {
            PaletteError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "script exhausted",
            ))
        })
    }

    fn mark_closed(&mut self) {}

    fn release_resources(&mut self) -> Result<()> {
        self.recording.borrow_mut().releases += 1;
        Ok(())
    }
}

struct RecordingExecutor {
    recording: Rc<RefCell<Recording>>,
}

impl HostExecutor for RecordingExecutor {
    fn execute(&mut self, invocation: &str) {
        self.recording.borrow_mut().executed.push(invocation.to_string());
    }
}

fn run_script(keys: Vec<Key>) -> Rc<RefCell<Recording>> {
    let recording = Rc::new(RefCell::new(Recording::default()));
    let registry = CommandRegistry::new(vec![
        ("Find File", "cmd:find"),
        ("Format", "cmd:fmt"),
        ("Git Status", "cmd:git"),
    ])
    .unwrap();
    let config = PaletteConfig {
        registry,
        bindings: KeyBindings::default(),
        style: StyleConfig::default(),
        window: WindowConfig::default(),
    };
    let sink = ScriptSink {
        keys: keys.into(),
        recording: Rc::clone(&recording),
    };
    let executor = RecordingExecutor {
        recording: Rc::clone(&recording),
    };
    let mut palette = Palette::new(config, sink, executor);
    palette.run().unwrap();
    recording
}

#[test]
fn typing_navigating_and_committing_resolves_the_wrapped_selection() {
    // Query "f" narrows to two entries; two downs wrap the cursor back to
    // the first, so commit resolves "Find File".
    let recording = run_script(vec![
        Key::Char('f'),
        Key::Down,
        Key::Down,
        Key::Enter,
    ]);
    let recording = recording.borrow();
    assert_eq!(recording.executed, vec!["cmd:find".to_string()]);

    // The frame after typing "f" lists both matches with the first marked.
    let frame = &recording.frames[1];
    assert_eq!(frame[0], "> f");
    assert_eq!(frame[2], "* Find File");
    assert_eq!(frame[3], "  Format");

    // After one down, the marker moves; after the second, it wraps back.
    assert_eq!(recording.frames[2][3], "* Format");
    assert_eq!(recording.frames[3][2], "* Find File");
}

#[test]
fn opening_renders_the_full_sorted_command_list() {
    let recording = run_script(vec![Key::Esc]);
    let recording = recording.borrow();
    let first = &recording.frames[0];
    assert_eq!(
        &first[2..],
        &[
            "* Find File".to_string(),
            "  Format".to_string(),
            "  Git Status".to_string(),
        ]
    );
}

#[test]
fn commit_with_no_matches_executes_nothing_and_stays_open() {
    // "zz" matches nothing; Enter is a no-op, Esc then closes.
    let recording = run_script(vec![
        Key::Char('z'),
        Key::Char('z'),
        Key::Enter,
        Key::Esc,
    ]);
    let recording = recording.borrow();
    assert!(recording.executed.is_empty());
    // The no-match frame shows only prompt and separator.
    let frame = recording.frames.last().unwrap();
    assert_eq!(frame.len(), 2);
    assert_eq!(frame[0], "> zz");
}

#[test]
fn cancel_discards_everything_without_executing() {
    let recording = run_script(vec![Key::Char('f'), Key::Char('o'), Key::Esc]);
    let recording = recording.borrow();
    assert!(recording.executed.is_empty());
    assert!(recording.releases >= 1);
}

#[test]
fn toggle_key_while_open_closes_without_executing() {
    // Default toggle binding is ctrl+p.
    let recording = run_script(vec![Key::Char('f'), Key::Ctrl('p')]);
    let recording = recording.borrow();
    assert!(recording.executed.is_empty());
}

#[test]
fn key_read_failure_cancels_the_session() {
    // An empty script makes the first read fail; the loop must treat that
    // as cancel and still release the sink.
    let recording = run_script(vec![]);
    let recording = recording.borrow();
    assert!(recording.executed.is_empty());
    assert!(recording.releases >= 1);
}

#[test]
fn ignored_keys_do_not_rerender() {
    let recording = run_script(vec![Key::Other, Key::Ctrl('x'), Key::Esc]);
    let recording = recording.borrow();
    // Only the opening frame was pushed.
    assert_eq!(recording.frames.len(), 1);
}

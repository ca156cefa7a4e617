/// Terminal Sink Module for cmdpal
///
/// A crossterm-backed [`PresentationSink`]: raw-mode input, an inline panel
/// drawn at the configured placement, and two-phase teardown. This is the
/// only module that touches the terminal; the engine reaches it solely
/// through the sink trait, so embedding hosts can swap in their own panel
/// implementation without touching the core.
use crate::config::{BorderStyle, Position, WindowConfig};
use crate::core::{PaletteError, Result};
use crate::keybind::Key;
use crate::palette::PresentationSink;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Stdout, Write};
use tracing::debug;

struct BorderChars {
    tl: char,
    tr: char,
    bl: char,
    br: char,
    h: char,
    v: char,
}

fn border_chars(style: BorderStyle) -> Option<BorderChars> {
    match style {
        BorderStyle::None => None,
        BorderStyle::Single => Some(BorderChars {
            tl: '\u{250c}',
            tr: '\u{2510}',
            bl: '\u{2514}',
            br: '\u{2518}',
            h: '\u{2500}',
            v: '\u{2502}',
        }),
        BorderStyle::Double => Some(BorderChars {
            tl: '\u{2554}',
            tr: '\u{2557}',
            bl: '\u{255a}',
            br: '\u{255d}',
            h: '\u{2550}',
            v: '\u{2551}',
        }),
        BorderStyle::Rounded => Some(BorderChars {
            tl: '\u{256d}',
            tr: '\u{256e}',
            bl: '\u{2570}',
            br: '\u{256f}',
            h: '\u{2500}',
            v: '\u{2502}',
        }),
    }
}

fn term_err(err: crossterm::ErrorKind) -> PaletteError {
    // crossterm's ErrorKind is an alias for io::Error.
    PaletteError::Io(err)
}

/// Top row of the panel for the given terminal height, panel outer height,
/// and vertical padding.
fn origin_row(position: Position, rows: u16, outer: u16, pad_top: u16, pad_bottom: u16) -> u16 {
    match position {
        Position::Top => pad_top.min(rows.saturating_sub(outer)),
        Position::Bottom => rows.saturating_sub(outer.saturating_add(pad_bottom)),
        Position::Center => rows.saturating_sub(outer) / 2,
    }
}

/// Maps a crossterm key event to the engine's canonical key.
fn map_key(event: KeyEvent) -> Key {
    match event.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Key::Ctrl(c.to_ascii_lowercase())
        }
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

/// Crossterm-backed presentation sink drawing into the current terminal.
pub struct TerminalSink {
    out: Stdout,
    window: WindowConfig,
    closed: bool,
    released: bool,
}

impl TerminalSink {
    /// Acquires the terminal: enables raw mode and hides the cursor.
    pub fn new(window: WindowConfig) -> Result<Self> {
        let mut sink = TerminalSink {
            out: io::stdout(),
            window,
            closed: false,
            released: true,
        };
        sink.acquire()?;
        Ok(sink)
    }

    /// Re-acquires the terminal if resources were released, so a sink can
    /// serve a new session after teardown.
    fn acquire(&mut self) -> Result<()> {
        if self.released {
            terminal::enable_raw_mode().map_err(term_err)?;
            queue!(self.out, Hide).map_err(term_err)?;
            self.out.flush()?;
            self.released = false;
            debug!("terminal acquired");
        }
        self.closed = false;
        Ok(())
    }

    /// Outer panel height, including border rows.
    fn outer_height(&self) -> u16 {
        let extra = if self.window.border == BorderStyle::None {
            0
        } else {
            2
        };
        self.window.height.saturating_add(extra)
    }

    fn origin(&self) -> Result<(u16, u16)> {
        let (_cols, rows) = terminal::size().map_err(term_err)?;
        let row = origin_row(
            self.window.position,
            rows,
            self.outer_height(),
            self.window.padding_top,
            self.window.padding_bottom,
        );
        Ok((self.window.padding_left, row))
    }

    fn clear_panel(&mut self) -> Result<()> {
        let (col, row) = self.origin()?;
        for r in row..row.saturating_add(self.outer_height()) {
            queue!(self.out, MoveTo(col, r), Clear(ClearType::UntilNewLine))
                .map_err(term_err)?;
        }
        Ok(())
    }
}

impl PresentationSink for TerminalSink {
    fn render(&mut self, lines: &[String]) -> Result<()> {
        self.acquire()?;
        self.clear_panel()?;

        let (col, row) = self.origin()?;
        let width = self.window.width as usize;
        let border = border_chars(self.window.border);
        let mut r = row;

        if let Some(b) = &border {
            let top: String = std::iter::repeat(b.h).take(width).collect();
            queue!(self.out, MoveTo(col, r), Print(format!("{}{}{}", b.tl, top, b.tr)))
                .map_err(term_err)?;
            r = r.saturating_add(1);
        }
        for line in lines.iter().take(self.window.height as usize) {
            let text: String = line.chars().take(width).collect();
            let padded = format!("{:<width$}", text, width = width);
            let row_text = match &border {
                Some(b) => format!("{}{}{}", b.v, padded, b.v),
                None => padded,
            };
            queue!(self.out, MoveTo(col, r), Print(row_text)).map_err(term_err)?;
            r = r.saturating_add(1);
        }
        if let Some(b) = &border {
            let bottom: String = std::iter::repeat(b.h).take(width).collect();
            let last = row.saturating_add(self.outer_height().saturating_sub(1));
            queue!(
                self.out,
                MoveTo(col, last),
                Print(format!("{}{}{}", b.bl, bottom, b.br))
            )
            .map_err(term_err)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn next_key(&mut self) -> Result<Key> {
        if self.closed {
            return Err(PaletteError::Io(io::Error::new(
                io::ErrorKind::Other,
                "sink is closed",
            )));
        }
        loop {
            match event::read().map_err(term_err)? {
                Event::Key(key) => return Ok(map_key(key)),
                // Resize and mouse events do not concern the engine.
                _ => continue,
            }
        }
    }

    fn mark_closed(&mut self) {
        self.closed = true;
        debug!("terminal sink marked closed");
    }

    fn release_resources(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.clear_panel()?;
        queue!(self.out, Show).map_err(term_err)?;
        self.out.flush()?;
        terminal::disable_raw_mode().map_err(term_err)?;
        self.released = true;
        debug!("terminal released");
        Ok(())
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        let _ = self.release_resources();
    }
}

/// Palette Controller Module for cmdpal
///
/// Binds the session state machine to the host collaborators: the
/// presentation sink that draws lines and delivers keys, and the executor
/// that receives the committed invocation. The controller enforces the
/// single-instance invariant (toggling while open closes the open session)
/// and the commit ordering guarantee: the overlay is fully torn down before
/// the invocation is handed to the host, so command execution never
/// observes palette UI state.
use crate::config::PaletteConfig;
use crate::core::Result;
use crate::keybind::Key;
use crate::render::render_lines;
use crate::session::{KeyOutcome, Session};
use tracing::{debug, warn};

/// Host-provided rendering and input capability.
///
/// Teardown is two-phase: `mark_closed` is synchronous and flips the
/// closed flag; `release_resources` actually frees the backing resources
/// and may be deferred by the host. It must be idempotent and safe to call
/// any number of times.
pub trait PresentationSink {
    /// Replaces the displayed panel content with the given lines, in order.
    fn render(&mut self, lines: &[String]) -> Result<()>;
    /// Blocks until the next key event. An error is treated as an implicit
    /// cancel by the controller.
    fn next_key(&mut self) -> Result<Key>;
    /// Synchronous half of teardown: stop displaying, accept no more input.
    fn mark_closed(&mut self);
    /// Deferred half of teardown: free backing resources. Idempotent.
    fn release_resources(&mut self) -> Result<()>;
}

/// Host-side command execution: a synchronous, fire-and-forget hand-off.
pub trait HostExecutor {
    fn execute(&mut self, invocation: &str);
}

/// The palette: at most one open session at a time, driven either by the
/// blocking [`run`](Palette::run) loop or by feeding keys through
/// [`handle_key`](Palette::handle_key) from an event-driven host.
pub struct Palette<S: PresentationSink, E: HostExecutor> {
    config: PaletteConfig,
    sink: S,
    executor: E,
    session: Option<Session>,
}

impl<S: PresentationSink, E: HostExecutor> Palette<S, E> {
    pub fn new(config: PaletteConfig, sink: S, executor: E) -> Self {
        Palette {
            config,
            sink,
            executor,
            session: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Opens the palette if closed, closes it if open. Opening completes
    /// any deferred release first so a new session never reuses a handle
    /// that is still pending teardown.
    pub fn toggle(&mut self) -> Result<()> {
        if self.session.is_some() {
            debug!("toggle while open: discarding session");
            self.close_session();
        } else {
            self.sink.release_resources()?;
            self.session = Some(Session::open(self.config.registry.clone()));
            self.push_render()?;
        }
        Ok(())
    }

    /// Synchronous read-eval loop bound to the session's lifetime. Opens
    /// the palette if necessary, then processes one key at a time until the
    /// session ends; releases sink resources before returning.
    pub fn run(&mut self) -> Result<()> {
        if self.session.is_none() {
            self.toggle()?;
        }
        while self.session.is_some() {
            let key = match self.sink.next_key() {
                Ok(key) => key,
                Err(err) => {
                    warn!(error = %err, "key read failed; cancelling session");
                    self.close_session();
                    break;
                }
            };
            self.handle_key(key)?;
        }
        self.sink.release_resources()
    }

    /// Dispatches one key against the open session. Event-driven hosts call
    /// this from their key handler; the blocking loop calls it internally.
    /// A key arriving while the palette is closed is ignored.
    pub fn handle_key(&mut self, key: Key) -> Result<()> {
        let outcome = match self.session.as_mut() {
            Some(session) => session.handle_key(&key, &self.config.bindings),
            None => return Ok(()),
        };
        match outcome {
            KeyOutcome::Render => self.push_render()?,
            KeyOutcome::Close => self.close_session(),
            KeyOutcome::Commit(invocation) => {
                // Tear down completely before the hand-off.
                self.close_session();
                self.sink.release_resources()?;
                self.executor.execute(&invocation);
            }
            KeyOutcome::Ignored => {}
        }
        Ok(())
    }

    /// Synchronous close: drops all session state and marks the sink
    /// closed. Resource release may happen later.
    fn close_session(&mut self) {
        self.session = None;
        self.sink.mark_closed();
    }

    fn push_render(&mut self) -> Result<()> {
        if let Some(session) = self.session.as_ref() {
            let lines = render_lines(
                session,
                &self.config.style,
                self.config.window.width as usize,
            );
            self.sink.render(&lines)?;
        }
        Ok(())
    }
}

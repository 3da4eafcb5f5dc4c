//! Runtime entrypoint: owns the terminal, the model and the dispatcher loop.
//!
//! One thread reads keys, applies messages and paints. Gateway commands run on
//! worker threads and report back through a channel drained at the top of
//! every iteration.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use crossterm::cursor::{MoveTo, MoveToNextLine};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use super::commands::CommandExecutor;
use super::model::{AppModel, AppMsg};
use super::render::view;
use super::terminal_guard::TerminalGuard;
use super::update::update;
use crate::core::config::Config;
use crate::core::errors::{ApsError, Result};
use crate::logger::ActivityLog;
use crate::logger::jsonl::{EventType, LogEntry, Severity};
use crate::pactl::gateway::CardGateway;

/// Runtime knobs derived from [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// How long one iteration waits for a key before re-checking outcomes.
    pub poll_interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(50),
        }
    }
}

impl RuntimeConfig {
    /// Knobs from the `[ui]` config section.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.ui.poll_interval_ms),
        }
    }
}

/// Model plus the command plumbing around it, without any terminal.
pub struct Session {
    model: AppModel,
    executor: CommandExecutor,
    rx: Receiver<AppMsg>,
}

impl Session {
    /// Fresh model with the startup fetch already dispatched.
    #[must_use]
    pub fn start(gateway: Arc<dyn CardGateway>, log: ActivityLog) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        let model = AppModel::new();
        let executor = CommandExecutor::new(gateway, log, tx);
        executor.dispatch(model.init());
        Self {
            model,
            executor,
            rx,
        }
    }

    /// Current state, for painting and inspection.
    #[must_use]
    pub fn model(&self) -> &AppModel {
        &self.model
    }

    /// Whether the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.model.quit
    }

    /// Run one message through `update` and start whatever it asks for.
    pub fn deliver(&mut self, msg: AppMsg) {
        let cmd = update(&mut self.model, msg);
        self.executor.dispatch(cmd);
    }

    /// Apply every outcome already waiting. Returns whether any arrived.
    pub fn drain(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.rx.try_recv() {
                Ok(msg) => {
                    self.deliver(msg);
                    changed = true;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return changed,
            }
        }
    }

    /// Block until one outcome arrives or `timeout` passes.
    pub fn wait_outcome(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.deliver(msg);
                true
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }
}

/// Run the interactive switcher until the user quits.
///
/// # Errors
/// Returns [`ApsError::Terminal`] when the terminal cannot be set up, read or painted.
pub fn run(config: RuntimeConfig, gateway: Arc<dyn CardGateway>, log: &ActivityLog) -> Result<()> {
    let started = Instant::now();
    log.record(&LogEntry::new(EventType::SessionStart, Severity::Info));

    let result = run_loop(config, gateway, log.clone());

    let mut stop = match &result {
        Ok(()) => LogEntry::new(EventType::SessionStop, Severity::Info),
        Err(err) => {
            let mut entry = LogEntry::from_error(err);
            entry.event = EventType::SessionStop;
            entry
        }
    };
    stop.duration_ms = Some(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX));
    log.record(&stop);
    result
}

fn run_loop(config: RuntimeConfig, gateway: Arc<dyn CardGateway>, log: ActivityLog) -> Result<()> {
    let _guard = TerminalGuard::new().map_err(terminal_error)?;
    let mut stdout = io::stdout();
    let mut session = Session::start(gateway, log);
    let mut dirty = true;

    loop {
        dirty |= session.drain();
        if session.should_quit() {
            return Ok(());
        }
        if dirty {
            paint(&mut stdout, &view(session.model())).map_err(terminal_error)?;
            dirty = false;
        }

        if event::poll(config.poll_interval).map_err(terminal_error)? {
            match event::read().map_err(terminal_error)? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    session.deliver(AppMsg::Key(key));
                    dirty = true;
                }
                Event::Resize(..) => dirty = true,
                _ => {}
            }
        }
        if session.should_quit() {
            return Ok(());
        }
    }
}

/// Repaint the whole frame from the top-left corner.
fn paint<W: Write>(out: &mut W, frame: &str) -> io::Result<()> {
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    for line in frame.lines() {
        queue!(out, Print(line), MoveToNextLine(1))?;
    }
    out.flush()
}

fn terminal_error(source: io::Error) -> ApsError {
    ApsError::Terminal { source }
}

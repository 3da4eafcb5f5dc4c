//! Command layer: runs [`AppCmd`] side-effects against the gateway off the
//! render path and reports exactly one [`AppMsg`] outcome per command.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossbeam_channel::Sender;

use super::model::{AppCmd, AppMsg};
use crate::core::errors::ApsError;
use crate::logger::ActivityLog;
use crate::logger::jsonl::{EventType, LogEntry, Severity};
use crate::pactl::gateway::CardGateway;

/// Run one command synchronously and return its outcome message.
///
/// `None` and `Quit` have no gateway work and produce no message.
pub fn execute(gateway: &dyn CardGateway, log: &ActivityLog, cmd: &AppCmd) -> Option<AppMsg> {
    let started = Instant::now();
    match cmd {
        AppCmd::None | AppCmd::Quit => None,
        AppCmd::Fetch => Some(match gateway.list_cards() {
            Ok(cards) => {
                let mut entry = LogEntry::new(EventType::CardsListed, Severity::Info);
                entry.card_count = Some(cards.len());
                entry.duration_ms = Some(elapsed_ms(started));
                entry.ok = Some(true);
                log.record(&entry);
                AppMsg::DataFetched(cards)
            }
            Err(err) => {
                let mut entry = LogEntry::from_error(&err);
                entry.duration_ms = Some(elapsed_ms(started));
                entry.details = Some("list cards".to_string());
                log.record(&entry);
                AppMsg::Error(err)
            }
        }),
        AppCmd::ApplyProfile { card, profile } => {
            let result = gateway.set_profile(card, profile);
            let mut entry = match &result {
                Ok(()) => {
                    let mut entry = LogEntry::new(EventType::ProfileSet, Severity::Info);
                    entry.ok = Some(true);
                    entry
                }
                Err(err) => LogEntry::from_error(err),
            };
            entry.card = Some(card.clone());
            entry.profile = Some(profile.clone());
            entry.duration_ms = Some(elapsed_ms(started));
            log.record(&entry);
            Some(match result {
                Ok(()) => AppMsg::ProfileChanged,
                Err(err) => AppMsg::Error(err),
            })
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Spawns one worker thread per command; outcomes flow back over `tx`.
#[derive(Clone)]
pub struct CommandExecutor {
    gateway: Arc<dyn CardGateway>,
    log: ActivityLog,
    tx: Sender<AppMsg>,
}

impl CommandExecutor {
    /// Executor that runs commands against `gateway` and reports on `tx`.
    #[must_use]
    pub fn new(gateway: Arc<dyn CardGateway>, log: ActivityLog, tx: Sender<AppMsg>) -> Self {
        Self { gateway, log, tx }
    }

    /// Start `cmd` in the background. Returns `false` when there was nothing to run.
    pub fn dispatch(&self, cmd: AppCmd) -> bool {
        if matches!(cmd, AppCmd::None | AppCmd::Quit) {
            return false;
        }
        let worker = self.clone();
        let name = match &cmd {
            AppCmd::ApplyProfile { .. } => "aps-apply-profile",
            _ => "aps-fetch",
        };
        let spawned = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || worker.run(&cmd));
        if let Err(err) = spawned {
            let _ = self.tx.send(AppMsg::Error(ApsError::io(name, err)));
        }
        true
    }

    fn run(&self, cmd: &AppCmd) {
        if let Some(msg) = execute(self.gateway.as_ref(), &self.log, cmd) {
            // The receiver only disappears when the UI has quit.
            let _ = self.tx.send(msg);
        }
    }
}

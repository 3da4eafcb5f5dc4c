//! Activity logging: JSONL append-only file shared by the UI and command workers.

pub mod jsonl;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::config::Config;
use jsonl::{JsonlConfig, JsonlWriter, LogEntry};

/// Cloneable handle to the activity log. A disabled handle drops every entry.
#[derive(Clone, Default)]
pub struct ActivityLog {
    writer: Option<Arc<Mutex<JsonlWriter>>>,
}

impl ActivityLog {
    /// Open the log described by `config`, or a disabled handle when logging is off.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        if !config.logging.enabled {
            return Self::disabled();
        }
        Self::open(JsonlConfig {
            path: config.paths.activity_log.clone(),
            max_size_bytes: config.logging.max_size_bytes,
            max_rotated_files: config.logging.max_rotated_files,
        })
    }

    #[must_use]
    pub fn open(config: JsonlConfig) -> Self {
        Self {
            writer: Some(Arc::new(Mutex::new(JsonlWriter::open(config)))),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    pub fn record(&self, entry: &LogEntry) {
        if let Some(writer) = &self.writer {
            writer.lock().write_entry(entry);
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}

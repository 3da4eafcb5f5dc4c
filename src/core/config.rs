//! Configuration system: TOML file + env var overrides + smart defaults.

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{ApsError, Result};

/// Full configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub pactl: PactlConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
    pub paths: PathsConfig,
}

/// How the external audio control utility is invoked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PactlConfig {
    /// Program name or path; resolved through `$PATH` when relative.
    pub program: PathBuf,
}

/// Event loop tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// How long the loop waits for a key before draining command outcomes.
    pub poll_interval_ms: u64,
}

/// Activity log behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub max_size_bytes: u64,
    pub max_rotated_files: u32,
}

/// Filesystem paths used by aps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub config_file: PathBuf,
    pub activity_log: PathBuf,
}

impl Default for PactlConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("pactl"),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 50,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_size_bytes: 1024 * 1024,
            max_rotated_files: 3,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let home_dir = env::var_os("HOME").map_or_else(|| PathBuf::from("/tmp"), PathBuf::from);
        Self {
            config_file: home_dir.join(".config").join("aps").join("config.toml"),
            activity_log: home_dir
                .join(".local")
                .join("share")
                .join("aps")
                .join("activity.jsonl"),
        }
    }
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathsConfig::default().config_file
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path; defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| ApsError::Io {
                path: path_buf.clone(),
                source,
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(ApsError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.paths.config_file = path_buf;
        cfg.apply_env_overrides_from(env_var)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("APS_PACTL_PROGRAM") {
            self.pactl.program = PathBuf::from(raw);
        }

        if let Some(raw) = lookup("APS_UI_POLL_INTERVAL_MS") {
            self.ui.poll_interval_ms = parse_env_u64("APS_UI_POLL_INTERVAL_MS", &raw)?;
        }

        if let Some(raw) = lookup("APS_LOGGING_ENABLED") {
            self.logging.enabled = parse_env_bool("APS_LOGGING_ENABLED", &raw)?;
        }

        if let Some(raw) = lookup("APS_ACTIVITY_LOG") {
            self.paths.activity_log = PathBuf::from(raw);
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.pactl.program.as_os_str().is_empty() {
            return Err(ApsError::InvalidConfig {
                details: "pactl.program must not be empty".to_string(),
            });
        }

        if !(1..=1_000).contains(&self.ui.poll_interval_ms) {
            return Err(ApsError::InvalidConfig {
                details: format!(
                    "ui.poll_interval_ms must be in [1, 1000], got {}",
                    self.ui.poll_interval_ms
                ),
            });
        }

        if self.logging.max_size_bytes == 0 {
            return Err(ApsError::InvalidConfig {
                details: "logging.max_size_bytes must be > 0".to_string(),
            });
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|raw| !raw.trim().is_empty())
}

fn parse_env_u64(name: &str, raw: &str) -> Result<u64> {
    raw.parse::<u64>().map_err(|error| ApsError::ConfigParse {
        context: "env",
        details: format!("{name}={raw:?}: {error}"),
    })
}

fn parse_env_bool(name: &str, raw: &str) -> Result<bool> {
    raw.parse::<bool>().map_err(|error| ApsError::ConfigParse {
        context: "env",
        details: format!("{name}={raw:?}: {error}"),
    })
}

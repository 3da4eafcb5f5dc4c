//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use alsa_profile_switcher::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{ApsError, Result};

// Logging
pub use crate::logger::ActivityLog;

// Gateway
pub use crate::pactl::gateway::{CardGateway, PactlGateway, parse_cards};
pub use crate::pactl::model::{Card, Directory, Profile};

// Interactive browser
#[cfg(feature = "tui")]
pub use crate::tui::model::{AppCmd, AppModel, AppMsg, Screen};
#[cfg(feature = "tui")]
pub use crate::tui::{RuntimeConfig, run};

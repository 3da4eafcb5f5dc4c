#![forbid(unsafe_code)]

//! ALSA profile switcher (aps): a terminal browser for sound cards that
//! switches the active card profile through `pactl`.
//!
//! Layers:
//! 1. **Gateway**: runs `pactl` and parses its JSON card listing
//! 2. **State machine**: pure model/update/view over devices, profiles and errors
//! 3. **Runtime**: terminal lifecycle, key polling and background commands
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use alsa_profile_switcher::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use alsa_profile_switcher::core::config::Config;
//! use alsa_profile_switcher::pactl::gateway::{CardGateway, PactlGateway};
//! ```

pub mod prelude;

pub mod core;
pub mod logger;
pub mod pactl;
#[cfg(feature = "tui")]
pub mod tui;

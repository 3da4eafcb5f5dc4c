//! Interactive card and profile browser.
//!
//! Elm-style seams: `model` holds state, `update` applies messages, `render`
//! derives the frame, `commands` runs gateway work off the loop, and `runtime`
//! owns the terminal and the dispatcher.

pub mod commands;
pub mod input;
pub mod model;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod update;

#[cfg(test)]
mod test_properties;

pub use runtime::{RuntimeConfig, run};

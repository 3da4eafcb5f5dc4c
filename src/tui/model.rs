//! Elm-style state model for the profile switcher.
//!
//! All display state lives in [`AppModel`]. Key presses and command outcomes
//! arrive as [`AppMsg`] values; side-effects are represented as [`AppCmd`]
//! values returned from the update function.
//!
//! **Design invariant:** the model is deterministic and testable. No I/O
//! happens here.

use crossterm::event::KeyEvent;

use crate::core::errors::ApsError;
use crate::pactl::model::{Card, Directory};

// ──────────────────── screens ────────────────────

/// Top-level screens in the navigation model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Card list. Initial screen and the target of every reload.
    #[default]
    Devices,
    /// Sorted profile keys of the selected card.
    Profiles,
    /// Verbatim failure display; left only through reload.
    Error,
}

// ──────────────────── selection ────────────────────

/// The card under inspection on the profile screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Position of the card in the current directory.
    pub index: usize,
    /// Identity used to re-locate the card after a refresh.
    pub card_name: String,
    /// Profile keys of the card, lexicographically sorted.
    pub profile_keys: Vec<String>,
}

impl Selection {
    /// Selection of `card`, found at `index` in the directory.
    #[must_use]
    pub fn for_card(index: usize, card: &Card) -> Self {
        Self {
            index,
            card_name: card.name.clone(),
            profile_keys: card.sorted_profile_keys(),
        }
    }
}

// ──────────────────── errors ────────────────────

/// A failure surfaced on the error screen.
#[derive(Debug)]
pub struct UiError {
    /// The failure, displayed verbatim.
    pub error: ApsError,
    /// Screen that was active when the failure arrived.
    pub origin: Screen,
}

// ──────────────────── model ────────────────────

/// Complete UI state. Owned by the runtime loop, mutated only by `update`.
#[derive(Debug)]
pub struct AppModel {
    /// Visible screen.
    pub screen: Screen,
    /// Last fetched directory, in listing order.
    pub cards: Directory,
    /// Highlighted row of the visible list.
    pub cursor: usize,
    /// Card shown on the profile screen.
    pub selection: Option<Selection>,
    /// Failure shown on the error screen.
    pub error: Option<UiError>,
    /// A command is outstanding, including the refresh after a profile change.
    /// Only quit is accepted.
    pub loading: bool,
    /// Set once quit was requested; the runtime stops.
    pub quit: bool,
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

impl AppModel {
    /// Fresh state: device screen, empty directory, waiting on the first fetch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::Devices,
            cards: Vec::new(),
            cursor: 0,
            selection: None,
            error: None,
            loading: true,
            quit: false,
        }
    }

    /// Command to run at startup.
    #[must_use]
    pub fn init(&self) -> AppCmd {
        AppCmd::Fetch
    }

    /// Length of the list the cursor currently moves over.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        match self.screen {
            Screen::Devices => self.cards.len(),
            Screen::Profiles => self.selection.as_ref().map_or(0, |s| s.profile_keys.len()),
            Screen::Error => 0,
        }
    }

    /// Move the cursor by one row, staying inside the visible list.
    pub fn move_cursor(&mut self, direction: CursorMove) {
        let len = self.visible_len();
        self.cursor = match direction {
            CursorMove::Up => self.cursor.saturating_sub(1),
            CursorMove::Down if self.cursor + 1 < len => self.cursor + 1,
            CursorMove::Down => self.cursor,
        };
    }

    /// Pull the cursor back inside the visible list after its length changed.
    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.visible_len().saturating_sub(1));
    }

    /// Card the profile screen is showing, if the selection is still valid.
    #[must_use]
    pub fn selected_card(&self) -> Option<&Card> {
        let selection = self.selection.as_ref()?;
        self.cards
            .get(selection.index)
            .filter(|card| card.name == selection.card_name)
    }

    /// Switch to the error screen, remembering where the failure came from.
    pub fn fail(&mut self, error: ApsError) {
        self.error = Some(UiError {
            error,
            origin: self.screen,
        });
        self.screen = Screen::Error;
        self.loading = false;
    }
}

/// Direction of a single cursor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    /// Toward the first row.
    Up,
    /// Toward the last row.
    Down,
}

// ──────────────────── messages ────────────────────

/// Inputs to the update function: key presses and command outcomes.
#[derive(Debug)]
pub enum AppMsg {
    /// Terminal key press event.
    Key(KeyEvent),
    /// A fetch completed with a fresh directory.
    DataFetched(Directory),
    /// A fetch or profile change failed.
    Error(ApsError),
    /// A profile change completed. The refresh it triggers is still loading.
    ProfileChanged,
}

// ──────────────────── commands ────────────────────

/// Side-effects returned by the update function for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCmd {
    /// No side-effect.
    None,
    /// List cards and deliver `DataFetched` or `Error`.
    Fetch,
    /// Set a card's profile and deliver `ProfileChanged` or `Error`.
    ApplyProfile {
        /// Card name.
        card: String,
        /// Profile key to activate.
        profile: String,
    },
    /// Terminate the event loop.
    Quit,
}

// ──────────────────── tests ────────────────────

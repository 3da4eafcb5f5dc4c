//! Pure update function for the Elm-style profile switcher.
//!
//! `update()` takes the current model and a message, mutates the model, and
//! returns a command describing any side-effects the runtime should execute.
//!
//! **Design invariant:** this module performs zero I/O. All effects are
//! described as [`AppCmd`] values.

use super::input::{InputAction, resolve_key};
use super::model::{AppCmd, AppModel, AppMsg, CursorMove, Screen, Selection};
use crate::core::errors::ApsError;
use crate::pactl::model::{Directory, find_card};

/// Apply a message to the model and return the next command for the runtime.
///
/// Every state transition goes through this function.
pub fn update(model: &mut AppModel, msg: AppMsg) -> AppCmd {
    match msg {
        AppMsg::Key(key) => match resolve_key(&key) {
            Some(action) => apply_input_action(model, action),
            None => AppCmd::None,
        },

        AppMsg::DataFetched(cards) => {
            model.loading = false;
            replace_directory(model, cards);
            AppCmd::None
        }

        AppMsg::Error(err) => {
            model.fail(err);
            AppCmd::None
        }

        // Loading stays set until the refresh lands.
        AppMsg::ProfileChanged => AppCmd::Fetch,
    }
}

// ──────────────────── key handlers ────────────────────

fn apply_input_action(model: &mut AppModel, action: InputAction) -> AppCmd {
    if action == InputAction::Quit {
        model.quit = true;
        return AppCmd::Quit;
    }
    if model.loading {
        return AppCmd::None;
    }

    match (model.screen, action) {
        (Screen::Devices | Screen::Profiles, InputAction::Up) => {
            model.move_cursor(CursorMove::Up);
            AppCmd::None
        }
        (Screen::Devices | Screen::Profiles, InputAction::Down) => {
            model.move_cursor(CursorMove::Down);
            AppCmd::None
        }
        (Screen::Devices, InputAction::Select) => {
            enter_profile_screen(model);
            AppCmd::None
        }
        (Screen::Profiles, InputAction::Select) => apply_profile_at_cursor(model),
        (Screen::Profiles, InputAction::Back) => {
            return_to_device_screen(model);
            AppCmd::None
        }
        (Screen::Error, InputAction::Reload) => {
            *model = AppModel::new();
            AppCmd::Fetch
        }
        _ => AppCmd::None,
    }
}

fn enter_profile_screen(model: &mut AppModel) {
    let Some(card) = model.cards.get(model.cursor) else {
        return;
    };
    model.selection = Some(Selection::for_card(model.cursor, card));
    model.screen = Screen::Profiles;
    model.cursor = 0;
}

fn apply_profile_at_cursor(model: &mut AppModel) -> AppCmd {
    let Some(selection) = model.selection.as_ref() else {
        return AppCmd::None;
    };
    let Some(profile) = selection.profile_keys.get(model.cursor) else {
        return AppCmd::None;
    };
    let cmd = AppCmd::ApplyProfile {
        card: selection.card_name.clone(),
        profile: profile.clone(),
    };
    model.loading = true;
    cmd
}

fn return_to_device_screen(model: &mut AppModel) {
    let index = model.selection.take().map_or(0, |s| s.index);
    model.screen = Screen::Devices;
    model.cursor = index;
    model.clamp_cursor();
}

// ──────────────────── data handlers ────────────────────

/// Swap in a fresh directory and re-validate whatever points into it.
fn replace_directory(model: &mut AppModel, cards: Directory) {
    model.cards = cards;
    match model.screen {
        Screen::Devices => model.clamp_cursor(),
        Screen::Profiles => revalidate_selection(model),
        Screen::Error => {}
    }
}

/// Re-locate the selected card by name; positions are not stable across fetches.
fn revalidate_selection(model: &mut AppModel) {
    let Some(selection) = model.selection.as_ref() else {
        return;
    };
    let name = selection.card_name.clone();
    match find_card(&model.cards, &name) {
        Some((index, card)) => {
            model.selection = Some(Selection::for_card(index, card));
            model.clamp_cursor();
        }
        None => model.fail(ApsError::StaleSelection { card: name }),
    }
}

// ──────────────────── tests ────────────────────

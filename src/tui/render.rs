//! View function: derives the screen text from [`AppModel`].
//!
//! Pure: same model in, same string out. The runtime decides how to paint it.

use std::fmt::Write as _;

use super::input::screen_help;
use super::model::{AppModel, Screen};
use crate::pactl::model::Card;

/// Shown in place of any screen body while a command is outstanding.
pub const LOADING_INDICATOR: &str = "Loading…";

const CURSOR: &str = ">";
const ACTIVE: &str = "*";

/// Render the whole frame for the current state.
#[must_use]
pub fn view(model: &AppModel) -> String {
    if model.loading {
        return format!("{LOADING_INDICATOR}\n");
    }
    let mut out = match model.screen {
        Screen::Devices => render_devices(model),
        Screen::Profiles => render_profiles(model),
        Screen::Error => render_error(model),
    };
    out.push('\n');
    out.push_str(&footer(model.screen));
    out.push('\n');
    out
}

fn render_devices(model: &AppModel) -> String {
    let mut out = String::from("Select device:\n\n");
    if model.cards.is_empty() {
        out.push_str("  (no cards found)\n");
        return out;
    }
    for (i, card) in model.cards.iter().enumerate() {
        let _ = writeln!(out, "[{}] {}", marker(i == model.cursor, CURSOR), device_line(card));
    }
    out
}

fn device_line(card: &Card) -> String {
    let label = card.label();
    let product = card.properties.device_product_name.as_str();
    if product.is_empty() || product == label {
        label.to_string()
    } else {
        format!("{label} ({product})")
    }
}

fn render_profiles(model: &AppModel) -> String {
    let card = model.selected_card();
    let Some(selection) = model.selection.as_ref() else {
        return String::from("Select profile:\n\n");
    };

    let mut out = match card {
        Some(card) => format!("Select profile for {}:\n\n", card.label()),
        None => String::from("Select profile:\n\n"),
    };
    if selection.profile_keys.is_empty() {
        out.push_str("  (card has no profiles)\n");
        return out;
    }

    let width = selection
        .profile_keys
        .iter()
        .map(|k| k.chars().count())
        .max()
        .unwrap_or(0);
    for (i, key) in selection.profile_keys.iter().enumerate() {
        let active = card.is_some_and(|c| c.is_active(key));
        let profile = card.and_then(|c| c.profiles.get(key));
        let description = profile.map_or("", |p| p.description.as_str());
        let availability = if profile.is_some_and(|p| !p.available) {
            " (unavailable)"
        } else {
            ""
        };
        let line = format!(
            "[{}]{} {key:<width$}  {description}{availability}",
            marker(i == model.cursor, CURSOR),
            marker(active, ACTIVE),
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn render_error(model: &AppModel) -> String {
    let mut out = String::from("An error occurred:\n\n");
    if let Some(err) = &model.error {
        let _ = writeln!(out, "{}", err.error);
    }
    out
}

fn footer(screen: Screen) -> String {
    screen_help(screen)
        .iter()
        .map(|b| format!("{} {}", b.keys, b.description))
        .collect::<Vec<_>>()
        .join(" · ")
}

fn marker(on: bool, symbol: &'static str) -> &'static str {
    if on { symbol } else { " " }
}

// ──────────────────── tests ────────────────────

//! Key bindings: terminal key events to semantic actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::model::Screen;

/// What a key press asks for, independent of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// `q` or `ctrl+c`.
    Quit,
    /// Previous row.
    Up,
    /// Next row.
    Down,
    /// Open the card or apply the profile under the cursor.
    Select,
    /// Profile screen back to the device list.
    Back,
    /// Start over from the error screen.
    Reload,
}

/// One footer hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpBinding {
    /// Key labels as shown to the user.
    pub keys: &'static str,
    /// What the keys do.
    pub description: &'static str,
}

/// Resolve a key event to an action. Releases and unbound keys yield `None`.
#[must_use]
pub fn resolve_key(key: &KeyEvent) -> Option<InputAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputAction::Quit)
        }
        KeyCode::Char('q') => Some(InputAction::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(InputAction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(InputAction::Down),
        KeyCode::Enter | KeyCode::Right => Some(InputAction::Select),
        KeyCode::Backspace | KeyCode::Left => Some(InputAction::Back),
        KeyCode::Char('r') => Some(InputAction::Reload),
        _ => None,
    }
}

/// Bindings worth advertising in the footer of `screen`.
#[must_use]
pub fn screen_help(screen: Screen) -> &'static [HelpBinding] {
    match screen {
        Screen::Devices => &DEVICE_HELP,
        Screen::Profiles => &PROFILE_HELP,
        Screen::Error => &ERROR_HELP,
    }
}

const DEVICE_HELP: [HelpBinding; 3] = [
    HelpBinding {
        keys: "↑/k ↓/j",
        description: "move",
    },
    HelpBinding {
        keys: "enter",
        description: "show profiles",
    },
    HelpBinding {
        keys: "q",
        description: "quit",
    },
];

const PROFILE_HELP: [HelpBinding; 4] = [
    HelpBinding {
        keys: "↑/k ↓/j",
        description: "move",
    },
    HelpBinding {
        keys: "enter",
        description: "activate",
    },
    HelpBinding {
        keys: "backspace",
        description: "back",
    },
    HelpBinding {
        keys: "q",
        description: "quit",
    },
];

const ERROR_HELP: [HelpBinding; 2] = [
    HelpBinding {
        keys: "r",
        description: "reload",
    },
    HelpBinding {
        keys: "q",
        description: "quit",
    },
];

//! Property-based tests for reducer invariants.
//!
//! Uses `proptest` to drive arbitrary sequences of key presses and command
//! outcomes through `update` and check cursor bounds, selection validity,
//! profile ordering and the loading gate.

use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use proptest::prelude::*;
use proptest::strategy::LazyJust;

use super::model::{AppCmd, AppModel, AppMsg, Screen};
use super::update::update;
use crate::core::errors::ApsError;
use crate::pactl::model::{Card, Directory, OrderedMap, Profile, Properties};

const CARD_NAMES: [&str; 5] = [
    "alsa_card.pci-0000_00_1f.3",
    "alsa_card.usb-Focusrite_Scarlett",
    "alsa_card.usb-Logitech_Headset",
    "bluez_card.00_1B_66_AA_BB_CC",
    "alsa_card.platform-hdmi",
];

const PROFILE_KEYS: [&str; 6] = [
    "off",
    "output:analog-stereo",
    "output:analog-stereo+input:analog-stereo",
    "output:hdmi-stereo",
    "pro-audio",
    "a2dp-sink",
];

// ──────────────────── strategies ────────────────────

fn arb_card(name: &'static str) -> impl Strategy<Value = Card> {
    (
        prop::sample::subsequence(PROFILE_KEYS.to_vec(), 0..=PROFILE_KEYS.len()).prop_shuffle(),
        any::<prop::sample::Index>(),
    )
        .prop_map(move |(keys, active)| {
            let active_profile = if keys.is_empty() {
                String::new()
            } else {
                keys[active.index(keys.len())].to_string()
            };
            Card {
                index: None,
                name: name.to_string(),
                driver: "module-alsa-card.c".to_string(),
                properties: Properties::default(),
                profiles: keys
                    .into_iter()
                    .map(|k| {
                        (
                            k,
                            Profile {
                                description: String::new(),
                                available: true,
                            },
                        )
                    })
                    .collect::<OrderedMap<Profile>>(),
                active_profile,
                ports: OrderedMap::new(),
            }
        })
}

fn arb_directory() -> impl Strategy<Value = Directory> {
    prop::sample::subsequence(CARD_NAMES.to_vec(), 0..=CARD_NAMES.len())
        .prop_shuffle()
        .prop_flat_map(|names| names.into_iter().map(arb_card).collect::<Vec<_>>())
}

fn arb_key_code() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        Just(KeyCode::Up),
        Just(KeyCode::Down),
        Just(KeyCode::Char('j')),
        Just(KeyCode::Char('k')),
        Just(KeyCode::Enter),
        Just(KeyCode::Right),
        Just(KeyCode::Backspace),
        Just(KeyCode::Left),
        Just(KeyCode::Char('r')),
        Just(KeyCode::Char('x')),
        Just(KeyCode::Esc),
    ]
}

/// Arbitrary non-quit message. Quit is covered separately so sequences run long.
fn arb_msg() -> impl Strategy<Value = AppMsg> {
    prop_oneof![
        6 => arb_key_code().prop_map(|code| AppMsg::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        3 => arb_directory().prop_map(AppMsg::DataFetched),
        1 => LazyJust::new(|| AppMsg::ProfileChanged),
        1 => LazyJust::new(|| AppMsg::Error(ApsError::GatewayParse {
            details: "proptest".to_string(),
        })),
    ]
}

/// One step of a session: a key press, or the oldest outstanding command
/// finishing with success or failure.
#[derive(Debug)]
enum Step {
    Press(KeyCode),
    Resolve { ok: bool, cards: Directory },
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        2 => arb_key_code().prop_map(Step::Press),
        1 => (any::<bool>(), arb_directory()).prop_map(|(ok, cards)| Step::Resolve { ok, cards }),
    ]
}

/// Outcome a gateway would send back for `cmd`.
fn outcome(cmd: &AppCmd, ok: bool, cards: Directory) -> Option<AppMsg> {
    let failure = || {
        AppMsg::Error(ApsError::GatewayExit {
            command: "pactl".to_string(),
            code: 1,
            diagnostics: "Failure: No such entity".to_string(),
        })
    };
    match cmd {
        AppCmd::Fetch if ok => Some(AppMsg::DataFetched(cards)),
        AppCmd::ApplyProfile { .. } if ok => Some(AppMsg::ProfileChanged),
        AppCmd::Fetch | AppCmd::ApplyProfile { .. } => Some(failure()),
        AppCmd::None | AppCmd::Quit => None,
    }
}

fn key(code: KeyCode) -> AppMsg {
    AppMsg::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn idle_with(cards: Directory) -> AppModel {
    let mut model = AppModel::new();
    update(&mut model, AppMsg::DataFetched(cards));
    model
}

// ──────────────────── invariant checks ────────────────────

fn assert_model_invariants(model: &AppModel) {
    match model.screen {
        Screen::Devices => {
            assert!(
                model.cursor < model.cards.len().max(1),
                "device cursor {} out of bounds for {} cards",
                model.cursor,
                model.cards.len()
            );
        }
        Screen::Profiles => {
            let selection = model
                .selection
                .as_ref()
                .expect("profile screen requires a selection");
            let card = model
                .selected_card()
                .expect("selection must point at a card with the same name");
            assert_eq!(selection.profile_keys, card.sorted_profile_keys());
            assert!(model.cursor < selection.profile_keys.len().max(1));
        }
        Screen::Error => {
            assert!(model.error.is_some(), "error screen without an error");
        }
    }
}

// ──────────────────── properties ────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any sequence of 1-60 messages preserves all model invariants.
    #[test]
    fn reducer_preserves_invariants(
        msgs in prop::collection::vec(arb_msg(), 1..60)
    ) {
        let mut model = AppModel::new();
        for msg in msgs {
            update(&mut model, msg);
            assert_model_invariants(&model);
        }
    }

    /// Cursor stays inside the device list however far it is pushed.
    #[test]
    fn device_cursor_stays_in_bounds(
        cards in arb_directory(),
        moves in prop::collection::vec(any::<bool>(), 0..40)
    ) {
        let len = cards.len();
        let mut model = idle_with(cards);
        for down in moves {
            update(&mut model, key(if down { KeyCode::Down } else { KeyCode::Up }));
            prop_assert!(model.cursor < len.max(1));
            if len <= 1 {
                prop_assert_eq!(model.cursor, 0);
            }
        }
    }

    /// Selecting device i and going back returns the cursor to i.
    #[test]
    fn select_then_back_restores_cursor(
        cards in arb_directory().prop_filter("need a card", |c| !c.is_empty()),
        pick in any::<prop::sample::Index>()
    ) {
        let target = pick.index(cards.len());
        let mut model = idle_with(cards);
        for _ in 0..target {
            update(&mut model, key(KeyCode::Down));
        }
        update(&mut model, key(KeyCode::Enter));
        prop_assert_eq!(model.screen, Screen::Profiles);
        update(&mut model, key(KeyCode::Backspace));
        prop_assert_eq!(model.screen, Screen::Devices);
        prop_assert_eq!(model.cursor, target);
    }

    /// Profile keys are listed in lexicographic order whatever the listing order.
    #[test]
    fn profile_keys_are_sorted(cards in arb_directory().prop_filter("need a card", |c| !c.is_empty())) {
        let mut model = idle_with(cards);
        update(&mut model, key(KeyCode::Enter));
        let keys = &model.selection.as_ref().expect("selection").profile_keys;
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(keys, &sorted);
    }

    /// While loading, every key except quit leaves the model untouched.
    #[test]
    fn loading_gates_all_keys_but_quit(
        codes in prop::collection::vec(arb_key_code(), 1..20)
    ) {
        let mut model = AppModel::new();
        for code in codes {
            prop_assert_eq!(update(&mut model, key(code)), AppCmd::None);
            prop_assert!(model.loading);
            prop_assert_eq!(model.screen, Screen::Devices);
            prop_assert_eq!(model.cursor, 0);
        }
        prop_assert_eq!(update(&mut model, key(KeyCode::Char('q'))), AppCmd::Quit);
        prop_assert!(model.quit);
    }

    /// Loading is set exactly while a command is in flight, so at most one
    /// command (and never two profile changes) is ever outstanding.
    #[test]
    fn loading_tracks_outstanding_commands(
        steps in prop::collection::vec(arb_step(), 1..80)
    ) {
        let mut model = AppModel::new();
        let mut outstanding = VecDeque::from([model.init()]);

        for step in steps {
            let cmd = match step {
                Step::Press(code) => update(&mut model, key(code)),
                Step::Resolve { ok, cards } => match outstanding.pop_front() {
                    Some(done) => match outcome(&done, ok, cards) {
                        Some(msg) => update(&mut model, msg),
                        None => AppCmd::None,
                    },
                    None => AppCmd::None,
                },
            };
            if matches!(cmd, AppCmd::Fetch | AppCmd::ApplyProfile { .. }) {
                outstanding.push_back(cmd);
            }

            prop_assert!(outstanding.len() <= 1, "outstanding: {:?}", outstanding);
            prop_assert_eq!(model.loading, !outstanding.is_empty());
            assert_model_invariants(&model);
        }
    }

    /// A gateway failure lands on the error screen from anywhere, with loading cleared.
    #[test]
    fn failure_reaches_error_screen_from_any_state(
        msgs in prop::collection::vec(arb_msg(), 0..30)
    ) {
        let mut model = AppModel::new();
        for msg in msgs {
            update(&mut model, msg);
        }
        update(&mut model, AppMsg::Error(ApsError::GatewayExit {
            command: "pactl set-card-profile x y".to_string(),
            code: 1,
            diagnostics: "Failure: No such entity".to_string(),
        }));
        prop_assert_eq!(model.screen, Screen::Error);
        prop_assert!(!model.loading);
    }

    /// Reload from the error screen always yields a fresh, fetching model.
    #[test]
    fn reload_resets_to_fresh_fetch(
        msgs in prop::collection::vec(arb_msg(), 0..30)
    ) {
        let mut model = AppModel::new();
        for msg in msgs {
            update(&mut model, msg);
        }
        model.fail(ApsError::GatewayParse { details: "x".to_string() });
        prop_assert_eq!(update(&mut model, key(KeyCode::Char('r'))), AppCmd::Fetch);
        prop_assert_eq!(model.screen, Screen::Devices);
        prop_assert!(model.selection.is_none());
        prop_assert!(model.cards.is_empty());
        prop_assert!(model.loading);
        prop_assert_eq!(model.cursor, 0);
    }
}

//! Keyboard actions on the active range.

use super::*;
use crate::state::GuiState;

#[test]
fn test_shift_arrows_nudge_active_range() {
    let mut m = machine();
    drag(&mut m, 100.0, 200.0);

    let effects = key(&mut m, Key::Right, Modifiers::SHIFT);
    assert_eq!(
        effects,
        vec![
            Effect::Redraw,
            Effect::ShowRange {
                start: 150.0,
                stop: 250.0
            }
        ]
    );
    assert_eq!(ranges(&m), vec![(150.0, 250.0)]);

    key(&mut m, Key::Left, Modifiers::SHIFT);
    key(&mut m, Key::Left, Modifiers::SHIFT);
    assert_eq!(ranges(&m), vec![(50.0, 150.0)]);

    // Stops at the start of the data
    key(&mut m, Key::Left, Modifiers::SHIFT);
    assert_eq!(ranges(&m), vec![(0.0, 100.0)]);
}

#[test]
fn test_nudge_stops_at_neighbor() {
    let mut m = machine();
    m.insert_range(260.0, 400.0).unwrap();
    drag(&mut m, 100.0, 200.0);

    key(&mut m, Key::Right, Modifiers::SHIFT);
    assert_eq!(ranges(&m)[0], (150.0, 250.0));
    key(&mut m, Key::Right, Modifiers::SHIFT);
    assert_eq!(ranges(&m)[0], (160.0, 260.0));
    assert!(m.collection().is_consistent());
}

#[test]
fn test_nudge_can_ignore_neighbors() {
    let mut config = AnnotatorConfig::new();
    config.interaction.nudge_respects_neighbors = false;
    let mut m = machine_with(&config);
    m.insert_range(260.0, 400.0).unwrap();
    drag(&mut m, 100.0, 200.0);

    key(&mut m, Key::Right, Modifiers::SHIFT);
    key(&mut m, Key::Right, Modifiers::SHIFT);
    assert_eq!(ranges(&m)[0], (200.0, 300.0));
    assert!(!m.collection().is_consistent());
}

#[test]
fn test_free_nudge_stops_at_data_bounds() {
    let mut config = AnnotatorConfig::new();
    config.interaction.nudge_respects_neighbors = false;
    let mut m = machine_with(&config);
    drag(&mut m, 900.0, 990.0);

    key(&mut m, Key::Right, Modifiers::SHIFT);
    key(&mut m, Key::Right, Modifiers::SHIFT);
    assert_eq!(ranges(&m), vec![(909.0, 999.0)]);
    assert_eq!(m.export()[0].x_max, 999.0);
}

#[test]
fn test_plain_arrows_do_nothing() {
    let mut m = machine();
    drag(&mut m, 100.0, 200.0);

    assert!(key(&mut m, Key::Right, Modifiers::NONE).is_empty());
    assert!(key(&mut m, Key::Left, Modifiers::NONE).is_empty());
    assert_eq!(ranges(&m), vec![(100.0, 200.0)]);
}

#[test]
fn test_nudge_without_active_range_does_nothing() {
    let mut m = machine();
    m.insert_range(100.0, 200.0).unwrap();
    assert!(key(&mut m, Key::Right, Modifiers::SHIFT).is_empty());
    assert_eq!(ranges(&m), vec![(100.0, 200.0)]);
}

#[test]
fn test_delete_detaches_then_removes() {
    let mut m = machine();
    m.insert_range(500.0, 600.0).unwrap();
    drag(&mut m, 100.0, 200.0);
    let id = m.collection().get_index(0).unwrap().id;

    let effects = key(&mut m, Key::Delete, Modifiers::NONE);
    assert_eq!(effects, vec![Effect::Detach(id), Effect::Redraw]);
    assert_eq!(ranges(&m), vec![(500.0, 600.0)]);

    // Second delete finds nothing active
    assert!(key(&mut m, Key::Delete, Modifiers::NONE).is_empty());
    assert_eq!(m.collection().len(), 1);
}

#[test]
fn test_play_rounds_to_sample_indices() {
    let mut m = machine();
    drag(&mut m, 100.4, 199.6);

    let effects = key(&mut m, Key::Space, Modifiers::NONE);
    assert_eq!(
        effects,
        vec![Effect::Play {
            start: 100,
            stop: 200,
            sample_rate: SAMPLE_RATE
        }]
    );
    // Playing changes nothing
    assert_eq!(ranges(&m), vec![(100.4, 199.6)]);
}

#[test]
fn test_keys_ignored_during_gesture() {
    let mut m = machine();
    press(&mut m, 100.0);
    move_to(&mut m, 150.0);

    assert!(key(&mut m, Key::Delete, Modifiers::NONE).is_empty());
    assert!(key(&mut m, Key::Right, Modifiers::SHIFT).is_empty());
    assert_eq!(m.state(), GuiState::NewArea);

    release(&mut m, 150.0);
    assert_eq!(ranges(&m), vec![(100.0, 150.0)]);
}

#[test]
fn test_extra_modifiers_are_not_bindings() {
    let mut m = machine();
    drag(&mut m, 100.0, 200.0);
    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    assert!(key(&mut m, Key::Delete, ctrl).is_empty());
    assert_eq!(m.collection().len(), 1);
}

#[test]
fn test_rebound_keys_are_honored() {
    let mut config = AnnotatorConfig::new();
    config.keybindings.set_binding(
        crate::keybindings::KeyAction::Delete,
        crate::keybindings::KeyBinding::plain(Key::Backspace),
    );
    let mut m = machine_with(&config);
    drag(&mut m, 100.0, 200.0);

    assert!(key(&mut m, Key::Delete, Modifiers::NONE).is_empty());
    assert!(matches!(
        key(&mut m, Key::Backspace, Modifiers::NONE)[0],
        Effect::Detach(_)
    ));
    assert!(m.collection().is_empty());
}

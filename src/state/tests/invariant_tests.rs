//! Collection and viewport invariants under long mixed input sequences.

use wavemark_input::MouseButton;

use super::*;
use crate::state::GuiState;

/// Small deterministic generator so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn next_unit(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    fn x(&mut self) -> f64 {
        (self.next_unit() * 999.0).round()
    }
}

fn assert_invariants(m: &InteractionStateMachine) {
    let c = m.collection();
    assert!(c.is_consistent(), "{:?}", ranges(m));
    for ann in c.iter() {
        assert!(ann.x_min >= 0.0 && ann.x_max <= 999.0, "{:?}", ranges(m));
        assert_eq!(ann.active_edge(), None);
    }

    let vp = m.viewport();
    assert!(vp.data_x_min <= vp.x_min, "{:?}", vp);
    assert!(vp.x_min < vp.x_max, "{:?}", vp);
    assert!(vp.x_max <= vp.data_x_max, "{:?}", vp);
}

fn run_sequence(seed: u64, steps: usize) {
    let mut m = machine();
    let mut rng = Lcg(seed);

    for _ in 0..steps {
        let choice = rng.next_unit();
        if choice < 0.55 {
            // Primary drag with a couple of intermediate moves
            let from = rng.x();
            press(&mut m, from);
            for _ in 0..3 {
                let x = rng.x();
                move_to(&mut m, x);
            }
            let to = rng.x();
            release(&mut m, to);
        } else if choice < 0.65 {
            let from = rng.next_unit() as f32 * 999.0;
            let to = rng.next_unit() as f32 * 999.0;
            let origin = at_px(&m, from);
            press_with(&mut m, MouseButton::Right, origin);
            let position = at_px(&m, to);
            m.handle(&wavemark_input::InputEvent::PointerMoved { position });
            release_with(&mut m, MouseButton::Right, 0.0);
        } else if choice < 0.8 {
            let x = rng.x();
            let step = if rng.next_unit() < 0.5 { 1.0 } else { -1.0 };
            scroll(&mut m, x, step);
        } else if choice < 0.9 {
            let k = if rng.next_unit() < 0.5 { Key::Left } else { Key::Right };
            key(&mut m, k, Modifiers::SHIFT);
        } else {
            key(&mut m, Key::Delete, Modifiers::NONE);
        }

        assert_eq!(m.state(), GuiState::Idle);
        assert_invariants(&m);
    }
}

#[test]
fn test_invariants_hold_for_mixed_input() {
    for seed in [1, 7, 42, 1234, 99_999] {
        run_sequence(seed, 300);
    }
}

#[test]
fn test_removing_absent_range_is_noop() {
    let mut m = machine();
    drag(&mut m, 100.0, 200.0);
    key(&mut m, Key::Delete, Modifiers::NONE);
    let before = m.export();

    // Nothing is active any more, the second delete has no target
    assert!(key(&mut m, Key::Delete, Modifiers::NONE).is_empty());
    assert_eq!(m.export(), before);
}

//! Full-gesture tests for the interaction state machine.
//!
//! The machine runs over samples `[0, 999]` drawn onto a 999 px wide
//! surface, so at full view one pixel is one sample.

mod invariant_tests;
mod keyboard_tests;

use wavemark_input::{
    DataPoint, InputEvent, Key, Modifiers, MouseButton, PixelPoint, PointerPosition,
};

use crate::config::AnnotatorConfig;
use crate::hit_test::RenderSurface;
use crate::state::{Effect, InteractionStateMachine};

const SAMPLE_RATE: f32 = 1000.0;

fn machine_with(config: &AnnotatorConfig) -> InteractionStateMachine {
    InteractionStateMachine::new((0.0, 999.0), SAMPLE_RATE, config)
        .with_surface(RenderSurface::new(0.0, 999.0))
}

fn machine() -> InteractionStateMachine {
    machine_with(&AnnotatorConfig::new())
}

/// Pointer over data x under the current view.
fn at(m: &InteractionStateMachine, x: f64) -> PointerPosition {
    m.pointer_at(x, 0.5)
}

/// Pointer at pixel column `px` under the current view.
fn at_px(m: &InteractionStateMachine, px: f32) -> PointerPosition {
    let x = m.hit_tester().pixel_to_data(m.viewport(), px);
    PointerPosition::inside(PixelPoint::new(px, 0.0), DataPoint::new(x, 0.5))
}

fn outside() -> PointerPosition {
    PointerPosition::outside(PixelPoint::new(-20.0, -20.0))
}

fn press_with(m: &mut InteractionStateMachine, button: MouseButton, position: PointerPosition) -> Vec<Effect> {
    m.handle(&InputEvent::PointerPressed { button, position })
}

fn press(m: &mut InteractionStateMachine, x: f64) -> Vec<Effect> {
    let position = at(m, x);
    press_with(m, MouseButton::Left, position)
}

fn move_to(m: &mut InteractionStateMachine, x: f64) -> Vec<Effect> {
    let position = at(m, x);
    m.handle(&InputEvent::PointerMoved { position })
}

fn release_with(m: &mut InteractionStateMachine, button: MouseButton, x: f64) -> Vec<Effect> {
    let position = at(m, x);
    m.handle(&InputEvent::PointerReleased { button, position })
}

fn release(m: &mut InteractionStateMachine, x: f64) -> Vec<Effect> {
    release_with(m, MouseButton::Left, x)
}

/// Press at `from`, move through the midpoint to `to`, release.
/// Returns the effects of the release.
fn drag(m: &mut InteractionStateMachine, from: f64, to: f64) -> Vec<Effect> {
    press(m, from);
    move_to(m, (from + to) * 0.5);
    move_to(m, to);
    release(m, to)
}

fn scroll(m: &mut InteractionStateMachine, x: f64, step: f64) -> Vec<Effect> {
    let position = at(m, x);
    m.handle(&InputEvent::Scrolled { step, position })
}

fn key(m: &mut InteractionStateMachine, key: Key, modifiers: Modifiers) -> Vec<Effect> {
    m.handle(&InputEvent::KeyPressed { key, modifiers })
}

fn ranges(m: &InteractionStateMachine) -> Vec<(f64, f64)> {
    m.collection().iter().map(|a| (a.x_min, a.x_max)).collect()
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

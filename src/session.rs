//! Annotation session: a signal, the gesture machine, and a frontend that
//! carries out what the machine asks for.

use ndarray::ArrayView1;
use wavemark_input::InputEvent;

use crate::config::AnnotatorConfig;
use crate::hit_test::RenderSurface;
use crate::model::{AnnotationId, ExportedRange};
use crate::signal::Signal;
use crate::state::{Cursor, DrawModel, Effect, InteractionStateMachine};

/// Renderer and audio side of a session.
///
/// Implementations decide how to draw and play; the session only tells
/// them when and what.
pub trait Frontend {
    /// State changed; redraw from [`Annotator::draw_model`].
    fn request_redraw(&mut self);

    /// Change the pointer shape.
    fn set_cursor(&mut self, cursor: Cursor);

    /// Release whatever was drawn for this range. It no longer exists
    /// once the current event is processed.
    fn detach(&mut self, id: AnnotationId);

    /// Show `[start, stop]` in the linked detail view.
    fn show_range(&mut self, start: f64, stop: f64);

    /// Play `samples` (the signal from `start` to `stop`) at `sample_rate`.
    /// Fire and forget.
    fn play(&mut self, start: usize, stop: usize, samples: ArrayView1<'_, f32>, sample_rate: f32);
}

/// One signal being annotated.
#[derive(Debug, Clone)]
pub struct Annotator {
    signal: Signal,
    machine: InteractionStateMachine,
}

impl Annotator {
    pub fn new(signal: Signal, config: &AnnotatorConfig) -> Self {
        let machine = InteractionStateMachine::new(signal.data_bounds(), signal.sample_rate(), config);
        Self { signal, machine }
    }

    pub fn with_surface(mut self, surface: RenderSurface) -> Self {
        self.machine = self.machine.with_surface(surface);
        self
    }

    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    pub fn machine(&self) -> &InteractionStateMachine {
        &self.machine
    }

    pub fn draw_model(&self) -> DrawModel<'_> {
        self.machine.draw_model()
    }

    /// Feed one event and hand the resulting effects to `frontend`.
    /// Returns the effects as well, in the order they were dispatched.
    pub fn handle(&mut self, event: &InputEvent, frontend: &mut dyn Frontend) -> Vec<Effect> {
        let effects = self.machine.handle(event);
        for effect in &effects {
            self.dispatch(effect, frontend);
        }
        effects
    }

    /// Feed a whole event sequence. Returns how many effects were dispatched.
    pub fn replay<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a InputEvent>,
        frontend: &mut dyn Frontend,
    ) -> usize {
        events
            .into_iter()
            .map(|event| self.handle(event, frontend).len())
            .sum()
    }

    fn dispatch(&self, effect: &Effect, frontend: &mut dyn Frontend) {
        match *effect {
            Effect::Redraw => frontend.request_redraw(),
            Effect::SetCursor(cursor) => frontend.set_cursor(cursor),
            Effect::Detach(id) => frontend.detach(id),
            Effect::ShowRange { start, stop } => frontend.show_range(start, stop),
            Effect::Play {
                start,
                stop,
                sample_rate,
            } => frontend.play(start, stop, self.signal.slice(start, stop), sample_rate),
        }
    }

    /// Ordered `(x_min, x_max, label)` list of every range.
    pub fn export(&self) -> Vec<ExportedRange> {
        self.machine.export()
    }

    /// Restore a range, e.g. from a previous session.
    pub fn insert_range(&mut self, x_min: f64, x_max: f64, label: Option<String>) -> Option<AnnotationId> {
        let id = self.machine.insert_range(x_min, x_max)?;
        self.machine.set_label(id, label);
        Some(id)
    }

    pub fn set_label(&mut self, id: AnnotationId, label: Option<String>) -> bool {
        self.machine.set_label(id, label)
    }
}

//! Pointer and keyboard gestures over the annotation collection.
//!
//! One entry point, [`InteractionStateMachine::handle`], consumes a single
//! [`InputEvent`] and returns the effects the frontend should apply. Each
//! event carries its own button and modifier state, so the machine keeps
//! nothing but the gesture in progress.

use wavemark_input::{DataPoint, InputEvent, Key, Modifiers, MouseButton, PointerPosition};

use crate::config::{AnnotatorConfig, InteractionConfig};
use crate::hit_test::{HitTester, RenderSurface, find_hovering_annotation};
use crate::keybindings::{KeyAction, KeyBindings};
use crate::model::{Annotation, AnnotationCollection, AnnotationId, Edge, ExportedRange};
use crate::viewport::Viewport;

use super::effect::{Cursor, Effect, GuiState};
use super::selection::{DrawModel, SelectionSnapshot};

/// Where a pan started: the pointer's data x and the window at that time.
#[derive(Debug, Clone, Copy)]
struct PanOrigin {
    pointer_x: f64,
    viewport: Viewport,
}

/// Drives create/move/resize/pan/zoom gestures.
#[derive(Debug, Clone)]
pub struct InteractionStateMachine {
    state: GuiState,
    viewport: Viewport,
    collection: AnnotationCollection,
    hit_tester: HitTester,
    config: InteractionConfig,
    keybindings: KeyBindings,
    sample_rate: f32,
    cursor: Cursor,
    pan_origin: Option<PanOrigin>,
}

impl InteractionStateMachine {
    /// Create a machine over data x bounds `(min, max)`, showing everything.
    pub fn new(data_bounds: (f64, f64), sample_rate: f32, config: &AnnotatorConfig) -> Self {
        let viewport = Viewport::new(data_bounds.0, data_bounds.1)
            .with_min_span(config.interaction.min_visible_span);
        Self {
            state: GuiState::Idle,
            viewport,
            collection: AnnotationCollection::new(),
            hit_tester: HitTester::default(),
            config: config.interaction.clone(),
            keybindings: config.keybindings.clone(),
            sample_rate,
            cursor: Cursor::Default,
            pan_origin: None,
        }
    }

    /// Set the plot area the pixel coordinates refer to.
    pub fn with_surface(mut self, surface: RenderSurface) -> Self {
        self.hit_tester.surface = surface;
        self
    }

    /// Current gesture.
    pub fn state(&self) -> GuiState {
        self.state
    }

    /// Visible data window.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// All ranges, sorted by `x_min`.
    pub fn collection(&self) -> &AnnotationCollection {
        &self.collection
    }

    /// Pixel/data transform and render surface.
    pub fn hit_tester(&self) -> &HitTester {
        &self.hit_tester
    }

    /// Last cursor hint handed out.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Interaction tunables this machine was built with.
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Selected and active range ids right now.
    pub fn selection(&self) -> SelectionSnapshot {
        SelectionSnapshot::capture(&self.collection)
    }

    /// Everything a renderer needs for one frame.
    pub fn draw_model(&self) -> DrawModel<'_> {
        DrawModel {
            annotations: self.collection.as_slice(),
            viewport: self.viewport,
            surface: self.hit_tester.surface,
            cursor: self.cursor,
            state: self.state,
            selection: self.selection(),
        }
    }

    /// Ordered `(x_min, x_max, label)` of every range.
    pub fn export(&self) -> Vec<ExportedRange> {
        self.collection.export()
    }

    /// Pointer position for data x under the current view.
    pub fn pointer_at(&self, x: f64, y: f64) -> PointerPosition {
        self.hit_tester.pointer_at(&self.viewport, x, y)
    }

    /// Add a finished range outside of any gesture, clamped to the data.
    pub fn insert_range(&mut self, x_min: f64, x_max: f64) -> Option<AnnotationId> {
        let x_min = self.clamp_to_data(x_min);
        let x_max = self.clamp_to_data(x_max);
        self.collection.insert_range(
            x_min,
            x_max,
            self.config.annotation_y_extent,
            self.config.edge_grab_margin_px,
        )
    }

    /// Returns false if there is no range with this id.
    pub fn set_label(&mut self, id: AnnotationId, label: Option<String>) -> bool {
        match self.collection.get_mut(id) {
            Some(ann) => {
                ann.set_label(label);
                true
            }
            None => false,
        }
    }

    /// Process one input event.
    pub fn handle(&mut self, event: &InputEvent) -> Vec<Effect> {
        log::trace!("{} while {}", event.kind(), self.state.name());
        match event {
            InputEvent::PointerPressed { button, position } => self.on_press(*button, position),
            InputEvent::PointerReleased { button, .. } => self.on_release(*button),
            InputEvent::PointerMoved { position } => self.on_move(position),
            InputEvent::Scrolled { step, position } => self.on_scroll(*step, position),
            InputEvent::KeyPressed { key, modifiers } => self.on_key(*key, *modifiers),
            InputEvent::Resized { left_px, width_px } => self.on_resize(*left_px, *width_px),
        }
    }

    // ------------------------------------------------------------------
    // Press
    // ------------------------------------------------------------------

    fn on_press(&mut self, button: MouseButton, position: &PointerPosition) -> Vec<Effect> {
        if self.state != GuiState::Idle {
            log::debug!("Ignoring {:?} press while {}", button, self.state.name());
            return Vec::new();
        }
        let Some(data) = position.data else {
            return Vec::new();
        };

        if button.is_primary() {
            self.begin_primary(position.pixel.x, data)
        } else if button.is_secondary() {
            self.begin_pan(data.x)
        } else {
            Vec::new()
        }
    }

    fn begin_primary(&mut self, pointer_px: f32, data: DataPoint) -> Vec<Effect> {
        self.collection.deselect_all();
        self.hit_tester
            .update_hover(&self.viewport, &mut self.collection, pointer_px);

        if let Some((index, edge)) = self.hovered_edge(pointer_px) {
            if let Some(ann) = self.collection.get_index_mut(index) {
                ann.activate(data.x);
                ann.arm_edge(edge);
                log::debug!("Grabbed {} edge of range {}", edge.name(), ann.id);
            }
            self.state = GuiState::MovingEdge;
            return vec![Effect::Redraw];
        }

        let body = find_hovering_annotation(&self.collection, data.x, self.body_probe_y()).map(|a| a.id);
        if let Some(id) = body {
            let mut effects = vec![Effect::Redraw];
            if let Some(ann) = self.collection.get_mut(id) {
                ann.activate(data.x);
                log::debug!("Grabbed range {} at {:.1}", id, data.x);
                effects.push(Effect::ShowRange {
                    start: ann.x_min,
                    stop: ann.x_max,
                });
            }
            self.state = GuiState::MovingArea;
            return effects;
        }

        let x = self.clamp_to_data(data.x);
        let id = self.collection.allocate_id();
        let mut ann = Annotation::at_pointer(id, x, self.config.annotation_y_extent)
            .with_grab_margin(self.config.edge_grab_margin_px);
        ann.activate(x);
        ann.arm_edge(Edge::Right);
        self.collection.add(ann);
        self.collection.sort_by_x_min();
        self.state = GuiState::NewArea;
        log::debug!("Started range {} at {:.1}", id, x);
        vec![Effect::Redraw]
    }

    fn begin_pan(&mut self, pointer_x: f64) -> Vec<Effect> {
        self.pan_origin = Some(PanOrigin {
            pointer_x,
            viewport: self.viewport,
        });
        self.state = GuiState::Panning;
        log::debug!("Pan started at {:.1}", pointer_x);
        self.set_cursor(Cursor::Move).into_iter().collect()
    }

    /// First hovered edge in sorted order.
    fn hovered_edge(&self, pointer_px: f32) -> Option<(usize, Edge)> {
        self.collection.iter().enumerate().find_map(|(index, ann)| {
            let (left, right) = self.hit_tester.edge_pixels(&self.viewport, ann);
            ann.hovered_edge(pointer_px, left, right)
                .map(|edge| (index, edge))
        })
    }

    /// Ranges span their whole vertical extent, so body hits probe its middle.
    fn body_probe_y(&self) -> f64 {
        let (y_min, y_max) = self.config.annotation_y_extent;
        (y_min + y_max) * 0.5
    }

    // ------------------------------------------------------------------
    // Move
    // ------------------------------------------------------------------

    fn on_move(&mut self, position: &PointerPosition) -> Vec<Effect> {
        let pointer_px = position.pixel.x;

        // Hover and cursor follow the pixel column even off the plot; only
        // geometry needs a data coordinate.
        let mut effects = match (self.state, position.data) {
            (GuiState::Idle, _) | (_, None) => Vec::new(),
            (GuiState::Panning, Some(_)) => self.drag_pan(pointer_px),
            (GuiState::NewArea | GuiState::MovingEdge, Some(data)) => self.drag_edge(data.x),
            (GuiState::MovingArea, Some(data)) => self.drag_area(data.x),
        };

        self.hit_tester
            .update_hover(&self.viewport, &mut self.collection, pointer_px);

        if matches!(self.state, GuiState::Idle | GuiState::MovingEdge) {
            let hint = if self.collection.any_edge_hovering() {
                Cursor::ResizeHorizontal
            } else {
                Cursor::Default
            };
            effects.extend(self.set_cursor(hint));
        }
        effects
    }

    /// Pan measured against the window the pan started in, so the data
    /// point grabbed stays under the pointer.
    fn drag_pan(&mut self, pointer_px: f32) -> Vec<Effect> {
        let Some(origin) = self.pan_origin else {
            return Vec::new();
        };
        let pointer_x = self.hit_tester.pixel_to_data(&origin.viewport, pointer_px);
        let delta = origin.pointer_x - pointer_x;

        let mut candidate = origin.viewport;
        candidate.zoom_level = self.viewport.zoom_level;
        if candidate.pan(delta) {
            self.viewport = candidate;
            vec![Effect::Redraw]
        } else {
            Vec::new()
        }
    }

    fn drag_edge(&mut self, x: f64) -> Vec<Effect> {
        let x = self.clamp_to_data(x);
        let Some(index) = self
            .collection
            .iter()
            .position(|a| a.active_edge().is_some())
        else {
            return Vec::new();
        };

        let clamped = self.collection.clamp_to_neighbors(index, x);
        if let Some(ann) = self.collection.get_index_mut(index) {
            ann.drag_active_edges(clamped);
        }
        vec![Effect::Redraw]
    }

    fn drag_area(&mut self, x: f64) -> Vec<Effect> {
        let bounds = self.viewport.data_bounds();
        let active: Vec<usize> = self
            .collection
            .iter()
            .enumerate()
            .filter(|(_, a)| a.active)
            .map(|(index, _)| index)
            .collect();

        for index in active {
            let Some(offset) = self.collection.get_index(index).map(Annotation::grab_offset) else {
                continue;
            };
            let x_min = self
                .collection
                .clamp_move_to_neighbors(index, x + offset, bounds);
            if let Some(ann) = self.collection.get_index_mut(index) {
                ann.move_to(x_min, false);
            }
            self.collection.trim_to_neighbors(index, bounds);
        }
        vec![Effect::Redraw]
    }

    // ------------------------------------------------------------------
    // Release
    // ------------------------------------------------------------------

    fn on_release(&mut self, button: MouseButton) -> Vec<Effect> {
        if self.state == GuiState::Idle {
            return Vec::new();
        }
        let finished = self.state;
        log::debug!("{:?} release ends {}", button, finished.name());

        let mut effects = Vec::new();
        for ann in self.collection.iter_mut().filter(|a| a.active) {
            ann.normalize_bounds();
        }

        if matches!(finished, GuiState::NewArea | GuiState::MovingEdge) {
            effects.extend(self.drop_narrow_active());
        }

        if finished == GuiState::Panning {
            self.pan_origin = None;
            effects.extend(self.set_cursor(Cursor::Default));
        }

        self.collection.clear_edge_activity();
        self.collection.sort_by_x_min();
        self.state = GuiState::Idle;

        let survivor = if finished.is_editing() {
            self.collection.active().next()
        } else {
            None
        };
        if let Some(ann) = survivor {
            log::info!(
                "Range {} [{:.1}, {:.1}] after {}",
                ann.id,
                ann.x_min,
                ann.x_max,
                finished.name()
            );
            effects.push(Effect::ShowRange {
                start: ann.x_min,
                stop: ann.x_max,
            });
        }

        effects.push(Effect::Redraw);
        effects
    }

    /// Remove active ranges narrower on screen than the minimum width.
    fn drop_narrow_active(&mut self) -> Vec<Effect> {
        let min_width = self.config.min_new_area_width_px;
        let narrow: Vec<AnnotationId> = self
            .collection
            .active()
            .filter(|a| self.hit_tester.pixel_width(&self.viewport, a) < min_width)
            .map(|a| a.id)
            .collect();

        narrow
            .into_iter()
            .flat_map(|id| {
                log::debug!("Range {} narrower than {}px, dropping", id, min_width);
                self.detach_and_remove(id)
            })
            .collect()
    }

    /// Tell the frontend to release the drawable, then forget the range.
    /// An unknown id yields nothing.
    fn detach_and_remove(&mut self, id: AnnotationId) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(ann) = self.collection.get_mut(id) {
            ann.visible = false;
            effects.push(Effect::Detach(id));
        }
        if self.collection.remove(id).is_some() {
            log::info!("Removed range {}", id);
        }
        effects
    }

    // ------------------------------------------------------------------
    // Scroll / resize
    // ------------------------------------------------------------------

    fn on_scroll(&mut self, step: f64, position: &PointerPosition) -> Vec<Effect> {
        let Some(data) = position.data else {
            return Vec::new();
        };

        self.viewport.zoom_level += step;
        if !self
            .viewport
            .zoom_around(data.x, step * self.config.zoom_step_scale)
        {
            return Vec::new();
        }
        log::debug!(
            "Zoom {:+.2} around {:.1}: [{:.1}, {:.1}]",
            step,
            data.x,
            self.viewport.x_min,
            self.viewport.x_max
        );

        // Keep an ongoing pan anchored to the new window
        if self.state == GuiState::Panning {
            self.pan_origin = Some(PanOrigin {
                pointer_x: self
                    .hit_tester
                    .pixel_to_data(&self.viewport, position.pixel.x),
                viewport: self.viewport,
            });
        }

        self.hit_tester
            .update_hover(&self.viewport, &mut self.collection, position.pixel.x);
        vec![Effect::Redraw]
    }

    fn on_resize(&mut self, left_px: f32, width_px: f32) -> Vec<Effect> {
        if !width_px.is_finite() || width_px <= 0.0 {
            log::warn!("Ignoring resize to width {}", width_px);
            return Vec::new();
        }
        self.hit_tester.surface = RenderSurface::new(left_px, width_px);
        vec![Effect::Redraw]
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    fn on_key(&mut self, key: Key, modifiers: Modifiers) -> Vec<Effect> {
        let Some(action) = self.keybindings.action_for(key, modifiers) else {
            log::trace!("Unbound key {}", key);
            return Vec::new();
        };
        if self.state != GuiState::Idle {
            log::debug!("Ignoring {} while {}", action.name(), self.state.name());
            return Vec::new();
        }

        match action {
            KeyAction::NudgeLeft => self.nudge_active(-self.config.nudge_step),
            KeyAction::NudgeRight => self.nudge_active(self.config.nudge_step),
            KeyAction::Delete => self.delete_active(),
            KeyAction::Play => self.play_active(),
            KeyAction::CenterView => self.center_on_active(),
            KeyAction::ResetView => {
                self.viewport.reset();
                vec![Effect::Redraw]
            }
        }
    }

    fn nudge_active(&mut self, delta: f64) -> Vec<Effect> {
        let ids = self.collection.active_ids();
        if ids.is_empty() {
            return Vec::new();
        }

        let bounds = self.viewport.data_bounds();
        for id in ids {
            let Some(index) = self.collection.index_of(id) else {
                continue;
            };
            if self.config.nudge_respects_neighbors {
                let Some(proposed) = self.collection.get_index(index).map(|a| a.x_min + delta) else {
                    continue;
                };
                let x_min = self
                    .collection
                    .clamp_move_to_neighbors(index, proposed, bounds);
                if let Some(ann) = self.collection.get_index_mut(index) {
                    ann.move_to(x_min, false);
                }
                self.collection.trim_to_neighbors(index, bounds);
            } else if let Some(ann) = self.collection.get_index_mut(index) {
                let (lo, hi) = bounds;
                ann.nudge(delta.min(hi - ann.x_max).max(lo - ann.x_min));
            }
        }
        self.collection.sort_by_x_min();

        let mut effects = vec![Effect::Redraw];
        if let Some(ann) = self.collection.active().next() {
            log::debug!("Nudged range {} to [{:.1}, {:.1}]", ann.id, ann.x_min, ann.x_max);
            effects.push(Effect::ShowRange {
                start: ann.x_min,
                stop: ann.x_max,
            });
        }
        effects
    }

    fn delete_active(&mut self) -> Vec<Effect> {
        let ids = self.collection.active_ids();
        if ids.is_empty() {
            return Vec::new();
        }
        let mut effects: Vec<Effect> = ids
            .into_iter()
            .flat_map(|id| self.detach_and_remove(id))
            .collect();
        effects.push(Effect::Redraw);
        effects
    }

    fn play_active(&self) -> Vec<Effect> {
        self.collection
            .active()
            .map(|ann| {
                let (start, stop) = (sample_index(ann.x_min), sample_index(ann.x_max));
                log::info!("Playing samples {}..{} of range {}", start, stop, ann.id);
                Effect::Play {
                    start,
                    stop,
                    sample_rate: self.sample_rate,
                }
            })
            .collect()
    }

    fn center_on_active(&mut self) -> Vec<Effect> {
        let Some(center) = self.collection.active().next().map(Annotation::center) else {
            return Vec::new();
        };
        self.viewport.center_on(center);
        vec![Effect::Redraw]
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Update the cursor, yielding an effect only on change.
    fn set_cursor(&mut self, cursor: Cursor) -> Option<Effect> {
        if self.cursor == cursor {
            return None;
        }
        self.cursor = cursor;
        Some(Effect::SetCursor(cursor))
    }

    fn clamp_to_data(&self, x: f64) -> f64 {
        let (lo, hi) = self.viewport.data_bounds();
        x.clamp(lo, hi)
    }
}

/// Nearest sample index for a data x; negative positions map to 0.
fn sample_index(x: f64) -> usize {
    x.round().max(0.0) as usize
}

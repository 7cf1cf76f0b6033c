//! Time-range annotation and its interaction flags.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_EDGE_GRAB_MARGIN_PX;
use crate::hit_test::within_edge_margin;

/// Unique identifier for an annotation.
pub type AnnotationId = u32;

/// One of the two vertical boundaries of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
}

impl Edge {
    pub fn name(&self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
        }
    }
}

/// Pixel tolerance for grabbing an edge, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrabMargin {
    /// Horizontal tolerance used for edge grabbing.
    pub x: f32,
    /// Kept in the config format but unused: ranges span the full plot
    /// height, so edges are grabbed on x alone.
    pub y: f32,
}

impl Default for GrabMargin {
    fn default() -> Self {
        Self {
            x: DEFAULT_EDGE_GRAB_MARGIN_PX,
            y: DEFAULT_EDGE_GRAB_MARGIN_PX,
        }
    }
}

/// A time-range over the signal.
///
/// `x_min <= x_max` holds whenever no gesture is in progress. While an edge
/// is being dragged the bounds may cross; [`Annotation::normalize_bounds`]
/// puts them back in order on release.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Unique identifier.
    pub id: AnnotationId,
    /// Left bound in data space.
    pub x_min: f64,
    /// Right bound in data space.
    pub x_max: f64,
    /// Vertical extent in data space (display only).
    pub y_min: f64,
    pub y_max: f64,
    /// Optional user label.
    pub label: Option<String>,
    /// Highlighted as part of the current selection.
    pub selected: bool,
    /// Target of the current (or most recent) gesture and of keyboard actions.
    pub active: bool,
    /// Pointer is horizontally over the range.
    pub hovering: bool,
    pub left_edge_hovering: bool,
    pub right_edge_hovering: bool,
    /// Edge being dragged. Cleared on every release.
    pub left_edge_active: bool,
    pub right_edge_active: bool,
    /// Grab tolerance for the edges.
    pub edge_grab_margin_px: GrabMargin,
    /// False once the renderer has been told to detach this range.
    pub visible: bool,
    /// `x_min - pointer_x` captured when the range was grabbed.
    grab_offset: f64,
}

impl Annotation {
    /// Create a range with explicit bounds.
    pub fn new(id: AnnotationId, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            id,
            x_min,
            x_max,
            y_min,
            y_max,
            label: None,
            selected: false,
            active: false,
            hovering: false,
            left_edge_hovering: false,
            right_edge_hovering: false,
            left_edge_active: false,
            right_edge_active: false,
            edge_grab_margin_px: GrabMargin::default(),
            visible: true,
            grab_offset: 0.0,
        }
    }

    /// Zero-width range anchored at the pointer, as created by a new-area press.
    pub fn at_pointer(id: AnnotationId, x: f64, y_extent: (f64, f64)) -> Self {
        Self::new(id, x, x, y_extent.0, y_extent.1)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    pub fn with_grab_margin(mut self, margin: GrabMargin) -> Self {
        self.edge_grab_margin_px = margin;
        self
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn center(&self) -> f64 {
        (self.x_min + self.x_max) * 0.5
    }

    /// Bounds are currently crossed (only legal mid-drag).
    pub fn is_inverted(&self) -> bool {
        self.x_max < self.x_min
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Shift the range so it starts at `new_x_min`, keeping its width.
    ///
    /// With `apply_grab_offset` the stored grab offset is added, so the
    /// pointer stays on the same spot of the range it grabbed.
    pub fn move_to(&mut self, new_x_min: f64, apply_grab_offset: bool) {
        let width = self.width();
        self.x_min = if apply_grab_offset {
            new_x_min + self.grab_offset
        } else {
            new_x_min
        };
        self.x_max = self.x_min + width;
    }

    /// Set the left bound. Callers clamp against neighbors first.
    pub fn set_x_min(&mut self, x: f64) {
        self.x_min = x;
    }

    /// Set the right bound. Callers clamp against neighbors first.
    pub fn set_x_max(&mut self, x: f64) {
        self.x_max = x;
    }

    /// Swap the bounds if they are inverted. Returns true if a swap happened.
    pub fn normalize_bounds(&mut self) -> bool {
        if self.is_inverted() {
            std::mem::swap(&mut self.x_min, &mut self.x_max);
            true
        } else {
            false
        }
    }

    /// Remember where on the range the pointer grabbed it.
    pub fn record_grab_offset(&mut self, pointer_x: f64) {
        self.grab_offset = self.x_min - pointer_x;
    }

    pub fn grab_offset(&self) -> f64 {
        self.grab_offset
    }

    /// Move both bounds by `delta` data units.
    pub fn nudge(&mut self, delta: f64) {
        self.x_min += delta;
        self.x_max += delta;
    }

    // ------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------

    /// True if the data-space point lies inside the range (inclusive).
    pub fn hit_test(&self, x: f64, y: f64) -> bool {
        self.x_min <= x && x <= self.x_max && self.y_min <= y && y <= self.y_max
    }

    /// Refresh hover flags from the pointer's pixel column.
    ///
    /// The two edge flags are independent; both can be set on a range that
    /// is narrower than twice the grab margin.
    pub fn update_edge_hover(&mut self, pointer_px: f32, left_edge_px: f32, right_edge_px: f32) {
        let margin = self.edge_grab_margin_px.x;
        self.hovering = left_edge_px <= pointer_px && pointer_px <= right_edge_px;
        self.left_edge_hovering = within_edge_margin(pointer_px, left_edge_px, margin);
        self.right_edge_hovering = within_edge_margin(pointer_px, right_edge_px, margin);
    }

    pub fn is_edge_hovering(&self) -> bool {
        self.left_edge_hovering || self.right_edge_hovering
    }

    /// The hovered edge to grab. When both are hovered the closer one wins,
    /// ties go to the right edge so a zero-width range grows rightwards.
    pub fn hovered_edge(&self, pointer_px: f32, left_edge_px: f32, right_edge_px: f32) -> Option<Edge> {
        match (self.left_edge_hovering, self.right_edge_hovering) {
            (true, true) => {
                let left = (pointer_px - left_edge_px).abs();
                let right = (pointer_px - right_edge_px).abs();
                Some(if left < right { Edge::Left } else { Edge::Right })
            }
            (true, false) => Some(Edge::Left),
            (false, true) => Some(Edge::Right),
            (false, false) => None,
        }
    }

    // ------------------------------------------------------------------
    // Selection / activity
    // ------------------------------------------------------------------

    /// Make this the gesture target, recording the grab offset.
    pub fn activate(&mut self, pointer_x: f64) {
        self.record_grab_offset(pointer_x);
        self.selected = true;
        self.active = true;
    }

    pub fn deselect(&mut self) {
        self.active = false;
        self.selected = false;
    }

    /// Arm one edge for dragging.
    pub fn arm_edge(&mut self, edge: Edge) {
        match edge {
            Edge::Left => self.left_edge_active = true,
            Edge::Right => self.right_edge_active = true,
        }
    }

    pub fn deactivate_edges(&mut self) {
        self.left_edge_active = false;
        self.right_edge_active = false;
    }

    /// The armed edge, if any.
    pub fn active_edge(&self) -> Option<Edge> {
        if self.left_edge_active {
            Some(Edge::Left)
        } else if self.right_edge_active {
            Some(Edge::Right)
        } else {
            None
        }
    }

    /// Write `x` to whichever edges are armed.
    pub fn drag_active_edges(&mut self, x: f64) {
        if self.left_edge_active {
            self.set_x_min(x);
        }
        if self.right_edge_active {
            self.set_x_max(x);
        }
    }
}

//! Default tunables for the annotator.
//!
//! These seed [`crate::config::InteractionConfig`]; the running annotator
//! always reads the config, never these directly.

/// Pixel distance within which the pointer grabs an annotation edge.
pub const DEFAULT_EDGE_GRAB_MARGIN_PX: f32 = 5.0;

/// A new or resized range narrower than this (in pixels) is discarded on release.
pub const MINIMUM_NEW_AREA_WIDTH_PX: f32 = 5.0;

/// Fraction of the distance to the pivot removed per scroll step.
pub const ZOOM_STEP_SCALE: f64 = 0.15;

/// Data units moved by one shift+arrow nudge.
pub const NUDGE_STEP: f64 = 50.0;

/// Vertical extent given to new annotations (display only).
pub const DEFAULT_ANNOTATION_Y_MIN: f64 = -1.0;
pub const DEFAULT_ANNOTATION_Y_MAX: f64 = 2.0;

/// Narrowest visible window zoom will produce, in data units.
pub const MIN_VISIBLE_SPAN: f64 = 1.0;

/// Render surface width assumed until the first resize event.
pub const DEFAULT_SURFACE_WIDTH_PX: f32 = 1600.0;

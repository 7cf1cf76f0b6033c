//! Gesture states and the side effects the machine asks the frontend for.

use crate::model::AnnotationId;

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuiState {
    #[default]
    Idle,
    /// Dragging out a freshly created range.
    NewArea,
    /// Dragging a whole range.
    MovingArea,
    /// Dragging one edge of a range.
    MovingEdge,
    /// Dragging the view.
    Panning,
}

impl GuiState {
    pub fn name(&self) -> &'static str {
        match self {
            GuiState::Idle => "idle",
            GuiState::NewArea => "new area",
            GuiState::MovingArea => "moving area",
            GuiState::MovingEdge => "moving edge",
            GuiState::Panning => "panning",
        }
    }

    /// A primary-button gesture that changes ranges.
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            GuiState::NewArea | GuiState::MovingArea | GuiState::MovingEdge
        )
    }
}

/// Pointer shape hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// Over a grabbable edge.
    ResizeHorizontal,
    /// Dragging the view.
    Move,
}

/// Request for the renderer or audio collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Redraw,
    SetCursor(Cursor),
    /// Release the drawable for this range. Always sent before the range
    /// leaves the collection.
    Detach(AnnotationId),
    /// Point the linked sub-view at `[start, stop]`.
    ShowRange { start: f64, stop: f64 },
    /// Play samples `start..stop`.
    Play {
        start: usize,
        stop: usize,
        sample_rate: f32,
    },
}

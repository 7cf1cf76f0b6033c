//! Per-frame views of the selection, for renderers.

use crate::hit_test::RenderSurface;
use crate::model::{Annotation, AnnotationCollection, AnnotationId};
use crate::viewport::Viewport;

use super::effect::{Cursor, GuiState};

/// Selected and active ranges at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    /// Highlighted ranges, in sorted order
    pub selected: Vec<AnnotationId>,
    /// Gesture and keyboard targets, in sorted order
    pub active: Vec<AnnotationId>,
}

impl SelectionSnapshot {
    pub fn capture(collection: &AnnotationCollection) -> Self {
        Self {
            selected: collection.selected().map(|a| a.id).collect(),
            active: collection.active_ids(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty() && self.active.is_empty()
    }

    pub fn is_selected(&self, id: AnnotationId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_active(&self, id: AnnotationId) -> bool {
        self.active.contains(&id)
    }
}

/// Everything a renderer reads to draw one frame.
#[derive(Debug, Clone)]
pub struct DrawModel<'a> {
    pub annotations: &'a [Annotation],
    pub viewport: Viewport,
    pub surface: RenderSurface,
    pub cursor: Cursor,
    pub state: GuiState,
    pub selection: SelectionSnapshot,
}

impl DrawModel<'_> {
    /// Ranges that intersect the visible window and have not been detached.
    pub fn visible_annotations(&self) -> impl Iterator<Item = &Annotation> {
        let (x_min, x_max) = (self.viewport.x_min, self.viewport.x_max);
        self.annotations
            .iter()
            .filter(move |a| a.visible && a.x_max.max(a.x_min) >= x_min && a.x_min.min(a.x_max) <= x_max)
    }
}

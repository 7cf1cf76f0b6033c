//! Ordered, non-overlapping storage for the annotations of one signal.

use serde::{Deserialize, Serialize};

use super::annotation::{Annotation, AnnotationId, GrabMargin};

/// One exported range: `(x_min, x_max, label)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedRange {
    pub x_min: f64,
    pub x_max: f64,
    #[serde(default)]
    pub label: Option<String>,
}

impl ExportedRange {
    pub fn as_tuple(&self) -> (f64, f64, Option<&str>) {
        (self.x_min, self.x_max, self.label.as_deref())
    }
}

impl From<&Annotation> for ExportedRange {
    fn from(ann: &Annotation) -> Self {
        Self {
            x_min: ann.x_min,
            x_max: ann.x_max,
            label: ann.label.clone(),
        }
    }
}

/// Annotations sorted by `x_min`.
///
/// For consecutive entries `a[i].x_max <= a[i + 1].x_min` after every
/// completed gesture. The collection does not police this on its own; the
/// interaction code clamps proposed positions with
/// [`AnnotationCollection::clamp_to_neighbors`] and
/// [`AnnotationCollection::clamp_move_to_neighbors`] before applying them.
#[derive(Debug, Clone)]
pub struct AnnotationCollection {
    annotations: Vec<Annotation>,
    next_id: AnnotationId,
}

impl Default for AnnotationCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationCollection {
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Annotation> {
        self.annotations.iter_mut()
    }

    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Reserve the next identifier.
    pub fn allocate_id(&mut self) -> AnnotationId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: AnnotationId) -> Option<&mut Annotation> {
        self.annotations.iter_mut().find(|a| a.id == id)
    }

    pub fn get_index(&self, index: usize) -> Option<&Annotation> {
        self.annotations.get(index)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Annotation> {
        self.annotations.get_mut(index)
    }

    /// Position of an annotation in sorted order.
    pub fn index_of(&self, id: AnnotationId) -> Option<usize> {
        self.annotations.iter().position(|a| a.id == id)
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Append an annotation. Call [`Self::sort_by_x_min`] before relying on order.
    pub fn add(&mut self, annotation: Annotation) -> AnnotationId {
        let id = annotation.id;
        if id >= self.next_id {
            self.next_id = id + 1;
        }
        self.annotations.push(annotation);
        id
    }

    /// Insert a finished range, e.g. when restoring a previous session.
    ///
    /// Returns `None` (and inserts nothing) if the range would overlap an
    /// existing one.
    pub fn insert_range(
        &mut self,
        x_min: f64,
        x_max: f64,
        y_extent: (f64, f64),
        margin: GrabMargin,
    ) -> Option<AnnotationId> {
        let (lo, hi) = if x_max < x_min { (x_max, x_min) } else { (x_min, x_max) };
        if self.annotations.iter().any(|a| lo < a.x_max && a.x_min < hi) {
            log::warn!("Rejected range [{:.1}, {:.1}]: overlaps an existing range", lo, hi);
            return None;
        }

        let id = self.allocate_id();
        let annotation = Annotation::new(id, lo, hi, y_extent.0, y_extent.1).with_grab_margin(margin);
        self.add(annotation);
        self.sort_by_x_min();
        Some(id)
    }

    /// Remove an annotation by ID. Removing an absent ID is a no-op.
    pub fn remove(&mut self, id: AnnotationId) -> Option<Annotation> {
        let index = self.index_of(id)?;
        Some(self.annotations.remove(index))
    }

    /// Restore ascending `x_min` order.
    pub fn sort_by_x_min(&mut self) {
        self.annotations.sort_by(|a, b| a.x_min.total_cmp(&b.x_min));
    }

    pub fn deselect_all(&mut self) {
        for ann in &mut self.annotations {
            ann.deselect();
        }
    }

    /// Disarm every dragged edge. Edge activity never outlives a gesture.
    pub fn clear_edge_activity(&mut self) {
        for ann in &mut self.annotations {
            ann.deactivate_edges();
        }
    }

    // ------------------------------------------------------------------
    // Neighbor queries
    // ------------------------------------------------------------------

    /// `x_max` of the annotation before `index`, if any.
    pub fn previous_x_max(&self, index: usize) -> Option<f64> {
        index
            .checked_sub(1)
            .and_then(|i| self.annotations.get(i))
            .map(|a| a.x_max)
    }

    /// `x_min` of the annotation after `index`, if any.
    pub fn next_x_min(&self, index: usize) -> Option<f64> {
        self.annotations.get(index + 1).map(|a| a.x_min)
    }

    /// Clamp a proposed edge position for the annotation at `index`.
    ///
    /// A left edge cannot pass the previous annotation's `x_max` and a right
    /// edge cannot pass the next annotation's `x_min`. A dragged edge may
    /// cross its partner mid-gesture, so both limits apply to either edge.
    /// Sides without a neighbor are unbounded.
    pub fn clamp_to_neighbors(&self, index: usize, proposed: f64) -> f64 {
        let mut x = proposed;
        if let Some(lower) = self.previous_x_max(index) {
            x = x.max(lower);
        }
        if let Some(upper) = self.next_x_min(index) {
            x = x.min(upper);
        }
        x
    }

    /// Clamp a proposed `x_min` for moving the whole annotation at `index`.
    ///
    /// The range keeps its width and must stay between its neighbors and
    /// inside `data_bounds`.
    pub fn clamp_move_to_neighbors(&self, index: usize, proposed_x_min: f64, data_bounds: (f64, f64)) -> f64 {
        let Some(ann) = self.annotations.get(index) else {
            return proposed_x_min;
        };
        let width = ann.width().abs();

        let lower = self
            .previous_x_max(index)
            .map_or(data_bounds.0, |prev| prev.max(data_bounds.0));
        let upper = self
            .next_x_min(index)
            .map_or(data_bounds.1, |next| next.min(data_bounds.1))
            - width;

        if upper < lower {
            // No room to move; stay put
            return ann.x_min;
        }
        proposed_x_min.clamp(lower, upper)
    }

    /// Pull the bounds at `index` back between its neighbors and inside
    /// `data_bounds`. Absorbs the rounding a width-preserving move can leave.
    pub fn trim_to_neighbors(&mut self, index: usize, data_bounds: (f64, f64)) {
        let lower = self
            .previous_x_max(index)
            .map_or(data_bounds.0, |prev| prev.max(data_bounds.0));
        let upper = self
            .next_x_min(index)
            .map_or(data_bounds.1, |next| next.min(data_bounds.1));
        if let Some(ann) = self.annotations.get_mut(index) {
            ann.x_min = ann.x_min.max(lower);
            ann.x_max = ann.x_max.min(upper);
        }
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    pub fn selected(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(|a| a.selected)
    }

    pub fn active(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(|a| a.active)
    }

    pub fn active_ids(&self) -> Vec<AnnotationId> {
        self.active().map(|a| a.id).collect()
    }

    pub fn any_edge_hovering(&self) -> bool {
        self.annotations.iter().any(Annotation::is_edge_hovering)
    }

    /// True if bounds are ordered and no two consecutive ranges overlap.
    pub fn is_consistent(&self) -> bool {
        self.annotations.iter().all(|a| a.x_min <= a.x_max)
            && self
                .annotations
                .windows(2)
                .all(|pair| pair[0].x_min <= pair[1].x_min && pair[0].x_max <= pair[1].x_min)
    }

    /// Ordered `(x_min, x_max, label)` list for the session's consumer.
    pub fn export(&self) -> Vec<ExportedRange> {
        self.annotations.iter().map(ExportedRange::from).collect()
    }
}

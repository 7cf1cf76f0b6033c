//! Data ↔ pixel mapping and hover queries.
//!
//! Edge grabbing works in pixel space so the grab tolerance feels the same
//! at every zoom level; body hits work in data space.

use wavemark_input::{DataPoint, PixelPoint, PointerPosition};

use crate::constants::DEFAULT_SURFACE_WIDTH_PX;
use crate::model::{Annotation, AnnotationCollection};
use crate::viewport::Viewport;

/// Horizontal placement of the plot area on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSurface {
    /// Pixel column of the plot's left edge.
    pub left_px: f32,
    /// Plot width in pixels.
    pub width_px: f32,
}

impl Default for RenderSurface {
    fn default() -> Self {
        Self {
            left_px: 0.0,
            width_px: DEFAULT_SURFACE_WIDTH_PX,
        }
    }
}

impl RenderSurface {
    pub fn new(left_px: f32, width_px: f32) -> Self {
        Self { left_px, width_px }
    }
}

/// Linear transform between the visible data window and pixel columns.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitTester {
    pub surface: RenderSurface,
}

impl HitTester {
    pub fn new(surface: RenderSurface) -> Self {
        Self { surface }
    }

    /// Pixel column of data-space `x` in the given viewport.
    pub fn data_to_pixel(&self, viewport: &Viewport, x: f64) -> f32 {
        data_to_pixel(viewport, self.surface, x)
    }

    /// Data-space x under pixel column `px` in the given viewport.
    pub fn pixel_to_data(&self, viewport: &Viewport, px: f32) -> f64 {
        pixel_to_data(viewport, self.surface, px)
    }

    /// Both edges of an annotation in pixels.
    pub fn edge_pixels(&self, viewport: &Viewport, annotation: &Annotation) -> (f32, f32) {
        (
            self.data_to_pixel(viewport, annotation.x_min),
            self.data_to_pixel(viewport, annotation.x_max),
        )
    }

    /// On-screen width of an annotation.
    pub fn pixel_width(&self, viewport: &Viewport, annotation: &Annotation) -> f32 {
        let (left, right) = self.edge_pixels(viewport, annotation);
        (right - left).abs()
    }

    /// Refresh hover and edge-hover flags on every annotation.
    pub fn update_hover(&self, viewport: &Viewport, collection: &mut AnnotationCollection, pointer_px: f32) {
        for ann in collection.iter_mut() {
            let (left, right) = self.edge_pixels(viewport, ann);
            ann.update_edge_hover(pointer_px, left, right);
        }
    }

    /// Build a pointer position for data-space `x` (y in both spaces is passed through).
    ///
    /// Useful for scripted input: the pixel column is derived from the
    /// current viewport so the two coordinates agree.
    pub fn pointer_at(&self, viewport: &Viewport, x: f64, y: f64) -> PointerPosition {
        PointerPosition::inside(
            PixelPoint::new(self.data_to_pixel(viewport, x), 0.0),
            DataPoint::new(x, y),
        )
    }
}

/// Pixel column of data-space `x` for a viewport rendered onto `surface`.
pub fn data_to_pixel(viewport: &Viewport, surface: RenderSurface, x: f64) -> f32 {
    let span = viewport.width();
    if span <= 0.0 {
        return surface.left_px;
    }
    let t = (x - viewport.x_min) / span;
    surface.left_px + (t * f64::from(surface.width_px)) as f32
}

/// Inverse of [`data_to_pixel`].
pub fn pixel_to_data(viewport: &Viewport, surface: RenderSurface, px: f32) -> f64 {
    if surface.width_px <= 0.0 {
        return viewport.x_min;
    }
    let t = f64::from(px - surface.left_px) / f64::from(surface.width_px);
    viewport.x_min + t * viewport.width()
}

/// True if `pointer_px` is strictly within `margin_px` of `edge_px`.
pub fn within_edge_margin(pointer_px: f32, edge_px: f32, margin_px: f32) -> bool {
    (pointer_px - edge_px).abs() < margin_px
}

/// First annotation, in sorted order, containing the data-space point.
pub fn find_hovering_annotation(collection: &AnnotationCollection, x: f64, y: f64) -> Option<&Annotation> {
    collection.iter().find(|ann| ann.hit_test(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GrabMargin;

    fn tester() -> HitTester {
        HitTester::new(RenderSurface::new(0.0, 1000.0))
    }

    #[test]
    fn test_identity_mapping() {
        // 1000 px showing [0, 1000]: one pixel per sample
        let vp = Viewport::new(0.0, 1000.0);
        let t = tester();
        assert_eq!(t.data_to_pixel(&vp, 250.0), 250.0);
        assert_eq!(t.pixel_to_data(&vp, 250.0), 250.0);
    }

    #[test]
    fn test_mapping_follows_zoom() {
        let mut vp = Viewport::new(0.0, 1000.0);
        vp.x_min = 100.0;
        vp.x_max = 200.0;
        let t = HitTester::new(RenderSurface::new(50.0, 500.0));

        assert_eq!(t.data_to_pixel(&vp, 100.0), 50.0);
        assert_eq!(t.data_to_pixel(&vp, 200.0), 550.0);
        assert_eq!(t.data_to_pixel(&vp, 150.0), 300.0);
        assert!((t.pixel_to_data(&vp, 300.0) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_pixel_width_scales_with_zoom() {
        let mut vp = Viewport::new(0.0, 1000.0);
        let ann = Annotation::new(1, 100.0, 102.0, -1.0, 2.0);
        let t = tester();
        assert_eq!(t.pixel_width(&vp, &ann), 2.0);

        vp.x_min = 100.0;
        vp.x_max = 200.0;
        assert_eq!(t.pixel_width(&vp, &ann), 20.0);
    }

    #[test]
    fn test_within_edge_margin() {
        assert!(within_edge_margin(103.0, 100.0, 5.0));
        assert!(within_edge_margin(96.0, 100.0, 5.0));
        assert!(!within_edge_margin(105.0, 100.0, 5.0));
    }

    #[test]
    fn test_update_hover_sets_edge_flags() {
        let vp = Viewport::new(0.0, 1000.0);
        let mut c = AnnotationCollection::new();
        c.insert_range(100.0, 200.0, (-1.0, 2.0), GrabMargin::default());
        c.insert_range(300.0, 400.0, (-1.0, 2.0), GrabMargin::default());

        tester().update_hover(&vp, &mut c, 198.0);
        let first = c.get_index(0).unwrap();
        assert!(first.right_edge_hovering);
        assert!(!first.left_edge_hovering);
        assert!(first.hovering);
        assert!(!c.get_index(1).unwrap().is_edge_hovering());

        tester().update_hover(&vp, &mut c, 250.0);
        assert!(!c.any_edge_hovering());
    }

    #[test]
    fn test_find_hovering_first_in_order() {
        let mut c = AnnotationCollection::new();
        c.insert_range(100.0, 200.0, (-1.0, 2.0), GrabMargin::default());
        c.insert_range(200.0, 300.0, (-1.0, 2.0), GrabMargin::default());

        // Shared boundary hits both; the earlier one wins
        let hit = find_hovering_annotation(&c, 200.0, 0.0).unwrap();
        assert_eq!(hit.x_min, 100.0);

        assert!(find_hovering_annotation(&c, 250.0, 0.0).is_some());
        assert!(find_hovering_annotation(&c, 50.0, 0.0).is_none());
        assert!(find_hovering_annotation(&c, 150.0, 5.0).is_none());
    }

    #[test]
    fn test_pointer_at_agrees_with_mapping() {
        let vp = Viewport::new(0.0, 1000.0);
        let p = tester().pointer_at(&vp, 420.0, 0.0);
        assert_eq!(p.pixel.x, 420.0);
        assert_eq!(p.data_x(), Some(420.0));
    }
}

//! Pan/zoom window over the signal.
//!
//! The viewport is the visible data-space window `[x_min, x_max]` inside
//! the hard signal bounds `[data_x_min, data_x_max]`. Every operation keeps
//! `data_x_min <= x_min < x_max <= data_x_max`: panning that would leave the
//! data is refused outright, zooming clamps each side independently.

use crate::constants::MIN_VISIBLE_SPAN;

/// Visible data window and the bounds it lives in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub data_x_min: f64,
    pub data_x_max: f64,
    /// Sum of all scroll steps applied so far (informational).
    pub zoom_level: f64,
    /// Narrowest window zoom may produce.
    pub min_span: f64,
}

impl Viewport {
    /// Viewport showing the whole data range.
    ///
    /// Degenerate bounds (a single sample) are widened to `min_span` so the
    /// window never has zero width.
    pub fn new(data_x_min: f64, data_x_max: f64) -> Self {
        let data_x_max = if data_x_max > data_x_min {
            data_x_max
        } else {
            data_x_min + MIN_VISIBLE_SPAN
        };
        Self {
            x_min: data_x_min,
            x_max: data_x_max,
            data_x_min,
            data_x_max,
            zoom_level: 0.0,
            min_span: MIN_VISIBLE_SPAN,
        }
    }

    /// Viewport for a signal of `sample_count` samples: bounds `[0, n - 1]`.
    pub fn for_samples(sample_count: usize) -> Self {
        Self::new(0.0, sample_count.saturating_sub(1) as f64)
    }

    pub fn with_min_span(mut self, min_span: f64) -> Self {
        self.min_span = min_span.max(f64::EPSILON);
        self
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn data_bounds(&self) -> (f64, f64) {
        (self.data_x_min, self.data_x_max)
    }

    pub fn contains(&self, x: f64) -> bool {
        self.x_min <= x && x <= self.x_max
    }

    /// Shift the window by `delta` data units.
    ///
    /// Refused (returns false, nothing changes) if the shifted window would
    /// leave the data bounds; there is no partial pan.
    pub fn pan(&mut self, delta: f64) -> bool {
        let x_min = self.x_min + delta;
        let x_max = self.x_max + delta;
        if x_min >= self.data_x_min && x_max <= self.data_x_max {
            self.x_min = x_min;
            self.x_max = x_max;
            true
        } else {
            log::trace!("Pan by {:.2} refused at data bounds", delta);
            false
        }
    }

    /// Zoom around `pivot`, keeping the point under the pointer fixed.
    ///
    /// `step` is the fraction of each side's distance to the pivot that is
    /// removed (positive zooms in, negative zooms out). Each side is clamped
    /// to the data bounds on its own, so one side can stop while the other
    /// still moves. A result narrower than `min_span` is refused.
    pub fn zoom_around(&mut self, pivot: f64, step: f64) -> bool {
        let x_min = (self.x_min + step * (pivot - self.x_min)).max(self.data_x_min);
        let x_max = (self.x_max - step * (self.x_max - pivot)).min(self.data_x_max);

        let span = x_max - x_min;
        if span.is_nan() || span < self.min_span {
            log::debug!(
                "Zoom refused: window [{:.2}, {:.2}] narrower than {:.2}",
                x_min,
                x_max,
                self.min_span
            );
            return false;
        }

        self.x_min = x_min;
        self.x_max = x_max;
        true
    }

    /// Show the whole data range again.
    pub fn reset(&mut self) {
        self.x_min = self.data_x_min;
        self.x_max = self.data_x_max;
        self.zoom_level = 0.0;
    }

    /// Center the window on `x` without changing its width, stopping at the
    /// data bounds.
    pub fn center_on(&mut self, x: f64) {
        let width = self.width();
        let x_min = (x - width * 0.5).clamp(self.data_x_min, self.data_x_max - width);
        self.x_min = x_min;
        self.x_max = x_min + width;
    }
}

//! Viewport pan/zoom math for the rendered diagram.

use serde::{Deserialize, Serialize};

use crate::layout::NetworkLayout;

/// Zoom bounds for wheel interaction.
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 4.0;

/// Pan and zoom transform applied uniformly to a rendered layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Horizontal pan offset in container pixels.
    pub pan_x: f64,
    /// Vertical pan offset in container pixels.
    pub pan_y: f64,
    /// Uniform scale factor.
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Translate the viewport by a drag delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Scale the zoom factor, clamped to sane interaction bounds.
    pub fn zoom_by(&mut self, factor: f64) {
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Fit the layout inside a container and center it.
    ///
    /// The scale never exceeds 1.0 - small diagrams are centered at
    /// natural size rather than magnified. Empty layouts reset to the
    /// identity transform.
    pub fn fit_to_screen(&mut self, layout: &NetworkLayout, container_w: f64, container_h: f64) {
        if layout.width <= 0.0 || layout.height <= 0.0 {
            *self = Self::default();
            return;
        }

        let scale = (container_w / layout.width)
            .min(container_h / layout.height)
            .min(1.0);

        self.zoom = scale;
        self.pan_x = (container_w - layout.width * scale) / 2.0;
        self.pan_y = (container_h - layout.height * scale) / 2.0;
    }

    /// Map a layout-space point into container space.
    pub fn project(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.zoom + self.pan_x, y * self.zoom + self.pan_y)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn layout(width: f64, height: f64) -> NetworkLayout {
        NetworkLayout {
            width,
            height,
            ..NetworkLayout::default()
        }
    }

    #[test]
    fn fit_shrinks_oversized_layouts() {
        let mut vp = Viewport::default();
        vp.fit_to_screen(&layout(2000.0, 500.0), 1000.0, 800.0);
        assert_eq!(vp.zoom, 0.5);
        // Width fills the container exactly; height is centered.
        assert_eq!(vp.pan_x, 0.0);
        assert_eq!(vp.pan_y, (800.0 - 250.0) / 2.0);
    }

    #[test]
    fn fit_never_magnifies() {
        let mut vp = Viewport::default();
        vp.fit_to_screen(&layout(400.0, 300.0), 1000.0, 800.0);
        assert_eq!(vp.zoom, 1.0);
        assert_eq!(vp.pan_x, 300.0);
        assert_eq!(vp.pan_y, 250.0);
    }

    #[test]
    fn fit_on_empty_layout_resets() {
        let mut vp = Viewport {
            pan_x: 50.0,
            pan_y: 60.0,
            zoom: 2.0,
        };
        vp.fit_to_screen(&layout(0.0, 0.0), 1000.0, 800.0);
        assert_eq!(vp, Viewport::default());
    }

    #[test]
    fn zoom_is_clamped() {
        let mut vp = Viewport::default();
        vp.zoom_by(100.0);
        assert_eq!(vp.zoom, 4.0);
        vp.zoom_by(0.0001);
        assert_eq!(vp.zoom, 0.1);
    }

    #[test]
    fn pan_accumulates() {
        let mut vp = Viewport::default();
        vp.pan_by(10.0, -5.0);
        vp.pan_by(2.0, 3.0);
        assert_eq!((vp.pan_x, vp.pan_y), (12.0, -2.0));
    }

    #[test]
    fn project_applies_zoom_then_pan() {
        let vp = Viewport {
            pan_x: 100.0,
            pan_y: 50.0,
            zoom: 0.5,
        };
        assert_eq!(vp.project(200.0, 40.0), (200.0, 70.0));
    }
}

//! Camera module for the virtual/screen view transform.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom level that corresponds to "100%" in the UI.
pub const DEFAULT_ZOOM: f64 = 1.0;
/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 5.0;
/// Zoom change applied per zoom-button press.
pub const ZOOM_STEP_BUTTON: f64 = 0.2;
/// Zoom sensitivity for mouse-wheel scroll deltas.
pub const ZOOM_STEP_WHEEL: f64 = 0.001;

/// Camera manages the view transform for the canvas.
///
/// Elements live on an unbounded virtual plane; the camera maps that plane
/// onto the screen viewport. `origin` is the virtual point sitting at the
/// screen's top-left corner, so:
///
/// ```text
/// screen  = (virtual - origin) * zoom
/// virtual = screen / zoom + origin
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Virtual coordinates of the screen's top-left corner.
    pub origin: Point,
    /// Current zoom level, always within [MIN_ZOOM, MAX_ZOOM].
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Camera {
    /// Create a new camera at the default position and zoom.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a virtual point to screen coordinates.
    pub fn to_screen(&self, virtual_point: Point) -> Point {
        ((virtual_point - self.origin) * self.zoom).to_point()
    }

    /// Convert a screen point to virtual coordinates.
    pub fn to_virtual(&self, screen_point: Point) -> Point {
        self.origin + screen_point.to_vec2() / self.zoom
    }

    /// Project a virtual rect to screen coordinates.
    pub fn rect_to_screen(&self, rect: kurbo::Rect) -> kurbo::Rect {
        let p0 = self.to_screen(Point::new(rect.x0, rect.y0));
        let p1 = self.to_screen(Point::new(rect.x1, rect.y1));
        kurbo::Rect::new(p0.x, p0.y, p1.x, p1.y)
    }

    /// Scale a virtual-space size (stroke width, handle size, font size)
    /// to screen space, with a one-pixel floor so thin strokes stay visible.
    pub fn scaled_size(&self, virtual_size: f64) -> f64 {
        (virtual_size * self.zoom).max(1.0)
    }

    /// Set the zoom level, keeping the given screen point over the same
    /// virtual point before and after the change.
    pub fn zoom_at(&mut self, screen_anchor: Point, requested_zoom: f64) {
        let new_zoom = requested_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        // Virtual point under the anchor at the old zoom
        let anchor_virtual = self.to_virtual(screen_anchor);

        // Recompute origin so anchor_virtual stays under screen_anchor
        self.zoom = new_zoom;
        self.origin = anchor_virtual - screen_anchor.to_vec2() / self.zoom;
    }

    /// Zoom in or out by one button step, anchored at a screen point
    /// (typically the viewport center).
    pub fn zoom_step(&mut self, screen_anchor: Point, steps: f64) {
        self.zoom_at(screen_anchor, self.zoom + steps * ZOOM_STEP_BUTTON);
    }

    /// Zoom from a mouse-wheel scroll delta, anchored at the cursor.
    pub fn zoom_wheel(&mut self, cursor: Point, scroll_delta_y: f64) {
        let factor = 1.0 - scroll_delta_y * ZOOM_STEP_WHEEL;
        self.zoom_at(cursor, self.zoom * factor);
    }

    /// Pan by a delta in screen coordinates (drag-to-pan semantics).
    pub fn pan(&mut self, screen_delta: Vec2) {
        self.origin -= screen_delta / self.zoom;
    }

    /// Reset the camera to the default position and zoom.
    pub fn reset(&mut self) {
        self.origin = Point::ZERO;
        self.zoom = DEFAULT_ZOOM;
    }

    /// Clamp the zoom back into range. Used after loading persisted state.
    pub fn clamp_zoom(&mut self) {
        self.zoom = self.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.origin, Point::ZERO);
        assert!((camera.zoom - DEFAULT_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_virtual_identity() {
        let camera = Camera::new();
        let screen = Point::new(100.0, 200.0);
        let virtual_point = camera.to_virtual(screen);
        assert!((virtual_point.x - screen.x).abs() < f64::EPSILON);
        assert!((virtual_point.y - screen.y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_virtual_with_origin() {
        let mut camera = Camera::new();
        camera.origin = Point::new(50.0, 100.0);
        let virtual_point = camera.to_virtual(Point::new(100.0, 200.0));
        assert!((virtual_point.x - 150.0).abs() < f64::EPSILON);
        assert!((virtual_point.y - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_virtual_with_zoom() {
        let mut camera = Camera::new();
        camera.zoom = 2.0;
        let virtual_point = camera.to_virtual(Point::new(100.0, 200.0));
        assert!((virtual_point.x - 50.0).abs() < f64::EPSILON);
        assert!((virtual_point.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.origin = Point::new(30.0, -20.0);
        camera.zoom = 1.5;

        let original = Point::new(123.0, 456.0);
        let screen = camera.to_screen(original);
        let back = camera.to_virtual(screen);

        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_anchor_invariance() {
        let mut camera = Camera::new();
        camera.origin = Point::new(-40.0, 75.0);

        let anchor = Point::new(320.0, 180.0);
        let before = camera.to_virtual(anchor);
        camera.zoom_at(anchor, 2.5);
        let after = camera.to_virtual(anchor);

        assert!((before.x - after.x).abs() < 1e-10);
        assert!((before.y - after.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.001); // Try to zoom way out
        assert!((camera.zoom - MIN_ZOOM).abs() < f64::EPSILON);

        camera.zoom_at(Point::ZERO, 1000.0); // Try to zoom way in
        assert!((camera.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan_moves_origin_against_drag() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(50.0, 0.0));
        assert!((camera.origin.x - (-50.0)).abs() < f64::EPSILON);
        assert!((camera.origin.y - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan_scales_with_zoom() {
        let mut camera = Camera::new();
        camera.zoom = 2.0;
        camera.pan(Vec2::new(50.0, 20.0));
        assert!((camera.origin.x - (-25.0)).abs() < f64::EPSILON);
        assert!((camera.origin.y - (-10.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scaled_size_floor() {
        let mut camera = Camera::new();
        camera.zoom = MIN_ZOOM;
        assert!((camera.scaled_size(5.0) - 1.0).abs() < f64::EPSILON);
        camera.zoom = 2.0;
        assert!((camera.scaled_size(5.0) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(100.0, 100.0));
        camera.zoom_at(Point::new(10.0, 10.0), 3.0);
        camera.reset();
        assert_eq!(camera.origin, Point::ZERO);
        assert!((camera.zoom - DEFAULT_ZOOM).abs() < f64::EPSILON);
    }
}

//! Quillboard Render Library
//!
//! Backend-agnostic frame planning for the whiteboard: viewport culling,
//! selection chrome, drag previews, and the snap highlight. A concrete
//! [`DrawBackend`] (canvas, GPU, SVG export) executes the plan.

mod plan;

pub use plan::{FramePlan, SelectionOverlay, plan_frame};

use kurbo::Point;
use quillboard_core::Camera;
use quillboard_core::elements::Element;
use quillboard_core::geometry::{ResizeHandle, SummaryButton};

/// Paint operations a rendering backend must provide. Element drawing
/// receives the camera so strokes and fonts can be zoom-scaled.
pub trait DrawBackend {
    fn draw_element(&mut self, element: &Element, camera: &Camera);
    /// Dashed outline around the selected element (screen rect).
    fn draw_selection_outline(&mut self, outline: kurbo::Rect);
    fn draw_resize_handle(&mut self, handle: &ResizeHandle);
    /// Small circle at a connector attachment point (screen coords).
    fn draw_attachment_handle(&mut self, center: Point, radius: f64);
    /// Emphasized circle over the snap target.
    fn draw_snap_highlight(&mut self, center: Point, radius: f64);
    fn draw_summary_button(&mut self, button: &SummaryButton);
    /// Summary text floated above the selected element.
    fn draw_summary_text(&mut self, text: &str, anchor: kurbo::Rect);
}

/// Execute a frame plan against a backend, in paint order: elements,
/// preview, selection chrome, snap highlight.
pub fn render_frame(frame: &FramePlan, camera: &Camera, backend: &mut dyn DrawBackend) {
    for element in &frame.elements {
        backend.draw_element(element, camera);
    }
    if let Some(preview) = &frame.preview {
        backend.draw_element(preview, camera);
    }
    if let Some(overlay) = &frame.selection {
        backend.draw_selection_outline(overlay.outline);
        for handle in &overlay.handles {
            backend.draw_resize_handle(handle);
        }
        for center in &overlay.attachment_handles {
            backend.draw_attachment_handle(*center, frame.attachment_handle_radius);
        }
        for button in &overlay.summary_buttons {
            backend.draw_summary_button(button);
        }
        if let Some(text) = &overlay.summary_text {
            backend.draw_summary_text(text, overlay.outline);
        }
    }
    if let Some(center) = frame.snap_highlight {
        backend.draw_snap_highlight(center, frame.snap_highlight_radius);
    }
}

//! Frame planning: deciding what to draw, in what order, with which
//! overlays. The plan is backend-agnostic; a [`DrawBackend`](crate::DrawBackend)
//! turns it into actual paint calls.

use kurbo::{Point, Rect, Size};

use quillboard_core::elements::Element;
use quillboard_core::geometry::{
    self, CONNECTOR_HANDLE_RADIUS, ResizeHandle, SummaryButton, TextMeasurer,
};
use quillboard_core::snap::SNAP_TARGET_RADIUS;
use quillboard_core::{Camera, ElementStore, InteractionController};

/// Overlay drawn around the selected element, all in screen coordinates.
#[derive(Debug, Clone)]
pub struct SelectionOverlay {
    pub outline: Rect,
    pub handles: Vec<ResizeHandle>,
    /// Connector attachment handles, shown on rect-like elements.
    pub attachment_handles: Vec<Point>,
    pub summary_buttons: Vec<SummaryButton>,
    /// Summary text to display above the element, when ready and visible.
    pub summary_text: Option<String>,
}

/// Everything one frame draws: visible elements back to front, then the
/// in-progress preview, then selection chrome and the snap highlight.
#[derive(Debug)]
pub struct FramePlan<'a> {
    pub elements: Vec<&'a Element>,
    pub preview: Option<Element>,
    pub selection: Option<SelectionOverlay>,
    /// Screen position of the attachment point a dragged connector
    /// endpoint would snap to.
    pub snap_highlight: Option<Point>,
    /// Radii for the circular overlays, pre-scaled by zoom.
    pub attachment_handle_radius: f64,
    pub snap_highlight_radius: f64,
}

/// Whether an element survives viewport culling. Elements with an
/// indeterminate or zero-area bounding box are always kept; only a box
/// known to lie strictly outside the viewport is skipped.
fn is_visible(
    element: &Element,
    camera: &Camera,
    viewport: Rect,
    measurer: Option<&dyn TextMeasurer>,
) -> bool {
    let Some(bbox) = geometry::bounding_box(element, measurer) else {
        return true;
    };
    if bbox.width() <= 0.0 || bbox.height() <= 0.0 {
        return true;
    }
    geometry::boxes_intersect(camera.rect_to_screen(bbox), viewport)
}

/// Build the plan for one frame.
pub fn plan_frame<'a>(
    store: &'a ElementStore,
    camera: &Camera,
    controller: &InteractionController,
    viewport: Size,
    measurer: Option<&dyn TextMeasurer>,
) -> FramePlan<'a> {
    let viewport = Rect::from_origin_size(Point::ZERO, viewport);

    let elements: Vec<&Element> = store
        .iter_ordered()
        .filter(|e| is_visible(e, camera, viewport, measurer))
        .collect();
    let culled = store.len() - elements.len();
    if culled > 0 {
        log::trace!("culled {culled} of {} elements", store.len());
    }

    let selection = store.selected_element().and_then(|element| {
        let bbox = geometry::bounding_box(element, measurer)?;
        let handles = if geometry::supports_resize(element) {
            geometry::resize_handles(element, camera, measurer)
        } else {
            Vec::new()
        };
        let attachment_handles = geometry::attachment_points(element)
            .into_iter()
            .map(|ap| camera.to_screen(ap.point))
            .collect();
        let summary_text = element.summary().and_then(|s| match s {
            quillboard_core::SummaryState::Ready { text, visible: true } => Some(text.clone()),
            _ => None,
        });
        Some(SelectionOverlay {
            outline: camera.rect_to_screen(bbox),
            handles,
            attachment_handles,
            summary_buttons: geometry::summary_buttons(element, camera, measurer),
            summary_text,
        })
    });

    FramePlan {
        elements,
        preview: controller.preview_element(),
        selection,
        snap_highlight: controller.snap_target().map(|t| camera.to_screen(t.point)),
        attachment_handle_radius: camera.scaled_size(CONNECTOR_HANDLE_RADIUS),
        snap_highlight_radius: camera.scaled_size(SNAP_TARGET_RADIUS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use quillboard_core::elements::{
        PathElement, SerializableColor, ShapeElement, ShapeKind, SummaryState, TextElement,
    };
    use quillboard_core::{ElementStore, InteractionController};

    fn shape(x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::Shape(ShapeElement::new(
            ShapeKind::Rectangle,
            Rect::new(x, y, x + w, y + h),
            None,
            SerializableColor::black(),
            2.0,
        ))
    }

    fn plan<'a>(store: &'a ElementStore, camera: &Camera) -> FramePlan<'a> {
        let controller = InteractionController::new();
        plan_frame(store, camera, &controller, Size::new(800.0, 600.0), None)
    }

    #[test]
    fn test_offscreen_elements_culled() {
        let mut store = ElementStore::new();
        store.insert(shape(10.0, 10.0, 100.0, 100.0));
        store.insert(shape(2000.0, 2000.0, 100.0, 100.0));

        let frame = plan(&store, &Camera::new());
        assert_eq!(frame.elements.len(), 1);
    }

    #[test]
    fn test_culling_respects_camera() {
        let mut store = ElementStore::new();
        store.insert(shape(2000.0, 2000.0, 100.0, 100.0));

        let mut camera = Camera::new();
        camera.origin = Point::new(1800.0, 1900.0);
        let frame = plan(&store, &camera);
        assert_eq!(frame.elements.len(), 1);
    }

    #[test]
    fn test_indeterminate_and_degenerate_never_culled() {
        let mut store = ElementStore::new();
        // Text has no measurer, so its extent is unknown
        store.insert(Element::Text(TextElement::new(
            Point::new(5000.0, 5000.0),
            "far away",
            SerializableColor::black(),
        )));
        // An empty path has a zero-area box
        store.insert(Element::Path(PathElement::new(
            Vec::new(),
            SerializableColor::black(),
            5.0,
        )));

        let frame = plan(&store, &Camera::new());
        assert_eq!(frame.elements.len(), 2);
    }

    #[test]
    fn test_selection_overlay_contents() {
        let mut store = ElementStore::new();
        let id = store.insert(shape(10.0, 10.0, 100.0, 80.0));
        store.select(id);

        let frame = plan(&store, &Camera::new());
        let overlay = frame.selection.expect("selected element has an overlay");
        assert_eq!(overlay.outline, Rect::new(10.0, 10.0, 110.0, 90.0));
        assert_eq!(overlay.handles.len(), 8);
        assert_eq!(overlay.attachment_handles.len(), 4);
        assert!(overlay.summary_text.is_none());
    }

    #[test]
    fn test_hidden_summary_text_not_planned() {
        let mut store = ElementStore::new();
        let mut element = shape(0.0, 0.0, 50.0, 50.0);
        if let Element::Shape(s) = &mut element {
            s.summary = SummaryState::Ready {
                text: "A square.".into(),
                visible: false,
            };
        }
        let id = store.insert(element);
        store.select(id);

        let frame = plan(&store, &Camera::new());
        let overlay = frame.selection.unwrap();
        assert!(overlay.summary_text.is_none());

        if let Some(s) = store
            .get_mut(id)
            .and_then(|e| e.summary_mut())
        {
            s.toggle_visible();
        }
        let frame = plan(&store, &Camera::new());
        assert_eq!(
            frame.selection.unwrap().summary_text.as_deref(),
            Some("A square.")
        );
    }

    #[test]
    fn test_overlay_radii_scale_with_zoom() {
        let store = ElementStore::new();
        let mut camera = Camera::new();
        camera.zoom = 2.0;
        let frame = plan(&store, &camera);
        assert!((frame.attachment_handle_radius - 8.0).abs() < 1e-9);
        assert!((frame.snap_highlight_radius - 12.0).abs() < 1e-9);
    }
}

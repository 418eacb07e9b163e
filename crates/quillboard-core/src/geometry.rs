//! Stateless geometry queries: bounding boxes, hit tests, resize handles,
//! connector attachment points, box intersection.
//!
//! Everything here is a pure function over `(element, camera)`. Elements
//! whose extent depends on font metrics (text, emoji) take an optional
//! [`TextMeasurer`]; when none is available their bounding box is
//! indeterminate and callers fail open (treat as unhit, never cull).

use crate::camera::Camera;
use crate::elements::Element;
use kurbo::{Point, Rect, Size};

/// Resize-handle square size (virtual units, scaled by zoom on screen).
pub const HANDLE_SIZE: f64 = 8.0;
/// Extra virtual-space click padding for non-path/connector elements.
pub const HIT_PADDING: f64 = 5.0;
/// Visual radius of connector attachment handles (virtual units).
pub const CONNECTOR_HANDLE_RADIUS: f64 = 4.0;
/// Attachment handles accept clicks within this multiple of their radius.
pub const CONNECTOR_HANDLE_HIT_FACTOR: f64 = 2.5;
/// Summary action-button square size and spacing (virtual units).
pub const SUMMARY_BUTTON_SIZE: f64 = 18.0;
pub const SUMMARY_BUTTON_PADDING: f64 = 4.0;

/// Glyph measurement capability, provided by the rendering collaborator.
pub trait TextMeasurer {
    /// Extent of a single text run at the given font size, virtual units.
    fn measure(&self, text: &str, font_size: f64) -> Size;
}

/// Bounding box of an element in virtual coordinates.
///
/// `None` means indeterminate: a text or emoji element queried without a
/// measurer. Zero- and one-point paths yield a degenerate box.
pub fn bounding_box(element: &Element, measurer: Option<&dyn TextMeasurer>) -> Option<Rect> {
    match element {
        Element::Path(path) => {
            if path.points.is_empty() {
                return Some(Rect::ZERO);
            }
            let mut min_x = f64::INFINITY;
            let mut min_y = f64::INFINITY;
            let mut max_x = f64::NEG_INFINITY;
            let mut max_y = f64::NEG_INFINITY;
            for p in &path.points {
                min_x = min_x.min(p.x);
                min_y = min_y.min(p.y);
                max_x = max_x.max(p.x);
                max_y = max_y.max(p.y);
            }
            let pad = path.stroke_width / 2.0 + 2.0;
            Some(Rect::new(min_x, min_y, max_x, max_y).inflate(pad, pad))
        }
        Element::Connector(c) => {
            let rect = Rect::new(
                c.start.x.min(c.end.x),
                c.start.y.min(c.end.y),
                c.start.x.max(c.end.x),
                c.start.y.max(c.end.y),
            );
            let pad = c.stroke_width / 2.0 + 5.0;
            Some(rect.inflate(pad, pad))
        }
        Element::Shape(s) => Some(s.rect),
        Element::Image(i) => Some(i.rect),
        Element::ContentBox(b) => Some(b.rect),
        Element::Text(t) => {
            let size = measurer?.measure(&t.text, t.font.size);
            Some(Rect::from_origin_size(t.origin, size))
        }
        Element::Emoji(e) => {
            let size = measurer?.measure(&e.glyph, e.size);
            Some(Rect::from_origin_size(e.origin, size))
        }
    }
}

/// Point-in-element test in virtual coordinates.
///
/// Paths and connectors use their padded bounding box directly (the box
/// padding already approximates stroke hit-width); every other kind gets a
/// fixed extra click padding. Indeterminate bounding box means miss.
pub fn hit_test(point: Point, element: &Element, measurer: Option<&dyn TextMeasurer>) -> bool {
    let Some(bbox) = bounding_box(element, measurer) else {
        return false;
    };
    match element {
        Element::Path(_) | Element::Connector(_) => bbox.contains(point),
        _ => bbox.inflate(HIT_PADDING, HIT_PADDING).contains(point),
    }
}

/// Axis-aligned overlap test. Used for render culling (screen space) and
/// eraser hit detection (virtual space).
pub fn boxes_intersect(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// The eight resize-handle positions around an element's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Nw,
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
}

impl HandleKind {
    pub const ALL: [HandleKind; 8] = [
        HandleKind::Nw,
        HandleKind::N,
        HandleKind::Ne,
        HandleKind::E,
        HandleKind::Se,
        HandleKind::S,
        HandleKind::Sw,
        HandleKind::W,
    ];

    /// CSS-style cursor name for this handle.
    pub fn cursor(self) -> &'static str {
        match self {
            HandleKind::Nw | HandleKind::Se => "nwse-resize",
            HandleKind::Ne | HandleKind::Sw => "nesw-resize",
            HandleKind::N | HandleKind::S => "ns-resize",
            HandleKind::E | HandleKind::W => "ew-resize",
        }
    }

    /// Anchor position on a rect for this handle.
    fn anchor(self, rect: Rect) -> Point {
        let cx = (rect.x0 + rect.x1) / 2.0;
        let cy = (rect.y0 + rect.y1) / 2.0;
        match self {
            HandleKind::Nw => Point::new(rect.x0, rect.y0),
            HandleKind::N => Point::new(cx, rect.y0),
            HandleKind::Ne => Point::new(rect.x1, rect.y0),
            HandleKind::E => Point::new(rect.x1, cy),
            HandleKind::Se => Point::new(rect.x1, rect.y1),
            HandleKind::S => Point::new(cx, rect.y1),
            HandleKind::Sw => Point::new(rect.x0, rect.y1),
            HandleKind::W => Point::new(rect.x0, cy),
        }
    }
}

/// A resize handle in screen space.
#[derive(Debug, Clone, Copy)]
pub struct ResizeHandle {
    pub kind: HandleKind,
    /// Clickable square in screen coordinates.
    pub rect: Rect,
}

/// Whether the interaction layer offers resize handles for this element.
pub fn supports_resize(element: &Element) -> bool {
    matches!(
        element,
        Element::Shape(_) | Element::Image(_) | Element::ContentBox(_) | Element::Emoji(_)
    )
}

/// The eight resize handles for an element, positioned from its
/// screen-projected bounding box. Empty when the box is indeterminate.
pub fn resize_handles(
    element: &Element,
    camera: &Camera,
    measurer: Option<&dyn TextMeasurer>,
) -> Vec<ResizeHandle> {
    let Some(bbox) = bounding_box(element, measurer) else {
        return Vec::new();
    };
    let screen_box = camera.rect_to_screen(bbox);
    let size = HANDLE_SIZE * camera.zoom;
    let half = size / 2.0;
    HandleKind::ALL
        .iter()
        .map(|&kind| {
            let center = kind.anchor(screen_box);
            ResizeHandle {
                kind,
                rect: Rect::new(
                    center.x - half,
                    center.y - half,
                    center.x + half,
                    center.y + half,
                ),
            }
        })
        .collect()
}

/// Find the handle under a screen point, if any.
pub fn handle_at(screen_point: Point, handles: &[ResizeHandle]) -> Option<HandleKind> {
    handles
        .iter()
        .find(|h| h.rect.contains(screen_point))
        .map(|h| h.kind)
}

/// A connector attachment point on a rect-like element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachmentPoint {
    /// Stable index: 0 top, 1 right, 2 bottom, 3 left midpoint.
    pub index: usize,
    /// Position in virtual coordinates.
    pub point: Point,
}

/// The four attachment points of a rect-like element (top, right, bottom,
/// left edge midpoints). Empty for every other element kind.
pub fn attachment_points(element: &Element) -> Vec<AttachmentPoint> {
    let Some(rect) = element.rect() else {
        return Vec::new();
    };
    let cx = (rect.x0 + rect.x1) / 2.0;
    let cy = (rect.y0 + rect.y1) / 2.0;
    vec![
        AttachmentPoint {
            index: 0,
            point: Point::new(cx, rect.y0),
        },
        AttachmentPoint {
            index: 1,
            point: Point::new(rect.x1, cy),
        },
        AttachmentPoint {
            index: 2,
            point: Point::new(cx, rect.y1),
        },
        AttachmentPoint {
            index: 3,
            point: Point::new(rect.x0, cy),
        },
    ]
}

/// Resolve a single attachment point by index.
pub fn attachment_point(element: &Element, index: usize) -> Option<Point> {
    attachment_points(element)
        .into_iter()
        .find(|ap| ap.index == index)
        .map(|ap| ap.point)
}

/// Actions offered by the summary button strip above a selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryAction {
    /// Request a fresh summary.
    Regenerate,
    /// Show or hide the summary text.
    ToggleVisibility,
    /// Open the diagram-source editor (images with provenance text).
    EditDiagramSource,
    /// Non-interactive spinner while a request is in flight.
    Loading,
}

/// A summary action button in screen space.
#[derive(Debug, Clone, Copy)]
pub struct SummaryButton {
    pub action: SummaryAction,
    pub rect: Rect,
}

/// The summary action buttons for an element, laid out right-to-left above
/// its screen-projected bounding box. Empty for connectors and for
/// elements without a determinate box.
pub fn summary_buttons(
    element: &Element,
    camera: &Camera,
    measurer: Option<&dyn TextMeasurer>,
) -> Vec<SummaryButton> {
    let Some(summary) = element.summary() else {
        return Vec::new();
    };
    let Some(bbox) = bounding_box(element, measurer) else {
        return Vec::new();
    };
    let screen_box = camera.rect_to_screen(bbox);
    let size = SUMMARY_BUTTON_SIZE * camera.zoom;
    let pad = SUMMARY_BUTTON_PADDING * camera.zoom;

    let mut actions = Vec::new();
    if summary.is_loading() {
        actions.push(SummaryAction::Loading);
    } else {
        actions.push(SummaryAction::Regenerate);
        if summary.is_usable() {
            actions.push(SummaryAction::ToggleVisibility);
        }
    }
    if let Element::Image(img) = element {
        if img.diagram_source.is_some() && !summary.is_loading() {
            actions.push(SummaryAction::EditDiagramSource);
        }
    }

    let top = screen_box.y0 - size - pad;
    actions
        .into_iter()
        .enumerate()
        .map(|(i, action)| {
            let right = screen_box.x1 - i as f64 * (size + pad);
            SummaryButton {
                action,
                rect: Rect::new(right - size, top, right, top + size),
            }
        })
        .collect()
}

/// Find the summary button under a screen point, if any.
pub fn summary_button_at(screen_point: Point, buttons: &[SummaryButton]) -> Option<SummaryAction> {
    buttons
        .iter()
        .find(|b| b.rect.contains(screen_point))
        .map(|b| b.action)
}

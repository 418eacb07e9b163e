//! The pointer-event state machine.
//!
//! All interaction flows through one tagged-union [`Mode`]: a pointer-down
//! picks a mode from the active tool and what sits under the cursor, each
//! pointer-move updates that mode's working state (writing live element
//! updates straight into the store so the renderer tracks the drag), and
//! pointer-up finalizes. Pointer-leave finalizes exactly like pointer-up,
//! so leaving the canvas mid-drag never silently drops an element.

use crate::camera::Camera;
use crate::elements::{
    AttachmentRef, ConnectorElement, ContentBoxElement, DEFAULT_SHAPE_HEIGHT, DEFAULT_SHAPE_WIDTH,
    DEFAULT_TEXT_BOX_HEIGHT, DEFAULT_TEXT_BOX_WIDTH, Element, ElementId, EmojiElement,
    MIN_CONTENT_BOX_SIZE, MIN_EMOJI_SIZE, MIN_IMAGE_SIZE, MIN_SHAPE_SIZE, PathElement,
    ShapeElement, ShapeKind, SummaryState,
};
use crate::geometry::{self, HandleKind, SummaryAction, TextMeasurer};
use crate::snap::{self, SnapTarget};
use crate::store::ElementStore;
use crate::summary::{SummaryRequester, SummaryTracker};
use crate::tools::{ToolKind, ToolPalette};
use kurbo::{Point, Rect, Size};
use std::time::{Duration, Instant};

/// Side length of the square eraser footprint (virtual units).
pub const ERASER_SIZE: f64 = 20.0;
/// Two pointer-downs on the same element within this window open its editor.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);
/// Minimum drag extent for an unanchored connector to commit, and the
/// size change that counts as a material resize (virtual units).
const MIN_DRAG_DISTANCE: f64 = 5.0;

/// The current interaction mode. Exactly one is active at a time; invalid
/// combinations (panning while resizing, etc.) are unrepresentable.
#[derive(Debug, Clone)]
pub enum Mode {
    Idle,
    Panning {
        start_screen: Point,
        start_origin: Point,
    },
    MovingElement {
        id: ElementId,
        /// Snapshot taken at pointer-down; each move re-derives from it.
        original: Box<Element>,
        /// Virtual pointer position at pointer-down.
        grab: Point,
    },
    ResizingElement {
        id: ElementId,
        handle: HandleKind,
        original: Box<Element>,
    },
    DrawingFreehand {
        points: Vec<Point>,
    },
    DrawingShapePreview {
        kind: ShapeKind,
        start: Point,
        current: Point,
    },
    DrawingConnector {
        start: Point,
        current: Point,
        /// Attachment the drag started from, when seeded by a handle or
        /// a snapped connector-tool press.
        seed: Option<AttachmentRef>,
    },
    Erasing,
}

/// Things the host UI must do in response to an interaction, surfaced as
/// data instead of callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiRequest {
    OpenShapeLabelEditor(ElementId),
    OpenTextEditor(ElementId),
    OpenContentBoxEditor(ElementId),
    OpenDiagramSourceEditor(ElementId),
}

/// Everything a pointer event may read or mutate, passed per call so the
/// controller holds no references between events.
pub struct InteractionCtx<'a> {
    pub store: &'a mut ElementStore,
    pub camera: &'a mut Camera,
    pub measurer: Option<&'a dyn TextMeasurer>,
    pub summaries: &'a mut SummaryTracker,
    /// AI collaborator, when one is wired up.
    pub assist: Option<&'a mut dyn SummaryRequester>,
}

/// The interaction state machine.
#[derive(Debug)]
pub struct InteractionController {
    pub palette: ToolPalette,
    mode: Mode,
    snap_target: Option<SnapTarget>,
    last_down: Option<(Instant, ElementId)>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            palette: ToolPalette::default(),
            mode: Mode::Idle,
            snap_target: None,
            last_down: None,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.mode, Mode::Idle)
    }

    /// The attachment point the dragged connector endpoint would snap to.
    pub fn snap_target(&self) -> Option<SnapTarget> {
        self.snap_target
    }

    /// CSS-style cursor for the current mode and tool.
    pub fn cursor(&self) -> &'static str {
        match &self.mode {
            Mode::Panning { .. } => "grabbing",
            Mode::MovingElement { .. } => "move",
            Mode::ResizingElement { handle, .. } => handle.cursor(),
            Mode::DrawingFreehand { .. }
            | Mode::DrawingShapePreview { .. }
            | Mode::DrawingConnector { .. }
            | Mode::Erasing => "crosshair",
            Mode::Idle => match self.palette.tool {
                ToolKind::Pan => "grab",
                ToolKind::Pencil | ToolKind::Eraser | ToolKind::Connector | ToolKind::Shape(_) => {
                    "crosshair"
                }
                ToolKind::Text => "text",
                ToolKind::Emoji => "copy",
                ToolKind::Select => "default",
            },
        }
    }

    /// The element being drawn right now, for preview rendering.
    pub fn preview_element(&self) -> Option<Element> {
        match &self.mode {
            Mode::DrawingFreehand { points } => Some(Element::Path(PathElement::new(
                points.clone(),
                self.palette.color,
                self.palette.stroke_width,
            ))),
            Mode::DrawingShapePreview {
                kind,
                start,
                current,
            } => Some(Element::Shape(ShapeElement::new(
                *kind,
                Rect::from_points(*start, *current),
                self.palette.shape_fill(),
                self.palette.color,
                self.palette.stroke_width,
            ))),
            Mode::DrawingConnector { start, current, .. } => {
                let end = self.snap_target.map(|t| t.point).unwrap_or(*current);
                Some(Element::Connector(ConnectorElement::new(
                    *start,
                    end,
                    self.palette.color,
                    self.palette.stroke_width,
                    self.palette.line_style,
                )))
            }
            _ => None,
        }
    }

    pub fn pointer_down(&mut self, screen: Point, ctx: &mut InteractionCtx) -> Vec<UiRequest> {
        let virtual_pos = ctx.camera.to_virtual(screen);
        let mut out = Vec::new();

        // Summary action buttons on the selected element take priority
        // over every mode transition.
        if let Some(selected) = ctx.store.selection() {
            if let Some(element) = ctx.store.get(selected) {
                let buttons = geometry::summary_buttons(element, ctx.camera, ctx.measurer);
                if let Some(action) = geometry::summary_button_at(screen, &buttons) {
                    self.dispatch_summary_action(selected, action, ctx, &mut out);
                    return out;
                }
            }
        }

        match self.palette.tool {
            ToolKind::Pan => {
                self.mode = Mode::Panning {
                    start_screen: screen,
                    start_origin: ctx.camera.origin,
                };
            }
            ToolKind::Select => {
                self.select_pointer_down(screen, virtual_pos, ctx, &mut out);
            }
            ToolKind::Text => {
                // No drag mode: the box is created synchronously and opened
                // for editing, then the tool falls back to Select.
                let rect = Rect::from_origin_size(
                    virtual_pos,
                    Size::new(DEFAULT_TEXT_BOX_WIDTH, DEFAULT_TEXT_BOX_HEIGHT),
                );
                let id = ctx.store.insert(Element::ContentBox(
                    ContentBoxElement::on_canvas_text(rect, self.palette.color),
                ));
                ctx.store.select(id);
                self.palette.tool = ToolKind::Select;
                out.push(UiRequest::OpenContentBoxEditor(id));
            }
            ToolKind::Emoji => {
                let id = ctx.store.insert(Element::Emoji(EmojiElement::centered_at(
                    virtual_pos,
                    self.palette.emoji.clone(),
                    self.palette.emoji_size,
                )));
                ctx.store.select(id);
                self.palette.tool = ToolKind::Select;
            }
            ToolKind::Pencil => {
                self.mode = Mode::DrawingFreehand {
                    points: vec![virtual_pos],
                };
            }
            ToolKind::Eraser => {
                self.mode = Mode::Erasing;
            }
            ToolKind::Connector => {
                let seed = snap::find_snap_target(ctx.store, virtual_pos, None);
                let start = seed.map(|t| t.point).unwrap_or(virtual_pos);
                self.mode = Mode::DrawingConnector {
                    start,
                    current: virtual_pos,
                    seed: seed.map(|t| AttachmentRef {
                        element: t.element,
                        index: t.index,
                    }),
                };
            }
            ToolKind::Shape(kind) => {
                self.mode = Mode::DrawingShapePreview {
                    kind,
                    start: virtual_pos,
                    current: virtual_pos,
                };
            }
        }

        out
    }

    pub fn pointer_move(&mut self, screen: Point, ctx: &mut InteractionCtx) {
        let virtual_pos = ctx.camera.to_virtual(screen);
        match &mut self.mode {
            Mode::Idle => {}
            Mode::Panning {
                start_screen,
                start_origin,
            } => {
                let delta = screen - *start_screen;
                ctx.camera.origin = *start_origin - delta / ctx.camera.zoom;
            }
            Mode::MovingElement { id, original, grab } => {
                let delta = virtual_pos - *grab;
                let mut updated = (**original).clone();
                updated.translate(delta);
                // A manually dragged connector detaches from auto-follow
                if let Some(c) = updated.as_connector_mut() {
                    c.detach();
                }
                let id = *id;
                if let Some(slot) = ctx.store.get_mut(id) {
                    *slot = updated;
                }
                if ctx.store.get(id).is_some_and(Element::is_rect_like) {
                    refresh_attached_connectors(ctx.store, id);
                }
            }
            Mode::ResizingElement {
                id,
                handle,
                original,
            } => {
                let updated = resized_element(original, *handle, virtual_pos);
                let id = *id;
                if let Some(slot) = ctx.store.get_mut(id) {
                    *slot = updated;
                }
                if ctx.store.get(id).is_some_and(Element::is_rect_like) {
                    refresh_attached_connectors(ctx.store, id);
                }
            }
            Mode::DrawingFreehand { points } => {
                points.push(virtual_pos);
            }
            Mode::DrawingShapePreview { current, .. } => {
                *current = virtual_pos;
            }
            Mode::DrawingConnector { current, seed, .. } => {
                *current = virtual_pos;
                // Rescan every move: elements may shift under async edits
                let exclude = seed.map(|r| r.element);
                self.snap_target = snap::find_snap_target(ctx.store, virtual_pos, exclude);
            }
            Mode::Erasing => {
                erase_at(virtual_pos, ctx.store, ctx.measurer);
            }
        }
    }

    pub fn pointer_up(&mut self, ctx: &mut InteractionCtx) -> Vec<UiRequest> {
        let mode = std::mem::replace(&mut self.mode, Mode::Idle);
        let snap_target = self.snap_target.take();
        let mut out = Vec::new();

        match mode {
            Mode::Idle | Mode::Panning { .. } | Mode::Erasing => {}
            Mode::MovingElement { id, .. } => {
                if lacks_summary(ctx.store, id) {
                    self.request_summary(id, ctx);
                }
            }
            Mode::ResizingElement { id, original, .. } => {
                let materially_resized = match (dims(&original), ctx.store.get(id).and_then(dims))
                {
                    (Some((ow, oh)), Some((w, h))) => {
                        (w - ow).abs() > MIN_DRAG_DISTANCE || (h - oh).abs() > MIN_DRAG_DISTANCE
                    }
                    _ => false,
                };
                if materially_resized && lacks_summary(ctx.store, id) {
                    self.request_summary(id, ctx);
                }
            }
            Mode::DrawingFreehand { points } => {
                if points.len() >= 2 {
                    let id = ctx.store.insert(Element::Path(PathElement::new(
                        points,
                        self.palette.color,
                        self.palette.stroke_width,
                    )));
                    // Newly committed elements get an automatic summary
                    self.request_summary(id, ctx);
                }
            }
            Mode::DrawingShapePreview {
                kind,
                start,
                current,
            } => {
                let mut width = (current.x - start.x).abs();
                let mut height = (current.y - start.y).abs();
                if width < MIN_SHAPE_SIZE && height < MIN_SHAPE_SIZE {
                    // A bare click places a default-size shape
                    width = DEFAULT_SHAPE_WIDTH / 1.5;
                    height = DEFAULT_SHAPE_HEIGHT / 1.5;
                } else {
                    width = width.max(MIN_SHAPE_SIZE);
                    height = height.max(MIN_SHAPE_SIZE);
                }
                let x = start.x.min(current.x);
                let y = start.y.min(current.y);
                let id = ctx.store.insert(Element::Shape(ShapeElement::new(
                    kind,
                    Rect::new(x, y, x + width, y + height),
                    self.palette.shape_fill(),
                    self.palette.color,
                    self.palette.stroke_width,
                )));
                ctx.store.select(id);
                self.request_summary(id, ctx);
                out.push(UiRequest::OpenShapeLabelEditor(id));
            }
            Mode::DrawingConnector {
                start,
                current,
                seed,
            } => {
                let end = snap_target.map(|t| t.point).unwrap_or(current);
                let dragged = (current.x - start.x).abs() > MIN_DRAG_DISTANCE
                    || (current.y - start.y).abs() > MIN_DRAG_DISTANCE;
                if seed.is_some() || snap_target.is_some() || dragged {
                    let mut connector = ConnectorElement::new(
                        start,
                        end,
                        self.palette.color,
                        self.palette.stroke_width,
                        self.palette.line_style,
                    );
                    connector.start_ref = seed;
                    connector.end_ref = snap_target.map(|t| AttachmentRef {
                        element: t.element,
                        index: t.index,
                    });
                    ctx.store.insert(Element::Connector(connector));
                }
            }
        }

        out
    }

    /// Finalizes exactly like pointer-up.
    pub fn pointer_leave(&mut self, ctx: &mut InteractionCtx) -> Vec<UiRequest> {
        self.pointer_up(ctx)
    }

    fn select_pointer_down(
        &mut self,
        screen: Point,
        virtual_pos: Point,
        ctx: &mut InteractionCtx,
        out: &mut Vec<UiRequest>,
    ) {
        let now = Instant::now();
        let hit = ctx
            .store
            .iter_topmost_first()
            .find(|e| geometry::hit_test(virtual_pos, e, ctx.measurer))
            .map(|e| e.id());

        // Double-click on the same element opens its editor instead of
        // starting a move.
        if let Some(id) = hit {
            let double = self
                .last_down
                .take()
                .is_some_and(|(t, prev)| prev == id && now.duration_since(t) <= DOUBLE_CLICK_WINDOW);
            if double {
                if let Some(request) = ctx.store.get(id).and_then(editor_request) {
                    ctx.store.select(id);
                    out.push(request);
                    return;
                }
            }
            self.last_down = Some((now, id));
        } else {
            self.last_down = None;
        }

        if let Some(selected) = ctx.store.selection() {
            if let Some(element) = ctx.store.get(selected) {
                // Connector handle on the selected rect-like element
                if element.is_rect_like() {
                    let hit_radius =
                        geometry::CONNECTOR_HANDLE_RADIUS * geometry::CONNECTOR_HANDLE_HIT_FACTOR;
                    let seed = geometry::attachment_points(element)
                        .into_iter()
                        .find(|ap| ap.point.distance(virtual_pos) <= hit_radius);
                    if let Some(ap) = seed {
                        self.mode = Mode::DrawingConnector {
                            start: ap.point,
                            current: virtual_pos,
                            seed: Some(AttachmentRef {
                                element: selected,
                                index: ap.index,
                            }),
                        };
                        return;
                    }
                }

                // Resize handle, tested in screen space
                if geometry::supports_resize(element) {
                    let handles = geometry::resize_handles(element, ctx.camera, ctx.measurer);
                    if let Some(handle) = geometry::handle_at(screen, &handles) {
                        self.mode = Mode::ResizingElement {
                            id: selected,
                            handle,
                            original: Box::new(element.clone()),
                        };
                        return;
                    }
                }

                // Inside the selected element: start a move
                if geometry::hit_test(virtual_pos, element, ctx.measurer) {
                    self.mode = Mode::MovingElement {
                        id: selected,
                        original: Box::new(element.clone()),
                        grab: virtual_pos,
                    };
                    return;
                }
            }
        }

        // Otherwise: topmost hit wins, empty space clears the selection
        match hit {
            Some(id) => {
                ctx.store.select(id);
                if let Some(element) = ctx.store.get(id) {
                    self.mode = Mode::MovingElement {
                        id,
                        original: Box::new(element.clone()),
                        grab: virtual_pos,
                    };
                }
            }
            None => ctx.store.clear_selection(),
        }
    }

    fn dispatch_summary_action(
        &mut self,
        id: ElementId,
        action: SummaryAction,
        ctx: &mut InteractionCtx,
        out: &mut Vec<UiRequest>,
    ) {
        match action {
            SummaryAction::Regenerate => self.request_summary(id, ctx),
            SummaryAction::ToggleVisibility => {
                if let Some(summary) = ctx.store.get_mut(id).and_then(Element::summary_mut) {
                    summary.toggle_visible();
                }
            }
            SummaryAction::EditDiagramSource => {
                out.push(UiRequest::OpenDiagramSourceEditor(id));
            }
            SummaryAction::Loading => {}
        }
    }

    fn request_summary(&mut self, id: ElementId, ctx: &mut InteractionCtx) {
        if let Some(requester) = ctx.assist.as_mut() {
            ctx.summaries.kick_off(ctx.store, &mut **requester, id);
        }
    }
}

/// Which editor a double-click opens for an element, if any.
fn editor_request(element: &Element) -> Option<UiRequest> {
    match element {
        Element::Shape(s) => Some(UiRequest::OpenShapeLabelEditor(s.id)),
        Element::Text(t) => Some(UiRequest::OpenTextEditor(t.id)),
        Element::ContentBox(b) => Some(UiRequest::OpenContentBoxEditor(b.id)),
        Element::Image(i) if i.diagram_source.is_some() => {
            Some(UiRequest::OpenDiagramSourceEditor(i.id))
        }
        _ => None,
    }
}

/// Whether the element exists, carries summary state, and has none yet.
fn lacks_summary(store: &ElementStore, id: ElementId) -> bool {
    store
        .get(id)
        .and_then(Element::summary)
        .is_some_and(|s| matches!(s, SummaryState::None))
}

/// Width/height used for the material-resize check.
fn dims(element: &Element) -> Option<(f64, f64)> {
    if let Some(rect) = element.rect() {
        return Some((rect.width(), rect.height()));
    }
    if let Element::Emoji(e) = element {
        return Some((e.size, e.size));
    }
    None
}

/// Remove every element whose bounding box intersects the eraser footprint
/// centered on the pointer. Indeterminate boxes are skipped (fail open:
/// unmeasurable text is never erased by accident).
fn erase_at(virtual_pos: Point, store: &mut ElementStore, measurer: Option<&dyn TextMeasurer>) {
    let half = ERASER_SIZE / 2.0;
    let footprint = Rect::new(
        virtual_pos.x - half,
        virtual_pos.y - half,
        virtual_pos.x + half,
        virtual_pos.y + half,
    );
    let victims: Vec<ElementId> = store
        .iter_ordered()
        .filter(|e| {
            geometry::bounding_box(e, measurer)
                .is_some_and(|bbox| geometry::boxes_intersect(bbox, footprint))
        })
        .map(|e| e.id())
        .collect();
    for id in victims {
        store.remove(id);
    }
}

/// Recompute the endpoints of every connector soft-referencing `id` from
/// the element's current attachment points. Stale references to other
/// (deleted) elements are left alone.
pub fn refresh_attached_connectors(store: &mut ElementStore, id: ElementId) {
    let Some(anchor) = store.get(id).cloned() else {
        return;
    };
    for connector_id in store.connector_ids() {
        let refs = store
            .get(connector_id)
            .and_then(Element::as_connector)
            .map(|c| (c.start_ref, c.end_ref));
        let Some((start_ref, end_ref)) = refs else {
            continue;
        };
        let new_start = start_ref
            .filter(|r| r.element == id)
            .and_then(|r| geometry::attachment_point(&anchor, r.index));
        let new_end = end_ref
            .filter(|r| r.element == id)
            .and_then(|r| geometry::attachment_point(&anchor, r.index));
        if new_start.is_none() && new_end.is_none() {
            continue;
        }
        if let Some(connector) = store.get_mut(connector_id).and_then(Element::as_connector_mut) {
            if let Some(p) = new_start {
                connector.start = p;
            }
            if let Some(p) = new_end {
                connector.end = p;
            }
        }
    }
}

/// Element resized around the handle's opposite anchor, honoring per-kind
/// minimum sizes (images keep their aspect ratio, emoji scale uniformly).
fn resized_element(original: &Element, handle: HandleKind, virtual_pos: Point) -> Element {
    let mut element = original.clone();
    match &mut element {
        Element::Shape(s) => {
            s.rect = resized_rect(s.rect, handle, virtual_pos, MIN_SHAPE_SIZE);
        }
        Element::ContentBox(b) => {
            b.rect = resized_rect(b.rect, handle, virtual_pos, MIN_CONTENT_BOX_SIZE);
        }
        Element::Image(image) => {
            let rect = image.rect;
            let generic = resized_rect(rect, handle, virtual_pos, MIN_IMAGE_SIZE);
            let scale = (generic.width() / rect.width().max(1e-9))
                .max(generic.height() / rect.height().max(1e-9));
            let aspect = image.aspect_ratio();
            let mut height = (rect.height() * scale).max(MIN_IMAGE_SIZE);
            let mut width = height * aspect;
            if width < MIN_IMAGE_SIZE {
                width = MIN_IMAGE_SIZE;
                height = width / aspect.max(1e-9);
            }
            image.rect = place_from_handle(rect, handle, width, height);
        }
        Element::Emoji(emoji) => {
            let rect = Rect::from_origin_size(emoji.origin, Size::new(emoji.size, emoji.size));
            let generic = resized_rect(rect, handle, virtual_pos, MIN_EMOJI_SIZE);
            let size = generic.width().max(generic.height()).max(MIN_EMOJI_SIZE);
            let placed = place_from_handle(rect, handle, size, size);
            emoji.origin = Point::new(placed.x0, placed.y0);
            emoji.size = size;
        }
        _ => {}
    }
    element
}

/// Move the handle's own edges to the pointer, clamping so neither
/// dimension drops below `min`. The opposite edges stay fixed.
fn resized_rect(rect: Rect, handle: HandleKind, virtual_pos: Point, min: f64) -> Rect {
    use HandleKind::*;
    let (mut x0, mut y0, mut x1, mut y1) = (rect.x0, rect.y0, rect.x1, rect.y1);
    if matches!(handle, Nw | W | Sw) {
        x0 = virtual_pos.x.min(x1 - min);
    }
    if matches!(handle, Ne | E | Se) {
        x1 = virtual_pos.x.max(x0 + min);
    }
    if matches!(handle, Nw | N | Ne) {
        y0 = virtual_pos.y.min(y1 - min);
    }
    if matches!(handle, Sw | S | Se) {
        y1 = virtual_pos.y.max(y0 + min);
    }
    Rect::new(x0, y0, x1, y1)
}

/// Place a w×h rect so the anchor opposite `handle` keeps its position
/// (edge handles keep the cross axis centered).
fn place_from_handle(rect: Rect, handle: HandleKind, width: f64, height: f64) -> Rect {
    use HandleKind::*;
    let x0 = match handle {
        Nw | W | Sw => rect.x1 - width,
        Ne | E | Se => rect.x0,
        N | S => (rect.x0 + rect.x1 - width) / 2.0,
    };
    let y0 = match handle {
        Nw | N | Ne => rect.y1 - height,
        Sw | S | Se => rect.y0,
        W | E => (rect.y0 + rect.y1 - height) / 2.0,
    };
    Rect::new(x0, y0, x0 + width, y0 + height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{LineStyle, SerializableColor};
    use crate::summary::SummaryTicket;

    struct Board {
        store: ElementStore,
        camera: Camera,
        summaries: SummaryTracker,
        controller: InteractionController,
    }

    impl Board {
        fn new() -> Self {
            Self {
                store: ElementStore::new(),
                camera: Camera::new(),
                summaries: SummaryTracker::new(),
                controller: InteractionController::new(),
            }
        }

        fn down(&mut self, x: f64, y: f64) -> Vec<UiRequest> {
            let mut ctx = InteractionCtx {
                store: &mut self.store,
                camera: &mut self.camera,
                measurer: None,
                summaries: &mut self.summaries,
                assist: None,
            };
            self.controller.pointer_down(Point::new(x, y), &mut ctx)
        }

        fn drag(&mut self, x: f64, y: f64) {
            let mut ctx = InteractionCtx {
                store: &mut self.store,
                camera: &mut self.camera,
                measurer: None,
                summaries: &mut self.summaries,
                assist: None,
            };
            self.controller.pointer_move(Point::new(x, y), &mut ctx);
        }

        fn up(&mut self) -> Vec<UiRequest> {
            let mut ctx = InteractionCtx {
                store: &mut self.store,
                camera: &mut self.camera,
                measurer: None,
                summaries: &mut self.summaries,
                assist: None,
            };
            self.controller.pointer_up(&mut ctx)
        }

        fn insert_shape(&mut self, x: f64, y: f64, w: f64, h: f64) -> ElementId {
            self.store.insert(Element::Shape(ShapeElement::new(
                ShapeKind::Rectangle,
                Rect::new(x, y, x + w, y + h),
                None,
                SerializableColor::black(),
                2.0,
            )))
        }
    }

    #[test]
    fn test_draw_and_select_scenario() {
        let mut board = Board::new();
        board.controller.palette.tool = ToolKind::Shape(ShapeKind::Rectangle);

        board.down(10.0, 10.0);
        board.drag(110.0, 90.0);
        let requests = board.up();

        assert_eq!(board.store.len(), 1);
        let selected = board.store.selected_element().unwrap();
        let shape = selected.as_shape().unwrap();
        assert_eq!(shape.kind, ShapeKind::Rectangle);
        assert_eq!(shape.rect, Rect::new(10.0, 10.0, 110.0, 90.0));
        assert_eq!(
            requests,
            vec![UiRequest::OpenShapeLabelEditor(selected.id())]
        );
    }

    #[test]
    fn test_tiny_drag_places_default_size_shape() {
        let mut board = Board::new();
        board.controller.palette.tool = ToolKind::Shape(ShapeKind::Oval);

        board.down(40.0, 40.0);
        board.drag(43.0, 42.0);
        board.up();

        let shape = board.store.selected_element().unwrap().as_shape().unwrap().clone();
        assert!((shape.rect.width() - DEFAULT_SHAPE_WIDTH / 1.5).abs() < 1e-9);
        assert!((shape.rect.height() - DEFAULT_SHAPE_HEIGHT / 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_pan_then_draw_scenario() {
        let mut board = Board::new();
        board.controller.palette.tool = ToolKind::Pan;

        // Drag right by 50 screen px: origin.x decreases by 50
        board.down(100.0, 100.0);
        board.drag(150.0, 100.0);
        board.up();
        assert!((board.camera.origin.x - (-50.0)).abs() < 1e-10);

        // The same screen position now maps 50 virtual units lower in x
        let virtual_after = board.camera.to_virtual(Point::new(100.0, 100.0));
        assert!((virtual_after.x - 50.0).abs() < 1e-10);

        board.controller.palette.tool = ToolKind::Shape(ShapeKind::Rectangle);
        board.down(100.0, 100.0);
        board.drag(200.0, 200.0);
        board.up();
        let shape = board.store.selected_element().unwrap().as_shape().unwrap().clone();
        assert!((shape.rect.x0 - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_connector_snap_scenario() {
        let mut board = Board::new();
        board.insert_shape(0.0, 0.0, 100.0, 100.0);
        board.controller.palette.tool = ToolKind::Connector;

        board.down(200.0, 50.0);
        board.drag(115.0, 52.0); // Within 20 units of right-mid (100, 50)
        board.up();

        let connectors = board.store.connector_ids();
        assert_eq!(connectors.len(), 1);
        let connector = board
            .store
            .get(connectors[0])
            .and_then(Element::as_connector)
            .unwrap();
        assert_eq!(connector.end, Point::new(100.0, 50.0));
        assert!(connector.end_ref.is_some());
        assert_eq!(connector.end_ref.unwrap().index, 1);
    }

    #[test]
    fn test_unanchored_tiny_connector_discarded() {
        let mut board = Board::new();
        board.controller.palette.tool = ToolKind::Connector;
        board.down(500.0, 500.0);
        board.drag(502.0, 501.0);
        board.up();
        assert!(board.store.is_empty());
    }

    #[test]
    fn test_sticky_connector_follows_moved_shape() {
        let mut board = Board::new();
        let shape_id = board.insert_shape(0.0, 0.0, 100.0, 100.0);
        let mut connector = ConnectorElement::new(
            Point::new(50.0, 0.0),
            Point::new(300.0, 300.0),
            SerializableColor::black(),
            5.0,
            LineStyle::Arrow,
        );
        connector.start_ref = Some(AttachmentRef {
            element: shape_id,
            index: 0,
        });
        let connector_id = board.store.insert(Element::Connector(connector));

        // Select and drag the shape by (30, 40)
        board.store.select(shape_id);
        board.down(50.0, 50.0);
        board.drag(80.0, 90.0);
        board.up();

        let moved = board.store.get(shape_id).unwrap().rect().unwrap();
        assert_eq!(moved, Rect::new(30.0, 40.0, 130.0, 140.0));
        let connector = board
            .store
            .get(connector_id)
            .and_then(Element::as_connector)
            .unwrap();
        // New top-mid of the shape
        assert_eq!(connector.start, Point::new(80.0, 40.0));
        assert_eq!(connector.end, Point::new(300.0, 300.0));
    }

    #[test]
    fn test_stale_connector_reference_ignored() {
        let mut board = Board::new();
        let shape_id = board.insert_shape(0.0, 0.0, 100.0, 100.0);
        let other_id = board.insert_shape(400.0, 400.0, 50.0, 50.0);
        let mut connector = ConnectorElement::new(
            Point::new(50.0, 0.0),
            Point::new(300.0, 300.0),
            SerializableColor::black(),
            5.0,
            LineStyle::Plain,
        );
        connector.start_ref = Some(AttachmentRef {
            element: shape_id,
            index: 0,
        });
        let connector_id = board.store.insert(Element::Connector(connector));

        board.store.remove(shape_id);

        // Moving another element must not touch the stale reference
        board.store.select(other_id);
        board.down(425.0, 425.0);
        board.drag(435.0, 425.0);
        board.up();

        let connector = board
            .store
            .get(connector_id)
            .and_then(Element::as_connector)
            .unwrap();
        assert_eq!(connector.start, Point::new(50.0, 0.0));
        assert_eq!(connector.end, Point::new(300.0, 300.0));
    }

    #[test]
    fn test_moving_connector_detaches_it() {
        let mut board = Board::new();
        let shape_id = board.insert_shape(0.0, 0.0, 100.0, 100.0);
        let mut connector = ConnectorElement::new(
            Point::new(50.0, 0.0),
            Point::new(300.0, 300.0),
            SerializableColor::black(),
            5.0,
            LineStyle::Arrow,
        );
        connector.start_ref = Some(AttachmentRef {
            element: shape_id,
            index: 0,
        });
        let connector_id = board.store.insert(Element::Connector(connector));

        board.store.select(connector_id);
        board.down(150.0, 150.0); // Inside the connector's padded bbox
        board.drag(160.0, 160.0);
        board.up();

        let connector = board
            .store
            .get(connector_id)
            .and_then(Element::as_connector)
            .unwrap();
        assert!(connector.start_ref.is_none());
        assert_eq!(connector.start, Point::new(60.0, 10.0));
    }

    #[test]
    fn test_eraser_idempotence() {
        let mut board = Board::new();
        board.insert_shape(0.0, 0.0, 50.0, 50.0);
        board.insert_shape(20.0, 20.0, 50.0, 50.0);
        board.controller.palette.tool = ToolKind::Eraser;

        // Erasing empty space changes nothing
        board.down(500.0, 500.0);
        board.drag(505.0, 505.0);
        board.up();
        assert_eq!(board.store.len(), 2);

        board.down(25.0, 25.0);
        board.drag(30.0, 30.0);
        board.up();
        assert!(board.store.is_empty());

        // Second pass over the same spot is a no-op
        board.down(25.0, 25.0);
        board.drag(30.0, 30.0);
        board.up();
        assert!(board.store.is_empty());
    }

    #[test]
    fn test_double_click_opens_label_editor() {
        let mut board = Board::new();
        let id = board.insert_shape(0.0, 0.0, 100.0, 100.0);

        let first = board.down(50.0, 50.0);
        assert!(first.is_empty());
        board.up();
        let second = board.down(50.0, 50.0);
        assert_eq!(second, vec![UiRequest::OpenShapeLabelEditor(id)]);
    }

    #[test]
    fn test_click_empty_space_clears_selection() {
        let mut board = Board::new();
        let id = board.insert_shape(0.0, 0.0, 100.0, 100.0);
        board.store.select(id);
        board.down(500.0, 500.0);
        board.up();
        assert_eq!(board.store.selection(), None);
    }

    #[test]
    fn test_freehand_commits_with_two_points() {
        let mut board = Board::new();
        board.controller.palette.tool = ToolKind::Pencil;
        board.down(10.0, 10.0);
        board.drag(20.0, 15.0);
        board.drag(30.0, 20.0);
        board.up();
        assert_eq!(board.store.len(), 1);

        // A click without movement draws nothing
        board.down(50.0, 50.0);
        board.up();
        assert_eq!(board.store.len(), 1);
    }

    #[test]
    fn test_resize_respects_minimum() {
        let mut board = Board::new();
        let id = board.insert_shape(0.0, 0.0, 100.0, 100.0);
        board.store.select(id);

        // Grab the SE handle and collapse past the NW corner
        board.down(100.0, 100.0);
        board.drag(-50.0, -50.0);
        board.up();

        let rect = board.store.get(id).unwrap().rect().unwrap();
        assert!((rect.width() - MIN_SHAPE_SIZE).abs() < 1e-9);
        assert!((rect.height() - MIN_SHAPE_SIZE).abs() < 1e-9);
        assert!((rect.x0 - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_text_tool_creates_box_and_reverts_to_select() {
        let mut board = Board::new();
        board.controller.palette.tool = ToolKind::Text;
        let requests = board.down(60.0, 70.0);

        assert_eq!(board.controller.palette.tool, ToolKind::Select);
        let id = board.store.selection().unwrap();
        assert_eq!(requests, vec![UiRequest::OpenContentBoxEditor(id)]);
        let rect = board.store.get(id).unwrap().rect().unwrap();
        assert_eq!(rect.origin(), Point::new(60.0, 70.0));
        assert!((rect.width() - DEFAULT_TEXT_BOX_WIDTH).abs() < 1e-9);
    }

    #[derive(Default)]
    struct RecordingRequester {
        requests: Vec<ElementId>,
    }

    impl SummaryRequester for RecordingRequester {
        fn request_summary(&mut self, ticket: SummaryTicket, _element: &Element) {
            self.requests.push(ticket.element);
        }
    }

    #[test]
    fn test_committed_shape_and_path_request_summaries() {
        let mut store = ElementStore::new();
        let mut camera = Camera::new();
        let mut summaries = SummaryTracker::new();
        let mut requester = RecordingRequester::default();
        let mut controller = InteractionController::new();

        controller.palette.tool = ToolKind::Shape(ShapeKind::Rectangle);
        let mut ctx = InteractionCtx {
            store: &mut store,
            camera: &mut camera,
            measurer: None,
            summaries: &mut summaries,
            assist: Some(&mut requester),
        };
        controller.pointer_down(Point::new(10.0, 10.0), &mut ctx);
        controller.pointer_move(Point::new(110.0, 90.0), &mut ctx);
        controller.pointer_up(&mut ctx);

        let shape_id = store.selection().unwrap();
        assert_eq!(requester.requests, vec![shape_id]);
        assert!(store.get(shape_id).unwrap().summary().unwrap().is_loading());

        controller.palette.tool = ToolKind::Pencil;
        let mut ctx = InteractionCtx {
            store: &mut store,
            camera: &mut camera,
            measurer: None,
            summaries: &mut summaries,
            assist: Some(&mut requester),
        };
        controller.pointer_down(Point::new(200.0, 200.0), &mut ctx);
        controller.pointer_move(Point::new(230.0, 220.0), &mut ctx);
        controller.pointer_up(&mut ctx);

        assert_eq!(requester.requests.len(), 2);
        let path_id = requester.requests[1];
        assert_ne!(path_id, shape_id);
        assert!(store.get(path_id).unwrap().summary().unwrap().is_loading());
    }

    #[test]
    fn test_pointer_leave_finalizes_draw() {
        let mut board = Board::new();
        board.controller.palette.tool = ToolKind::Shape(ShapeKind::Diamond);
        board.down(0.0, 0.0);
        board.drag(80.0, 60.0);

        let mut ctx = InteractionCtx {
            store: &mut board.store,
            camera: &mut board.camera,
            measurer: None,
            summaries: &mut board.summaries,
            assist: None,
        };
        board.controller.pointer_leave(&mut ctx);

        assert_eq!(board.store.len(), 1);
        assert!(board.controller.is_idle());
    }
}

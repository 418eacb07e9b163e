//! Applying drawing commands to the element store.
//!
//! Commands go through the same element constructors and connector
//! refresh as manual gestures, so model output and pointer input are
//! indistinguishable once applied.

use kurbo::{Point, Rect, Size, Vec2};
use uuid::Uuid;

use quillboard_core::elements::{
    ConnectorElement, ContentBoxElement, DEFAULT_SHAPE_HEIGHT, DEFAULT_SHAPE_WIDTH,
    DEFAULT_STROKE_WIDTH, DEFAULT_TEXT_BOX_HEIGHT, DEFAULT_TEXT_BOX_WIDTH, Element, ElementId,
    LineStyle, MIN_CONTENT_BOX_SIZE, MIN_EMOJI_SIZE, MIN_IMAGE_SIZE, MIN_SHAPE_SIZE, PathElement,
    SerializableColor, ShapeElement,
};
use quillboard_core::interaction::refresh_attached_connectors;
use quillboard_core::ElementStore;

use crate::commands::{DrawingCommand, Modifications, TargetQuery};

/// Apply a batch of commands in order. Returns the number that took
/// effect; modify commands whose target cannot be resolved are logged
/// and skipped.
pub fn apply_commands(store: &mut ElementStore, commands: &[DrawingCommand]) -> usize {
    let mut applied = 0;
    for command in commands {
        match command {
            DrawingCommand::Path(cmd) => {
                let points: Vec<Point> =
                    cmd.points.iter().map(|p| Point::new(p.x, p.y)).collect();
                if points.len() < 2 {
                    log::warn!("skipping path command with fewer than two points");
                    continue;
                }
                store.insert(Element::Path(PathElement::new(
                    points,
                    parse_color(cmd.color.as_deref()),
                    cmd.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH),
                )));
                applied += 1;
            }
            DrawingCommand::Text(cmd) => {
                let rect = Rect::from_origin_size(
                    Point::new(cmd.x, cmd.y),
                    Size::new(DEFAULT_TEXT_BOX_WIDTH, DEFAULT_TEXT_BOX_HEIGHT),
                );
                let mut element =
                    ContentBoxElement::on_canvas_text(rect, parse_color(cmd.color.as_deref()));
                element.body = cmd.text.clone();
                store.insert(Element::ContentBox(element));
                applied += 1;
            }
            DrawingCommand::FlowchartShape(cmd) => {
                let width = cmd.width.unwrap_or(DEFAULT_SHAPE_WIDTH).max(MIN_SHAPE_SIZE);
                let height = cmd
                    .height
                    .unwrap_or(DEFAULT_SHAPE_HEIGHT)
                    .max(MIN_SHAPE_SIZE);
                let rect = Rect::new(cmd.x, cmd.y, cmd.x + width, cmd.y + height);
                let fill = cmd
                    .fill_color
                    .as_deref()
                    .and_then(SerializableColor::from_hex);
                let mut shape = ShapeElement::new(
                    cmd.shape_type,
                    rect,
                    fill,
                    SerializableColor::black(),
                    DEFAULT_STROKE_WIDTH,
                );
                if let Some(text) = &cmd.text {
                    shape.label = text.clone();
                }
                store.insert(Element::Shape(shape));
                applied += 1;
            }
            DrawingCommand::Connector(cmd) => {
                store.insert(Element::Connector(ConnectorElement::new(
                    Point::new(cmd.start_x, cmd.start_y),
                    Point::new(cmd.end_x, cmd.end_y),
                    parse_color(cmd.color.as_deref()),
                    DEFAULT_STROKE_WIDTH,
                    LineStyle::Arrow,
                )));
                applied += 1;
            }
            DrawingCommand::ModifyElement {
                target,
                modifications,
            } => {
                let Some(id) = resolve_target(store, target) else {
                    log::warn!("no element matches modify target {target:?}, skipping");
                    continue;
                };
                if apply_modifications(store, id, modifications) {
                    applied += 1;
                }
            }
        }
    }
    applied
}

/// Resolve a target query to an element id. An exact id wins outright;
/// otherwise every element is scored on the fuzzy criteria and the best
/// positive score is taken, topmost first on ties.
pub fn resolve_target(store: &ElementStore, target: &TargetQuery) -> Option<ElementId> {
    if let Some(raw) = &target.id {
        if let Ok(id) = Uuid::parse_str(raw) {
            return store.contains(id).then_some(id);
        }
        log::warn!("modify target id {raw:?} is not a valid element id");
    }

    let mut best: Option<(i32, ElementId)> = None;
    for element in store.iter_topmost_first() {
        let score = score_element(element, target);
        if score > 0 && best.is_none_or(|(s, _)| score > s) {
            best = Some((score, element.id()));
        }
    }
    best.map(|(_, id)| id)
}

fn score_element(element: &Element, target: &TargetQuery) -> i32 {
    let mut score = 0;
    if let Some(kind) = target.shape_type {
        if element.as_shape().is_some_and(|s| s.kind == kind) {
            score += 10;
        }
    }
    if let Some(needle) = &target.text_contains {
        if let Some(text) = element_text(element) {
            let haystack = text.to_lowercase();
            let needle = needle.to_lowercase();
            if haystack == needle {
                score += 8;
            } else if haystack.contains(&needle) {
                score += 5;
            }
        }
    }
    if let Some(color) = &target.color {
        if element_color(element).is_some_and(|c| c.to_hex().eq_ignore_ascii_case(color)) {
            score += 3;
        }
    }
    score
}

/// The text a fuzzy query matches against, per element kind.
fn element_text(element: &Element) -> Option<&str> {
    match element {
        Element::Shape(s) => Some(&s.label),
        Element::Text(t) => Some(&t.text),
        Element::ContentBox(b) => Some(&b.body),
        _ => None,
    }
}

/// The color a fuzzy query matches against, per element kind.
fn element_color(element: &Element) -> Option<SerializableColor> {
    match element {
        Element::Shape(s) => s.fill,
        Element::Text(t) => Some(t.color),
        Element::Path(p) => Some(p.color),
        Element::Connector(c) => Some(c.color),
        Element::ContentBox(b) => b.background,
        _ => None,
    }
}

/// Apply a modification set to one element. Returns false when nothing
/// in the set applies to this element kind.
pub fn apply_modifications(
    store: &mut ElementStore,
    id: ElementId,
    mods: &Modifications,
) -> bool {
    let Some(current_origin) = store.get(id).and_then(origin_of) else {
        return false;
    };
    let mut changed = false;

    // Position: absolute coordinates win over deltas
    let delta = if mods.new_x.is_some() || mods.new_y.is_some() {
        Vec2::new(
            mods.new_x.map_or(0.0, |x| x - current_origin.x),
            mods.new_y.map_or(0.0, |y| y - current_origin.y),
        )
    } else {
        Vec2::new(mods.delta_x.unwrap_or(0.0), mods.delta_y.unwrap_or(0.0))
    };
    if delta.x != 0.0 || delta.y != 0.0 {
        if let Some(element) = store.get_mut(id) {
            element.translate(delta);
            if let Some(connector) = element.as_connector_mut() {
                connector.detach();
            }
            changed = true;
        }
    }

    if let Some(element) = store.get_mut(id) {
        changed |= apply_size(element, mods);

        if let Some(text) = &mods.new_text {
            match element {
                Element::Shape(s) => {
                    s.label = text.clone();
                    changed = true;
                }
                Element::Text(t) => {
                    t.text = text.clone();
                    changed = true;
                }
                Element::ContentBox(b) => {
                    b.body = text.clone();
                    changed = true;
                }
                _ => {}
            }
        }

        if let Some(color) = mods
            .new_fill_color
            .as_deref()
            .and_then(SerializableColor::from_hex)
        {
            match element {
                Element::Shape(s) => {
                    s.fill = Some(color);
                    s.refresh_label_color();
                    changed = true;
                }
                Element::ContentBox(b) => {
                    b.background = Some(color);
                    changed = true;
                }
                Element::Path(p) => {
                    p.color = color;
                    changed = true;
                }
                Element::Text(t) => {
                    t.color = color;
                    changed = true;
                }
                Element::Connector(c) => {
                    c.color = color;
                    changed = true;
                }
                _ => {}
            }
        }
    }

    if mods.select == Some(true) {
        store.select(id);
        changed = true;
    }

    if changed && store.get(id).is_some_and(Element::is_rect_like) {
        refresh_attached_connectors(store, id);
    }
    changed
}

fn apply_size(element: &mut Element, mods: &Modifications) -> bool {
    if mods.new_width.is_none() && mods.new_height.is_none() {
        return false;
    }
    match element {
        Element::Shape(s) => {
            s.rect = sized_rect(s.rect, mods, MIN_SHAPE_SIZE);
            true
        }
        Element::ContentBox(b) => {
            b.rect = sized_rect(b.rect, mods, MIN_CONTENT_BOX_SIZE);
            true
        }
        Element::Image(i) => {
            i.rect = sized_rect(i.rect, mods, MIN_IMAGE_SIZE);
            true
        }
        Element::Emoji(e) => {
            if let Some(width) = mods.new_width {
                e.size = width.max(MIN_EMOJI_SIZE);
                return true;
            }
            false
        }
        _ => false,
    }
}

/// New rect with the requested dimensions (clamped to `min`), keeping the
/// top-left corner fixed.
fn sized_rect(rect: Rect, mods: &Modifications, min: f64) -> Rect {
    let width = mods.new_width.unwrap_or(rect.width()).max(min);
    let height = mods.new_height.unwrap_or(rect.height()).max(min);
    Rect::from_origin_size(rect.origin(), Size::new(width, height))
}

/// Reference position for absolute moves, per element kind.
fn origin_of(element: &Element) -> Option<Point> {
    if let Some(rect) = element.rect() {
        return Some(rect.origin());
    }
    match element {
        Element::Text(t) => Some(t.origin),
        Element::Emoji(e) => Some(e.origin),
        Element::Path(p) => {
            let min_x = p.points.iter().map(|pt| pt.x).fold(f64::INFINITY, f64::min);
            let min_y = p.points.iter().map(|pt| pt.y).fold(f64::INFINITY, f64::min);
            (!p.points.is_empty()).then(|| Point::new(min_x, min_y))
        }
        Element::Connector(c) => Some(Point::new(
            c.start.x.min(c.end.x),
            c.start.y.min(c.end.y),
        )),
        _ => None,
    }
}

fn parse_color(raw: Option<&str>) -> SerializableColor {
    raw.and_then(SerializableColor::from_hex)
        .unwrap_or_else(SerializableColor::black)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandPoint;
    use quillboard_core::elements::{AttachmentRef, ShapeKind};

    fn shape(store: &mut ElementStore, kind: ShapeKind, label: &str, fill: &str) -> ElementId {
        let mut s = ShapeElement::new(
            kind,
            Rect::new(0.0, 0.0, 150.0, 80.0),
            SerializableColor::from_hex(fill),
            SerializableColor::black(),
            5.0,
        );
        s.label = label.to_string();
        store.insert(Element::Shape(s))
    }

    #[test]
    fn test_shape_command_creates_labeled_shape() {
        let mut store = ElementStore::new();
        let commands = vec![DrawingCommand::FlowchartShape(
            crate::commands::FlowchartShapeCommand {
                x: 10.0,
                y: 20.0,
                width: None,
                height: None,
                shape_type: ShapeKind::Hexagon,
                text: Some("Start".into()),
                fill_color: Some("#000000".into()),
            },
        )];
        assert_eq!(apply_commands(&mut store, &commands), 1);

        let element = store.iter_ordered().next().unwrap();
        let s = element.as_shape().unwrap();
        assert_eq!(s.kind, ShapeKind::Hexagon);
        assert_eq!(s.label, "Start");
        assert_eq!(s.rect, Rect::new(10.0, 20.0, 160.0, 100.0));
        // Dark fill gets a light label
        assert_eq!(s.label_color, SerializableColor::white());
    }

    #[test]
    fn test_text_command_creates_content_box() {
        let mut store = ElementStore::new();
        let commands = vec![DrawingCommand::Text(crate::commands::TextCommand {
            x: 5.0,
            y: 6.0,
            text: "hello".into(),
            color: None,
        })];
        apply_commands(&mut store, &commands);

        let element = store.iter_ordered().next().unwrap();
        let Element::ContentBox(b) = element else {
            panic!("expected content box");
        };
        assert_eq!(b.body, "hello");
        assert!(b.background.is_none());
        assert_eq!(b.rect.width(), DEFAULT_TEXT_BOX_WIDTH);
    }

    #[test]
    fn test_short_path_skipped() {
        let mut store = ElementStore::new();
        let commands = vec![DrawingCommand::Path(crate::commands::PathCommand {
            points: vec![CommandPoint { x: 0.0, y: 0.0 }],
            color: None,
            stroke_width: None,
        })];
        assert_eq!(apply_commands(&mut store, &commands), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_target_id_wins() {
        let mut store = ElementStore::new();
        let a = shape(&mut store, ShapeKind::Rectangle, "alpha", "#EF4444");
        let _b = shape(&mut store, ShapeKind::Rectangle, "beta", "#EF4444");

        let target = TargetQuery {
            id: Some(a.to_string()),
            shape_type: Some(ShapeKind::Rectangle),
            text_contains: Some("beta".into()),
            color: None,
        };
        assert_eq!(resolve_target(&store, &target), Some(a));
    }

    #[test]
    fn test_fuzzy_scoring_prefers_text_match() {
        let mut store = ElementStore::new();
        let _plain = shape(&mut store, ShapeKind::Oval, "", "#3B82F6");
        let labeled = shape(&mut store, ShapeKind::Oval, "review step", "#EF4444");

        let target = TargetQuery {
            id: None,
            shape_type: Some(ShapeKind::Oval),
            text_contains: Some("review".into()),
            color: None,
        };
        // Both score +10 for kind; only one gains the +5 text match
        assert_eq!(resolve_target(&store, &target), Some(labeled));
    }

    #[test]
    fn test_exact_text_beats_substring() {
        let mut store = ElementStore::new();
        let partial = shape(&mut store, ShapeKind::Rectangle, "plan review", "#000000");
        let exact = shape(&mut store, ShapeKind::Rectangle, "Plan", "#000000");

        let target = TargetQuery {
            text_contains: Some("plan".into()),
            ..TargetQuery::default()
        };
        assert_eq!(resolve_target(&store, &target), Some(exact));

        store.remove(exact);
        assert_eq!(resolve_target(&store, &target), Some(partial));
    }

    #[test]
    fn test_unmatched_target_skipped() {
        let mut store = ElementStore::new();
        shape(&mut store, ShapeKind::Rectangle, "alpha", "#EF4444");
        let commands = vec![DrawingCommand::ModifyElement {
            target: TargetQuery {
                text_contains: Some("nothing like this".into()),
                ..TargetQuery::default()
            },
            modifications: Modifications {
                delta_x: Some(10.0),
                ..Modifications::default()
            },
        }];
        assert_eq!(apply_commands(&mut store, &commands), 0);
    }

    #[test]
    fn test_absolute_move_beats_delta() {
        let mut store = ElementStore::new();
        let id = shape(&mut store, ShapeKind::Rectangle, "", "#000000");
        let mods = Modifications {
            new_x: Some(200.0),
            delta_x: Some(-1000.0),
            ..Modifications::default()
        };
        assert!(apply_modifications(&mut store, id, &mods));
        let rect = store.get(id).unwrap().rect().unwrap();
        assert_eq!(rect.origin(), Point::new(200.0, 0.0));
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let mut store = ElementStore::new();
        let id = shape(&mut store, ShapeKind::Rectangle, "", "#000000");
        let mods = Modifications {
            new_width: Some(2.0),
            new_height: Some(300.0),
            ..Modifications::default()
        };
        apply_modifications(&mut store, id, &mods);
        let rect = store.get(id).unwrap().rect().unwrap();
        assert_eq!(rect.width(), MIN_SHAPE_SIZE);
        assert_eq!(rect.height(), 300.0);
    }

    #[test]
    fn test_move_refreshes_attached_connector() {
        let mut store = ElementStore::new();
        let id = shape(&mut store, ShapeKind::Rectangle, "", "#000000");
        let mut connector = ConnectorElement::new(
            Point::new(75.0, 0.0),
            Point::new(400.0, 400.0),
            SerializableColor::black(),
            5.0,
            LineStyle::Arrow,
        );
        connector.start_ref = Some(AttachmentRef { element: id, index: 0 });
        let connector_id = store.insert(Element::Connector(connector));

        let mods = Modifications {
            delta_x: Some(100.0),
            ..Modifications::default()
        };
        apply_modifications(&mut store, id, &mods);

        let connector = store.get(connector_id).and_then(Element::as_connector).unwrap();
        assert_eq!(connector.start, Point::new(175.0, 0.0));
    }

    #[test]
    fn test_select_modification() {
        let mut store = ElementStore::new();
        let id = shape(&mut store, ShapeKind::Rectangle, "x", "#000000");
        let mods = Modifications {
            select: Some(true),
            ..Modifications::default()
        };
        assert!(apply_modifications(&mut store, id, &mods));
        assert_eq!(store.selection(), Some(id));
    }

    #[test]
    fn test_recolored_shape_refreshes_label_color() {
        let mut store = ElementStore::new();
        let id = shape(&mut store, ShapeKind::Rectangle, "x", "#FFFFFF");
        let mods = Modifications {
            new_fill_color: Some("#000000".into()),
            ..Modifications::default()
        };
        apply_modifications(&mut store, id, &mods);
        let s = store.get(id).unwrap().as_shape().unwrap();
        assert_eq!(s.label_color, SerializableColor::white());
    }
}

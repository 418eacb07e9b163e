//! Flowchart shape element.

use super::{ElementId, SerializableColor, SummaryState};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default dimensions for shapes placed without a drag (virtual units).
pub const DEFAULT_SHAPE_WIDTH: f64 = 150.0;
pub const DEFAULT_SHAPE_HEIGHT: f64 = 80.0;
/// Minimum shape dimension (virtual units).
pub const MIN_SHAPE_SIZE: f64 = 20.0;

/// The closed set of flowchart shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Rectangle,
    Oval,
    Diamond,
    Triangle,
    Parallelogram,
    Hexagon,
    Cylinder,
    Cloud,
    Star,
}

impl ShapeKind {
    /// All kinds, in palette order.
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Rectangle,
        ShapeKind::Oval,
        ShapeKind::Diamond,
        ShapeKind::Triangle,
        ShapeKind::Parallelogram,
        ShapeKind::Hexagon,
        ShapeKind::Cylinder,
        ShapeKind::Cloud,
        ShapeKind::Star,
    ];
}

/// A flowchart shape: a kind drawn into a virtual rect, with an optional
/// centered label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeElement {
    pub id: ElementId,
    pub kind: ShapeKind,
    /// Bounding rect in virtual coordinates.
    pub rect: Rect,
    /// Fill color; None renders as transparent.
    pub fill: Option<SerializableColor>,
    pub border: SerializableColor,
    pub stroke_width: f64,
    #[serde(default)]
    pub label: String,
    /// Label color, chosen to contrast with the fill at creation time.
    pub label_color: SerializableColor,
    #[serde(default)]
    pub summary: SummaryState,
}

impl ShapeElement {
    pub fn new(
        kind: ShapeKind,
        rect: Rect,
        fill: Option<SerializableColor>,
        border: SerializableColor,
        stroke_width: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            rect,
            fill,
            border,
            stroke_width,
            label: String::new(),
            label_color: SerializableColor::contrasting_text_color(fill),
            summary: SummaryState::None,
        }
    }

    /// Recompute the label color after the fill changed.
    pub fn refresh_label_color(&mut self) {
        self.label_color = SerializableColor::contrasting_text_color(self.fill);
    }
}

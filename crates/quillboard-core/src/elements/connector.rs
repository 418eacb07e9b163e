//! Connector element with soft references to attachment points.

use super::{ElementId, SerializableColor};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Line style for connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    #[default]
    Arrow,
    Plain,
    Dotted,
}

/// A weak back-reference from a connector endpoint to an attachment point
/// on a rect-like element. Never an ownership relation: if the referenced
/// element is gone, the reference is simply ignored and the endpoint keeps
/// its last concrete position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub element: ElementId,
    /// Attachment-point index: 0 top, 1 right, 2 bottom, 3 left midpoint.
    pub index: usize,
}

/// A straight connector between two virtual points, optionally attached to
/// elements at either end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorElement {
    pub id: ElementId,
    pub start: Point,
    pub end: Point,
    pub color: SerializableColor,
    pub stroke_width: f64,
    #[serde(default)]
    pub line_style: LineStyle,
    #[serde(default)]
    pub start_ref: Option<AttachmentRef>,
    #[serde(default)]
    pub end_ref: Option<AttachmentRef>,
}

impl ConnectorElement {
    pub fn new(
        start: Point,
        end: Point,
        color: SerializableColor,
        stroke_width: f64,
        line_style: LineStyle,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            color,
            stroke_width,
            line_style,
            start_ref: None,
            end_ref: None,
        }
    }

    /// Drop both soft references. A manually repositioned connector stops
    /// following its former endpoints.
    pub fn detach(&mut self) {
        self.start_ref = None;
        self.end_ref = None;
    }

    /// Whether either endpoint references the given element.
    pub fn references(&self, id: ElementId) -> bool {
        self.start_ref.is_some_and(|r| r.element == id)
            || self.end_ref.is_some_and(|r| r.element == id)
    }
}

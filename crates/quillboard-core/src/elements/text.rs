//! Plain text element.

use super::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, ElementId, SerializableColor, SummaryState};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Font specification for text elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Font size in virtual units.
    pub size: f64,
    pub family: String,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            size: DEFAULT_FONT_SIZE,
            family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

/// A single run of text anchored at a virtual origin (top-left).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextElement {
    pub id: ElementId,
    /// Top-left anchor in virtual coordinates.
    pub origin: Point,
    pub text: String,
    pub color: SerializableColor,
    pub font: FontSpec,
    #[serde(default)]
    pub summary: SummaryState,
}

impl TextElement {
    pub fn new(origin: Point, text: impl Into<String>, color: SerializableColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            text: text.into(),
            color,
            font: FontSpec::default(),
            summary: SummaryState::None,
        }
    }
}

//! Content box element: a framed block of text or code.

use super::{ElementId, SerializableColor, SummaryState};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default content-box dimensions for imported documents (virtual units).
pub const DEFAULT_CONTENT_BOX_WIDTH: f64 = 300.0;
pub const DEFAULT_CONTENT_BOX_HEIGHT: f64 = 200.0;
/// Minimum content-box dimension (virtual units).
pub const MIN_CONTENT_BOX_SIZE: f64 = 50.0;
/// Dimensions for text boxes created directly on the canvas.
pub const DEFAULT_TEXT_BOX_WIDTH: f64 = 200.0;
pub const DEFAULT_TEXT_BOX_HEIGHT: f64 = 100.0;
/// Default styling for imported documents.
pub const DEFAULT_CONTENT_BOX_FONT_SIZE: f64 = 14.0;

/// What kind of content a box holds; drives syntax presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Plaintext,
    Markdown,
    Javascript,
    Python,
    Html,
    Css,
    Json,
}

impl ContentKind {
    /// Map a file extension (with leading dot) to a content kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            ".txt" => Some(ContentKind::Plaintext),
            ".md" => Some(ContentKind::Markdown),
            ".js" => Some(ContentKind::Javascript),
            ".py" => Some(ContentKind::Python),
            ".html" => Some(ContentKind::Html),
            ".css" => Some(ContentKind::Css),
            ".json" => Some(ContentKind::Json),
            _ => None,
        }
    }
}

/// A rectangular block of editable text/code content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBoxElement {
    pub id: ElementId,
    /// Bounding rect in virtual coordinates.
    pub rect: Rect,
    pub kind: ContentKind,
    /// Original filename for imported documents.
    #[serde(default)]
    pub filename: Option<String>,
    pub body: String,
    /// Background color; None renders as transparent.
    pub background: Option<SerializableColor>,
    pub text_color: SerializableColor,
    /// Body font size in virtual units.
    pub font_size: f64,
    #[serde(default)]
    pub summary: SummaryState,
}

impl ContentBoxElement {
    /// A box styled for an imported document (light gray card).
    pub fn document(rect: Rect, kind: ContentKind, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            rect,
            kind,
            filename: None,
            body: body.into(),
            background: SerializableColor::from_hex("#F3F4F6"),
            text_color: SerializableColor::from_hex("#1F2937")
                .unwrap_or_else(SerializableColor::black),
            font_size: DEFAULT_CONTENT_BOX_FONT_SIZE,
            summary: SummaryState::None,
        }
    }

    /// A transparent box for text typed directly on the canvas.
    pub fn on_canvas_text(rect: Rect, text_color: SerializableColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            rect,
            kind: ContentKind::Plaintext,
            filename: None,
            body: String::new(),
            background: None,
            text_color,
            font_size: DEFAULT_CONTENT_BOX_FONT_SIZE,
            summary: SummaryState::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_from_extension() {
        assert_eq!(ContentKind::from_extension(".md"), Some(ContentKind::Markdown));
        assert_eq!(ContentKind::from_extension(".PY"), Some(ContentKind::Python));
        assert_eq!(ContentKind::from_extension(".exe"), None);
    }
}

//! Tool selection and drawing style state.

use crate::elements::{
    DEFAULT_EMOJI_SIZE, DEFAULT_STROKE_WIDTH, LineStyle, SerializableColor, ShapeKind,
};
use serde::{Deserialize, Serialize};

/// Color swatches offered by the palette.
pub const PALETTE_COLORS: [&str; 7] = [
    "#000000", "#EF4444", "#3B82F6", "#22C55E", "#EAB308", "#F97316", "#A855F7",
];

/// Stroke widths offered by the palette (virtual units).
pub const PALETTE_STROKE_WIDTHS: [f64; 5] = [2.0, 5.0, 10.0, 15.0, 20.0];

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Pencil,
    Eraser,
    Text,
    Emoji,
    Connector,
    Shape(ShapeKind),
}

/// Current drawing style: active tool plus the stroke/fill options the next
/// gesture will use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolPalette {
    pub tool: ToolKind,
    pub color: SerializableColor,
    pub stroke_width: f64,
    /// Draw new shapes without a fill.
    pub transparent_fill: bool,
    /// Glyph placed by the emoji tool.
    pub emoji: String,
    /// Size of stamped emoji (virtual units).
    pub emoji_size: f64,
    /// Style for new connectors.
    pub line_style: LineStyle,
}

impl Default for ToolPalette {
    fn default() -> Self {
        Self {
            tool: ToolKind::Select,
            color: SerializableColor::black(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            transparent_fill: false,
            emoji: "😀".to_string(),
            emoji_size: DEFAULT_EMOJI_SIZE,
            line_style: LineStyle::Arrow,
        }
    }
}

impl ToolPalette {
    /// Fill for a newly drawn shape: the current color, unless the
    /// transparent-fill toggle is on.
    pub fn shape_fill(&self) -> Option<SerializableColor> {
        if self.transparent_fill {
            None
        } else {
            Some(self.color)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_fill_toggle() {
        let mut palette = ToolPalette::default();
        assert_eq!(palette.shape_fill(), Some(SerializableColor::black()));
        palette.transparent_fill = true;
        assert_eq!(palette.shape_fill(), None);
    }
}

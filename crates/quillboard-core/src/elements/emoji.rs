//! Emoji stamp element.

use super::{ElementId, SummaryState};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default emoji size (virtual units).
pub const DEFAULT_EMOJI_SIZE: f64 = 48.0;
/// Minimum emoji size (virtual units).
pub const MIN_EMOJI_SIZE: f64 = 16.0;

/// A single emoji glyph stamped onto the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmojiElement {
    pub id: ElementId,
    /// Top-left anchor in virtual coordinates.
    pub origin: Point,
    pub glyph: String,
    /// Rendered size (font size) in virtual units.
    pub size: f64,
    #[serde(default)]
    pub summary: SummaryState,
}

impl EmojiElement {
    pub fn new(origin: Point, glyph: impl Into<String>, size: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            glyph: glyph.into(),
            size,
            summary: SummaryState::None,
        }
    }

    /// Create an emoji whose square footprint is centered on `center`.
    pub fn centered_at(center: Point, glyph: impl Into<String>, size: f64) -> Self {
        Self::new(
            Point::new(center.x - size / 2.0, center.y - size / 2.0),
            glyph,
            size,
        )
    }
}

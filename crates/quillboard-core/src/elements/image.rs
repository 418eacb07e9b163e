//! Image element.

use super::{ElementId, SummaryState};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum image dimension (virtual units).
pub const MIN_IMAGE_SIZE: f64 = 20.0;

/// A placed raster image. The pixel data itself is opaque to the core and
/// referenced by `source` (a data URL or asset key owned by the host).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageElement {
    pub id: ElementId,
    /// Placement rect in virtual coordinates.
    pub rect: Rect,
    /// Opaque pixel-data reference.
    pub source: String,
    /// Intrinsic dimensions of the decoded image, in pixels.
    pub natural_width: f64,
    pub natural_height: f64,
    /// Source text the image was generated from (e.g. diagram markup),
    /// when the image has such provenance.
    #[serde(default)]
    pub diagram_source: Option<String>,
    #[serde(default)]
    pub summary: SummaryState,
}

impl ImageElement {
    pub fn new(rect: Rect, source: impl Into<String>, natural_width: f64, natural_height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            rect,
            source: source.into(),
            natural_width,
            natural_height,
            diagram_source: None,
            summary: SummaryState::None,
        }
    }

    /// Width / height of the intrinsic image, guarding degenerate values.
    pub fn aspect_ratio(&self) -> f64 {
        if self.natural_height.abs() < f64::EPSILON {
            1.0
        } else {
            self.natural_width / self.natural_height
        }
    }
}

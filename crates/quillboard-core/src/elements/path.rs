//! Freehand path element.

use super::{ElementId, SerializableColor, SummaryState};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand stroke: an ordered sequence of virtual points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathElement {
    pub id: ElementId,
    /// Stroke points in virtual coordinates, in draw order.
    pub points: Vec<Point>,
    pub color: SerializableColor,
    pub stroke_width: f64,
    #[serde(default)]
    pub summary: SummaryState,
}

impl PathElement {
    pub fn new(points: Vec<Point>, color: SerializableColor, stroke_width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            color,
            stroke_width,
            summary: SummaryState::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_creation() {
        let path = PathElement::new(
            vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
            SerializableColor::black(),
            5.0,
        );
        assert_eq!(path.points.len(), 2);
        assert_eq!(path.summary, SummaryState::None);
    }
}

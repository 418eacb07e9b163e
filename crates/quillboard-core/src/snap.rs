//! Connector snapping: finding the nearest attachment point to the pointer.

use crate::elements::ElementId;
use crate::geometry;
use crate::store::ElementStore;
use kurbo::Point;

/// Maximum virtual-space distance at which an attachment point attracts
/// a connector endpoint.
pub const SNAP_PROXIMITY_THRESHOLD: f64 = 20.0;
/// Visual radius of the snap-target highlight (virtual units).
pub const SNAP_TARGET_RADIUS: f64 = 6.0;

/// The attachment point a dragged connector endpoint would snap to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    /// Element owning the attachment point.
    pub element: ElementId,
    /// Attachment-point index on that element.
    pub index: usize,
    /// The attachment point in virtual coordinates.
    pub point: Point,
}

/// Scan all rect-like elements for the nearest attachment point within the
/// snap threshold of `pointer`. `exclude` skips the element the connector
/// is being drawn from, so it cannot snap back onto its own start.
pub fn find_snap_target(
    store: &ElementStore,
    pointer: Point,
    exclude: Option<ElementId>,
) -> Option<SnapTarget> {
    let mut best: Option<SnapTarget> = None;
    let mut best_dist_sq = SNAP_PROXIMITY_THRESHOLD * SNAP_PROXIMITY_THRESHOLD;

    for element in store.iter_ordered() {
        if Some(element.id()) == exclude {
            continue;
        }
        for ap in geometry::attachment_points(element) {
            let dx = pointer.x - ap.point.x;
            let dy = pointer.y - ap.point.y;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq <= best_dist_sq {
                best_dist_sq = dist_sq;
                best = Some(SnapTarget {
                    element: element.id(),
                    index: ap.index,
                    point: ap.point,
                });
            }
        }
    }

    best
}

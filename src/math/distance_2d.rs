use super::intersect_2d::segment_intersection;
use super::{Point2, TOLERANCE};

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Returns the minimum distance from `p` to the line segment `a`-`b`.
#[must_use]
pub fn point_to_segment_distance(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq < TOLERANCE * TOLERANCE {
        // Degenerate segment (zero length).
        return distance(p, a);
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);

    distance(p, &Point2::new(a.x + t * dx, a.y + t * dy))
}

/// Returns the minimum distance between segments `a1`-`a2` and `b1`-`b2`.
///
/// Crossing segments are at distance zero. Otherwise the closest pair always
/// involves at least one endpoint, so the answer is the minimum of the four
/// endpoint-to-segment distances.
#[must_use]
pub fn segment_to_segment_distance(a1: &Point2, a2: &Point2, b1: &Point2, b2: &Point2) -> f64 {
    if segment_intersection(a1, a2, b1, b2).is_some() {
        return 0.0;
    }

    point_to_segment_distance(a1, b1, b2)
        .min(point_to_segment_distance(a2, b1, b2))
        .min(point_to_segment_distance(b1, a1, a2))
        .min(point_to_segment_distance(b2, a1, a2))
}

use super::distance_2d::segment_to_segment_distance;
use super::{Point2, PARALLEL_TOLERANCE};

/// Bounded segment-segment intersection in 2D.
///
/// Solves `a1 + t * (a2 - a1) = b1 + u * (b2 - b1)` and returns the
/// intersection point when both `t` and `u` lie in `[0, 1]`. Parallel and
/// collinear segments (`|det| < 1e-4`) yield `None`.
#[must_use]
pub fn segment_intersection(a1: &Point2, a2: &Point2, b1: &Point2, b2: &Point2) -> Option<Point2> {
    let dax = a2.x - a1.x;
    let day = a2.y - a1.y;
    let dbx = b2.x - b1.x;
    let dby = b2.y - b1.y;

    let det = dax * dby - day * dbx;
    if det.abs() < PARALLEL_TOLERANCE {
        return None;
    }

    let dx = b1.x - a1.x;
    let dy = b1.y - a1.y;
    let t = (dx * dby - dy * dbx) / det;
    let u = (dx * day - dy * dax) / det;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Point2::new(a1.x + t * dax, a1.y + t * day))
    } else {
        None
    }
}

/// Returns `true` if the segments pass within `buffer` of each other.
///
/// A positive buffer models wall thickness: grazing a wall counts as a hit.
#[must_use]
pub fn segments_intersect(
    a1: &Point2,
    a2: &Point2,
    b1: &Point2,
    b2: &Point2,
    buffer: f64,
) -> bool {
    segment_to_segment_distance(a1, a2, b1, b2) <= buffer
}

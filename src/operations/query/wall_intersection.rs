use crate::layout::{WallData, WallId};
use crate::math::{segments_intersect, Point2};

/// Returns `true` if segment `p1`-`p2` passes within any wall's
/// half-thickness plus `margin`.
#[must_use]
pub fn intersects_wall<'a>(
    p1: &Point2,
    p2: &Point2,
    walls: impl IntoIterator<Item = &'a WallData>,
    margin: f64,
) -> bool {
    walls
        .into_iter()
        .any(|wall| hits(p1, p2, wall, margin))
}

/// Collects every wall that segment `p1`-`p2` hits, with no extra margin.
#[must_use]
pub fn intersecting_walls<'a>(
    p1: &Point2,
    p2: &Point2,
    walls: impl IntoIterator<Item = (WallId, &'a WallData)>,
) -> Vec<WallId> {
    walls
        .into_iter()
        .filter(|(_, wall)| hits(p1, p2, wall, 0.0))
        .map(|(id, _)| id)
        .collect()
}

fn hits(p1: &Point2, p2: &Point2, wall: &WallData, margin: f64) -> bool {
    segments_intersect(p1, p2, &wall.start, &wall.end, wall.thickness / 2.0 + margin)
}

/// Clearance checker over a fixed wall set.
///
/// Routing tests many legs against the same walls; this collects them once.
#[derive(Debug, Clone)]
pub struct WallClearance<'a> {
    walls: Vec<&'a WallData>,
    margin: f64,
}

impl<'a> WallClearance<'a> {
    /// Creates a checker over `walls` keeping `margin` extra clearance.
    #[must_use]
    pub fn new(walls: impl IntoIterator<Item = &'a WallData>, margin: f64) -> Self {
        Self {
            walls: walls.into_iter().collect(),
            margin,
        }
    }

    /// Returns `true` if the segment `a`-`b` touches no wall.
    #[must_use]
    pub fn is_clear(&self, a: &Point2, b: &Point2) -> bool {
        !intersects_wall(a, b, self.walls.iter().copied(), self.margin)
    }

    /// Returns `true` if every consecutive segment of `points` is clear.
    #[must_use]
    pub fn is_chain_clear(&self, points: &[Point2]) -> bool {
        points.windows(2).all(|leg| self.is_clear(&leg[0], &leg[1]))
    }
}

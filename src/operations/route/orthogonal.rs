use crate::math::Point2;
use crate::operations::query::WallClearance;

/// Tries an L-shaped detour between `from` and `to`.
///
/// Horizontal-first bends at the x midpoint:
/// `from → (mid.x, from.y) → (mid.x, to.y) → to`. If any leg hits a wall,
/// vertical-first bends at the y midpoint:
/// `from → (from.x, mid.y) → (to.x, mid.y) → to`.
/// Returns the two bend points of the first clear shape.
#[must_use]
pub fn orthogonal_route(
    from: &Point2,
    to: &Point2,
    clearance: &WallClearance<'_>,
) -> Option<[Point2; 2]> {
    let mid = nalgebra::center(from, to);

    let horizontal_first = [Point2::new(mid.x, from.y), Point2::new(mid.x, to.y)];
    if clearance.is_chain_clear(&[*from, horizontal_first[0], horizontal_first[1], *to]) {
        return Some(horizontal_first);
    }

    let vertical_first = [Point2::new(from.x, mid.y), Point2::new(to.x, mid.y)];
    if clearance.is_chain_clear(&[*from, vertical_first[0], vertical_first[1], *to]) {
        return Some(vertical_first);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::WallData;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn prefers_horizontal_first() {
        let walls: [WallData; 0] = [];
        let clearance = WallClearance::new(&walls, 0.0);
        let bends = orthogonal_route(&p(0.0, 0.0), &p(100.0, 60.0), &clearance);
        assert_eq!(bends, Some([p(50.0, 0.0), p(50.0, 60.0)]));
    }

    #[test]
    fn falls_back_to_vertical_first() {
        // Short wall straddling the horizontal-first vertical leg at x = 100.
        let walls = [WallData::new(p(100.0, -50.0), p(100.0, 50.0))];
        let clearance = WallClearance::new(&walls, 0.0);
        let bends = orthogonal_route(&p(0.0, 0.0), &p(200.0, 200.0), &clearance);
        assert_eq!(bends, Some([p(0.0, 100.0), p(200.0, 100.0)]));
    }

    #[test]
    fn both_shapes_blocked() {
        let walls = [
            WallData::new(p(100.0, -50.0), p(100.0, 50.0)),
            WallData::new(p(-50.0, 100.0), p(250.0, 100.0)),
        ];
        let clearance = WallClearance::new(&walls, 0.0);
        assert!(orthogonal_route(&p(0.0, 0.0), &p(200.0, 200.0), &clearance).is_none());
    }
}

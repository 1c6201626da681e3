mod wall_intersection;

pub use wall_intersection::{intersecting_walls, intersects_wall, WallClearance};

pub mod distance_2d;
pub mod intersect_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Determinant magnitude below which two segments are treated as parallel.
pub const PARALLEL_TOLERANCE: f64 = 1e-4;

pub use distance_2d::{distance, point_to_segment_distance, segment_to_segment_distance};
pub use intersect_2d::{segment_intersection, segments_intersect};

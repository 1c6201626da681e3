mod detect;

pub use detect::DetectPassages;

use crate::layout::WallId;
use crate::math::{distance, Point2};

/// How a passage was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassageKind {
    /// A gap of unknown purpose.
    Gap,
    /// A door-sized gap, or an explicit door.
    Door,
    /// A gap wider than a door.
    Opening,
}

/// A gap in the walls a route may pass through.
///
/// Derived from the walls on demand; never stored in the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Passage {
    pub start: Point2,
    pub end: Point2,
    /// Wall ending at `start`.
    pub start_wall: Option<WallId>,
    /// Wall ending at `end`.
    pub end_wall: Option<WallId>,
    pub kind: PassageKind,
}

impl Passage {
    /// Midpoint of the passage, the point routes pass through.
    #[must_use]
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.start, &self.end)
    }

    /// Clear width of the passage.
    #[must_use]
    pub fn width(&self) -> f64 {
        distance(&self.start, &self.end)
    }
}

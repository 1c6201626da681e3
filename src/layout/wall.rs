use crate::geometry::Rect;
use crate::math::{distance, Point2, TOLERANCE};

slotmap::new_key_type! {
    /// Unique identifier for a wall in the layout.
    pub struct WallId;
}

/// Default wall thickness in layout units.
pub const DEFAULT_WALL_THICKNESS: f64 = 6.0;

/// A straight wall segment. Half of its thickness is kept clear by routes.
#[derive(Debug, Clone, PartialEq)]
pub struct WallData {
    pub start: Point2,
    pub end: Point2,
    pub thickness: f64,
}

impl WallData {
    /// Creates a wall of default thickness.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self {
            start,
            end,
            thickness: DEFAULT_WALL_THICKNESS,
        }
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }

    /// Direction angle in radians, measured from start to end.
    #[must_use]
    pub fn angle(&self) -> f64 {
        (self.end.y - self.start.y).atan2(self.end.x - self.start.x)
    }

    /// Point at parameter `t` along the wall (0 = start, 1 = end).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + (self.end - self.start) * t
    }

    /// Splits the wall around openings given as `(center, width)` pairs,
    /// with centers as parameters along the wall.
    ///
    /// Overlapping openings merge; an opening covering the whole wall leaves
    /// nothing. A zero-length wall is returned unchanged.
    #[must_use]
    pub fn split_at_openings(&self, openings: &[(f64, f64)]) -> Vec<WallData> {
        let length = self.length();
        if openings.is_empty() || length < TOLERANCE {
            return vec![self.clone()];
        }

        let mut spans: Vec<(f64, f64)> = openings
            .iter()
            .map(|&(center, width)| {
                let half = width / (2.0 * length);
                ((center - half).max(0.0), (center + half).min(1.0))
            })
            .filter(|(lo, hi)| lo < hi)
            .collect();
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut pieces = Vec::new();
        let mut cursor = 0.0;
        for (lo, hi) in spans {
            if lo > cursor {
                pieces.push(self.piece(cursor, lo));
            }
            cursor = f64::max(cursor, hi);
        }
        if cursor < 1.0 {
            pieces.push(self.piece(cursor, 1.0));
        }
        pieces
    }

    fn piece(&self, from: f64, to: f64) -> WallData {
        WallData {
            start: self.point_at(from),
            end: self.point_at(to),
            thickness: self.thickness,
        }
    }

    /// Bounding rectangle of the centerline (thickness not included).
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_corners(&self.start, &self.end)
    }
}

use tracing::{debug, trace};

use crate::config::RoutingConfig;
use crate::layout::{DoorData, Scene, WallData, WallId};
use crate::math::{distance, Point2, Vector2};

use super::{Passage, PassageKind};

/// A wall endpoint: position, owning wall, and whether it is the wall's end
/// (as opposed to its start).
type Endpoint<'a> = (Point2, WallId, &'a WallData, bool);

/// Infers passages from wall geometry and explicit doors.
///
/// Two endpoints of different, roughly collinear walls that sit a plausible
/// doorway apart form a passage. Every explicit door forms one as well.
/// This is purely geometric: unusual wall layouts may over- or
/// under-detect.
#[derive(Debug, Clone)]
pub struct DetectPassages {
    min_gap: f64,
    max_gap: f64,
    alignment_tolerance_deg: f64,
    door_threshold: f64,
}

impl DetectPassages {
    /// Creates a detector using the gap and alignment settings of `config`.
    #[must_use]
    pub fn new(config: &RoutingConfig) -> Self {
        Self {
            min_gap: config.min_gap_size,
            max_gap: config.max_gap_size,
            alignment_tolerance_deg: config.alignment_tolerance_deg,
            door_threshold: config.door_threshold,
        }
    }

    /// Overrides the widest gap still treated as a passage.
    #[must_use]
    pub fn with_max_gap(mut self, max_gap: f64) -> Self {
        self.max_gap = max_gap;
        self
    }

    /// Detects passages in the walls and doors of `scene`.
    #[must_use]
    pub fn execute(&self, scene: &Scene) -> Vec<Passage> {
        let doors: Vec<&DoorData> = scene.doors().map(|(_, d)| d).collect();
        self.execute_on(scene.walls(), doors)
    }

    /// Detects passages among arbitrary walls and doors.
    ///
    /// Gap passages come first, in endpoint pair order, followed by one
    /// passage per door whose wall is present in `walls`.
    #[must_use]
    pub fn execute_on<'a>(
        &self,
        walls: impl IntoIterator<Item = (WallId, &'a WallData)>,
        doors: impl IntoIterator<Item = &'a DoorData>,
    ) -> Vec<Passage> {
        let walls: Vec<(WallId, &WallData)> = walls.into_iter().collect();

        let mut passages = self.gap_passages(&walls);
        let gap_count = passages.len();

        for door in doors {
            let Some(&(wall_id, wall)) = walls.iter().find(|(id, _)| *id == door.wall) else {
                debug!(wall = ?door.wall, "skipping door on missing wall");
                continue;
            };
            passages.push(door_passage(wall_id, wall, door));
        }

        debug!(
            walls = walls.len(),
            gaps = gap_count,
            doors = passages.len() - gap_count,
            "detected passages"
        );
        passages
    }

    fn gap_passages(&self, walls: &[(WallId, &WallData)]) -> Vec<Passage> {
        let mut passages = Vec::new();
        if walls.len() < 2 {
            return passages;
        }

        let endpoints: Vec<Endpoint<'_>> = walls
            .iter()
            .flat_map(|&(id, wall)| [(wall.start, id, wall, false), (wall.end, id, wall, true)])
            .collect();

        for (i, a) in endpoints.iter().enumerate() {
            for b in &endpoints[i + 1..] {
                if a.1 == b.1 {
                    continue;
                }

                let gap = distance(&a.0, &b.0);
                if gap <= self.min_gap || gap > self.max_gap {
                    continue;
                }
                if !self.aligned(a.2, b.2) {
                    trace!(gap, "endpoints close but walls not aligned");
                    continue;
                }

                let kind = if gap <= self.door_threshold {
                    PassageKind::Door
                } else {
                    PassageKind::Opening
                };
                passages.push(Passage {
                    start: a.0,
                    end: b.0,
                    start_wall: Some(a.1),
                    end_wall: Some(b.1),
                    kind,
                });
            }
        }

        passages
    }

    /// Returns `true` if the two wall directions differ by less than the
    /// tolerance, treating opposite directions as the same line.
    fn aligned(&self, w1: &WallData, w2: &WallData) -> bool {
        let diff = (w1.angle() - w2.angle()).abs().to_degrees() % 180.0;
        diff < self.alignment_tolerance_deg || diff > 180.0 - self.alignment_tolerance_deg
    }
}

fn door_passage(wall_id: WallId, wall: &WallData, door: &DoorData) -> Passage {
    let center = wall.point_at(door.position);
    let angle = wall.angle();
    let half = Vector2::new(angle.cos(), angle.sin()) * (door.width / 2.0);
    Passage {
        start: center - half,
        end: center + half,
        start_wall: Some(wall_id),
        end_wall: Some(wall_id),
        kind: PassageKind::Door,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::layout::Layout;

    const TOL: f64 = 1e-9;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn wall(x1: f64, y1: f64, x2: f64, y2: f64) -> WallData {
        WallData::new(p(x1, y1), p(x2, y2))
    }

    fn detect(layout: &Layout) -> Vec<Passage> {
        DetectPassages::new(&RoutingConfig::default()).execute(layout.scene())
    }

    /// Passage endpoints as an order-independent, comparable key.
    fn key(passage: &Passage) -> [i64; 4] {
        #[allow(clippy::cast_possible_truncation)]
        let q = |v: f64| (v * 1000.0).round() as i64;
        let a = [q(passage.start.x), q(passage.start.y)];
        let b = [q(passage.end.x), q(passage.end.y)];
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        [lo[0], lo[1], hi[0], hi[1]]
    }

    #[test]
    fn collinear_gap_becomes_door() {
        let mut layout = Layout::new();
        let left = layout.add_wall(wall(0.0, 0.0, 100.0, 0.0));
        let right = layout.add_wall(wall(140.0, 0.0, 300.0, 0.0));

        let passages = detect(&layout);
        assert_eq!(passages.len(), 1);
        let passage = &passages[0];
        assert_eq!(passage.kind, PassageKind::Door);
        assert_eq!(passage.center(), p(120.0, 0.0));
        assert!((passage.width() - 40.0).abs() < TOL);
        assert_eq!(passage.start_wall, Some(left));
        assert_eq!(passage.end_wall, Some(right));
    }

    #[test]
    fn wide_gap_becomes_opening() {
        let mut layout = Layout::new();
        layout.add_wall(wall(0.0, 0.0, 100.0, 0.0));
        layout.add_wall(wall(180.0, 0.0, 300.0, 0.0));

        let passages = detect(&layout);
        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].kind, PassageKind::Opening);
    }

    #[test]
    fn gaps_outside_size_range_are_ignored() {
        let mut layout = Layout::new();
        layout.add_wall(wall(0.0, 0.0, 100.0, 0.0));
        // Touching (gap 0.5) and far (gap 150) neighbours.
        layout.add_wall(wall(100.5, 0.0, 250.0, 0.0));
        layout.add_wall(wall(400.0, 0.0, 450.0, 0.0));

        assert!(detect(&layout).is_empty());
    }

    #[test]
    fn perpendicular_walls_do_not_form_passage() {
        let mut layout = Layout::new();
        layout.add_wall(wall(0.0, 0.0, 100.0, 0.0));
        layout.add_wall(wall(130.0, 0.0, 130.0, 100.0));

        assert!(detect(&layout).is_empty());
    }

    #[test]
    fn opposite_directions_count_as_aligned() {
        let mut layout = Layout::new();
        layout.add_wall(wall(0.0, 0.0, 100.0, 0.0));
        // Drawn right-to-left: angle differs by 180°.
        layout.add_wall(wall(300.0, 0.0, 140.0, 0.0));

        assert_eq!(detect(&layout).len(), 1);
    }

    #[test]
    fn alignment_tolerance_is_configurable() {
        let mut layout = Layout::new();
        layout.add_wall(wall(0.0, 0.0, 100.0, 0.0));
        // 45° wall starting 30 units away.
        layout.add_wall(wall(130.0, 0.0, 230.0, 100.0));

        assert!(detect(&layout).is_empty());

        let loose = RoutingConfig {
            alignment_tolerance_deg: 50.0,
            ..RoutingConfig::default()
        };
        assert_eq!(DetectPassages::new(&loose).execute(layout.scene()).len(), 1);
    }

    #[test]
    fn endpoints_of_same_wall_never_pair() {
        let mut layout = Layout::new();
        // A short wall whose own endpoints are 40 apart.
        layout.add_wall(wall(0.0, 0.0, 40.0, 0.0));
        layout.add_wall(wall(0.0, 500.0, 40.0, 500.0));

        assert!(detect(&layout).is_empty());
    }

    #[test]
    fn single_wall_has_no_gaps() {
        let mut layout = Layout::new();
        layout.add_wall(wall(0.0, 0.0, 100.0, 0.0));
        assert!(detect(&layout).is_empty());
    }

    #[test]
    fn detection_ignores_wall_order() {
        let walls = [
            wall(0.0, 0.0, 100.0, 0.0),
            wall(140.0, 0.0, 300.0, 0.0),
            wall(300.0, 0.0, 300.0, 120.0),
            wall(300.0, 200.0, 300.0, 400.0),
            wall(380.0, 0.0, 500.0, 0.0),
        ];

        let mut forward = Layout::new();
        for w in &walls {
            forward.add_wall(w.clone());
        }
        let mut backward = Layout::new();
        for w in walls.iter().rev() {
            backward.add_wall(w.clone());
        }

        let mut a: Vec<_> = detect(&forward).iter().map(key).collect();
        let mut b: Vec<_> = detect(&backward).iter().map(key).collect();
        a.sort_unstable();
        b.sort_unstable();
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn explicit_door_is_centered_on_wall() {
        let mut layout = Layout::new();
        let w = layout.add_wall(wall(0.0, 0.0, 0.0, 200.0));
        layout
            .add_door(DoorData::new(w).at(0.25).with_width(40.0))
            .unwrap();

        let passages = detect(&layout);
        assert_eq!(passages.len(), 1);
        let door = &passages[0];
        assert_eq!(door.kind, PassageKind::Door);
        assert!((door.center().x).abs() < TOL);
        assert!((door.center().y - 50.0).abs() < TOL);
        assert!((door.width() - 40.0).abs() < TOL);
        assert!((door.start.y - 30.0).abs() < TOL);
        assert_eq!(door.start_wall, Some(w));
        assert_eq!(door.end_wall, Some(w));
    }

    #[test]
    fn doors_follow_gap_passages() {
        let mut layout = Layout::new();
        let left = layout.add_wall(wall(0.0, 0.0, 100.0, 0.0));
        layout.add_wall(wall(140.0, 0.0, 300.0, 0.0));
        layout.add_door(DoorData::new(left)).unwrap();

        let passages = detect(&layout);
        assert_eq!(passages.len(), 2);
        assert_eq!(passages[0].center(), p(120.0, 0.0));
        assert_eq!(passages[1].center(), p(50.0, 0.0));
    }

    #[test]
    fn door_referencing_unknown_wall_is_skipped() {
        let mut layout = Layout::new();
        let gone = layout.add_wall(wall(0.0, 0.0, 10.0, 0.0));
        layout.remove_wall(gone).unwrap();
        layout.add_wall(wall(0.0, 0.0, 100.0, 0.0));
        let orphan = DoorData::new(gone);

        let passages = DetectPassages::new(&RoutingConfig::default())
            .execute_on(layout.scene().walls(), [&orphan]);
        assert!(passages.is_empty());
    }

    #[test]
    fn max_gap_override() {
        let mut layout = Layout::new();
        layout.add_wall(wall(0.0, 0.0, 100.0, 0.0));
        layout.add_wall(wall(180.0, 0.0, 300.0, 0.0));

        let narrow = DetectPassages::new(&RoutingConfig::default()).with_max_gap(50.0);
        assert!(narrow.execute(layout.scene()).is_empty());
    }
}

mod orthogonal;

pub use orthogonal::orthogonal_route;

use tracing::{debug, trace};

use crate::config::RoutingConfig;
use crate::layout::WallData;
use crate::math::{distance, Point2};
use crate::operations::passage::Passage;
use crate::operations::query::WallClearance;

/// Why no wall-clear route exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnroutableReason {
    /// The straight line is blocked and the layout has no passages.
    NoPassages,
    /// Neither passage routes nor the orthogonal fallback are wall-clear.
    Blocked,
}

/// Which tier of the router produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteStrategy {
    /// The straight line is wall-clear; no waypoints needed.
    Direct,
    /// Through the center of one passage.
    SinglePassage,
    /// Through the centers of two passages.
    TwoPassage,
    /// L-shaped detour.
    Orthogonal,
    /// No clear route; drawn as a straight line that crosses a wall.
    Unroutable(UnroutableReason),
}

/// A computed route: the waypoints between the terminals and how they were
/// found.
///
/// An empty waypoint list is ambiguous on its own (clear straight line, or
/// routing failed); `strategy` tells the two apart.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub waypoints: Vec<Point2>,
    pub strategy: RouteStrategy,
}

impl Route {
    fn new(waypoints: Vec<Point2>, strategy: RouteStrategy) -> Self {
        Self {
            waypoints,
            strategy,
        }
    }

    /// Returns `true` if the router failed to find a wall-clear route.
    #[must_use]
    pub fn is_unroutable(&self) -> bool {
        matches!(self.strategy, RouteStrategy::Unroutable(_))
    }
}

/// Total length of the polyline `from → waypoints → to`.
#[must_use]
pub fn path_length(from: &Point2, waypoints: &[Point2], to: &Point2) -> f64 {
    std::iter::once(from)
        .chain(waypoints)
        .zip(waypoints.iter().chain(std::iter::once(to)))
        .map(|(a, b)| distance(a, b))
        .sum()
}

/// Computes wall-avoiding waypoints between two terminals.
///
/// Tiers are tried in order, each only if the previous one failed: straight
/// line, one passage, two passages, L-shaped fallback. The search never
/// goes beyond two passage hops.
#[derive(Debug, Clone)]
pub struct RouteCalculator<'a> {
    clearance: WallClearance<'a>,
    passages: &'a [Passage],
    detour_penalty: f64,
}

impl<'a> RouteCalculator<'a> {
    /// Creates a calculator over `walls` and the passages detected in them.
    #[must_use]
    pub fn new(
        walls: impl IntoIterator<Item = &'a WallData>,
        passages: &'a [Passage],
        config: &RoutingConfig,
    ) -> Self {
        Self {
            clearance: WallClearance::new(walls, config.wall_margin),
            passages,
            detour_penalty: config.detour_penalty,
        }
    }

    /// Returns `true` if segment `a`-`b` touches no wall.
    #[must_use]
    pub fn is_clear(&self, a: &Point2, b: &Point2) -> bool {
        self.clearance.is_clear(a, b)
    }

    /// Computes the waypoints from `from` to `to`.
    ///
    /// Empty when the straight line is clear, and also when no route could
    /// be found. Use [`Self::calculate_route`] to tell those apart.
    #[must_use]
    pub fn calculate_waypoints(&self, from: &Point2, to: &Point2) -> Vec<Point2> {
        self.calculate_route(from, to).waypoints
    }

    /// Computes the route from `from` to `to`, tagged with the tier that
    /// produced it.
    #[must_use]
    pub fn calculate_route(&self, from: &Point2, to: &Point2) -> Route {
        if self.is_clear(from, to) {
            return Route::new(Vec::new(), RouteStrategy::Direct);
        }

        if self.passages.is_empty() {
            debug!("straight line blocked and no passages available");
            return Route::new(
                Vec::new(),
                RouteStrategy::Unroutable(UnroutableReason::NoPassages),
            );
        }

        if let Some(passage) = self.best_single_passage(from, to) {
            debug!(center = ?passage.center(), "routed through one passage");
            return Route::new(vec![passage.center()], RouteStrategy::SinglePassage);
        }

        if let Some(pair) = self.best_two_passage_route(from, to) {
            debug!(?pair, "routed through two passages");
            return Route::new(pair.to_vec(), RouteStrategy::TwoPassage);
        }

        if let Some(bends) = orthogonal_route(from, to, &self.clearance) {
            debug!(?bends, "fell back to orthogonal route");
            return Route::new(bends.to_vec(), RouteStrategy::Orthogonal);
        }

        debug!(?from, ?to, "no wall-clear route found");
        Route::new(
            Vec::new(),
            RouteStrategy::Unroutable(UnroutableReason::Blocked),
        )
    }

    /// Score of a single-passage route: its length plus a penalty on the
    /// detour over the straight-line distance. Lower is better.
    #[must_use]
    pub fn single_passage_score(&self, from: &Point2, to: &Point2, center: &Point2) -> f64 {
        let through = distance(from, center) + distance(center, to);
        let detour = through - distance(from, to);
        through + detour * self.detour_penalty
    }

    /// The lowest-scoring passage whose two legs are both wall-clear.
    ///
    /// Ties keep the earliest passage. Does not check the straight line.
    #[must_use]
    pub fn best_single_passage(&self, from: &Point2, to: &Point2) -> Option<&'a Passage> {
        let mut best: Option<(&'a Passage, f64)> = None;

        for passage in self.passages {
            let center = passage.center();
            if !self.is_clear(from, &center) || !self.is_clear(&center, to) {
                continue;
            }

            let score = self.single_passage_score(from, to, &center);
            trace!(?center, score, "single passage candidate");
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((passage, score));
            }
        }

        best.map(|(passage, _)| passage)
    }

    /// The shortest route through two distinct passages with all three legs
    /// wall-clear, as the two passage centers in travel order.
    #[must_use]
    pub fn best_two_passage_route(&self, from: &Point2, to: &Point2) -> Option<[Point2; 2]> {
        let centers: Vec<Point2> = self.passages.iter().map(Passage::center).collect();
        let to_clear: Vec<bool> = centers.iter().map(|c| self.is_clear(c, to)).collect();

        let mut best: Option<([Point2; 2], f64)> = None;

        for (i, first) in centers.iter().enumerate() {
            if !self.is_clear(from, first) {
                continue;
            }
            for (j, second) in centers.iter().enumerate() {
                if i == j || !to_clear[j] || !self.is_clear(first, second) {
                    continue;
                }

                let length = distance(from, first) + distance(first, second) + distance(second, to);
                trace!(?first, ?second, length, "two passage candidate");
                if best.is_none_or(|(_, best_length)| length < best_length) {
                    best = Some(([*first, *second], length));
                }
            }
        }

        best.map(|(pair, _)| pair)
    }
}

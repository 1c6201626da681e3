use tracing::{debug, info, warn};

use crate::config::RoutingConfig;
use crate::error::{LayoutError, Result};
use crate::layout::{ConnectionData, ConnectionId, Layout, NodeId, Scene, WallData};
use crate::math::Point2;
use crate::operations::connect::{NearestNeighborConnect, SequentialConnect};
use crate::operations::passage::{DetectPassages, Passage};
use crate::operations::query::WallClearance;
use crate::operations::route::{Route, RouteCalculator};

/// Aggregate routing quality over every connection in a layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutingStats {
    pub total: usize,
    /// Connections whose drawn polyline still touches a wall.
    pub crossing: usize,
    /// Connections with at least one waypoint.
    pub routed: usize,
}

#[derive(Debug, Clone)]
struct PassageCache {
    scene_id: u64,
    wall_revision: u64,
    passages: Vec<Passage>,
    /// Walls with door openings cut out.
    solid_walls: Vec<WallData>,
}

/// The routing session: creates, re-routes and batch-connects connections
/// on a [`Layout`].
///
/// Passages are detected lazily and cached between calls. The cache is
/// dropped by [`RoutingEngine::invalidate_cache`] and is also recomputed
/// whenever the layout differs from the one it was built from, or that
/// layout's wall revision has moved on.
#[derive(Debug, Clone, Default)]
pub struct RoutingEngine {
    config: RoutingConfig,
    cache: Option<PassageCache>,
}

impl RoutingEngine {
    #[must_use]
    pub fn new(config: RoutingConfig) -> Self {
        Self {
            config,
            cache: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Drops the cached passages; the next routing call re-detects them.
    pub fn invalidate_cache(&mut self) {
        self.cache = None;
    }

    /// Passages of the layout's current walls and doors.
    pub fn passages(&mut self, layout: &Layout) -> &[Passage] {
        self.refresh_cache(layout.scene());
        self.cached_passages()
    }

    fn refresh_cache(&mut self, scene: &Scene) {
        let scene_id = scene.id();
        let revision = scene.wall_revision();
        let stale = self.cache.as_ref().is_none_or(|cache| {
            cache.scene_id != scene_id || cache.wall_revision != revision
        });
        if !stale {
            return;
        }

        let passages = DetectPassages::new(&self.config).execute(scene);
        debug!(count = passages.len(), revision, "recomputed passage cache");
        self.cache = Some(PassageCache {
            scene_id,
            wall_revision: revision,
            passages,
            solid_walls: scene.solid_walls(),
        });
    }

    fn cached_passages(&self) -> &[Passage] {
        self.cache
            .as_ref()
            .map_or(&[][..], |cache| cache.passages.as_slice())
    }

    fn cached_walls(&self) -> &[WallData] {
        self.cache
            .as_ref()
            .map_or(&[][..], |cache| cache.solid_walls.as_slice())
    }

    fn route_in(&mut self, scene: &Scene, from: &Point2, to: &Point2) -> Route {
        self.refresh_cache(scene);
        RouteCalculator::new(self.cached_walls(), self.cached_passages(), &self.config)
            .calculate_route(from, to)
    }

    /// Routes between two arbitrary points across the layout's walls.
    pub fn calculate_route(&mut self, layout: &Layout, from: &Point2, to: &Point2) -> Route {
        self.route_in(layout.scene(), from, to)
    }

    /// Waypoints between two points; empty for a clear line or when no
    /// route exists.
    pub fn calculate_waypoints(
        &mut self,
        layout: &Layout,
        from: &Point2,
        to: &Point2,
    ) -> Vec<Point2> {
        self.calculate_route(layout, from, to).waypoints
    }

    /// Creates a routed connection from `from`'s output to `to`'s input.
    ///
    /// If either node is missing or lacks the needed terminal, the
    /// connection is still created, without waypoints and with distance 0.
    pub fn create_connection(
        &mut self,
        layout: &mut Layout,
        from: NodeId,
        to: NodeId,
    ) -> ConnectionId {
        let mut connection = ConnectionData::new(from, to);

        match layout.scene().connection_endpoints(&connection) {
            Some((start, end)) => {
                let route = self.route_in(layout.scene(), &start, &end);
                if route.is_unroutable() {
                    debug!(?from, ?to, strategy = ?route.strategy, "connection drawn straight");
                }
                connection.set_route(&start, &end, route.waypoints);
            }
            None => warn!(?from, ?to, "connection endpoints unresolved; left unrouted"),
        }

        layout.add_connection(connection)
    }

    /// Re-resolves the terminals of a connection and routes it again.
    ///
    /// Returns `Ok(false)` and leaves the connection untouched when either
    /// of its nodes is gone.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::NotFound` if `id` is not a connection in the
    /// layout.
    pub fn reroute(&mut self, layout: &mut Layout, id: ConnectionId) -> Result<bool> {
        let (scene, connections) = layout.split_mut();
        let connection = connections
            .get_mut(id)
            .ok_or(LayoutError::NotFound { kind: "connection" })?;
        Ok(self.reroute_in(scene, connection))
    }

    fn reroute_in(&mut self, scene: &Scene, connection: &mut ConnectionData) -> bool {
        let Some((start, end)) = scene.connection_endpoints(connection) else {
            warn!(
                from = ?connection.from,
                to = ?connection.to,
                "skipping reroute; endpoints unresolved"
            );
            return false;
        };
        let route = self.route_in(scene, &start, &end);
        connection.set_route(&start, &end, route.waypoints);
        true
    }

    /// Re-routes every connection against fresh passages.
    ///
    /// Returns how many connections changed their number of waypoints.
    pub fn reroute_all(&mut self, layout: &mut Layout) -> usize {
        self.invalidate_cache();

        let (scene, connections) = layout.split_mut();
        let mut changed = 0;
        for connection in connections.values_mut() {
            let before = connection.waypoints.len();
            self.reroute_in(scene, connection);
            if connection.waypoints.len() != before {
                changed += 1;
            }
        }

        info!(total = connections.len(), changed, "re-routed all connections");
        changed
    }

    /// Connects every free output to the nearest free input strictly closer
    /// than `max_distance` (the configured default when `None`).
    pub fn auto_connect_nodes(
        &mut self,
        layout: &mut Layout,
        max_distance: Option<f64>,
    ) -> Vec<ConnectionId> {
        let max_distance = max_distance.unwrap_or(self.config.auto_connect_distance);
        let pairs = NearestNeighborConnect::new(max_distance).execute(layout);
        let created = self.connect_pairs(layout, pairs);
        info!(max_distance, created = created.len(), "auto-connected nearest nodes");
        created
    }

    /// Connects neighbouring nodes in reading order when their terminals are
    /// strictly closer than `threshold` (the configured default when `None`).
    pub fn auto_connect_sequential(
        &mut self,
        layout: &mut Layout,
        threshold: Option<f64>,
    ) -> Vec<ConnectionId> {
        let threshold = threshold.unwrap_or(self.config.sequential_threshold);
        let pairs =
            SequentialConnect::new(threshold, self.config.row_bucket_height).execute(layout);
        let created = self.connect_pairs(layout, pairs);
        info!(threshold, created = created.len(), "auto-connected sequential nodes");
        created
    }

    fn connect_pairs(
        &mut self,
        layout: &mut Layout,
        pairs: Vec<(NodeId, NodeId)>,
    ) -> Vec<ConnectionId> {
        pairs
            .into_iter()
            .map(|(from, to)| self.create_connection(layout, from, to))
            .collect()
    }

    /// Returns `true` if any segment of the connection's drawn polyline,
    /// terminal to waypoints to terminal, touches a wall.
    ///
    /// A connection whose endpoints cannot be resolved is not drawn and so
    /// never crosses.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::NotFound` if `id` is not a connection in the
    /// layout.
    pub fn path_crosses_walls(&self, layout: &Layout, id: ConnectionId) -> Result<bool> {
        let connection = layout.connection(id)?;
        let walls = layout.scene().solid_walls();
        let clearance = WallClearance::new(&walls, self.config.wall_margin);
        Ok(crosses(&clearance, layout.scene(), connection))
    }

    /// Counts routed connections and connections that still cross walls.
    #[must_use]
    pub fn routing_stats(&self, layout: &Layout) -> RoutingStats {
        let walls = layout.scene().solid_walls();
        let clearance = WallClearance::new(&walls, self.config.wall_margin);

        layout
            .connections()
            .fold(RoutingStats::default(), |mut stats, (_, connection)| {
                stats.total += 1;
                if connection.is_routed() {
                    stats.routed += 1;
                }
                if crosses(&clearance, layout.scene(), connection) {
                    stats.crossing += 1;
                }
                stats
            })
    }
}

fn crosses(clearance: &WallClearance<'_>, scene: &Scene, connection: &ConnectionData) -> bool {
    let Some((start, end)) = scene.connection_endpoints(connection) else {
        return false;
    };
    let mut points = Vec::with_capacity(connection.waypoints.len() + 2);
    points.push(start);
    points.extend_from_slice(&connection.waypoints);
    points.push(end);

    !clearance.is_chain_clear(&points)
}

use crate::math::Point2;
use crate::operations::route::path_length;

use super::NodeId;

slotmap::new_key_type! {
    /// Unique identifier for a connection in the layout.
    pub struct ConnectionId;
}

/// How a connection is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutingMode {
    /// A single straight segment between the terminals.
    #[default]
    Direct,
    /// A bent polyline through the connection's waypoints.
    Orthogonal,
}

/// A routed connection from one node's output to another node's input.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionData {
    pub from: NodeId,
    pub to: NodeId,
    pub routing_mode: RoutingMode,
    /// Intermediate points between the terminals. Empty means a straight line.
    pub waypoints: Vec<Point2>,
    /// Cached length of `from → waypoints → to`.
    pub distance: f64,
}

impl ConnectionData {
    /// Creates an unrouted connection.
    #[must_use]
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            routing_mode: RoutingMode::Direct,
            waypoints: Vec::new(),
            distance: 0.0,
        }
    }

    /// Replaces the waypoints and refreshes the routing mode and cached length.
    pub fn set_route(&mut self, from: &Point2, to: &Point2, waypoints: Vec<Point2>) {
        self.distance = path_length(from, &waypoints, to);
        self.routing_mode = if waypoints.is_empty() {
            RoutingMode::Direct
        } else {
            RoutingMode::Orthogonal
        };
        self.waypoints = waypoints;
    }

    /// Returns `true` if the connection bends through at least one waypoint.
    #[must_use]
    pub fn is_routed(&self) -> bool {
        !self.waypoints.is_empty()
    }
}

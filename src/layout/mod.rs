pub mod cell;
pub mod connection;
pub mod door;
pub mod node;
pub mod wall;

pub use cell::{CellData, CellId};
pub use connection::{ConnectionData, ConnectionId, RoutingMode};
pub use door::{DoorData, DoorId, DEFAULT_DOOR_WIDTH};
pub use node::{NodeData, NodeId, NodeKind};
pub use wall::{WallData, WallId, DEFAULT_WALL_THICKNESS};

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::LayoutError;
use crate::math::Point2;
use slotmap::SlotMap;

static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(0);

/// Everything on the floor plan that routing reads: nodes, walls, doors and
/// cells.
///
/// Every wall or door mutation bumps [`Scene::wall_revision`], which
/// passage caches compare against to detect stale geometry. Revisions are
/// only comparable within one scene; [`Scene::id`] tells scenes apart.
#[derive(Debug)]
pub struct Scene {
    id: u64,
    nodes: SlotMap<NodeId, NodeData>,
    /// Node insertion order; slot order is not stable across removals.
    node_order: Vec<NodeId>,
    walls: SlotMap<WallId, WallData>,
    wall_order: Vec<WallId>,
    doors: SlotMap<DoorId, DoorData>,
    cells: SlotMap<CellId, CellData>,
    wall_revision: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),
            nodes: SlotMap::with_key(),
            node_order: Vec::new(),
            walls: SlotMap::with_key(),
            wall_order: Vec::new(),
            doors: SlotMap::with_key(),
            cells: SlotMap::with_key(),
            wall_revision: 0,
        }
    }
}

impl Scene {
    /// Process-unique identity of this scene.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    // --- Node access ---

    /// Returns a reference to the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the layout.
    pub fn node(&self, id: NodeId) -> Result<&NodeData, LayoutError> {
        self.nodes
            .get(id)
            .ok_or(LayoutError::NotFound { kind: "node" })
    }

    /// Iterates nodes in the order they were added.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> + '_ {
        self.node_order
            .iter()
            .filter_map(|&id| self.nodes.get(id).map(|n| (id, n)))
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // --- Wall access ---

    /// Returns a reference to the wall data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the layout.
    pub fn wall(&self, id: WallId) -> Result<&WallData, LayoutError> {
        self.walls
            .get(id)
            .ok_or(LayoutError::NotFound { kind: "wall" })
    }

    /// Iterates walls in the order they were added.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, &WallData)> + '_ {
        self.wall_order
            .iter()
            .filter_map(|&id| self.walls.get(id).map(|w| (id, w)))
    }

    /// Wall geometry with every explicit door cut out, the walls routes
    /// must actually keep clear of.
    #[must_use]
    pub fn solid_walls(&self) -> Vec<WallData> {
        self.walls()
            .flat_map(|(id, wall)| {
                let openings: Vec<(f64, f64)> = self
                    .doors
                    .values()
                    .filter(|door| door.wall == id)
                    .map(|door| (door.position, door.width))
                    .collect();
                wall.split_at_openings(&openings)
            })
            .collect()
    }

    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Counter bumped on every wall or door mutation.
    #[must_use]
    pub fn wall_revision(&self) -> u64 {
        self.wall_revision
    }

    // --- Door and cell access ---

    pub fn doors(&self) -> impl Iterator<Item = (DoorId, &DoorData)> + '_ {
        self.doors.iter()
    }

    /// Returns a reference to the cell data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell is not in the layout.
    pub fn cell(&self, id: CellId) -> Result<&CellData, LayoutError> {
        self.cells
            .get(id)
            .ok_or(LayoutError::NotFound { kind: "cell" })
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellId, &CellData)> + '_ {
        self.cells.iter()
    }

    /// Resolves the route endpoints of a connection: the output terminal of
    /// its source node and the input terminal of its target node.
    ///
    /// Returns `None` if either node is gone or lacks the needed terminal.
    #[must_use]
    pub fn connection_endpoints(&self, connection: &ConnectionData) -> Option<(Point2, Point2)> {
        let from = self.nodes.get(connection.from)?.output_terminal()?;
        let to = self.nodes.get(connection.to)?.input_terminal()?;
        Some((from, to))
    }

    fn touch_walls(&mut self) {
        self.wall_revision = self.wall_revision.wrapping_add(1);
    }
}

/// The editable floor plan: a [`Scene`] plus the connections routed across
/// it.
///
/// Connections live outside the scene so a router can read the scene while
/// holding a mutable borrow of one connection.
#[derive(Debug, Default)]
pub struct Layout {
    scene: Scene,
    connections: SlotMap<ConnectionId, ConnectionData>,
}

impl Layout {
    /// Creates a new, empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Splits the layout into a shared scene view and exclusive access to the
    /// connections.
    pub fn split_mut(&mut self) -> (&Scene, &mut SlotMap<ConnectionId, ConnectionData>) {
        (&self.scene, &mut self.connections)
    }

    // --- Node operations ---

    /// Inserts a node and returns its ID.
    pub fn add_node(&mut self, data: NodeData) -> NodeId {
        let id = self.scene.nodes.insert(data);
        self.scene.node_order.push(id);
        id
    }

    /// Returns a reference to the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the layout.
    pub fn node(&self, id: NodeId) -> Result<&NodeData, LayoutError> {
        self.scene.node(id)
    }

    /// Returns a mutable reference to the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the layout.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, LayoutError> {
        self.scene
            .nodes
            .get_mut(id)
            .ok_or(LayoutError::NotFound { kind: "node" })
    }

    /// Moves a node's top-left corner to `(x, y)`.
    ///
    /// Connections are not re-routed; call the router afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the layout.
    pub fn move_node(&mut self, id: NodeId, x: f64, y: f64) -> Result<(), LayoutError> {
        let node = self.node_mut(id)?;
        node.bounds = node.bounds.moved_to(x, y);
        Ok(())
    }

    /// Removes a node together with every connection touching it.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not in the layout.
    pub fn remove_node(&mut self, id: NodeId) -> Result<NodeData, LayoutError> {
        let data = self
            .scene
            .nodes
            .remove(id)
            .ok_or(LayoutError::NotFound { kind: "node" })?;
        self.scene.node_order.retain(|&n| n != id);
        self.connections.retain(|_, c| c.from != id && c.to != id);
        for cell in self.scene.cells.values_mut() {
            cell.members.retain(|&n| n != id);
        }
        Ok(data)
    }

    // --- Wall operations ---

    /// Inserts a wall and returns its ID.
    pub fn add_wall(&mut self, data: WallData) -> WallId {
        let id = self.scene.walls.insert(data);
        self.scene.wall_order.push(id);
        self.scene.touch_walls();
        id
    }

    /// Moves both endpoints of a wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the layout.
    pub fn move_wall(&mut self, id: WallId, start: Point2, end: Point2) -> Result<(), LayoutError> {
        let wall = self
            .scene
            .walls
            .get_mut(id)
            .ok_or(LayoutError::NotFound { kind: "wall" })?;
        wall.start = start;
        wall.end = end;
        self.scene.touch_walls();
        Ok(())
    }

    /// Removes a wall and every door placed on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the layout.
    pub fn remove_wall(&mut self, id: WallId) -> Result<WallData, LayoutError> {
        let data = self
            .scene
            .walls
            .remove(id)
            .ok_or(LayoutError::NotFound { kind: "wall" })?;
        self.scene.wall_order.retain(|&w| w != id);
        self.scene.doors.retain(|_, d| d.wall != id);
        self.scene.touch_walls();
        Ok(data)
    }

    // --- Door operations ---

    /// Inserts a door on an existing wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall does not exist or the position is outside
    /// `[0, 1]`.
    pub fn add_door(&mut self, data: DoorData) -> Result<DoorId, LayoutError> {
        self.scene.wall(data.wall)?;
        if !(0.0..=1.0).contains(&data.position) {
            return Err(LayoutError::DoorPositionOutOfRange(data.position));
        }
        let id = self.scene.doors.insert(data);
        self.scene.touch_walls();
        Ok(id)
    }

    /// Removes a door.
    ///
    /// # Errors
    ///
    /// Returns an error if the door is not in the layout.
    pub fn remove_door(&mut self, id: DoorId) -> Result<DoorData, LayoutError> {
        let data = self
            .scene
            .doors
            .remove(id)
            .ok_or(LayoutError::NotFound { kind: "door" })?;
        self.scene.touch_walls();
        Ok(data)
    }

    // --- Cell operations ---

    /// Inserts a cell and returns its ID.
    pub fn add_cell(&mut self, data: CellData) -> CellId {
        self.scene.cells.insert(data)
    }

    // --- Connection operations ---

    /// Inserts a connection as-is, without routing it.
    pub fn add_connection(&mut self, data: ConnectionData) -> ConnectionId {
        self.connections.insert(data)
    }

    /// Returns a reference to the connection data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection is not in the layout.
    pub fn connection(&self, id: ConnectionId) -> Result<&ConnectionData, LayoutError> {
        self.connections
            .get(id)
            .ok_or(LayoutError::NotFound { kind: "connection" })
    }

    /// Removes a connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection is not in the layout.
    pub fn remove_connection(&mut self, id: ConnectionId) -> Result<ConnectionData, LayoutError> {
        self.connections
            .remove(id)
            .ok_or(LayoutError::NotFound { kind: "connection" })
    }

    pub fn connections(&self) -> impl Iterator<Item = (ConnectionId, &ConnectionData)> + '_ {
        self.connections.iter()
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn wall(x1: f64, y1: f64, x2: f64, y2: f64) -> WallData {
        WallData::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    #[test]
    fn wall_mutations_bump_revision() {
        let mut layout = Layout::new();
        let r0 = layout.scene().wall_revision();
        let w = layout.add_wall(wall(0.0, 0.0, 10.0, 0.0));
        let r1 = layout.scene().wall_revision();
        assert_ne!(r0, r1);

        layout
            .move_wall(w, Point2::new(0.0, 5.0), Point2::new(10.0, 5.0))
            .unwrap();
        let r2 = layout.scene().wall_revision();
        assert_ne!(r1, r2);

        let d = layout.add_door(DoorData::new(w)).unwrap();
        layout.remove_door(d).unwrap();
        assert_ne!(r2, layout.scene().wall_revision());
    }

    #[test]
    fn node_moves_do_not_bump_wall_revision() {
        let mut layout = Layout::new();
        let n = layout.add_node(NodeData::new(NodeKind::Machine, Rect::new(0.0, 0.0, 10.0, 10.0)));
        let r = layout.scene().wall_revision();
        layout.move_node(n, 50.0, 50.0).unwrap();
        assert_eq!(r, layout.scene().wall_revision());
        assert!((layout.node(n).unwrap().bounds.x - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn removing_wall_removes_its_doors() {
        let mut layout = Layout::new();
        let w = layout.add_wall(wall(0.0, 0.0, 100.0, 0.0));
        layout.add_door(DoorData::new(w)).unwrap();
        assert_eq!(layout.scene().doors().count(), 1);
        layout.remove_wall(w).unwrap();
        assert_eq!(layout.scene().doors().count(), 0);
        assert!(layout.scene().wall(w).is_err());
    }

    #[test]
    fn door_on_missing_wall_or_out_of_range_is_rejected() {
        let mut layout = Layout::new();
        let w = layout.add_wall(wall(0.0, 0.0, 100.0, 0.0));
        assert!(matches!(
            layout.add_door(DoorData::new(w).at(1.5)),
            Err(LayoutError::DoorPositionOutOfRange(_))
        ));
        layout.remove_wall(w).unwrap();
        assert!(matches!(
            layout.add_door(DoorData::new(w)),
            Err(LayoutError::NotFound { kind: "wall" })
        ));
    }

    #[test]
    fn removing_node_drops_its_connections_and_membership() {
        let mut layout = Layout::new();
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let a = layout.add_node(NodeData::new(NodeKind::Machine, bounds));
        let b = layout.add_node(NodeData::new(NodeKind::Machine, bounds));
        let c = layout.add_node(NodeData::new(NodeKind::Machine, bounds));
        layout.add_connection(ConnectionData::new(a, b));
        let keep = layout.add_connection(ConnectionData::new(c, a));
        let cell = layout.add_cell(CellData::new(bounds, vec![a, b]));
        layout.add_connection(ConnectionData::new(b, c));

        layout.remove_node(b).unwrap();
        assert_eq!(layout.connection_count(), 1);
        assert!(layout.connection(keep).is_ok());
        assert_eq!(layout.scene().cell(cell).unwrap().members, vec![a]);
        let order: Vec<_> = layout.scene().nodes().map(|(id, _)| id).collect();
        assert_eq!(order, vec![a, c]);
    }

    #[test]
    fn endpoints_need_both_nodes_and_terminals() {
        let mut layout = Layout::new();
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let src = layout.add_node(NodeData::new(NodeKind::Source, bounds));
        let sink = layout.add_node(NodeData::new(NodeKind::Sink, bounds));

        let forward = ConnectionData::new(src, sink);
        assert!(layout.scene().connection_endpoints(&forward).is_some());

        let backward = ConnectionData::new(sink, src);
        assert!(layout.scene().connection_endpoints(&backward).is_none());

        layout.remove_node(sink).unwrap();
        assert!(layout.scene().connection_endpoints(&forward).is_none());
    }

    #[test]
    fn solid_walls_cut_out_doors() {
        let mut layout = Layout::new();
        let w = layout.add_wall(wall(0.0, 0.0, 200.0, 0.0));
        layout.add_wall(wall(0.0, 100.0, 200.0, 100.0));
        layout
            .add_door(DoorData::new(w).at(0.5).with_width(40.0))
            .unwrap();

        let solid = layout.scene().solid_walls();
        assert_eq!(solid.len(), 3);
        assert!((solid[0].end.x - 80.0).abs() < 1e-9);
        assert!((solid[1].start.x - 120.0).abs() < 1e-9);
        assert!((solid[2].start.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn scenes_have_distinct_ids() {
        let a = Layout::new();
        let b = Layout::new();
        assert_ne!(a.scene().id(), b.scene().id());
        assert_eq!(a.scene().wall_revision(), b.scene().wall_revision());
    }
}

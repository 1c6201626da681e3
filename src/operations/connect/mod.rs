mod nearest;
mod sequential;

pub use nearest::NearestNeighborConnect;
pub use sequential::SequentialConnect;

use std::collections::HashSet;

use crate::layout::{Layout, NodeId};

/// Nodes that already have an outgoing connection.
fn connected_outputs(layout: &Layout) -> HashSet<NodeId> {
    layout.connections().map(|(_, c)| c.from).collect()
}

/// Nodes that already have an incoming connection.
fn connected_inputs(layout: &Layout) -> HashSet<NodeId> {
    layout.connections().map(|(_, c)| c.to).collect()
}

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::layout::{Layout, NodeId};
use crate::math::{distance, Point2};

use super::{connected_inputs, connected_outputs};

/// Pairs every unconnected output with the closest unconnected input.
///
/// Outputs are served first-come-first-served in layout order; an input is
/// consumed as soon as it is matched, so no input receives two connections
/// in one pass. This is greedy, not a globally optimal assignment.
#[derive(Debug, Clone)]
pub struct NearestNeighborConnect {
    max_distance: f64,
}

impl NearestNeighborConnect {
    /// Creates the operation; only pairs strictly closer than
    /// `max_distance` are connected.
    #[must_use]
    pub fn new(max_distance: f64) -> Self {
        Self { max_distance }
    }

    /// Proposes `(from, to)` pairs for `layout`. Nothing is inserted; the
    /// routing engine turns the pairs into routed connections.
    #[must_use]
    pub fn execute(&self, layout: &Layout) -> Vec<(NodeId, NodeId)> {
        let scene = layout.scene();
        let used_outputs = connected_outputs(layout);
        let used_inputs = connected_inputs(layout);

        let free_outputs: Vec<(NodeId, Point2)> = scene
            .nodes()
            .filter(|(id, _)| !used_outputs.contains(id))
            .filter_map(|(id, node)| node.output_terminal().map(|t| (id, t)))
            .collect();
        let free_inputs: Vec<(NodeId, Point2)> = scene
            .nodes()
            .filter(|(id, _)| !used_inputs.contains(id))
            .filter_map(|(id, node)| node.input_terminal().map(|t| (id, t)))
            .collect();

        let mut consumed: HashSet<NodeId> = HashSet::new();
        let mut pairs = Vec::new();

        for (from, output) in &free_outputs {
            let mut best: Option<(NodeId, f64)> = None;
            for (to, input) in &free_inputs {
                if to == from || consumed.contains(to) {
                    continue;
                }
                let d = distance(output, input);
                if d >= self.max_distance {
                    continue;
                }
                if best.is_none_or(|(_, best_d)| d < best_d) {
                    best = Some((*to, d));
                }
            }

            if let Some((to, d)) = best {
                trace!(?from, ?to, distance = d, "nearest free input");
                consumed.insert(to);
                pairs.push((*from, to));
            }
        }

        debug!(
            free_outputs = free_outputs.len(),
            free_inputs = free_inputs.len(),
            pairs = pairs.len(),
            "nearest-neighbor auto-connect"
        );
        pairs
    }
}

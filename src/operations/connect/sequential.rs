use tracing::{debug, trace};

use crate::layout::{Layout, NodeData, NodeId};
use crate::math::distance;

use super::connected_outputs;

/// Connects nodes that sit next to each other in reading order, the way an
/// assembly line is drawn.
///
/// Nodes are ordered by row bucket (`trunc(y / row_height)`) and then by
/// `x`. Each node without an outgoing connection is joined to the first
/// later node whose input terminal is strictly closer than the threshold.
#[derive(Debug, Clone)]
pub struct SequentialConnect {
    threshold: f64,
    row_height: f64,
}

impl SequentialConnect {
    #[must_use]
    pub fn new(threshold: f64, row_height: f64) -> Self {
        Self {
            threshold,
            row_height,
        }
    }

    /// Proposes `(from, to)` pairs for `layout`. Nothing is inserted; the
    /// routing engine turns the pairs into routed connections.
    #[must_use]
    pub fn execute(&self, layout: &Layout) -> Vec<(NodeId, NodeId)> {
        let mut used_outputs = connected_outputs(layout);

        let mut ordered: Vec<(NodeId, &NodeData)> = layout.scene().nodes().collect();
        ordered.sort_by(|(_, a), (_, b)| {
            self.row(a)
                .cmp(&self.row(b))
                .then(a.bounds.x.total_cmp(&b.bounds.x))
        });

        let mut pairs = Vec::new();
        for (i, &(from, from_node)) in ordered.iter().enumerate() {
            if used_outputs.contains(&from) {
                continue;
            }
            let Some(output) = from_node.output_terminal() else {
                continue;
            };

            let next = ordered[i + 1..].iter().find_map(|&(to, to_node)| {
                let input = to_node.input_terminal()?;
                let d = distance(&output, &input);
                trace!(?from, ?to, distance = d, "sequential candidate");
                (d < self.threshold).then_some(to)
            });

            if let Some(to) = next {
                used_outputs.insert(from);
                pairs.push((from, to));
            }
        }

        debug!(
            nodes = ordered.len(),
            pairs = pairs.len(),
            "sequential auto-connect"
        );
        pairs
    }

    #[allow(clippy::cast_possible_truncation)]
    fn row(&self, node: &NodeData) -> i64 {
        (node.bounds.y / self.row_height).trunc() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::layout::{ConnectionData, NodeKind};

    fn node(layout: &mut Layout, kind: NodeKind, x: f64, y: f64) -> NodeId {
        layout.add_node(NodeData::new(kind, Rect::new(x, y, 20.0, 20.0)))
    }

    #[test]
    fn chains_neighbors_in_a_row() {
        let mut layout = Layout::new();
        // Inserted out of order; sorting by x restores the line.
        let c = node(&mut layout, NodeKind::Sink, 200.0, 0.0);
        let a = node(&mut layout, NodeKind::Source, 0.0, 0.0);
        let b = node(&mut layout, NodeKind::Machine, 100.0, 0.0);

        let pairs = SequentialConnect::new(150.0, 100.0).execute(&layout);
        assert_eq!(pairs, vec![(a, b), (b, c)]);
    }

    #[test]
    fn rows_are_ordered_before_columns() {
        let mut layout = Layout::new();
        let lower = node(&mut layout, NodeKind::Machine, 0.0, 120.0);
        let upper = node(&mut layout, NodeKind::Machine, 100.0, 30.0);

        // Upper row first even though its x is larger; the lower node comes
        // later in order and its input is within reach of upper's output.
        let pairs = SequentialConnect::new(500.0, 100.0).execute(&layout);
        assert_eq!(pairs, vec![(upper, lower)]);
    }

    #[test]
    fn sources_are_never_targets() {
        let mut layout = Layout::new();
        let a = node(&mut layout, NodeKind::Machine, 0.0, 0.0);
        let s = node(&mut layout, NodeKind::Source, 60.0, 0.0);
        let c = node(&mut layout, NodeKind::Sink, 120.0, 0.0);

        // a skips the source; inputs are not consumed, so s reaches c too.
        let pairs = SequentialConnect::new(150.0, 100.0).execute(&layout);
        assert_eq!(pairs, vec![(a, c), (s, c)]);
    }

    #[test]
    fn existing_outputs_are_left_alone() {
        let mut layout = Layout::new();
        let a = node(&mut layout, NodeKind::Machine, 0.0, 0.0);
        let b = node(&mut layout, NodeKind::Machine, 100.0, 0.0);
        let c = node(&mut layout, NodeKind::Machine, 200.0, 0.0);
        layout.add_connection(ConnectionData::new(a, c));

        let pairs = SequentialConnect::new(150.0, 100.0).execute(&layout);
        assert_eq!(pairs, vec![(b, c)]);
    }

    #[test]
    fn rows_straddling_zero_share_a_bucket() {
        let mut layout = Layout::new();
        let right = node(&mut layout, NodeKind::Machine, 100.0, -50.0);
        let left = node(&mut layout, NodeKind::Machine, 0.0, 50.0);

        // Both truncate to row 0, so x decides the order.
        let pairs = SequentialConnect::new(1000.0, 100.0).execute(&layout);
        assert_eq!(pairs, vec![(left, right)]);
    }
}

use crate::geometry::{node_input_terminal, node_output_terminal, Rect, TerminalLayout};
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a node in the layout.
    pub struct NodeId;
}

/// What a node does in the flow, which decides the terminals it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// Where items enter the layout. Has no input terminal.
    Source,
    /// Where items leave the layout. Has no output terminal.
    Sink,
    Machine,
    Buffer,
    Workstation,
    Inspection,
    #[default]
    Standard,
}

impl NodeKind {
    /// Returns `true` if nodes of this kind accept incoming connections.
    #[must_use]
    pub fn has_input(self) -> bool {
        self != Self::Source
    }

    /// Returns `true` if nodes of this kind emit outgoing connections.
    #[must_use]
    pub fn has_output(self) -> bool {
        self != Self::Sink
    }
}

/// Data associated with a layout node.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: NodeKind,
    /// Visual extent on the floor plan.
    pub bounds: Rect,
    pub terminals: TerminalLayout,
}

impl NodeData {
    /// Creates a node with the default left-in, right-out terminals.
    #[must_use]
    pub fn new(kind: NodeKind, bounds: Rect) -> Self {
        Self {
            kind,
            bounds,
            terminals: TerminalLayout::default(),
        }
    }

    #[must_use]
    pub fn with_terminals(mut self, terminals: TerminalLayout) -> Self {
        self.terminals = terminals;
        self
    }

    /// Input terminal position, or `None` if this kind has no input.
    #[must_use]
    pub fn input_terminal(&self) -> Option<Point2> {
        self.kind.has_input().then(|| node_input_terminal(self))
    }

    /// Output terminal position, or `None` if this kind has no output.
    #[must_use]
    pub fn output_terminal(&self) -> Option<Point2> {
        self.kind.has_output().then(|| node_output_terminal(self))
    }

    /// Rotates the terminal pair a quarter turn clockwise.
    pub fn flip_terminals(&mut self) {
        self.terminals = self.terminals.rotated();
    }

    /// Switches to (or cycles) right-angle terminal placement.
    pub fn rotate_terminals_90(&mut self) {
        self.terminals = self.terminals.toggled_90();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::TerminalSide;

    #[test]
    fn source_and_sink_capabilities() {
        assert!(!NodeKind::Source.has_input());
        assert!(NodeKind::Source.has_output());
        assert!(NodeKind::Sink.has_input());
        assert!(!NodeKind::Sink.has_output());
        for kind in [
            NodeKind::Machine,
            NodeKind::Buffer,
            NodeKind::Workstation,
            NodeKind::Inspection,
            NodeKind::Standard,
        ] {
            assert!(kind.has_input() && kind.has_output(), "{kind:?}");
        }
    }

    #[test]
    fn suppressed_terminals_resolve_to_none() {
        let bounds = Rect::new(0.0, 0.0, 40.0, 40.0);
        assert!(NodeData::new(NodeKind::Source, bounds).input_terminal().is_none());
        assert!(NodeData::new(NodeKind::Sink, bounds).output_terminal().is_none());
        assert_eq!(
            NodeData::new(NodeKind::Source, bounds).output_terminal(),
            Some(Point2::new(52.0, 20.0))
        );
    }

    #[test]
    fn flip_moves_terminals() {
        let mut node = NodeData::new(NodeKind::Machine, Rect::new(0.0, 0.0, 40.0, 20.0));
        node.flip_terminals();
        assert_eq!(node.terminals.input, TerminalSide::Top);
        assert_eq!(node.input_terminal(), Some(Point2::new(20.0, -12.0)));
        node.rotate_terminals_90();
        assert_eq!(node.terminals.output, TerminalSide::Right);
    }
}

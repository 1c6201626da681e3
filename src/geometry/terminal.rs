use crate::layout::NodeData;
use crate::math::Point2;

use super::Rect;

/// Distance a node terminal sticks out from the node's edge.
pub const NODE_TERMINAL_STICK_OUT: f64 = 12.0;

/// Distance a cell terminal sticks out from the cell boundary.
pub const CELL_TERMINAL_STICK_OUT: f64 = 14.0;

/// The rectangle edge a terminal sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl TerminalSide {
    /// The next side going clockwise (left → top → right → bottom).
    #[must_use]
    pub fn clockwise(self) -> Self {
        match self {
            Self::Left => Self::Top,
            Self::Top => Self::Right,
            Self::Right => Self::Bottom,
            Self::Bottom => Self::Left,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        self.clockwise().clockwise()
    }

    /// Resolves the terminal point on this side of `bounds`, pushed outward
    /// by `stick_out`.
    #[must_use]
    pub fn point_on(self, bounds: &Rect, stick_out: f64) -> Point2 {
        let center = bounds.center();
        match self {
            Self::Left => Point2::new(bounds.x - stick_out, center.y),
            Self::Right => Point2::new(bounds.right() + stick_out, center.y),
            Self::Top => Point2::new(center.x, bounds.y - stick_out),
            Self::Bottom => Point2::new(center.x, bounds.bottom() + stick_out),
        }
    }
}

/// Which sides of a node (or cell) carry its input and output terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalLayout {
    pub input: TerminalSide,
    pub output: TerminalSide,
}

impl Default for TerminalLayout {
    fn default() -> Self {
        Self {
            input: TerminalSide::Left,
            output: TerminalSide::Right,
        }
    }
}

impl TerminalLayout {
    #[must_use]
    pub fn new(input: TerminalSide, output: TerminalSide) -> Self {
        Self { input, output }
    }

    /// Rotates the terminal pair one quarter turn clockwise, keeping the
    /// angle between the two terminals.
    ///
    /// A layout with both terminals on the same side resets to left-right.
    #[must_use]
    pub fn rotated(self) -> Self {
        if self.input == self.output {
            return Self::default();
        }
        Self::new(self.input.clockwise(), self.output.clockwise())
    }

    /// Switches a straight-through layout to its 90° counterpart (output one
    /// side clockwise of the input), or rotates an existing 90° layout.
    #[must_use]
    pub fn toggled_90(self) -> Self {
        if self.input == self.output {
            Self::new(TerminalSide::Left, TerminalSide::Top)
        } else if self.output == self.input.opposite() {
            Self::new(self.input, self.input.clockwise())
        } else {
            self.rotated()
        }
    }
}

/// Input terminal of a node, on the side named by its terminal layout.
///
/// Does not consult the node kind; callers check
/// [`NodeKind::has_input`](crate::layout::NodeKind::has_input) first.
#[must_use]
pub fn node_input_terminal(node: &NodeData) -> Point2 {
    node.terminals
        .input
        .point_on(&node.bounds, NODE_TERMINAL_STICK_OUT)
}

/// Output terminal of a node, on the side named by its terminal layout.
///
/// Does not consult the node kind; callers check
/// [`NodeKind::has_output`](crate::layout::NodeKind::has_output) first.
#[must_use]
pub fn node_output_terminal(node: &NodeData) -> Point2 {
    node.terminals
        .output
        .point_on(&node.bounds, NODE_TERMINAL_STICK_OUT)
}

/// Terminal point on a group boundary.
#[must_use]
pub fn cell_terminal(bounds: &Rect, side: TerminalSide) -> Point2 {
    side.point_on(bounds, CELL_TERMINAL_STICK_OUT)
}

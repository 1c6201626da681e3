use crate::geometry::{cell_terminal, Rect, TerminalLayout};
use crate::math::Point2;

use super::NodeId;

slotmap::new_key_type! {
    /// Unique identifier for a cell (node group) in the layout.
    pub struct CellId;
}

/// A rectangular group of nodes with its own boundary terminals.
#[derive(Debug, Clone)]
pub struct CellData {
    pub bounds: Rect,
    pub members: Vec<NodeId>,
    pub terminals: TerminalLayout,
}

impl CellData {
    #[must_use]
    pub fn new(bounds: Rect, members: Vec<NodeId>) -> Self {
        Self {
            bounds,
            members,
            terminals: TerminalLayout::default(),
        }
    }

    /// Terminal on the cell boundary for the given direction.
    #[must_use]
    pub fn terminal(&self, is_output: bool) -> Point2 {
        let side = if is_output {
            self.terminals.output
        } else {
            self.terminals.input
        };
        cell_terminal(&self.bounds, side)
    }

    #[must_use]
    pub fn input_terminal(&self) -> Point2 {
        self.terminal(false)
    }

    #[must_use]
    pub fn output_terminal(&self) -> Point2 {
        self.terminal(true)
    }

    /// Rotates the boundary terminals a quarter turn clockwise.
    pub fn flip_terminals(&mut self) {
        self.terminals = self.terminals.rotated();
    }

    /// Switches to (or cycles) right-angle boundary terminal placement.
    pub fn rotate_terminals_90(&mut self) {
        self.terminals = self.terminals.toggled_90();
    }
}

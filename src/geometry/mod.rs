pub mod rect;
pub mod terminal;

pub use rect::Rect;
pub use terminal::{
    cell_terminal, node_input_terminal, node_output_terminal, TerminalLayout, TerminalSide,
    CELL_TERMINAL_STICK_OUT, NODE_TERMINAL_STICK_OUT,
};

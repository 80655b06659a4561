use std::fmt;
use tic_tac_toe_core::{Cell, Line, Marker};

/// The one-line banner a front end shows under the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Turn { name: String, marker: Marker },
    CellTaken { name: String, cell: Cell },
    Won { name: String, marker: Marker, line: Line },
    Tie,
}

impl Status {
    pub fn is_finished(&self) -> bool {
        matches!(self, Status::Won { .. } | Status::Tie)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Turn { name, marker } => write!(f, "🕐 {name}'s turn ({marker})"),
            Status::CellTaken { name, cell } => {
                write!(f, "⚠️ Cell {cell} is taken, {name}, pick another")
            }
            Status::Won { name, marker, line } => {
                write!(f, "🏆 {name} ({marker}) wins on {line}!")
            }
            Status::Tie => f.write_str("It's a draw!"),
        }
    }
}

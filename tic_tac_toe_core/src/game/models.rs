use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use super::error::GameError;

/// Side length of the board.
pub const BOARD_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Marker {
    X,
    O,
}

impl Marker {
    pub fn opponent(self) -> Self {
        match self {
            Marker::X => Marker::O,
            Marker::O => Marker::X,
        }
    }

    /// Seat of the player holding this marker: X sits at 0, O at 1.
    pub fn index(self) -> usize {
        match self {
            Marker::X => 0,
            Marker::O => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Marker::X => "X",
            Marker::O => "O",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coordinate on the board, guaranteed to be in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Cell {
    row: usize,
    col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Result<Self, GameError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(GameError::OutOfBounds { row, col });
        }
        Ok(Self { row, col })
    }

    pub(crate) const fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// All nine cells in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Cell::at(row, col)))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Row or column number of a [`Line`], always in `0..3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineIndex(usize);

impl LineIndex {
    pub fn new(index: usize) -> Result<Self, GameError> {
        if index >= BOARD_SIZE {
            return Err(GameError::LineOutOfRange(index));
        }
        Ok(Self(index))
    }

    const fn at(index: usize) -> Self {
        Self(index)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for LineIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the eight winning lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Row(LineIndex),
    Column(LineIndex),
    /// Top-left to bottom-right.
    Diagonal,
    /// Bottom-left to top-right.
    AntiDiagonal,
}

impl Line {
    /// Every line, in the order the board scans them for a winner.
    pub const ALL: [Line; 8] = [
        Line::Row(LineIndex::at(0)),
        Line::Row(LineIndex::at(1)),
        Line::Row(LineIndex::at(2)),
        Line::Column(LineIndex::at(0)),
        Line::Column(LineIndex::at(1)),
        Line::Column(LineIndex::at(2)),
        Line::Diagonal,
        Line::AntiDiagonal,
    ];

    pub fn row(index: usize) -> Result<Self, GameError> {
        LineIndex::new(index).map(Line::Row)
    }

    pub fn column(index: usize) -> Result<Self, GameError> {
        LineIndex::new(index).map(Line::Column)
    }

    pub fn cells(self) -> [Cell; 3] {
        match self {
            Line::Row(row) => {
                let row = row.get();
                [Cell::at(row, 0), Cell::at(row, 1), Cell::at(row, 2)]
            }
            Line::Column(col) => {
                let col = col.get();
                [Cell::at(0, col), Cell::at(1, col), Cell::at(2, col)]
            }
            Line::Diagonal => [Cell::at(0, 0), Cell::at(1, 1), Cell::at(2, 2)],
            Line::AntiDiagonal => [Cell::at(2, 0), Cell::at(1, 1), Cell::at(0, 2)],
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Row(row) => write!(f, "row {row}"),
            Line::Column(col) => write!(f, "column {col}"),
            Line::Diagonal => f.write_str("diagonal"),
            Line::AntiDiagonal => f.write_str("anti-diagonal"),
        }
    }
}

/// How a finished board ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win { winner: Marker, line: Line },
    Tie,
}

impl Outcome {
    pub fn winner(&self) -> Option<Marker> {
        match self {
            Outcome::Win { winner, .. } => Some(*winner),
            Outcome::Tie => None,
        }
    }

    pub fn line(&self) -> Option<Line> {
        match self {
            Outcome::Win { line, .. } => Some(*line),
            Outcome::Tie => None,
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie)
    }
}

// Wire shape: {"winner":"X","line":[{"row":0,"col":0},..]} or {"winner":"tie"}.
impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr {
            winner: &'static str,
            #[serde(skip_serializing_if = "Option::is_none")]
            line: Option<[Cell; 3]>,
        }

        let repr = match self {
            Outcome::Win { winner, line } => Repr {
                winner: winner.as_str(),
                line: Some(line.cells()),
            },
            Outcome::Tie => Repr {
                winner: "tie",
                line: None,
            },
        };
        repr.serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    name: String,
    marker: Marker,
    wins: u32,
}

impl Player {
    /// Blank names fall back to "Player X" / "Player O".
    pub fn new(name: impl Into<String>, marker: Marker) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            format!("Player {marker}")
        } else {
            trimmed.to_string()
        };

        Player {
            name,
            marker,
            wins: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub(crate) fn record_win(&mut self) {
        self.wins += 1;
    }
}

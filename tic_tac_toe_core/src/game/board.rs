use std::fmt;
use tracing::{debug, warn};

use super::models::{Cell, Line, Marker, Outcome, BOARD_SIZE};

pub type Grid = [[Option<Marker>; BOARD_SIZE]; BOARD_SIZE];

/// The 3x3 grid plus the outcome recorded once the board is decided.
///
/// The board only reports state changes through its return values. Drawing it
/// is left to whoever owns the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: Grid,
    result: Option<Outcome>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `marker` into `cell` unless the cell is already taken.
    ///
    /// Returns `false`, leaving the board untouched, for an occupied cell.
    pub fn update_cell(&mut self, cell: Cell, marker: Marker) -> bool {
        let slot = &mut self.cells[cell.row()][cell.col()];

        if let Some(existing) = *slot {
            warn!(%cell, occupant = %existing, "Cell already occupied, select an empty cell");
            return false;
        }

        *slot = Some(marker);
        debug!(%cell, %marker, "Cell updated");
        true
    }

    /// Scans rows, then columns, then the diagonal and the anti-diagonal.
    ///
    /// The first line holding three equal markers is recorded as the result and
    /// ends the scan.
    pub fn check_for_winner(&mut self) -> bool {
        for line in Line::ALL {
            let [a, b, c] = line.cells();
            if let Some(marker) = self.get(a) {
                if self.get(b) == Some(marker) && self.get(c) == Some(marker) {
                    self.result = Some(Outcome::Win {
                        winner: marker,
                        line,
                    });
                    return true;
                }
            }
        }

        false
    }

    /// True once every cell is taken. A full board with no recorded winner is
    /// recorded as a tie.
    pub fn is_board_full(&mut self) -> bool {
        let full = self
            .cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_some()));

        if full && self.result.is_none() {
            self.result = Some(Outcome::Tie);
        }

        full
    }

    /// Decides the board if it can be decided.
    ///
    /// The winner check always runs before the fullness check: a move that
    /// completes a line on the last empty cell is a win, not a tie.
    pub fn evaluate(&mut self) -> Option<Outcome> {
        if self.check_for_winner() || self.is_board_full() {
            self.result
        } else {
            None
        }
    }

    pub fn result(&self) -> Option<Outcome> {
        self.result
    }

    pub fn get(&self, cell: Cell) -> Option<Marker> {
        self.cells[cell.row()][cell.col()]
    }

    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        Cell::all().filter(|cell| self.get(*cell).is_none())
    }

    pub fn reset(&mut self) {
        self.cells = [[None; BOARD_SIZE]; BOARD_SIZE];
        self.result = None;
    }
}

// Three rows of `X|O| ` separated by `-+-+-`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            let line: Vec<&str> = row
                .iter()
                .map(|cell| cell.map_or(" ", Marker::as_str))
                .collect();
            write!(f, "{}", line.join("|"))?;
            if i + 1 < BOARD_SIZE {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: usize, col: usize) -> Cell {
        Cell::new(row, col).unwrap()
    }

    fn board_from(rows: [&str; 3]) -> Board {
        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                let marker = match ch {
                    'X' => Marker::X,
                    'O' => Marker::O,
                    _ => continue,
                };
                assert!(board.update_cell(cell(r, c), marker));
            }
        }
        board
    }

    #[test]
    fn test_occupied_cell_is_never_overwritten() {
        let mut board = Board::new();
        assert!(board.update_cell(cell(1, 1), Marker::X));
        assert!(!board.update_cell(cell(1, 1), Marker::O));
        assert!(!board.update_cell(cell(1, 1), Marker::X));
        assert_eq!(board.get(cell(1, 1)), Some(Marker::X));
    }

    #[test]
    fn test_every_line_is_detected() {
        for line in Line::ALL {
            let mut board = Board::new();
            for c in line.cells() {
                board.update_cell(c, Marker::O);
            }
            assert!(board.check_for_winner(), "{line} not detected");
            assert_eq!(
                board.result(),
                Some(Outcome::Win {
                    winner: Marker::O,
                    line
                })
            );
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut board = board_from(["XXO", "   ", "   "]);
        assert!(!board.check_for_winner());
        assert_eq!(board.result(), None);
    }

    #[test]
    fn test_first_matching_line_wins_the_scan() {
        // Row 0 and column 0 are both complete; rows are scanned first.
        let mut board = board_from(["XXX", "XO ", "XOO"]);
        assert!(board.check_for_winner());
        assert_eq!(board.result().and_then(|o| o.line()), Some(Line::row(0).unwrap()));
    }

    #[test]
    fn test_full_board_without_winner_is_tie() {
        let mut board = board_from(["XOX", "OXO", "OXO"]);
        assert!(!board.check_for_winner());
        assert!(board.is_board_full());
        assert_eq!(board.result(), Some(Outcome::Tie));
    }

    #[test]
    fn test_full_board_keeps_recorded_winner() {
        let mut board = board_from(["XXX", "OOX", "XOO"]);
        assert!(board.check_for_winner());
        assert!(board.is_board_full());
        assert_eq!(board.result().and_then(|o| o.winner()), Some(Marker::X));
    }

    #[test]
    fn test_partial_board_is_not_full() {
        let mut board = board_from(["XOX", "OXO", "OX "]);
        assert!(!board.is_board_full());
        assert_eq!(board.result(), None);
        assert_eq!(board.empty_cells().count(), 1);
    }

    #[test]
    fn test_evaluate_prefers_win_on_last_cell() {
        let mut board = board_from(["XOX", "OXO", "OX "]);
        board.update_cell(cell(2, 2), Marker::X);
        assert_eq!(
            board.evaluate(),
            Some(Outcome::Win {
                winner: Marker::X,
                line: Line::Diagonal
            })
        );
    }

    #[test]
    fn test_reset_clears_cells_and_result() {
        let mut board = board_from(["OOO", "XX ", "   "]);
        assert!(board.check_for_winner());
        board.reset();
        assert_eq!(board, Board::new());
        assert_eq!(board.empty_cells().count(), 9);
    }

    #[test]
    fn test_display() {
        let board = board_from(["X O", " X ", "  O"]);
        assert_eq!(board.to_string(), "X| |O\n-+-+-\n |X| \n-+-+-\n | |O");
    }
}

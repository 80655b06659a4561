use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    board::Grid,
    error::GameError,
    match_state::Scoreboard,
    models::{Cell, Marker, Outcome},
};

/// A move as typed or clicked, before it is checked against the board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub row: usize,
    pub col: usize,
}

impl MoveRequest {
    /// Reads `"row col"` or `"row,col"`.
    pub fn parse(input: &str) -> Result<Self, GameError> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();

        let [row, col] = parts.as_slice() else {
            return Err(GameError::InvalidMove(format!(
                "expected a row and a column, got `{}`",
                input.trim()
            )));
        };

        let number = |part: &str| {
            part.parse::<usize>()
                .map_err(|_| GameError::InvalidMove(format!("`{part}` is not a board index")))
        };

        Ok(MoveRequest {
            row: number(*row)?,
            col: number(*col)?,
        })
    }
}

impl TryFrom<MoveRequest> for Cell {
    type Error = GameError;

    fn try_from(request: MoveRequest) -> Result<Self, Self::Error> {
        Cell::new(request.row, request.col)
    }
}

/// Read-only view of a match for whatever is drawing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSnapshot {
    pub match_id: Uuid,
    pub board: Grid,
    pub active_player: Marker,
    pub rounds_played: u8,
    pub running: bool,
    pub result: Option<Outcome>,
    pub scores: Scoreboard,
}

use thiserror::Error;

/// Everything that can go wrong while driving a match from the outside.
///
/// Picking a cell that is already taken is not in here: that case is part of
/// normal play and is reported through return values instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cell ({row}, {col}) is outside the 3x3 board")]
    OutOfBounds { row: usize, col: usize },

    #[error("line index {0} is outside the 3x3 board")]
    LineOutOfRange(usize),

    #[error("this board is already finished, reset it to play again")]
    MatchFinished,

    #[error("invalid move input: {0}")]
    InvalidMove(String),

    #[error("unknown rematch policy `{0}` (expected winner, loser, fixed or alternate)")]
    UnknownPolicy(String),
}

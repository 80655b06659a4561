//! Board state and turn sequencing for two-player tic-tac-toe.
//!
//! A [`Match`] owns two [`Player`]s and a [`Board`]. Front ends feed it
//! [`Cell`]s and render what comes back; no game rule lives outside this crate.

pub mod game;

pub use game::{
    board::{Board, Grid},
    error::GameError,
    match_state::{Match, PlayerScore, Scoreboard, MIN_ROUNDS_FOR_RESULT},
    message::{MatchSnapshot, MoveRequest},
    models::{Cell, Line, LineIndex, Marker, Outcome, Player, BOARD_SIZE},
    policy::NextStarter,
};

use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    board::Board,
    error::GameError,
    message::MatchSnapshot,
    models::{Cell, Marker, Outcome, Player},
    policy::NextStarter,
};

/// Fewest marks on the board before any line can be complete: the opening
/// player needs three, interleaved with two from the other side. Checking for
/// a result earlier could only ever come back empty.
pub const MIN_ROUNDS_FOR_RESULT: u8 = 5;

/// Two players sharing one board, plus their running score.
#[derive(Debug, Clone)]
pub struct Match {
    id: Uuid,
    board: Board,
    players: [Player; 2],
    active_player: Marker,
    starter: Marker,
    rounds_played: u8,
    running: bool,
    policy: NextStarter,
}

impl Match {
    pub fn new(name_x: impl Into<String>, name_o: impl Into<String>) -> Self {
        let game = Match {
            id: Uuid::new_v4(),
            board: Board::new(),
            players: [Player::new(name_x, Marker::X), Player::new(name_o, Marker::O)],
            active_player: Marker::X,
            starter: Marker::X,
            rounds_played: 0,
            running: true,
            policy: NextStarter::default(),
        };

        info!(
            match_id = %game.id,
            x = game.players[0].name(),
            o = game.players[1].name(),
            "Match started"
        );
        game
    }

    pub fn with_policy(mut self, policy: NextStarter) -> Self {
        self.policy = policy;
        self
    }

    /// Places the active player's marker on `cell`.
    ///
    /// `Ok(None)` covers both a move that leaves the board open and a move onto
    /// an occupied cell; the latter changes nothing, so the same player is
    /// asked again. `Ok(Some(_))` means this move decided the board.
    pub fn play_round(&mut self, cell: Cell) -> Result<Option<Outcome>, GameError> {
        if !self.running {
            warn!(match_id = %self.id, %cell, "Move rejected: board is finished");
            return Err(GameError::MatchFinished);
        }

        let marker = self.active_player;
        if !self.board.update_cell(cell, marker) {
            return Ok(None);
        }

        self.active_player = marker.opponent();
        self.rounds_played += 1;
        debug!(
            match_id = %self.id,
            %marker,
            %cell,
            round = self.rounds_played,
            "Move applied, now it's {}'s turn",
            self.active_player
        );

        if self.rounds_played < MIN_ROUNDS_FOR_RESULT {
            return Ok(None);
        }

        let Some(outcome) = self.board.evaluate() else {
            return Ok(None);
        };

        self.running = false;
        match outcome {
            Outcome::Win { winner, line } => {
                let player = &mut self.players[winner.index()];
                player.record_win();
                info!(
                    match_id = %self.id,
                    winner = player.name(),
                    %line,
                    wins = player.wins(),
                    "Board won"
                );
            }
            Outcome::Tie => info!(match_id = %self.id, "Board tied"),
        }

        Ok(Some(outcome))
    }

    pub fn active_player(&self) -> &Player {
        &self.players[self.active_player.index()]
    }

    pub fn scores(&self) -> Scoreboard {
        Scoreboard {
            entries: self.players.clone().map(|player| PlayerScore {
                name: player.name().to_string(),
                marker: player.marker(),
                wins: player.wins(),
            }),
        }
    }

    /// Starts a fresh board, keeping players and scores.
    ///
    /// `winner` is the marker that took the previous board, if any; the
    /// configured [`NextStarter`] turns it into the next opening player.
    pub fn reset(&mut self, winner: Option<Marker>) {
        let starter = self.policy.starter(self.starter, winner);

        self.board.reset();
        self.rounds_played = 0;
        self.running = true;
        self.starter = starter;
        self.active_player = starter;

        debug!(
            match_id = %self.id,
            policy = %self.policy,
            %starter,
            scores = %self.scores(),
            "Board reset"
        );
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, marker: Marker) -> &Player {
        &self.players[marker.index()]
    }

    pub fn rounds_played(&self) -> u8 {
        self.rounds_played
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn result(&self) -> Option<Outcome> {
        self.board.result()
    }

    pub fn policy(&self) -> NextStarter {
        self.policy
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            match_id: self.id,
            board: *self.board.cells(),
            active_player: self.active_player,
            rounds_played: self.rounds_played,
            running: self.running,
            result: self.board.result(),
            scores: self.scores(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerScore {
    pub name: String,
    pub marker: Marker,
    pub wins: u32,
}

/// Both players' win counts, X first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    entries: [PlayerScore; 2],
}

impl Scoreboard {
    pub fn entries(&self) -> &[PlayerScore; 2] {
        &self.entries
    }

    pub fn wins(&self, marker: Marker) -> u32 {
        self.entries[marker.index()].wins
    }

    /// The player ahead on wins, or `None` when level.
    pub fn leader(&self) -> Option<&PlayerScore> {
        let [x, o] = &self.entries;
        match x.wins.cmp(&o.wins) {
            std::cmp::Ordering::Greater => Some(x),
            std::cmp::Ordering::Less => Some(o),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.leader() {
            None => write!(f, "Tied at {} apiece", self.entries[0].wins),
            Some(leader) => {
                let trailing = &self.entries[leader.marker.opponent().index()];
                write!(f, "{} leads {} to {}", leader.name, leader.wins, trailing.wins)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: usize, col: usize) -> Cell {
        Cell::new(row, col).unwrap()
    }

    fn play(game: &mut Match, moves: &[(usize, usize)]) -> Option<Outcome> {
        let mut last = None;
        for &(row, col) in moves {
            last = game.play_round(cell(row, col)).unwrap();
        }
        last
    }

    #[test]
    fn test_new_match_starts_with_x() {
        let game = Match::new("Ada", "Grace");
        assert_eq!(game.active_player().name(), "Ada");
        assert_eq!(game.active_player().marker(), Marker::X);
        assert_eq!(game.rounds_played(), 0);
        assert!(game.is_running());
        assert_eq!(game.policy(), NextStarter::Fixed);
    }

    #[test]
    fn test_accepted_move_toggles_turn() {
        let mut game = Match::new("Ada", "Grace");
        assert_eq!(game.play_round(cell(0, 0)), Ok(None));
        assert_eq!(game.active_player().marker(), Marker::O);
        assert_eq!(game.rounds_played(), 1);
    }

    #[test]
    fn test_occupied_cell_keeps_turn_and_round() {
        let mut game = Match::new("Ada", "Grace");
        game.play_round(cell(1, 1)).unwrap();
        assert_eq!(game.play_round(cell(1, 1)), Ok(None));
        assert_eq!(game.active_player().marker(), Marker::O);
        assert_eq!(game.rounds_played(), 1);
        assert_eq!(game.board().get(cell(1, 1)), Some(Marker::X));
    }

    #[test]
    fn test_win_credits_winner_and_stops_match() {
        let mut game = Match::new("Ada", "Grace");
        let outcome = play(&mut game, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);
        assert_eq!(outcome.and_then(|o| o.winner()), Some(Marker::X));
        assert!(!game.is_running());
        assert_eq!(game.player(Marker::X).wins(), 1);
        assert_eq!(game.player(Marker::O).wins(), 0);
    }

    #[test]
    fn test_tie_credits_nobody() {
        let mut game = Match::new("Ada", "Grace");
        // X O X / O X O / O X O is not reachable with strict alternation,
        // so play out X O X / X O O / O X X instead.
        let outcome = play(
            &mut game,
            &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)],
        );
        assert_eq!(outcome, Some(Outcome::Tie));
        assert_eq!(game.scores().leader(), None);
        assert_eq!(game.scores().to_string(), "Tied at 0 apiece");
    }

    #[test]
    fn test_move_after_finish_is_rejected() {
        let mut game = Match::new("Ada", "Grace");
        play(&mut game, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);
        let rounds = game.rounds_played();
        assert_eq!(game.play_round(cell(2, 0)), Err(GameError::MatchFinished));
        assert_eq!(game.rounds_played(), rounds);
        assert_eq!(game.board().get(cell(2, 0)), None);
    }

    #[test]
    fn test_reset_keeps_scores() {
        let mut game = Match::new("Ada", "Grace").with_policy(NextStarter::Loser);
        let outcome = play(&mut game, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);
        game.reset(outcome.and_then(|o| o.winner()));

        assert!(game.is_running());
        assert_eq!(game.result(), None);
        assert_eq!(game.rounds_played(), 0);
        assert_eq!(game.board().empty_cells().count(), 9);
        assert_eq!(game.active_player().marker(), Marker::O);
        assert_eq!(game.player(Marker::X).wins(), 1);
    }

    #[test]
    fn test_alternate_policy_flips_each_board() {
        let mut game = Match::new("Ada", "Grace").with_policy(NextStarter::Alternate);
        game.reset(None);
        assert_eq!(game.active_player().marker(), Marker::O);
        game.reset(Some(Marker::O));
        assert_eq!(game.active_player().marker(), Marker::X);
    }

    #[test]
    fn test_scoreboard_message_names_leader() {
        let mut game = Match::new("Ada", "Grace").with_policy(NextStarter::Fixed);
        for _ in 0..2 {
            // O takes column 2 while X scatters.
            play(&mut game, &[(0, 0), (0, 2), (1, 0), (1, 2), (2, 1), (2, 2)]);
            game.reset(Some(Marker::O));
        }
        play(&mut game, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);

        let scores = game.scores();
        assert_eq!(scores.wins(Marker::O), 2);
        assert_eq!(scores.wins(Marker::X), 1);
        assert_eq!(scores.leader().map(|p| p.name.as_str()), Some("Grace"));
        assert_eq!(scores.to_string(), "Grace leads 2 to 1");
    }

    #[test]
    fn test_independent_matches_do_not_share_state() {
        let mut first = Match::new("Ada", "Grace");
        let second = Match::new("Alan", "Barbara");
        first.play_round(cell(0, 0)).unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(second.board().get(cell(0, 0)), None);
        assert_eq!(second.rounds_played(), 0);
    }
}

use tic_tac_toe_core::{
    Cell, GameError, Match, MatchSnapshot, MoveRequest, NextStarter, Outcome, Scoreboard,
};
use tracing::{debug, info};

use super::model::Status;

/// Owns the running match on behalf of a front end.
///
/// Front ends hand it raw moves and read back the status line, the scores and
/// the board; every rule decision stays inside [`Match`].
#[derive(Debug, Clone)]
pub struct GameService {
    game: Match,
    last_outcome: Option<Outcome>,
    status: Status,
}

impl GameService {
    pub fn start(name_x: &str, name_o: &str, policy: NextStarter) -> Self {
        let game = Match::new(name_x, name_o).with_policy(policy);
        let status = turn_status(&game);
        info!(match_id = %game.id(), %policy, "Local match ready");

        Self {
            game,
            last_outcome: None,
            status,
        }
    }

    pub fn make_move(&mut self, request: MoveRequest) -> Result<Option<Outcome>, GameError> {
        let cell = Cell::try_from(request)?;
        let mover = self.game.active_player().name().to_string();
        let rounds = self.game.rounds_played();

        let outcome = self.game.play_round(cell)?;

        self.status = match outcome {
            Some(outcome) => {
                self.last_outcome = Some(outcome);
                outcome_status(&self.game, outcome)
            }
            None if self.game.rounds_played() == rounds => Status::CellTaken { name: mover, cell },
            None => turn_status(&self.game),
        };

        debug!("Board after {cell}:\n{}", self.game.board());
        if let Ok(json) = serde_json::to_string(&self.game.snapshot()) {
            debug!(%json, "Match state");
        }

        Ok(outcome)
    }

    /// Clears the board for another round, seeding the opener from the last
    /// finished board.
    pub fn play_again(&mut self) {
        let winner = self.last_outcome.take().and_then(|o| o.winner());
        self.game.reset(winner);
        self.status = turn_status(&self.game);
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn scores(&self) -> Scoreboard {
        self.game.scores()
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        self.game.snapshot()
    }

    pub fn game(&self) -> &Match {
        &self.game
    }
}

fn turn_status(game: &Match) -> Status {
    let player = game.active_player();
    Status::Turn {
        name: player.name().to_string(),
        marker: player.marker(),
    }
}

fn outcome_status(game: &Match, outcome: Outcome) -> Status {
    match outcome {
        Outcome::Win { winner, line } => Status::Won {
            name: game.player(winner).name().to_string(),
            marker: winner,
            line,
        },
        Outcome::Tie => Status::Tie,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tic_tac_toe_core::{Line, Marker};

    fn mv(row: usize, col: usize) -> MoveRequest {
        MoveRequest { row, col }
    }

    fn top_row_for_x(service: &mut GameService) -> Option<Outcome> {
        let mut last = None;
        for (row, col) in [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)] {
            last = service.make_move(mv(row, col)).unwrap();
        }
        last
    }

    #[test]
    fn status_follows_turns() {
        let mut service = GameService::start("Ada", "Grace", NextStarter::Fixed);
        assert_eq!(service.status().to_string(), "🕐 Ada's turn (X)");
        service.make_move(mv(1, 1)).unwrap();
        assert_eq!(service.status().to_string(), "🕐 Grace's turn (O)");
    }

    #[test]
    fn taken_cell_is_reported_to_the_same_player() {
        let mut service = GameService::start("Ada", "Grace", NextStarter::Fixed);
        service.make_move(mv(1, 1)).unwrap();
        assert_eq!(service.make_move(mv(1, 1)), Ok(None));
        assert_eq!(
            service.status(),
            &Status::CellTaken {
                name: "Grace".to_string(),
                cell: Cell::new(1, 1).unwrap()
            }
        );
        assert_eq!(service.game().active_player().marker(), Marker::O);
    }

    #[test]
    fn out_of_range_move_is_an_error() {
        let mut service = GameService::start("Ada", "Grace", NextStarter::Fixed);
        assert_eq!(
            service.make_move(mv(0, 3)),
            Err(GameError::OutOfBounds { row: 0, col: 3 })
        );
        assert_eq!(service.game().rounds_played(), 0);
    }

    #[test]
    fn win_updates_status_and_scores() {
        let mut service = GameService::start("Ada", "Grace", NextStarter::Fixed);
        let outcome = top_row_for_x(&mut service);
        assert_eq!(outcome.and_then(|o| o.line()), Some(Line::row(0).unwrap()));
        assert!(service.status().is_finished());
        assert_eq!(service.status().to_string(), "🏆 Ada (X) wins on row 0!");
        assert_eq!(service.scores().to_string(), "Ada leads 1 to 0");
    }

    #[test]
    fn play_again_applies_the_rematch_policy() {
        let mut service = GameService::start("Ada", "Grace", NextStarter::Loser);
        top_row_for_x(&mut service);
        service.play_again();

        assert!(!service.status().is_finished());
        assert_eq!(service.game().active_player().name(), "Grace");
        assert!(service.snapshot().running);
        assert_eq!(service.snapshot().scores.wins(Marker::X), 1);
    }
}

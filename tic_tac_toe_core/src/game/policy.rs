use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{error::GameError, models::Marker};

/// Who opens the next board after a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NextStarter {
    /// The previous winner opens.
    Winner,
    /// The previous loser opens.
    Loser,
    /// X always opens.
    #[default]
    Fixed,
    /// The opening move passes to the other player every board.
    Alternate,
}

impl NextStarter {
    /// Picks the opening marker for the next board.
    ///
    /// Without a winner (a tie, or a reset mid-board) `Winner` and `Loser`
    /// hand the opening move to X.
    pub fn starter(self, previous_starter: Marker, winner: Option<Marker>) -> Marker {
        match self {
            NextStarter::Winner => winner.unwrap_or(Marker::X),
            NextStarter::Loser => winner.map(Marker::opponent).unwrap_or(Marker::X),
            NextStarter::Fixed => Marker::X,
            NextStarter::Alternate => previous_starter.opponent(),
        }
    }
}

impl FromStr for NextStarter {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winner" => Ok(NextStarter::Winner),
            "loser" => Ok(NextStarter::Loser),
            "fixed" => Ok(NextStarter::Fixed),
            "alternate" => Ok(NextStarter::Alternate),
            _ => Err(GameError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for NextStarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NextStarter::Winner => "winner",
            NextStarter::Loser => "loser",
            NextStarter::Fixed => "fixed",
            NextStarter::Alternate => "alternate",
        };
        f.write_str(name)
    }
}

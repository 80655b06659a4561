use anyhow::{Context, Result};
use std::env;
use tic_tac_toe_core::NextStarter;

const PLAYER_X_VAR: &str = "TTT_PLAYER_X";
const PLAYER_O_VAR: &str = "TTT_PLAYER_O";
const NEXT_STARTER_VAR: &str = "TTT_NEXT_STARTER";
const LOG_VAR: &str = "TTT_LOG";

/// Start-up settings, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub player_x: String,
    pub player_o: String,
    pub next_starter: NextStarter,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let next_starter = match lookup(NEXT_STARTER_VAR) {
            Some(value) => value
                .parse()
                .with_context(|| format!("invalid {NEXT_STARTER_VAR}"))?,
            None => NextStarter::default(),
        };

        Ok(AppConfig {
            player_x: lookup(PLAYER_X_VAR).unwrap_or_default(),
            player_o: lookup(PLAYER_O_VAR).unwrap_or_default(),
            next_starter,
            log_filter: lookup(LOG_VAR).unwrap_or_else(|| "info".to_string()),
        })
    }
}

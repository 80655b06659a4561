mod config;
mod console;
mod game_app;
mod game_service;

use anyhow::{anyhow, Result};
use std::{env, io};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{config::AppConfig, game_app::GameApp};

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(io::stderr)
        .init();

    if env::args().nth(1).as_deref() == Some("console") {
        info!("Starting console match");
        match console::run(&config, io::stdin().lock(), io::stdout().lock())? {
            Some(scores) => info!(%scores, "Console match over"),
            None => info!("Input closed before a match started"),
        }
        return Ok(());
    }

    info!(policy = %config.next_starter, "Starting window");
    eframe::run_native(
        "Tic-Tac-Toe",
        eframe::NativeOptions::default(),
        Box::new(|_cc| Ok(Box::new(GameApp::new(config)))),
    )
    .map_err(|e| anyhow!("window failed: {e}"))
}

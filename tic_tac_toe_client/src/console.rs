use anyhow::Result;
use std::io::{BufRead, Write};
use tic_tac_toe_core::{GameError, MoveRequest, Scoreboard};
use tracing::{info, warn};

use crate::{config::AppConfig, game_service::GameService};

/// Plays boards over a line-based terminal until the input runs out or the
/// players decline a rematch.
///
/// Returns the final scores, or `None` if the input closed before both
/// players were named.
pub fn run<R: BufRead, W: Write>(
    config: &AppConfig,
    mut input: R,
    mut output: W,
) -> Result<Option<Scoreboard>> {
    let Some(name_x) = ask_name(&mut input, &mut output, &config.player_x, "X")? else {
        return Ok(None);
    };
    let Some(name_o) = ask_name(&mut input, &mut output, &config.player_o, "O")? else {
        return Ok(None);
    };

    let mut service = GameService::start(&name_x, &name_o, config.next_starter);

    loop {
        writeln!(output, "\n{}\n", service.game().board())?;
        writeln!(output, "{}", service.status())?;

        if service.status().is_finished() {
            writeln!(output, "{}", service.scores())?;
            match prompt(&mut input, &mut output, "Play again? [y/N] ")? {
                Some(answer) if answer.eq_ignore_ascii_case("y") => {
                    service.play_again();
                    continue;
                }
                _ => break,
            }
        }

        let marker = service.game().active_player().marker();
        let text = format!("{marker} Enter a row and column [0-2]: ");
        let Some(line) = prompt(&mut input, &mut output, &text)? else {
            info!("Input closed, leaving the match");
            break;
        };

        let played = MoveRequest::parse(&line).and_then(|request| service.make_move(request));
        match played {
            Ok(_) => {}
            Err(err @ (GameError::InvalidMove(_) | GameError::OutOfBounds { .. })) => {
                warn!(input = %line, "Move not understood");
                writeln!(output, "{err}")?;
            }
            Err(err) => return Err(err.into()),
        }
    }

    writeln!(output, "Gameover. {}", service.scores())?;
    Ok(Some(service.scores()))
}

fn ask_name<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    preset: &str,
    marker: &str,
) -> Result<Option<String>> {
    if !preset.trim().is_empty() {
        return Ok(Some(preset.to_string()));
    }
    prompt(input, output, &format!("Name for {marker}: "))
}

/// `None` once the input is exhausted.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

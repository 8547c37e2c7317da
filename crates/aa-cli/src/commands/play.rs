use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use aa_dice::LoadedRollEngine;
use aa_session::{DemoSession, Screen, SessionConfig, SessionStore};

use super::Interrupts;
use crate::display::TerminalDisplay;

pub fn run(state: &Path, seed: Option<u64>) -> Result<(), String> {
    let config = SessionConfig::default()
        .with_state_path(state)
        .with_seed(seed);
    let engine = LoadedRollEngine::new(config.engine_config()).map_err(|e| e.to_string())?;
    let session = DemoSession::restore(SessionStore::open(&config.state_path));
    let rt = super::runtime()?;

    let outcome = rt.block_on(repl(engine, session));
    // A stdin read may still be parked on the blocking pool.
    rt.shutdown_background();
    outcome
}

async fn repl(mut engine: LoadedRollEngine, mut session: DemoSession) -> Result<(), String> {
    println!("  {} Anchor & Adjust", "Starting".bold());
    println!("  Type 'help' for commands, 'quit' to exit.\n");
    if session.screen() == Screen::QuestionDisplay {
        println!("{}\n", session.question().text);
    } else {
        println!("{}\n", session.process("questions").map_err(|e| e.to_string())?);
    }

    let mut interrupts = Interrupts::listen();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        let line = tokio::select! {
            line = lines.next_line() => line.map_err(|e| e.to_string())?,
            () = interrupts.next() => {
                println!();
                tracing::debug!("interrupted at the prompt");
                break;
            }
        };
        let Some(line) = line else {
            break; // EOF
        };

        let input = line.trim();
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }

        if input.eq_ignore_ascii_case("roll") {
            let mut handle = match session.start_roll(&mut engine, TerminalDisplay::new(false)) {
                Ok(handle) => handle,
                Err(e) => {
                    println!("{}\n", e.to_string().yellow());
                    continue;
                }
            };
            match super::await_roll(&mut handle, &mut interrupts).await {
                Some(result) => {
                    super::print_result(&result);
                    session.finish_roll(result).map_err(|e| e.to_string())?;
                    println!("  Type 'done' to hide the results.\n");
                }
                None => {
                    session.cancel_roll().map_err(|e| e.to_string())?;
                    println!("{}\n", "Roll cancelled.".yellow());
                }
            }
            continue;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    Ok(())
}

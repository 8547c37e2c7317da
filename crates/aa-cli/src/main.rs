//! CLI frontend for the Anchor & Adjust loaded dice demo.

mod commands;
mod display;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use aa_dice::Anchor;
use aa_session::config::DEFAULT_STATE_PATH;

#[derive(Parser)]
#[command(
    name = "aa",
    about = "Anchor & Adjust: loaded dice for estimation sessions",
    version,
    propagate_version = true
)]
struct Cli {
    /// Session state file
    #[arg(long, global = true, env = "AA_STATE", default_value = DEFAULT_STATE_PATH)]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the estimation questions
    Questions,

    /// Select a question and show it
    Select {
        /// Question id (e.g. q1)
        id: String,
    },

    /// Show the selected question and the last roll
    Show,

    /// Roll the loaded dice
    Roll {
        /// Anchor to load the dice toward: low or high
        #[arg(short, long)]
        anchor: Anchor,

        /// Milliseconds between animation frames
        #[arg(long, default_value = "80")]
        tick_ms: u64,

        /// Milliseconds until the result is revealed
        #[arg(long, default_value = "1200")]
        duration_ms: u64,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,

        /// Skip the animation frames
        #[arg(short, long)]
        quiet: bool,
    },

    /// Walk through the whole demo interactively
    Play {
        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Forget the selected question and the last roll
    Reset,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("AA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let state = cli.state;

    let result = match cli.command {
        Commands::Questions => commands::questions::run(&state),
        Commands::Select { id } => commands::select::run(&state, &id),
        Commands::Show => commands::show::run(&state),
        Commands::Roll {
            anchor,
            tick_ms,
            duration_ms,
            seed,
            quiet,
        } => commands::roll::run(&state, anchor, tick_ms, duration_ms, seed, quiet),
        Commands::Play { seed } => commands::play::run(&state, seed),
        Commands::Reset => commands::reset::run(&state),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

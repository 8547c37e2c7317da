use std::path::Path;

use colored::Colorize;

use aa_dice::{Anchor, AnimationConfig, EngineConfig, LoadedRollEngine};

use crate::display::TerminalDisplay;

pub fn run(
    state: &Path,
    anchor: Anchor,
    tick_ms: u64,
    duration_ms: u64,
    seed: Option<u64>,
    quiet: bool,
) -> Result<(), String> {
    let config = EngineConfig {
        seed,
        animation: AnimationConfig::from_millis(tick_ms, duration_ms),
    };
    let mut engine = LoadedRollEngine::new(config).map_err(|e| e.to_string())?;
    let rt = super::runtime()?;

    if !quiet {
        println!("  {} the dice ({anchor} anchor)...", "Rolling".bold());
    }
    let outcome = rt.block_on(async {
        let mut interrupts = super::Interrupts::listen();
        let mut handle = engine.roll(anchor, TerminalDisplay::new(quiet));
        super::await_roll(&mut handle, &mut interrupts).await
    });
    let result = outcome.ok_or("roll cancelled")?;

    tracing::debug!(path = %state.display(), %result, "saving roll");
    super::open_store(state).save_roll(&result);
    super::print_result(&result);
    Ok(())
}

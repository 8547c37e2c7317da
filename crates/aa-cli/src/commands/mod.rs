pub mod play;
pub mod questions;
pub mod reset;
pub mod roll;
pub mod select;
pub mod show;

use std::path::Path;

use colored::Colorize;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use aa_dice::{RollHandle, RollResult};
use aa_session::SessionStore;

/// Single-threaded runtime that drives the roll animation.
fn runtime() -> Result<Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))
}

fn open_store(state: &Path) -> SessionStore {
    SessionStore::open(state)
}

/// Ctrl-C presses, queued until someone asks for them.
///
/// Once tokio registers its SIGINT handler the default one is gone for good,
/// so every blocking wait in a command must also listen here.
struct Interrupts(mpsc::UnboundedReceiver<()>);

impl Interrupts {
    /// Start listening. Must be called inside the runtime.
    fn listen() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        Self(rx)
    }

    /// Next Ctrl-C. Pends forever if the handler could not be installed.
    async fn next(&mut self) {
        if self.0.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}

/// Wait for a roll to resolve, cancelling it on Ctrl-C.
async fn await_roll(handle: &mut RollHandle, interrupts: &mut Interrupts) -> Option<RollResult> {
    tokio::select! {
        result = handle.resolved() => return result,
        () = interrupts.next() => {}
    }
    if handle.stop() {
        return None;
    }
    // Resolved just before the interrupt landed.
    handle.resolved().await
}

fn print_result(result: &RollResult) {
    println!(
        "  {} {} + {} = {}",
        "Result:".bold(),
        result.face1(),
        result.face2(),
        result.total().to_string().bold()
    );
}

//! Terminal rendering of roll animations.

use std::io::{self, Write};

use colored::Colorize;

use aa_dice::{RollDisplay, RollResult, TickFrame};

/// Redraws the two dice in place on every frame.
pub struct TerminalDisplay {
    quiet: bool,
}

impl TerminalDisplay {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    fn draw(&self, face1: u32, face2: u32) {
        let mut out = io::stdout().lock();
        // Terminal write failures only cost a frame.
        let _ = write!(out, "\r  [ {face1} ] [ {face2} ]");
        let _ = out.flush();
    }
}

impl RollDisplay for TerminalDisplay {
    fn tick(&mut self, frame: TickFrame) {
        if !self.quiet {
            self.draw(frame.face1, frame.face2);
        }
    }

    fn resolved(&mut self, result: &RollResult) {
        if self.quiet {
            return;
        }
        let dice = format!("[ {} ] [ {} ]", result.face1(), result.face2());
        println!("\r  {}", dice.bold());
    }
}

//! Loaded two-dice roll engine for the Anchor & Adjust demo.
//!
//! Picks a total biased toward the chosen anchor, splits it into a pair of
//! die faces, and plays a cancellable timed animation of fair-looking faces
//! before revealing the fixed result.

pub mod anchor;
pub mod animation;
pub mod config;
pub mod dice;
pub mod engine;
pub mod error;
pub mod weighted;

pub use anchor::Anchor;
pub use animation::{RollDisplay, RollHandle, RollPhase, TickFrame};
pub use config::{AnimationConfig, EngineConfig};
pub use dice::{DieFace, RollResult, Total, decompose_total};
pub use engine::{LoadedRollEngine, pick_biased_total, resolve_roll};
pub use error::{DiceError, DiceResult};
pub use weighted::{WeightedOption, validate_weights, weighted_pick};

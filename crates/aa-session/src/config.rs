//! Configuration for a demo session.

use std::path::PathBuf;

use aa_dice::{AnimationConfig, EngineConfig};

/// Default location of the state file, relative to the working directory.
pub const DEFAULT_STATE_PATH: &str = ".anchor-adjust/state.json";

/// Configuration for a demo session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Where session state is persisted.
    pub state_path: PathBuf,
    /// RNG seed for reproducible rolls.
    pub seed: Option<u64>,
    /// Roll animation timing.
    pub animation: AnimationConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            seed: None,
            animation: AnimationConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Set the state file location.
    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = path.into();
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set the animation timing.
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// The engine configuration derived from this session config.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            seed: self.seed,
            animation: self.animation,
        }
    }
}

//! Configuration for the loaded roll engine.

use std::time::Duration;

use crate::error::{DiceError, DiceResult};

/// Default delay between animation frames.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Default length of the roll animation.
pub const DEFAULT_TOTAL_DURATION: Duration = Duration::from_millis(1200);

/// Timing of the roll animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Delay between consecutive frames.
    pub tick_interval: Duration,
    /// Time from the start of the roll until the result is revealed.
    pub total_duration: Duration,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            total_duration: DEFAULT_TOTAL_DURATION,
        }
    }
}

impl AnimationConfig {
    /// Build a timing from millisecond values.
    pub fn from_millis(tick_interval_ms: u64, total_duration_ms: u64) -> Self {
        Self {
            tick_interval: Duration::from_millis(tick_interval_ms),
            total_duration: Duration::from_millis(total_duration_ms),
        }
    }

    /// Set the delay between frames.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Reject timings that cannot drive an animation.
    pub fn validate(&self) -> DiceResult<()> {
        if self.tick_interval.is_zero() {
            return Err(DiceError::InvalidTiming(
                "tick interval must be greater than zero".into(),
            ));
        }
        if self.frames().is_none() {
            return Err(DiceError::InvalidTiming(format!(
                "{} ms at {} ms per tick needs more than {} ticks",
                self.total_duration.as_millis(),
                self.tick_interval.as_millis(),
                u32::MAX
            )));
        }
        Ok(())
    }

    /// Number of frames shown before the result.
    ///
    /// The last frame lands at or after `total_duration`, and there is always
    /// at least one. Zero for timings that [`validate`](Self::validate) rejects.
    pub fn tick_count(&self) -> u32 {
        self.frames().unwrap_or(0)
    }

    fn frames(&self) -> Option<u32> {
        let tick = self.tick_interval.as_nanos();
        if tick == 0 {
            return None;
        }
        let ticks = self.total_duration.as_nanos().div_ceil(tick).max(1);
        u32::try_from(ticks).ok()
    }

    /// Time at which the final frame fires, measured from the roll start.
    pub fn resolve_after(&self) -> Duration {
        self.tick_interval.saturating_mul(self.tick_count())
    }
}

/// Configuration for a [`LoadedRollEngine`](crate::LoadedRollEngine).
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// RNG seed for reproducible rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Timing used by [`LoadedRollEngine::roll`](crate::LoadedRollEngine::roll).
    pub animation: AnimationConfig,
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the default animation timing.
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }
}

//! The loaded roll engine.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::anchor::Anchor;
use crate::animation::{RollDisplay, RollHandle, spawn_roll};
use crate::config::{AnimationConfig, EngineConfig};
use crate::dice::{self, DieFace, RollResult, Total};
use crate::error::DiceResult;
use crate::weighted::weighted_pick;

/// Pick a total from the anchor's weighted table.
pub fn pick_biased_total<R: Rng + ?Sized>(anchor: Anchor, rng: &mut R) -> Total {
    weighted_pick(anchor.table(), rng)
        .copied()
        .unwrap_or(anchor.anchor_point())
}

/// Compute a loaded outcome: a biased total split into two faces.
pub fn resolve_roll<R: Rng + ?Sized>(anchor: Anchor, rng: &mut R) -> RollResult {
    let total = pick_biased_total(anchor, rng);
    let (face1, face2) = dice::decompose_total(total, rng);
    RollResult::new(face1, face2, anchor)
}

/// Produces loaded rolls biased toward an anchor.
///
/// Only one roll should be in flight per engine; callers must not start a
/// new roll while a previous [`RollHandle`] is still animating.
#[derive(Debug)]
pub struct LoadedRollEngine {
    rng: StdRng,
    animation: AnimationConfig,
}

impl LoadedRollEngine {
    /// Create an engine from a configuration.
    pub fn new(config: EngineConfig) -> DiceResult<Self> {
        config.animation.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            rng,
            animation: config.animation,
        })
    }

    /// Pick a biased total for `anchor`.
    pub fn pick_biased_total(&mut self, anchor: Anchor) -> Total {
        pick_biased_total(anchor, &mut self.rng)
    }

    /// Split `total` into a uniformly chosen pair of faces.
    pub fn decompose_total(&mut self, total: Total) -> (DieFace, DieFace) {
        dice::decompose_total(total, &mut self.rng)
    }

    /// Resolve a roll immediately, without animation.
    pub fn roll_now(&mut self, anchor: Anchor) -> RollResult {
        resolve_roll(anchor, &mut self.rng)
    }

    /// Start an animated roll with explicit timing.
    ///
    /// Frames go to `display` every `tick_interval`; the result is revealed
    /// once `total_duration` has elapsed. Fails for a zero tick interval or a
    /// timing that needs more frames than fit in a `u32`.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn animate_and_resolve<D: RollDisplay>(
        &mut self,
        anchor: Anchor,
        tick_interval: Duration,
        total_duration: Duration,
        display: D,
    ) -> DiceResult<RollHandle> {
        let timing = AnimationConfig {
            tick_interval,
            total_duration,
        };
        timing.validate()?;
        Ok(self.spawn(anchor, timing, display))
    }

    /// Start an animated roll with the engine's configured timing.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn roll<D: RollDisplay>(&mut self, anchor: Anchor, display: D) -> RollHandle {
        self.spawn(anchor, self.animation, display)
    }

    fn spawn<D: RollDisplay>(
        &mut self,
        anchor: Anchor,
        timing: AnimationConfig,
        display: D,
    ) -> RollHandle {
        let rng = StdRng::from_rng(&mut self.rng);
        tracing::debug!(%anchor, ticks = timing.tick_count(), "starting roll");
        spawn_roll(anchor, timing, rng, display)
    }
}

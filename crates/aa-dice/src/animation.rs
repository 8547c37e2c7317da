//! Timed roll animation with a cancellable handle.
//!
//! A roll runs as a tokio task. Each tick shows a fair random pair of faces
//! through a [`RollDisplay`]; after the last tick the loaded outcome is
//! computed and sent once over a oneshot channel. Frames are never outcomes.

use rand::rngs::StdRng;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::anchor::Anchor;
use crate::config::AnimationConfig;
use crate::dice::{DieFace, RollResult, fair_pair};
use crate::engine::resolve_roll;

/// Where a single roll is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollPhase {
    /// Spawned but not yet started.
    Idle,
    /// Showing animation frames.
    Animating,
    /// The outcome has been delivered.
    Resolved,
}

/// One transient animation frame. Carries no meaning beyond display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickFrame {
    /// 1-based frame number.
    pub tick: u32,
    /// Face shown on the first die.
    pub face1: DieFace,
    /// Face shown on the second die.
    pub face2: DieFace,
}

/// Receives animation frames and the final result of a roll.
pub trait RollDisplay: Send + 'static {
    /// Show a transient frame.
    fn tick(&mut self, frame: TickFrame);

    /// Show the final result. Called at most once per roll.
    fn resolved(&mut self, _result: &RollResult) {}
}

/// Discards everything.
impl RollDisplay for () {
    fn tick(&mut self, _frame: TickFrame) {}
}

/// Owned handle to an in-flight roll.
///
/// Dropping the handle cancels the roll if it is still animating.
#[derive(Debug)]
pub struct RollHandle {
    anchor: Anchor,
    task: JoinHandle<()>,
    result_rx: Option<oneshot::Receiver<RollResult>>,
    phase_rx: watch::Receiver<RollPhase>,
    ready: Option<RollResult>,
    stopped: bool,
}

impl RollHandle {
    /// The anchor this roll was started with.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RollPhase {
        *self.phase_rx.borrow()
    }

    /// Whether [`stop`](Self::stop) cancelled this roll.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Cancel the roll if it has not resolved yet.
    ///
    /// Returns `true` if a running roll was cancelled. A cancelled roll never
    /// delivers a result and never reaches its display. Stopping a roll whose
    /// result was already sent does nothing; the result stays collectable.
    pub fn stop(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        let Some(rx) = self.result_rx.as_mut() else {
            return false;
        };
        // Closing first makes the task's send fail if it has not happened yet.
        rx.close();
        if let Ok(result) = rx.try_recv() {
            self.result_rx = None;
            self.ready = Some(result);
            return false;
        }
        self.task.abort();
        self.stopped = true;
        tracing::debug!(anchor = %self.anchor, "roll cancelled");
        true
    }

    /// Wait for the outcome.
    ///
    /// Yields the result exactly once. Returns `None` if the roll was
    /// cancelled, or if the result was already taken.
    pub async fn resolved(&mut self) -> Option<RollResult> {
        if self.stopped {
            return None;
        }
        if let Some(result) = self.ready.take() {
            return Some(result);
        }
        let rx = self.result_rx.as_mut()?;
        let outcome = rx.await.ok();
        self.result_rx = None;
        outcome
    }
}

impl Drop for RollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn the animation task for one roll.
///
/// # Panics
///
/// Panics when called outside a tokio runtime.
pub(crate) fn spawn_roll<D: RollDisplay>(
    anchor: Anchor,
    timing: AnimationConfig,
    mut rng: StdRng,
    mut display: D,
) -> RollHandle {
    let (result_tx, result_rx) = oneshot::channel();
    let (phase_tx, phase_rx) = watch::channel(RollPhase::Idle);
    let ticks = timing.tick_count();

    let task = tokio::spawn(async move {
        phase_tx.send_replace(RollPhase::Animating);
        tracing::debug!(%anchor, ticks, "roll animating");

        let start = Instant::now();
        let mut interval = time::interval_at(start + timing.tick_interval, timing.tick_interval);
        for tick in 1..=ticks {
            interval.tick().await;
            let (face1, face2) = fair_pair(&mut rng);
            display.tick(TickFrame { tick, face1, face2 });
        }

        let result = resolve_roll(anchor, &mut rng);
        let shown = result.clone();
        if result_tx.send(result).is_err() {
            tracing::debug!(%anchor, "roll resolved after cancellation, dropping result");
            return;
        }
        phase_tx.send_replace(RollPhase::Resolved);
        tracing::debug!(%anchor, result = %shown, elapsed_ms = start.elapsed().as_millis() as u64, "roll resolved");
        display.resolved(&shown);
    });

    RollHandle {
        anchor,
        task,
        result_rx: Some(result_rx),
        phase_rx,
        ready: None,
        stopped: false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use rand::SeedableRng;

    use super::*;

    #[derive(Default)]
    struct Recorded {
        frames: Vec<(TickFrame, Instant)>,
        results: Vec<RollResult>,
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Recorded>>);

    impl RollDisplay for Recorder {
        fn tick(&mut self, frame: TickFrame) {
            self.0.lock().unwrap().frames.push((frame, Instant::now()));
        }

        fn resolved(&mut self, result: &RollResult) {
            self.0.lock().unwrap().results.push(result.clone());
        }
    }

    fn spawn(anchor: Anchor, timing: AnimationConfig, display: Recorder) -> RollHandle {
        spawn_roll(anchor, timing, StdRng::seed_from_u64(5), display)
    }

    #[tokio::test(start_paused = true)]
    async fn frames_are_evenly_spaced() {
        let recorder = Recorder::default();
        let start = Instant::now();
        let mut handle = spawn(Anchor::Low, AnimationConfig::default(), recorder.clone());
        assert!(handle.resolved().await.is_some());

        let recorded = recorder.0.lock().unwrap();
        assert_eq!(recorded.frames.len(), 15);
        for (i, (frame, at)) in recorded.frames.iter().enumerate() {
            assert_eq!(frame.tick as usize, i + 1);
            let due = Duration::from_millis(80) * frame.tick;
            let elapsed = *at - start;
            assert!(elapsed >= due && elapsed < due + Duration::from_millis(5));
            assert!((1..=6).contains(&frame.face1));
            assert!((1..=6).contains(&frame.face2));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn display_sees_result_once() {
        let recorder = Recorder::default();
        let mut handle = spawn(Anchor::High, AnimationConfig::default(), recorder.clone());
        let result = handle.resolved().await.unwrap();
        assert_eq!(handle.phase(), RollPhase::Resolved);

        let recorded = recorder.0.lock().unwrap();
        assert_eq!(recorded.results, vec![result]);
    }

    #[tokio::test(start_paused = true)]
    async fn result_is_taken_once() {
        let mut handle = spawn(Anchor::Low, AnimationConfig::from_millis(10, 30), Recorder::default());
        assert!(handle.resolved().await.is_some());
        assert!(handle.resolved().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn phase_moves_to_animating() {
        let handle = spawn(Anchor::Low, AnimationConfig::default(), Recorder::default());
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(handle.phase(), RollPhase::Animating);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_mid_roll_suppresses_result() {
        let recorder = Recorder::default();
        let mut handle = spawn(Anchor::High, AnimationConfig::default(), recorder.clone());
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert!(handle.stop());
        assert!(handle.is_stopped());
        assert!(!handle.stop());
        assert!(handle.resolved().await.is_none());

        tokio::time::sleep(Duration::from_millis(2000)).await;
        let recorded = recorder.0.lock().unwrap();
        assert!(recorded.results.is_empty());
        assert!(recorded.frames.len() < 15);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_after_resolve_is_noop() {
        let mut handle = spawn(Anchor::Low, AnimationConfig::from_millis(10, 20), Recorder::default());
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(handle.phase(), RollPhase::Resolved);
        assert!(!handle.stop());
        assert!(handle.resolved().await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_cancels() {
        let recorder = Recorder::default();
        let handle = spawn(Anchor::Low, AnimationConfig::default(), recorder.clone());
        tokio::time::sleep(Duration::from_millis(200)).await;
        drop(handle);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert!(recorder.0.lock().unwrap().results.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn stop_and_display_agree_across_threads() {
        for i in 0..100u64 {
            let recorder = Recorder::default();
            let mut handle = spawn(Anchor::Low, AnimationConfig::from_millis(1, 2), recorder.clone());
            tokio::time::sleep(Duration::from_micros(1500 + (i % 10) * 100)).await;
            let cancelled = handle.stop();
            let delivered = handle.resolved().await;

            tokio::time::sleep(Duration::from_millis(10)).await;
            let shown = recorder.0.lock().unwrap().results.clone();
            if cancelled {
                assert!(delivered.is_none());
                assert!(shown.is_empty(), "cancelled roll reached the display");
                assert_ne!(handle.phase(), RollPhase::Resolved);
            } else {
                let delivered = delivered.expect("uncancelled roll must deliver");
                assert_eq!(shown, vec![delivered]);
            }
        }
    }
}

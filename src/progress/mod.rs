//! Progress polling for in-flight synthesis jobs.
//!
//! [`ProgressTracker`] runs a cancellable background task that calls a fetch
//! function on a fixed period and keeps the latest `(current, total)` pair.
//! Poll failures are logged and dropped; the previous reading is kept.
//!
//! Every run is tagged with a generation number. [`ProgressTracker::stop`]
//! bumps the generation under the state lock, so a fetch that resolves after
//! `stop` returns is discarded even if the task was not yet cancelled.

use crate::{Error, Result};
use futures::Future;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Chunk counters reported by the backend. `total == 0` means not yet known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub current: u64,
    #[serde(default)]
    pub total: u64,
}

impl Progress {
    pub const UNKNOWN: Progress = Progress {
        current: 0,
        total: 0,
    };

    pub fn new(current: u64, total: u64) -> Self {
        Self { current, total }
    }

    pub fn is_known(&self) -> bool {
        self.total > 0
    }

    /// Completion percentage for display, clamped to 100. The server does not
    /// guarantee `current <= total`.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.current as f64 / self.total as f64 * 100.0).round();
        pct.min(100.0) as u8
    }
}

/// Tick counters, mainly for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerStats {
    pub applied: u64,
    pub failed: u64,
    pub discarded: u64,
}

#[derive(Debug, Default)]
struct TrackerState {
    progress: Progress,
    generation: u64,
    running: bool,
    stats: TrackerStats,
}

type Shared = Arc<Mutex<TrackerState>>;

fn lock(shared: &Shared) -> MutexGuard<'_, TrackerState> {
    shared.lock().unwrap_or_else(|e| e.into_inner())
}

struct PollTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct ProgressTracker {
    shared: Shared,
    task: Mutex<Option<PollTask>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(TrackerState::default())),
            task: Mutex::new(None),
        }
    }

    /// Begin polling `fetch` every `period`, first call one period from now.
    ///
    /// A run already in progress is stopped first. Must be called from within
    /// a tokio runtime.
    pub fn start<F, Fut>(&self, period: Duration, fetch: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Progress>> + Send + 'static,
    {
        self.stop();

        let generation = {
            let mut state = lock(&self.shared);
            state.generation += 1;
            state.running = true;
            state.generation
        };

        let token = CancellationToken::new();
        let handle = tokio::spawn(poll_loop(
            Arc::clone(&self.shared),
            generation,
            token.clone(),
            period.max(Duration::from_millis(1)),
            fetch,
        ));
        debug!(generation, period_ms = period.as_millis() as u64, "progress polling started");

        *self.task.lock().unwrap_or_else(|e| e.into_inner()) = Some(PollTask { token, handle });
    }

    /// Cancel pending and future ticks. Safe to call repeatedly or without a prior `start`.
    pub fn stop(&self) {
        {
            let mut state = lock(&self.shared);
            if state.running {
                state.generation += 1;
                state.running = false;
                debug!(generation = state.generation, "progress polling stopped");
            }
        }
        if let Some(task) = self.task.lock().unwrap_or_else(|e| e.into_inner()).take() {
            task.token.cancel();
            task.handle.abort();
        }
    }

    /// Forget the last reading, back to `(0, 0)`.
    pub fn reset(&self) {
        lock(&self.shared).progress = Progress::UNKNOWN;
    }

    pub fn current(&self) -> Progress {
        lock(&self.shared).progress
    }

    pub fn is_running(&self) -> bool {
        lock(&self.shared).running
    }

    pub fn stats(&self) -> TrackerStats {
        lock(&self.shared).stats
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop<F, Fut>(
    shared: Shared,
    generation: u64,
    token: CancellationToken,
    period: Duration,
    fetch: F,
) where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Progress>> + Send + 'static,
{
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let outcome = tokio::select! {
            _ = token.cancelled() => break,
            outcome = fetch() => outcome,
        };

        if !record_tick(&shared, generation, outcome) {
            break;
        }
    }
}

/// Apply one tick's outcome. Returns `false` if the run was stopped meanwhile.
fn record_tick(shared: &Shared, generation: u64, outcome: Result<Progress>) -> bool {
    let mut state = lock(shared);
    if state.generation != generation {
        state.stats.discarded += 1;
        debug!(generation, "late progress tick discarded");
        return false;
    }
    match outcome {
        Ok(progress) => {
            state.progress = progress;
            state.stats.applied += 1;
            debug!(current = progress.current, total = progress.total, "progress tick");
        }
        Err(e) => {
            state.stats.failed += 1;
            let err = Error::ProgressPollFailed {
                message: e.to_string(),
            };
            warn!(error = %err, "keeping last progress reading");
        }
    }
    true
}

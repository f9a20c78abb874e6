//! Simulated scan progress.
//!
//! The scan service gives no progress feedback, so while a request is in
//! flight a background task nudges the published progress forward by a random
//! step on every tick. It never reaches 100; only a completed scan does.

use rand::{Rng as _, SeedableRng as _, rngs::StdRng};
use std::time::Duration;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, interval_at},
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{config::ProgressConfig, model::ScanSession};

/// Next progress value: grows by `step`, never past `cap`, never backwards.
pub fn advance(current: u8, step: u8, cap: u8) -> u8 {
    current.saturating_add(step).min(cap).max(current)
}

/// Handle to a running progress task. Dropping it detaches the task.
pub struct ProgressSimulator {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ProgressSimulator {
    pub fn attach(state: watch::Sender<ScanSession>, config: &ProgressConfig) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let config = config.clone();

        debug!(interval_ms = config.interval_ms, "progress simulator attached");

        let task = tokio::spawn(async move {
            let mut rng = StdRng::from_os_rng();
            let period = config.interval().max(Duration::from_millis(1));
            let (low, high) = (
                config.min_step.min(config.max_step),
                config.min_step.max(config.max_step),
            );
            let mut ticker = interval_at(Instant::now() + period, period);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let step = rng.random_range(low..=high);

                        state.send_if_modified(|session| {
                            if !session.is_scanning() {
                                return false;
                            }

                            let next = advance(session.progress, step, config.cap);
                            let changed = next != session.progress;
                            session.progress = next;
                            changed
                        });
                    }
                }
            }

            debug!("progress simulator stopped");
        });

        Self {
            cancel,
            task: Some(task),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.task.is_some()
    }

    /// Stops all further advancement. Calling it again is harmless.
    pub fn detach(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };

        self.cancel.cancel();
        task.abort();

        debug!("progress simulator detached");
    }
}

impl Drop for ProgressSimulator {
    fn drop(&mut self) {
        self.detach();
    }
}

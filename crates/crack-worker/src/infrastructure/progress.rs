//! Cosmetic "still searching" indicator.
//!
//! While the engine occupies a blocking thread, a small Tokio task logs the
//! elapsed time every few seconds.  It owns nothing but its start [`Instant`]
//! and a `oneshot` stop receiver, so it cannot observe or disturb the search.
//! [`ProgressIndicator::stop`] signals the task and waits for it to finish,
//! which guarantees no progress line is printed after the RESULT is sent.

use std::time::{Duration, Instant};

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Handle to a running progress task.
pub struct ProgressIndicator {
    stop_tx: oneshot::Sender<()>,
    handle: JoinHandle<u64>,
}

impl ProgressIndicator {
    /// Spawns the ticking task on the current runtime.  The first line is
    /// logged one full `every` after the start.
    ///
    /// # Panics
    ///
    /// Panics if `every` is zero.
    pub fn start(every: Duration) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let started = Instant::now();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
            let mut ticks = 0u64;
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        ticks += 1;
                        info!("still searching, {:.1}s elapsed", started.elapsed().as_secs_f64());
                    }
                }
            }
            ticks
        });

        Self { stop_tx, handle }
    }

    /// Stops the task and waits for it.  Returns how many lines it logged.
    pub async fn stop(self) -> u64 {
        // The task may already be gone if the runtime is shutting down.
        let _ = self.stop_tx.send(());
        match self.handle.await {
            Ok(ticks) => ticks,
            Err(e) => {
                warn!("progress task ended abnormally: {e}");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stop_before_first_tick_logs_nothing() {
        let indicator = ProgressIndicator::start(Duration::from_secs(3600));
        assert_eq!(indicator.stop().await, 0);
    }

    #[tokio::test]
    async fn test_ticks_while_running() {
        // Arrange
        let indicator = ProgressIndicator::start(Duration::from_millis(10));

        // Act
        tokio::time::sleep(Duration::from_millis(80)).await;
        let ticks = indicator.stop().await;

        // Assert
        assert!(ticks >= 1, "expected at least one tick, got {ticks}");
    }
}

//! Ctrl+C handling for the binaries

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::Notify;
use tracing::{info, warn};

#[derive(Default)]
struct State {
    stopping: AtomicBool,
    notify: Notify,
}

impl State {
    fn stop(&self) {
        self.stopping.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }
}

/// Tracks whether the user asked the process to stop
pub struct ShutdownManager {
    state: Arc<State>,
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self {
            state: Arc::new(State::default()),
        }
    }

    /// Spawn a Ctrl+C signal handler that requests shutdown
    pub fn spawn_signal_handler(&self) {
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                info!("Received shutdown signal (Ctrl+C), abandoning pending fetches");
                state.stop();
            }
        });
    }

    pub fn is_running(&self) -> bool {
        !self.state.stopping.load(Ordering::Acquire)
    }

    /// Trigger shutdown without a signal
    pub fn trigger(&self) {
        self.state.stop();
    }

    /// Resolve once shutdown has been requested
    pub async fn stopped(&self) {
        // register before checking the flag so a concurrent stop is not missed
        let notified = self.state.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if !self.is_running() {
            return;
        }
        notified.await;
    }

    /// Drive `task` to completion unless shutdown is requested first.
    ///
    /// Returns `None` when interrupted; the task is dropped.
    pub async fn run_until_stopped<F: Future>(&self, task: F) -> Option<F::Output> {
        tokio::select! {
            output = task => Some(output),
            _ = self.stopped() => {
                warn!("Interrupted before completion");
                None
            }
        }
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_task_completes_while_running() {
        let shutdown = ShutdownManager::new();
        assert_eq!(shutdown.run_until_stopped(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_trigger_interrupts_pending_task() {
        let shutdown = ShutdownManager::new();
        shutdown.trigger();
        let output = shutdown
            .run_until_stopped(sleep(Duration::from_secs(30)))
            .await;
        assert!(output.is_none());
        assert!(!shutdown.is_running());
    }

    #[tokio::test]
    async fn test_trigger_wakes_waiting_task() {
        let shutdown = Arc::new(ShutdownManager::new());
        let waiter = {
            let shutdown = Arc::clone(&shutdown);
            tokio::spawn(async move {
                shutdown
                    .run_until_stopped(sleep(Duration::from_secs(30)))
                    .await
            })
        };

        tokio::task::yield_now().await;
        shutdown.trigger();

        let output = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake promptly")
            .unwrap();
        assert!(output.is_none());
    }
}

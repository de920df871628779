//! Cancellable quiet-period timer.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Runs an action once input has been quiet for a fixed period.
///
/// Each [`schedule`](Debouncer::schedule) call resets the countdown. When the
/// timer expires the action is invoked and its future spawned as a detached
/// task, so [`cancel`](Debouncer::cancel) only ever stops a countdown, never
/// work that has already started.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Quiet period
    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Restart the countdown with a new action, discarding any pending one.
    ///
    /// `action` is called synchronously on expiry; the future it returns runs
    /// on its own task.
    pub fn schedule<F, Fut>(&mut self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let quiet = self.quiet;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            tokio::spawn(action());
        }));
    }

    /// Discard the pending countdown, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a countdown is still running
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Wait for the pending countdown to expire (or be cancelled)
    pub async fn wait(&mut self) {
        if let Some(handle) = self.pending.as_mut() {
            let _ = handle.await;
        }
        self.pending = None;
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

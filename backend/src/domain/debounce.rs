//! Cancel-and-reschedule debouncer for search inputs.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Delay applied to notice and feed search inputs.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Runs only the last task scheduled within the delay window.
///
/// Every [`Debouncer::schedule`] aborts the pending task, if any, and starts a
/// fresh timer. Dropping the debouncer aborts whatever is still pending.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Debouncer with the given quiet period.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Quiet period before a scheduled task runs.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending task with `task`, to run after the delay.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        if let Some(previous) = self.slot().replace(handle) {
            previous.abort();
        }
    }

    /// Abort the pending task, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self.slot().take() {
            previous.abort();
        }
    }

    /// Whether a scheduled task has not finished yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

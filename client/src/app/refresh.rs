//! # Interval Refresh
//!
//! Background tasks that re-fetch a view model on a fixed interval. The task
//! lives exactly as long as its [`RefreshHandle`]: dropping the handle stops
//! the timer.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::core::error::Result;

/// Shortest timer period; `tokio::time::interval` rejects zero.
pub(crate) const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Owner of a running refresh task.
#[derive(Debug)]
#[must_use = "the refresh task stops as soon as the handle is dropped"]
pub struct RefreshHandle {
    name: &'static str,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the task now.
    pub fn stop(self) {}
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
        tracing::debug!(task = self.name, "Refresh task stopped");
    }
}

/// Run `tick` every `period`, starting one period from now.
///
/// Failures are logged and the previous data is kept; the next tick retries.
/// A zero `period` is raised to [`MIN_PERIOD`].
pub fn spawn_refresh<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> RefreshHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    let period = period.max(MIN_PERIOD);
    let task = tokio::spawn(async move {
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately and the caller has just loaded
        timer.tick().await;

        loop {
            timer.tick().await;
            if let Err(e) = tick().await {
                tracing::warn!(task = name, error = %e, "Refresh failed, keeping previous data");
            }
        }
    });

    tracing::debug!(task = name, period_ms = period.as_millis(), "Refresh task started");
    RefreshHandle { name, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_ticks_until_dropped() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);

        let handle = spawn_refresh("test", Duration::from_millis(5), move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });
        assert!(handle.is_running());

        tokio::time::sleep(Duration::from_millis(60)).await;
        handle.stop();
        tokio::time::sleep(Duration::from_millis(10)).await;
        let after_stop = count.load(Ordering::SeqCst);
        assert!(after_stop >= 2, "expected several ticks, got {}", after_stop);

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test]
    async fn test_errors_do_not_stop_the_task() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);

        let handle = spawn_refresh("failing", Duration::from_millis(5), move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(AppError::Network("down".into()))
            }
        });

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(handle.is_running());
        assert!(count.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_zero_period_still_runs() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);

        let handle = spawn_refresh("zero", Duration::ZERO, move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(handle.is_running());
        assert!(count.load(Ordering::SeqCst) >= 1);
    }
}

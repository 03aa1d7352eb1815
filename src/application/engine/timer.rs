//! Session timer - bounded-lifetime cleanup token.
//!
//! Arms a deadline and fires an async cleanup exactly once when it elapses.
//! Any terminating event can cancel the timer first, in which case the
//! cleanup never runs. Dropping the handle detaches it: the deadline still
//! stands and the cleanup still fires. Used for the grace-delayed deletion
//! of session panels; the cleanup must never block session teardown, so it
//! runs on its own task.

use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::{sleep_until, Instant};

/// Handle to an armed cleanup deadline.
pub struct SessionTimer {
    cancel: Option<oneshot::Sender<()>>,
}

impl SessionTimer {
    /// Arms the timer: `cleanup` runs once after `delay` unless the timer is
    /// cancelled first.
    pub fn arm<F, Fut>(delay: Duration, cleanup: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let (tx, rx) = oneshot::channel::<()>();
        let deadline = Instant::now() + delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = sleep_until(deadline) => cleanup().await,
                result = rx => match result {
                    // Explicit cancel: the cleanup never fires.
                    Ok(()) => {}
                    // Handle dropped (detached): the deadline still stands.
                    Err(_) => {
                        sleep_until(deadline).await;
                        cleanup().await;
                    }
                },
            }
        });

        Self { cancel: Some(tx) }
    }

    /// Cancels the deadline; the cleanup will not run.
    pub fn cancel(mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    /// Releases the handle, leaving the deadline armed (fire-and-forget).
    pub fn detach(self) {}
}

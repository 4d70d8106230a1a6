use std::time::Duration;

use futures::future::{AbortHandle, Abortable};

use crate::Executor;

/// A restartable, cancellable one-shot timer.
///
/// Scheduling again before the timer fires cancels the earlier callback, so
/// a burst of calls produces a single callback after the burst goes quiet.
/// Dropping the debouncer cancels whatever is pending.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<AbortHandle>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Run `fire` once `delay` has passed without another call to
    /// `schedule` or `cancel`.
    pub fn schedule(
        &mut self,
        executor: &dyn Executor,
        fire: impl FnOnce() + 'static,
    ) {
        self.cancel();

        let (handle, registration) = AbortHandle::new_pair();
        let timer = Abortable::new(executor.sleep(self.delay), registration);
        executor.spawn_local(Box::pin(async move {
            if timer.await.is_ok() {
                fire();
            }
        }));
        self.pending = Some(handle);
    }

    /// Cancel the pending callback. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Forget the pending handle once its callback has started.
    pub fn fired(&mut self) {
        self.pending = None;
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

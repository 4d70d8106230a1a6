use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Where the controller runs its background work: fetch continuations and
/// the search debounce timer.
///
/// Everything spawned here touches single-threaded state, so spawned tasks
/// must run on the thread that owns the controller.
pub trait Executor: 'static {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Runs tasks on the current tokio `LocalSet`.
///
/// Panics on spawn when used outside of a `LocalSet`.
#[cfg(feature = "tokio")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioExecutor;

#[cfg(feature = "tokio")]
impl Executor for TokioExecutor {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

use std::time::Duration;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use infinite_list::Executor;

/// Runs list tasks on the browser's microtask queue and its timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserExecutor;

impl Executor for BrowserExecutor {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        yew::platform::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        gloo_timers::future::sleep(duration).boxed_local()
    }
}

use std::future::Future;

use infinite_list::{ListConfig, ListController, TokioExecutor};
use payloads::Filters;
use tokio::task::LocalSet;
use tracing::Subscriber;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

pub mod mock;

pub use mock::MockSource;

/// How many times `settle` yields. Each round lets every ready local task
/// run once; a debounce firing, the fetch it issues and the reconciliation
/// need three.
const SETTLE_ROUNDS: usize = 16;

pub fn get_subscriber(env_filter: String) -> impl Subscriber + Sync + Send {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env_filter));
    // captured by the test harness unless run with --nocapture
    let stderr = fmt::Layer::new().with_test_writer();
    Registry::default().with(env_filter).with(stderr)
}

/// Install the test subscriber. Safe to call from every test; only the
/// first call wins.
pub fn init_tracing() {
    let subscriber = get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();
}

/// Run a test body inside a `LocalSet` so the controller can spawn its
/// tasks.
pub async fn run_local<Fut: Future>(test: Fut) -> Fut::Output {
    init_tracing();
    LocalSet::new().run_until(test).await
}

/// Let spawned tasks run until they are all blocked on something the test
/// controls (a held response or the paused clock).
pub async fn settle() {
    for _ in 0..SETTLE_ROUNDS {
        tokio::task::yield_now().await;
    }
}

/// Mount a list with the default filter type on the current `LocalSet`.
pub fn mount_list<T: Clone + 'static>(
    config: ListConfig,
    source: MockSource<T>,
) -> ListController<T> {
    ListController::mount(config, source, TokioExecutor)
}

/// Owned item list from string literals.
pub fn items(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Filters from key/value string pairs.
pub fn filters(pairs: &[(&str, &str)]) -> Filters {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), (*value).into()))
        .collect()
}

/// The string value of filter `key`, if set.
pub fn filter_value<'a>(filters: &'a Filters, key: &str) -> Option<&'a str> {
    filters.get(key).and_then(serde_json::Value::as_str)
}

use std::num::NonZeroU32;
use std::time::Duration;

use payloads::Filters;
use serde::{Deserialize, Deserializer};

pub const DEFAULT_PAGE_SIZE: NonZeroU32 = NonZeroU32::new(20).unwrap();
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Options recognised by [`ListController::mount`](crate::ListController).
///
/// Every field has a default, so a config can be deserialized from a
/// partial document:
///
/// ```json
/// { "page_size": 50, "debounce_delay_ms": 150 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, bound(deserialize = "F: Deserialize<'de> + Default"))]
pub struct ListConfig<F = Filters> {
    pub page_size: NonZeroU32,
    /// Quiet period after the last search keystroke before the search takes
    /// effect.
    #[serde(rename = "debounce_delay_ms", deserialize_with = "millis")]
    pub debounce_delay: Duration,
    /// When false, `refresh` does nothing.
    pub pull_to_refresh: bool,
    /// Drop the adapter's future as soon as its result can no longer be
    /// used. When false, abandoned fetches run to completion and their
    /// results are discarded on arrival.
    pub abort_stale_requests: bool,
    /// Filters applied on mount and restored by `reset`.
    pub initial_filters: F,
}

impl<F: Default> Default for ListConfig<F> {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_delay: DEFAULT_DEBOUNCE_DELAY,
            pull_to_refresh: true,
            abort_stale_requests: true,
            initial_filters: F::default(),
        }
    }
}

impl<F> ListConfig<F> {
    pub fn with_page_size(mut self, page_size: NonZeroU32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_debounce_delay(mut self, debounce_delay: Duration) -> Self {
        self.debounce_delay = debounce_delay;
        self
    }

    pub fn with_pull_to_refresh(mut self, pull_to_refresh: bool) -> Self {
        self.pull_to_refresh = pull_to_refresh;
        self
    }

    pub fn with_abort_stale_requests(mut self, abort: bool) -> Self {
        self.abort_stale_requests = abort;
        self
    }

    pub fn with_initial_filters(mut self, initial_filters: F) -> Self {
        self.initial_filters = initial_filters;
        self
    }
}

fn millis<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

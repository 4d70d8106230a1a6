//! Paginated list controller with debounced search, filters, pull-to-refresh
//! and out-of-order response handling.
//!
//! A [`ListController`] owns the state of one list screen. Consumers drive it
//! with commands (`load_more`, `refresh`, `retry`, `set_search_query`,
//! `set_filters`, ...) and read back a [`ListState`] snapshot. Data comes from
//! a caller supplied [`FetchAdapter`]. All work runs on a single thread; the
//! [`Executor`] seam decides where spawned tasks and timers live.
//!
//! ```text
//! Idle           --mount-------------> InitialLoading
//! InitialLoading --ok----------------> Ready
//! Ready          --load_more---------> LoadingMore --ok--> Ready
//! Ready | Error  --refresh-----------> Refreshing  --ok--> Ready
//! any fetching   --err---------------> Error
//! Error          --retry-------------> phase of the failed fetch
//! any            --new query / reset-> InitialLoading
//! any            --dispose-----------> Idle
//! ```

mod adapter;
mod config;
mod controller;
mod debounce;
mod executor;
mod phase;
pub mod reconciler;
mod sequencer;
mod state;

pub use adapter::FetchAdapter;
pub use config::{DEFAULT_DEBOUNCE_DELAY, DEFAULT_PAGE_SIZE, ListConfig};
pub use controller::ListController;
pub use debounce::Debouncer;
#[cfg(feature = "tokio")]
pub use executor::TokioExecutor;
pub use executor::Executor;
pub use phase::{FetchKind, Phase};
pub use sequencer::{IdentityToken, Sequencer, SequenceId, Ticket};
pub use state::ListState;

pub use payloads::{FetchError, Filters, Page, PageRequest};

//! Request and response types exchanged between the list controller and a
//! fetch adapter.
//!
//! A fetch adapter receives a [`PageRequest`] and answers with a [`Page`] or
//! a [`FetchError`]. The adapter owns the transport; nothing in here knows
//! about HTTP, storage or timers.

use std::collections::BTreeMap;

pub mod requests;
pub mod responses;

pub use requests::PageRequest;
pub use responses::Page;

/// Default filter shape: an arbitrary mapping from filter name to value,
/// compared key by key.
pub type Filters = BTreeMap<String, serde_json::Value>;

/// A failed fetch, surfaced to the list consumer as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Capture the display output of any error, e.g. a transport error.
    pub fn from_display(error: impl std::fmt::Display) -> Self {
        Self::new(error.to_string())
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for FetchError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for FetchError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

use std::num::NonZeroU32;

use payloads::{FetchError, Filters};

use crate::Phase;

/// Snapshot of a list as seen by its consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T, F = Filters> {
    /// Items of every page loaded so far for the current query, in page
    /// order. Not deduplicated.
    pub items: Vec<T>,
    /// Last successfully loaded page; 0 until the first page arrives.
    pub current_page: u32,
    pub has_more: bool,
    pub total_count: Option<u64>,
    pub phase: Phase,
    /// Set while `phase` is [`Phase::Error`].
    pub error: Option<FetchError>,
    /// Search text as typed, before debouncing.
    pub search_input: String,
    /// Search text used for fetches.
    pub search_query: String,
    pub filters: F,
    pub page_size: NonZeroU32,
}

impl<T, F> ListState<T, F> {
    pub fn new(page_size: NonZeroU32, filters: F) -> Self {
        Self {
            items: Vec::new(),
            current_page: 0,
            has_more: true,
            total_count: None,
            phase: Phase::Idle,
            error: None,
            search_input: String::new(),
            search_query: String::new(),
            filters,
            page_size,
        }
    }

    /// First page of the current query is being fetched.
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::InitialLoading
    }

    pub fn is_loading_more(&self) -> bool {
        self.phase == Phase::LoadingMore
    }

    pub fn is_refreshing(&self) -> bool {
        self.phase == Phase::Refreshing
    }

    /// The current query loaded successfully and matched nothing.
    pub fn is_empty(&self) -> bool {
        self.phase == Phase::Ready && self.items.is_empty()
    }

    /// Whether `load_more` would issue a fetch right now.
    pub fn can_load_more(&self) -> bool {
        self.phase == Phase::Ready && self.has_more
    }

    /// A debounced search edit has not taken effect yet.
    pub fn has_pending_search(&self) -> bool {
        self.search_input != self.search_query
    }
}

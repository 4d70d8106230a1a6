use serde::{Deserialize, Serialize};

use crate::Filters;

/// The effective input to a single fetch.
///
/// `page` is 1-based. The search query is the debounced value, not the raw
/// text in the input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRequest<F = Filters> {
    pub page: u32,
    pub page_size: u32,
    pub search_query: String,
    pub filters: F,
}

impl<F> PageRequest<F> {
    /// Number of items preceding this page, for adapters backed by
    /// limit/offset APIs.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }

    pub fn is_first_page(&self) -> bool {
        self.page <= 1
    }
}

use serde::{Deserialize, Serialize};

/// One page of results returned by a fetch adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Whether a following page exists.
    pub has_more: bool,
    /// Total number of matching items, when the source can count them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, has_more: bool) -> Self {
        Self {
            data,
            has_more,
            total_count: None,
        }
    }

    /// A final page with no successor.
    pub fn last(data: Vec<T>) -> Self {
        Self::new(data, false)
    }

    pub fn with_total_count(mut self, total_count: u64) -> Self {
        self.total_count = Some(total_count);
        self
    }
}

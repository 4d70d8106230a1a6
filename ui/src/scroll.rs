//! Deciding when a scrolled list is close enough to its end to load more.

/// Default distance from the end, in viewport heights, at which the next
/// page is requested.
pub const DEFAULT_END_REACHED_THRESHOLD: f64 = 0.5;

/// Scroll position of a list container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top.
    pub offset: i32,
    /// Visible height.
    pub viewport: i32,
    /// Total scrollable height.
    pub content: i32,
}

impl ScrollMetrics {
    /// Content left below the visible area, in viewport heights. Negative
    /// when the content does not fill the viewport.
    pub fn remaining_viewports(&self) -> Option<f64> {
        if self.viewport <= 0 {
            return None;
        }
        let remaining = self.content - self.offset - self.viewport;
        Some(f64::from(remaining) / f64::from(self.viewport))
    }

    /// A hidden container (zero height) is never near its end.
    pub fn is_near_end(&self, threshold: f64) -> bool {
        self.remaining_viewports()
            .is_some_and(|remaining| remaining <= threshold)
    }
}

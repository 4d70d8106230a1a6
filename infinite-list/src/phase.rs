use derive_more::Display;

/// Where the controller is in its fetch lifecycle.
///
/// The three loading flags exposed to consumers are derived from this, so at
/// most one of them can be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Phase {
    /// Not mounted, or disposed.
    #[default]
    #[display("idle")]
    Idle,
    /// Fetching page 1 of a new query.
    #[display("initial loading")]
    InitialLoading,
    #[display("ready")]
    Ready,
    /// Fetching the page after `current_page`.
    #[display("loading more")]
    LoadingMore,
    /// Re-fetching page 1 of the current query, keeping items visible.
    #[display("refreshing")]
    Refreshing,
    /// The last fetch failed. Previously loaded items are kept.
    #[display("error")]
    Error,
}

impl Phase {
    /// True while a fetch for the current query is in flight.
    pub fn is_fetching(self) -> bool {
        matches!(
            self,
            Self::InitialLoading | Self::LoadingMore | Self::Refreshing
        )
    }
}

/// What triggered a fetch. Decides how its result is merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FetchKind {
    #[display("initial")]
    Initial,
    #[display("refresh")]
    Refresh,
    #[display("load more")]
    LoadMore,
}

impl FetchKind {
    /// The phase the controller sits in while a fetch of this kind runs.
    pub fn phase(self) -> Phase {
        match self {
            Self::Initial => Phase::InitialLoading,
            Self::Refresh => Phase::Refreshing,
            Self::LoadMore => Phase::LoadingMore,
        }
    }

    /// Whether the result replaces the item list rather than extending it.
    pub fn replaces_items(self) -> bool {
        !matches!(self, Self::LoadMore)
    }
}

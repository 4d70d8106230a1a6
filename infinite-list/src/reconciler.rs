//! State transitions applied to a [`ListState`].
//!
//! These functions never decide staleness; the controller only hands them
//! results whose ticket survived [`Sequencer::settle`](crate::Sequencer).

use payloads::{FetchError, Page};

use crate::{FetchKind, ListState, Phase, Ticket};

/// A new query identity begins: drop accumulated pages and wait for page 1.
pub fn begin_identity<T, F>(state: &mut ListState<T, F>) {
    state.items.clear();
    state.current_page = 0;
    state.has_more = true;
    state.total_count = None;
    state.error = None;
    state.phase = Phase::InitialLoading;
}

/// A fetch of `kind` was issued for the current identity. Items stay
/// visible until its result arrives.
pub fn begin_fetch<T, F>(state: &mut ListState<T, F>, kind: FetchKind) {
    state.error = None;
    state.phase = kind.phase();
}

/// Merge the outcome of a non-stale fetch.
pub fn reconcile<T, F>(
    state: &mut ListState<T, F>,
    ticket: &Ticket,
    outcome: Result<Page<T>, FetchError>,
) {
    match outcome {
        Ok(page) => apply_page(state, ticket, page),
        Err(error) => apply_failure(state, error),
    }
}

fn apply_page<T, F>(
    state: &mut ListState<T, F>,
    ticket: &Ticket,
    page: Page<T>,
) {
    if ticket.kind.replaces_items() {
        state.items = page.data;
    } else {
        state.items.extend(page.data);
    }
    state.current_page = ticket.page;
    state.has_more = page.has_more;
    state.total_count = page.total_count;
    state.error = None;
    state.phase = Phase::Ready;
}

fn apply_failure<T, F>(state: &mut ListState<T, F>, error: FetchError) {
    state.error = Some(error);
    state.phase = Phase::Error;
}

//! The list controller: owns a [`ListState`], decides when to fetch, and
//! reconciles fetch results that arrive in any order.
//!
//! State lives behind `Rc<RefCell<..>>` and is only touched on the owning
//! thread. Spawned work (fetch continuations and the search debounce) holds a
//! `Weak` reference and re-checks `mounted` before touching state, so nothing
//! is reconciled after [`ListController::dispose`] or after the last handle
//! is dropped.

use std::cell::RefCell;
use std::num::NonZeroU32;
use std::rc::{Rc, Weak};

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{self, AbortHandle, Abortable, LocalBoxFuture};
use payloads::{FetchError, Filters, Page, PageRequest};

use crate::{
    Debouncer, Executor, FetchAdapter, FetchKind, ListConfig, ListState, Phase,
    Sequencer, Ticket, reconciler,
};

type Listener<T, F> = Rc<dyn Fn(&ListController<T, F>)>;

/// Handle to one mounted list. Cloning yields another handle to the same
/// list.
pub struct ListController<T, F = Filters> {
    shared: Rc<Shared<T, F>>,
}

struct Shared<T, F> {
    adapter: Box<dyn FetchAdapter<T, F>>,
    executor: Box<dyn Executor>,
    inner: RefCell<Inner<T, F>>,
}

struct Inner<T, F> {
    state: ListState<T, F>,
    config: ListConfig<F>,
    sequencer: Sequencer,
    debouncer: Debouncer,
    in_flight: Option<InFlight>,
    /// Fetch to repeat on `retry`.
    last_failure: Option<Ticket>,
    mounted: bool,
    listeners: Vec<Listener<T, F>>,
}

struct InFlight {
    ticket: Ticket,
    abort: AbortHandle,
    /// Completed when the fetch settles; dropped if it is cancelled.
    waiters: Vec<oneshot::Sender<()>>,
}

impl<T, F> Inner<T, F> {
    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            if self.config.abort_stale_requests {
                in_flight.abort.abort();
            }
            tracing::debug!(
                "Cancelled {} fetch {}",
                in_flight.ticket.kind,
                in_flight.ticket.sequence
            );
        }
    }

    /// Promote the typed search text to the effective search, dropping the
    /// debounce timer. Returns whether the effective search changed.
    fn flush_pending_search(&mut self) -> bool {
        self.debouncer.cancel();
        if self.state.search_input == self.state.search_query {
            return false;
        }
        self.state.search_query = self.state.search_input.clone();
        true
    }
}

impl<T, F> Drop for Inner<T, F> {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}

impl<T, F> Clone for ListController<T, F> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T, F> PartialEq for ListController<T, F> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<T, F> ListController<T, F>
where
    T: Clone + 'static,
    F: Clone + PartialEq + Default + 'static,
{
    /// Create the list and issue the fetch for its first page.
    pub fn mount(
        config: ListConfig<F>,
        adapter: impl FetchAdapter<T, F>,
        executor: impl Executor,
    ) -> Self {
        let state =
            ListState::new(config.page_size, config.initial_filters.clone());
        let debouncer = Debouncer::new(config.debounce_delay);
        let controller = Self {
            shared: Rc::new(Shared {
                adapter: Box::new(adapter),
                executor: Box::new(executor),
                inner: RefCell::new(Inner {
                    state,
                    config,
                    sequencer: Sequencer::default(),
                    debouncer,
                    in_flight: None,
                    last_failure: None,
                    mounted: true,
                    listeners: Vec::new(),
                }),
            }),
        };
        tracing::debug!("Mounting list");
        controller.start_identity();
        controller
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ListState<T, F> {
        self.shared.inner.borrow().state.clone()
    }

    /// Read the current state without cloning it.
    pub fn with_state<R>(
        &self,
        read: impl FnOnce(&ListState<T, F>) -> R,
    ) -> R {
        read(&self.shared.inner.borrow().state)
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.inner.borrow().mounted
    }

    /// Call `listener` after every state change. The listener is handed the
    /// controller, so it can read the state and issue commands without
    /// holding a handle of its own. A listener that captures a handle keeps
    /// the list alive until [`ListController::dispose`].
    pub fn on_change(
        &self,
        listener: impl Fn(&ListController<T, F>) + 'static,
    ) {
        let mut inner = self.shared.inner.borrow_mut();
        if inner.mounted {
            inner.listeners.push(Rc::new(listener));
        }
    }

    /// Fetch the page after `current_page`.
    ///
    /// Does nothing unless the list is ready (nothing in flight, no
    /// unresolved error) and the last page reported more to come.
    pub fn load_more(&self) {
        let page = {
            let inner = self.shared.inner.borrow();
            let state = &inner.state;
            if !inner.mounted
                || !state.can_load_more()
                || inner.sequencer.outstanding().is_some()
            {
                tracing::trace!(
                    "Ignoring load_more while {} (has_more={})",
                    state.phase,
                    state.has_more
                );
                return;
            }
            state.current_page + 1
        };
        self.issue(FetchKind::LoadMore, page);
        self.notify();
    }

    /// Re-fetch page 1 of the current query, replacing the items once it
    /// arrives.
    ///
    /// Only acts from [`Phase::Ready`] or [`Phase::Error`], and only when
    /// pull-to-refresh is enabled. The returned future completes when the
    /// refresh settles or is abandoned, and immediately if nothing was
    /// issued.
    pub fn refresh(&self) -> LocalBoxFuture<'static, ()> {
        {
            let inner = self.shared.inner.borrow();
            let phase = inner.state.phase;
            if !inner.mounted
                || !inner.config.pull_to_refresh
                || !matches!(phase, Phase::Ready | Phase::Error)
                || inner.sequencer.outstanding().is_some()
            {
                tracing::trace!("Ignoring refresh while {phase}");
                return future::ready(()).boxed_local();
            }
        }

        let ticket = self.issue(FetchKind::Refresh, 1);
        let (sender, receiver) = oneshot::channel();
        if let Some(in_flight) = self
            .shared
            .inner
            .borrow_mut()
            .in_flight
            .as_mut()
            .filter(|in_flight| in_flight.ticket == ticket)
        {
            in_flight.waiters.push(sender);
        }
        self.notify();

        async move {
            // cancelled refreshes resolve too
            let _ = receiver.await;
        }
        .boxed_local()
    }

    /// Repeat the fetch that last failed, with the same page and query.
    pub fn retry(&self) {
        let failed = {
            let inner = self.shared.inner.borrow();
            if !inner.mounted || inner.state.phase != Phase::Error {
                return;
            }
            inner.last_failure
        };
        let Some(failed) = failed else {
            return;
        };
        tracing::debug!(
            "Retrying {} fetch of page {}",
            failed.kind,
            failed.page
        );
        self.issue(failed.kind, failed.page);
        self.notify();
    }

    /// Update the search text. The search used for fetching follows after
    /// the debounce delay passes without another call.
    pub fn set_search_query(&self, text: impl Into<String>) {
        let weak = Rc::downgrade(&self.shared);
        {
            let mut inner = self.shared.inner.borrow_mut();
            if !inner.mounted {
                return;
            }
            inner.state.search_input = text.into();
            inner
                .debouncer
                .schedule(&*self.shared.executor, move || {
                    if let Some(controller) = Self::upgrade(&weak) {
                        controller.apply_debounced_search();
                    }
                });
        }
        self.notify();
    }

    pub fn set_filters(&self, filters: F) {
        self.update_filters(|_| filters);
    }

    /// Derive new filters from the current ones. A change restarts the list
    /// from page 1; a pending search edit is applied along with it.
    pub fn update_filters(&self, update: impl FnOnce(&F) -> F) {
        {
            let mut inner = self.shared.inner.borrow_mut();
            if !inner.mounted {
                return;
            }
            let filters = update(&inner.state.filters);
            if filters == inner.state.filters {
                return;
            }
            inner.state.filters = filters;
            inner.flush_pending_search();
        }
        tracing::debug!("Filters changed");
        self.start_identity();
    }

    pub fn clear_filters(&self) {
        self.set_filters(F::default());
    }

    /// Change the page size. Loaded pages are discarded since their
    /// boundaries no longer line up.
    pub fn set_page_size(&self, page_size: NonZeroU32) {
        {
            let mut inner = self.shared.inner.borrow_mut();
            if !inner.mounted || inner.state.page_size == page_size {
                return;
            }
            inner.state.page_size = page_size;
            inner.flush_pending_search();
        }
        tracing::debug!("Page size changed to {page_size}");
        self.start_identity();
    }

    /// Clear the search, restore the initial filters and page size, and
    /// load page 1 again.
    pub fn reset(&self) {
        {
            let mut inner = self.shared.inner.borrow_mut();
            if !inner.mounted {
                return;
            }
            inner.debouncer.cancel();
            inner.state.search_input.clear();
            inner.state.search_query.clear();
            inner.state.filters = inner.config.initial_filters.clone();
            inner.state.page_size = inner.config.page_size;
        }
        tracing::debug!("Resetting list");
        self.start_identity();
    }

    /// Tear the list down. Pending timers and fetches are cancelled and no
    /// result is reconciled afterwards. Later commands do nothing.
    pub fn dispose(&self) {
        let mut inner = self.shared.inner.borrow_mut();
        if !inner.mounted {
            return;
        }
        inner.mounted = false;
        inner.debouncer.cancel();
        inner.cancel_in_flight();
        inner.state.phase = Phase::Idle;
        inner.listeners.clear();
        tracing::debug!("Disposed list");
    }

    fn upgrade(weak: &Weak<Shared<T, F>>) -> Option<Self> {
        weak.upgrade().map(|shared| Self { shared })
    }

    fn apply_debounced_search(&self) {
        let changed = {
            let mut inner = self.shared.inner.borrow_mut();
            if !inner.mounted {
                return;
            }
            inner.debouncer.fired();
            inner.flush_pending_search()
        };
        if changed {
            tracing::debug!("Search settled");
            self.start_identity();
        }
    }

    /// Abandon the current query and fetch page 1 of the new one.
    fn start_identity(&self) {
        {
            let mut inner = self.shared.inner.borrow_mut();
            inner.cancel_in_flight();
            inner.last_failure = None;
            let identity = inner.sequencer.next_identity();
            reconciler::begin_identity(&mut inner.state);
            tracing::debug!(
                "Starting query {identity} (search={:?})",
                inner.state.search_query
            );
        }
        self.issue(FetchKind::Initial, 1);
        self.notify();
    }

    fn issue(&self, kind: FetchKind, page: u32) -> Ticket {
        let (ticket, request) = {
            let mut inner = self.shared.inner.borrow_mut();
            let ticket = inner.sequencer.issue(kind, page);
            reconciler::begin_fetch(&mut inner.state, kind);
            let request = PageRequest {
                page,
                page_size: inner.state.page_size.get(),
                search_query: inner.state.search_query.clone(),
                filters: inner.state.filters.clone(),
            };
            (ticket, request)
        };
        tracing::debug!(
            "Issuing {kind} fetch {} for page {page} of {}",
            ticket.sequence,
            ticket.identity
        );

        let fetch = self.shared.adapter.fetch(request);
        let (abort, registration) = AbortHandle::new_pair();
        let weak = Rc::downgrade(&self.shared);
        self.shared.executor.spawn_local(
            async move {
                match Abortable::new(fetch, registration).await {
                    Ok(outcome) => {
                        if let Some(controller) = Self::upgrade(&weak) {
                            controller.settle(ticket, outcome);
                        }
                    }
                    Err(_) => {
                        tracing::debug!("Fetch {} aborted", ticket.sequence);
                    }
                }
            }
            .boxed_local(),
        );

        self.shared.inner.borrow_mut().in_flight = Some(InFlight {
            ticket,
            abort,
            waiters: Vec::new(),
        });
        ticket
    }

    fn settle(&self, ticket: Ticket, outcome: Result<Page<T>, FetchError>) {
        let waiters = {
            let mut inner = self.shared.inner.borrow_mut();
            if !inner.mounted {
                tracing::debug!(
                    "Dropping fetch {} after dispose",
                    ticket.sequence
                );
                return;
            }
            if !inner.sequencer.settle(&ticket) {
                tracing::debug!(
                    "Dropping stale fetch {} of {}",
                    ticket.sequence,
                    ticket.identity
                );
                return;
            }

            let waiters = inner
                .in_flight
                .take_if(|in_flight| in_flight.ticket == ticket)
                .map(|in_flight| in_flight.waiters)
                .unwrap_or_default();
            match &outcome {
                Ok(page) => {
                    tracing::debug!(
                        "Fetch {} returned {} items (has_more={})",
                        ticket.sequence,
                        page.data.len(),
                        page.has_more
                    );
                    inner.last_failure = None;
                }
                Err(e) => {
                    tracing::warn!(
                        "{} fetch of page {} failed: {e}",
                        ticket.kind,
                        ticket.page
                    );
                    inner.last_failure = Some(ticket);
                }
            }
            reconciler::reconcile(&mut inner.state, &ticket, outcome);
            waiters
        };

        self.notify();
        for waiter in waiters {
            let _ = waiter.send(());
        }
    }

    fn notify(&self) {
        let listeners = self.shared.inner.borrow().listeners.clone();
        for listener in listeners {
            listener(self);
        }
    }
}

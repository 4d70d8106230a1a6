//! A scripted fetch adapter.
//!
//! By default every call is answered immediately by a responder function.
//! After [`MockSource::hold`], calls stay pending until the test answers
//! them by call index, in whatever order it likes. Every request is
//! recorded.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture};
use infinite_list::FetchAdapter;
use payloads::{FetchError, Filters, Page, PageRequest};

type Outcome<T> = Result<Page<T>, FetchError>;
type Responder<T, F> = Box<dyn Fn(&PageRequest<F>) -> Outcome<T>>;

pub struct MockSource<T, F = Filters> {
    inner: Rc<RefCell<MockState<T, F>>>,
}

struct MockState<T, F> {
    responder: Responder<T, F>,
    calls: Vec<PageRequest<F>>,
    held: bool,
    pending: HashMap<usize, oneshot::Sender<Outcome<T>>>,
    failures: VecDeque<String>,
}

impl<T, F> Clone for MockSource<T, F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static, F: Clone + 'static> MockSource<T, F> {
    pub fn from_fn(
        responder: impl Fn(&PageRequest<F>) -> Outcome<T> + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MockState {
                responder: Box::new(responder),
                calls: Vec::new(),
                held: false,
                pending: HashMap::new(),
                failures: VecDeque::new(),
            })),
        }
    }

    /// Answer page `n` with `pages[n - 1]`, and an empty final page past the
    /// end. Search and filters are ignored.
    pub fn pages(pages: Vec<Page<T>>) -> Self {
        Self::from_fn(move |request| {
            let index = request.page.saturating_sub(1) as usize;
            Ok(pages.get(index).cloned().unwrap_or_else(|| Page::last(vec![])))
        })
    }

    /// Keep subsequent calls pending until answered with `respond` or
    /// `release`.
    pub fn hold(&self) {
        self.inner.borrow_mut().held = true;
    }

    /// Reject the next immediate call with `message`. Queued failures are
    /// used in order.
    pub fn fail_next(&self, message: &str) {
        self.inner.borrow_mut().failures.push_back(message.to_string());
    }

    pub fn calls(&self) -> Vec<PageRequest<F>> {
        self.inner.borrow().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.borrow().calls.len()
    }

    pub fn last_call(&self) -> Option<PageRequest<F>> {
        self.inner.borrow().calls.last().cloned()
    }

    /// Answer held call `call` with `outcome`. Returns false if the call
    /// was never held, was already answered, or its future was dropped.
    pub fn respond(&self, call: usize, outcome: Outcome<T>) -> bool {
        let sender = self.inner.borrow_mut().pending.remove(&call);
        match sender {
            Some(sender) => sender.send(outcome).is_ok(),
            None => false,
        }
    }

    /// Answer held call `call` with what the responder returns for it.
    pub fn release(&self, call: usize) -> bool {
        let outcome = {
            let inner = self.inner.borrow();
            match inner.calls.get(call) {
                Some(request) => (inner.responder)(request),
                None => return false,
            }
        };
        self.respond(call, outcome)
    }
}

impl<T: Clone + 'static, F: Clone + 'static> FetchAdapter<T, F>
    for MockSource<T, F>
{
    fn fetch(
        &self,
        request: PageRequest<F>,
    ) -> LocalBoxFuture<'static, Outcome<T>> {
        let mut inner = self.inner.borrow_mut();
        let call = inner.calls.len();
        inner.calls.push(request);

        if inner.held {
            let (sender, receiver) = oneshot::channel();
            inner.pending.insert(call, sender);
            return async move {
                receiver.await.unwrap_or_else(|_| {
                    Err(FetchError::new("mock response was dropped"))
                })
            }
            .boxed_local();
        }

        if let Some(message) = inner.failures.pop_front() {
            return future::ready(Err(FetchError::new(message))).boxed_local();
        }
        let outcome = (inner.responder)(&inner.calls[call]);
        future::ready(outcome).boxed_local()
    }
}

//! Sequence numbers and query identities used to recognise stale fetches.
//!
//! Every fetch is issued with a [`Ticket`] recording the query identity that
//! was current at the time and a sequence number from a per-controller
//! counter. Completions can arrive in any order; only a ticket that still
//! belongs to the current identity and has not been superseded may touch the
//! list state.

use derive_more::Display;

use crate::FetchKind;

/// Issue order of a fetch. Strictly increasing across the life of a
/// controller, identities included.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display,
)]
#[display("#{_0}")]
pub struct SequenceId(pub u64);

/// Identifies one (search, filters, page size) combination. Bumped whenever
/// any of them changes, or on reset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display,
)]
#[display("q{_0}")]
pub struct IdentityToken(pub u64);

/// Cancellation token carried by an in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub identity: IdentityToken,
    pub sequence: SequenceId,
    pub kind: FetchKind,
    pub page: u32,
}

#[derive(Debug, Default)]
pub struct Sequencer {
    counter: u64,
    identity: u64,
    /// Most recent ticket issued under the current identity.
    latest: Option<SequenceId>,
    /// Most recent ticket of the current identity that was reconciled.
    settled: Option<SequenceId>,
}

impl Sequencer {
    pub fn identity(&self) -> IdentityToken {
        IdentityToken(self.identity)
    }

    /// Start a new query identity. Every outstanding ticket becomes stale.
    pub fn next_identity(&mut self) -> IdentityToken {
        self.identity += 1;
        self.latest = None;
        self.settled = None;
        self.identity()
    }

    pub fn issue(&mut self, kind: FetchKind, page: u32) -> Ticket {
        self.counter += 1;
        let sequence = SequenceId(self.counter);
        self.latest = Some(sequence);
        Ticket {
            identity: self.identity(),
            sequence,
            kind,
            page,
        }
    }

    /// A ticket is stale once its identity was abandoned, once a later fetch
    /// of the same identity was issued, or once it or a later one has been
    /// reconciled.
    pub fn is_stale(&self, ticket: &Ticket) -> bool {
        ticket.identity != self.identity()
            || self.latest.is_some_and(|latest| latest > ticket.sequence)
            || self
                .settled
                .is_some_and(|settled| settled >= ticket.sequence)
    }

    /// Record that `ticket` resolved. Returns false, changing nothing, when
    /// the ticket is stale and its result must be dropped.
    pub fn settle(&mut self, ticket: &Ticket) -> bool {
        if self.is_stale(ticket) {
            return false;
        }
        self.settled = Some(ticket.sequence);
        true
    }

    /// Ticket of the fetch currently awaiting its result, if any.
    pub fn outstanding(&self) -> Option<SequenceId> {
        match (self.latest, self.settled) {
            (Some(latest), Some(settled)) if settled >= latest => None,
            (latest, _) => latest,
        }
    }
}

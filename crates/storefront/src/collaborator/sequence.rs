//! Latest-request-wins result slot.
//!
//! Fetches against the collaborator are never cancelled, so responses can
//! arrive out of request order. A [`SequencedSlot`] hands out a ticket per
//! request and only accepts the result carried by the newest ticket; results
//! of superseded requests are dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Proof that a request was started; pass it back with its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct SequencedSlot<T> {
    issued: AtomicU64,
    latest: Mutex<Option<(Ticket, T)>>,
}

impl<T> Default for SequencedSlot<T> {
    fn default() -> Self {
        Self {
            issued: AtomicU64::new(0),
            latest: Mutex::new(None),
        }
    }
}

impl<T: Clone> SequencedSlot<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request.
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the most recently started request.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Store `value` if `ticket` is still current. Returns whether it was kept.
    pub fn complete(&self, ticket: Ticket, value: T) -> bool {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, "Dropping superseded response");
            return false;
        }
        *latest = Some((ticket, value));
        true
    }

    /// The most recently accepted value.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, value)| value.clone())
    }
}

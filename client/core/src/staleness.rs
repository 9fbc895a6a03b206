//! Out-of-order response guard
//!
//! List screens re-fetch whenever a filter changes, and responses can arrive
//! in any order. [`LatestResponse`] hands out a [`Ticket`] per request and
//! only accepts a response whose ticket is newer than the last one applied.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Sequence number of one logical request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

struct Applied<T> {
    sequence: u64,
    value: Option<T>,
}

/// Holds the response of the newest request that has resolved
pub struct LatestResponse<T> {
    issued: AtomicU64,
    applied: Mutex<Applied<T>>,
}

impl<T> Default for LatestResponse<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestResponse<T> {
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            applied: Mutex::new(Applied {
                sequence: 0,
                value: None,
            }),
        }
    }

    /// Ticket for a request about to be sent
    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Apply `value` unless a newer response is already in place
    ///
    /// Returns whether the value was applied.
    pub fn resolve(&self, ticket: Ticket, value: T) -> bool {
        let mut applied = self.applied.lock();
        if ticket.0 <= applied.sequence {
            tracing::debug!(
                ticket = ticket.0,
                applied = applied.sequence,
                "discarding stale response"
            );
            return false;
        }
        applied.sequence = ticket.0;
        applied.value = Some(value);
        true
    }

    /// Issue a ticket, await `request`, and apply its output
    pub async fn track<F, E>(&self, request: F) -> Result<bool, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let ticket = self.issue();
        let value = request.await?;
        Ok(self.resolve(ticket, value))
    }

    /// Ticket of the applied response, if any
    pub fn applied_ticket(&self) -> Option<Ticket> {
        let applied = self.applied.lock();
        (applied.sequence > 0).then_some(Ticket(applied.sequence))
    }
}

impl<T: Clone> LatestResponse<T> {
    pub fn current(&self) -> Option<T> {
        self.applied.lock().value.clone()
    }
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Per-screen-instance counter used to drop stale async results.
///
/// A screen takes a [`Ticket`] when it starts a request and checks it before
/// applying the response. Starting a newer request, or tearing the screen
/// down, advances the counter so older tickets stop matching.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

/// Proof that a request was started under a particular generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for the current generation without invalidating anything.
    pub fn ticket(&self) -> Ticket {
        Ticket(self.0.load(Ordering::Acquire))
    }

    /// Invalidate every outstanding ticket and return a fresh one.
    pub fn advance(&self) -> Ticket {
        Ticket(self.0.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.ticket() == ticket
    }
}

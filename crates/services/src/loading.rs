//! Load tracking for async fetches that may be superseded.
//!
//! Each fetch takes a ticket from a [`LoadGuard`]. Starting a newer fetch or
//! cancelling the guard invalidates older tickets, so a response that arrives
//! late can be recognised and dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generation counter shared by a view and its in-flight fetches.
#[derive(Debug, Clone, Default)]
pub struct LoadGuard {
    generation: Arc<AtomicU64>,
}

/// Proof that a fetch was started at a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, invalidating every earlier ticket.
    #[must_use]
    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether a response carrying `ticket` should still be applied.
    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Invalidate outstanding tickets without starting a new fetch.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide diagnostic counters.
///
/// Only read for logging. Workers bump them concurrently in no particular
/// order; the totals are what matter.
#[derive(Debug, Default)]
pub struct ServerStats {
    responses: AtomicU64,
}

impl ServerStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one successful response and returns the new total.
    pub fn record_response(&self) -> u64 {
        self.responses.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn responses(&self) -> u64 {
        self.responses.load(Ordering::Relaxed)
    }
}

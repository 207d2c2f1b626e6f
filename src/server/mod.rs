//! Connection acceptor and process-wide diagnostics.

pub mod listener;
pub mod stats;

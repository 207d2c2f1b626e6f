//! Static file access.
//!
//! The document root is treated as a read-only store: open by path, report a
//! length, stream the bytes.

pub mod resolver;

pub use resolver::{DocumentRoot, ResolvedResource};

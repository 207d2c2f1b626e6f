//! HTTP/1.0 and HTTP/1.1 protocol handling for a GET-only static file server.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection pipeline driving the state machine below
//! - **`parser`**: Turns one receive buffer into a `Request` or a `ProtocolError`
//! - **`request`**: Request line types
//! - **`error`**: The five protocol errors and their status codes
//! - **`response`**: Status codes and response construction
//! - **`writer`**: Serializes responses and writes them out in full
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait (bounded by the idle timeout) for a request
//!        └──────┬──────┘
//!               │ Bytes received          (timeout / EOF → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Parse, resolve, read the file
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send the full response
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-alive → Reading (same connection)
//!               └─ Close → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use uhttp::http::connection::{Connection, ConnectionConfig};
//! use uhttp::server::stats::ServerStats;
//!
//! let (socket, _addr) = listener.accept().await?;
//! let mut conn = Connection::new(socket, Arc::new(config), Arc::new(ServerStats::new()));
//! conn.run().await?;
//! ```

pub mod connection;
pub mod error;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;

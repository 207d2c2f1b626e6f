//! uhttp - minimal static file server
//!
//! Serves files from a document root over HTTP/1.0 and HTTP/1.1, GET only,
//! with optional keep-alive.

pub mod config;
pub mod files;
pub mod http;
pub mod server;

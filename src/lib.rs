//! Statik - minimal HTTP/1.0 static file server
//!
//! Core library: request-line parsing, status catalog, response framing and
//! the per-connection handler.

pub mod config;
pub mod fs;
pub mod http;
pub mod server;

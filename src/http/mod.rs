//! HTTP/1.0 protocol implementation.
//!
//! Each connection carries exactly one request and one response; the server
//! never keeps a connection alive.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine
//! - **`parser`**: Reads and validates the request line
//! - **`request`**: Request line and method types
//! - **`response`**: Status catalog and the HTML error page
//! - **`writer`**: Status line, headers and body onto the client stream
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for one CRLF-terminated line
//!        └──────┬──────┘
//!               │ Line received            (read failure → 400)
//!               ▼
//!        ┌─────────────┐
//!        │   Parsing   │ ← Validate tokens and version
//!        └──────┬──────┘
//!               │ GET request              (malformed → 400, other method → 501)
//!               ▼
//!        ┌─────────────┐
//!        │  Resolving  │ ← Clean the target under the document root, stat, open
//!        └──────┬──────┘
//!               │ File opened              (404 / 403 / 500)
//!               ▼
//!        ┌─────────────┐
//!        │ Responding  │ ← Headers, then file bytes or error page
//!        └──────┬──────┘
//!               ▼
//!            Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use statik::config::Config;
//! use statik::fs::LocalFs;
//! use statik::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cfg = Arc::new(Config::default());
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let conn = Connection::new(socket, cfg.clone(), Arc::new(LocalFs));
//!         tokio::spawn(async move {
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;

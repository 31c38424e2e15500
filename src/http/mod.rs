//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.0 side of the server: one request per
//! connection, GET only, no request bodies.
//!
//! # Architecture
//!
//! - **`connection`**: the per-connection transaction state machine
//! - **`reader`**: bounded line reader over the client socket
//! - **`parser`**: request-line tokenization and header-line helpers
//! - **`request`**: HTTP request representation
//! - **`response`**: status codes, response builder and the HTML error page
//! - **`writer`**: serializes responses and writes them to the client
//! - **`mime`**: content type lookup by file name
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the request line
//!        └──────┬──────┘
//!               │ Request line parsed (or 400)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Method check (501), drain headers, stat target
//!        └──────┬───────────┘
//!               │ Dispatch decided
//!               ▼
//!        ┌──────────────────┐
//!        │    Serving       │ ← Error page, static file or CGI output
//!        └──────┬───────────┘
//!               │ Response written
//!               ▼
//!            Closed
//! ```
//!
//! A peer that disconnects before the request line or the header block is
//! complete moves straight to `Closed` without a response.

pub mod connection;
pub mod mime;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;

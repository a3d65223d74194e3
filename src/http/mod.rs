//! HTTP protocol implementation.
//!
//! Just enough HTTP/1.1 for a one-request-per-connection JSON service.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection read/dispatch/write state machine
//! - **`parser`**: Parses the request line from the bytes of a single read
//! - **`request`**: Method and request representation
//! - **`query`**: Query-string decoding and value encoding
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! The TLS handshake happens before a [`connection::Connection`] exists;
//! a failed handshake never reaches it.
//!
//! ```text
//!        ┌─────────────┐
//!        │ Established │ ← Single read
//!        └──────┬──────┘
//!               │ Data ─────────────── 0 bytes ──┐
//!               ▼                                │
//!        ┌──────────────────┐                    │
//!        │   Dispatching    │ ← Router           │
//!        └──────┬───────────┘                    │
//!               │ Response framed                │
//!               ▼                                │
//!        ┌──────────────────┐                    │
//!        │   Responding     │ ← Single write     │
//!        └──────┬───────────┘                    │
//!               ▼                                │
//!        ┌──────────────────┐                    │
//!        │     Closed       │ ◄──────────────────┘
//!        └──────────────────┘   shutdown, then drop
//! ```
//!
//! # Example
//!
//! ```ignore
//! use hiscore_proxy::http::connection::Connection;
//!
//! let stream = acceptor.accept(socket).await?;
//! Connection::new(stream, &router).run().await?;
//! ```

pub mod connection;
pub mod parser;
pub mod query;
pub mod request;
pub mod response;
pub mod writer;

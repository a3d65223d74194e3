//! Hiscore proxy - TLS-terminating player statistics service
//!
//! Accepts HTTPS requests for `/player?name=...`, fetches the player's
//! plaintext statistics from the hiscore service over a verified TLS
//! session and answers with JSON.

pub mod config;
pub mod hiscore;
pub mod http;
pub mod server;
pub mod tls;

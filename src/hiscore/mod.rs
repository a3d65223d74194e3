//! Player statistics from the hiscore service.
//!
//! - **`skills`**: the fixed, ordered category table
//! - **`snapshot`**: per-lookup result types
//! - **`parser`**: plaintext payload to snapshot
//! - **`json`**: snapshot to JSON
//! - **`client`**: the outbound TLS lookup

pub mod client;
pub mod json;
pub mod parser;
pub mod skills;
pub mod snapshot;

pub use client::{FetchError, HiscoreClient};
pub use skills::SKILL_TABLE;
pub use snapshot::{PlayerSnapshot, SkillStats};

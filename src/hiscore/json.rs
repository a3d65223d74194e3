//! JSON bodies served by the router.
//!
//! `serde_json` escapes `"`, `\` and control characters (`\b \f \n \r \t`,
//! `\u00xx` for the rest); every other character is written through
//! unchanged.

use serde_json::json;

use crate::hiscore::snapshot::PlayerSnapshot;

/// Encodes a snapshot as a JSON document.
pub fn to_json(snapshot: &PlayerSnapshot) -> serde_json::Result<String> {
    serde_json::to_string(snapshot)
}

/// `{"error":"..."}`
pub fn error_body(message: &str) -> String {
    json!({ "error": message }).to_string()
}

/// `{"message":"..."}`
pub fn message_body(message: &str) -> String {
    json!({ "message": message }).to_string()
}

//! URL query-string codec.
//!
//! Decoding is lenient: a `%` that is not followed by two hex digits is
//! kept literally. Values stay raw bytes, so an escape like `%A0` that is
//! not valid UTF-8 survives decode and re-encode unchanged.

use std::collections::HashMap;

/// Decodes `+` as space and `%XY` hex escapes.
pub fn decode(raw: &str) -> Vec<u8> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi << 4) | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }

    out
}

/// Percent-encodes a value for use in a query string.
///
/// ASCII alphanumerics and `-_.~` pass through, space becomes `%20` and
/// every other byte becomes an uppercase `%XY` escape.
pub fn encode(value: &[u8]) -> String {
    let mut out = String::with_capacity(value.len());

    for &b in value {
        match b {
            b if b.is_ascii_alphanumeric() => out.push(b as char),
            b'-' | b'_' | b'.' | b'~' => out.push(b as char),
            b' ' => out.push_str("%20"),
            b => out.push_str(&format!("%{:02X}", b)),
        }
    }

    out
}

/// Parses `a=1&b=2` into a map of decoded keys and values.
///
/// Keys are matched as text; values are kept as the decoded bytes. A
/// segment without `=` yields an empty value, segments whose key decodes
/// to nothing are dropped, and a repeated key keeps its last value.
pub fn parse(query_string: &str) -> HashMap<String, Vec<u8>> {
    let mut params = HashMap::new();

    for segment in query_string.split('&') {
        let (key, value) = match segment.split_once('=') {
            Some((k, v)) => (decode(k), decode(v)),
            None => (decode(segment), Vec::new()),
        };
        let key = String::from_utf8_lossy(&key).into_owned();

        if !key.is_empty() {
            params.insert(key, value);
        }
    }

    params
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

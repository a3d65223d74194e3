use crate::http::request::{Method, Request};

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// No method token could be read from the request line
    InvalidRequest,
    /// A method token was present but is not one we recognise
    InvalidMethod,
}

/// Parses the request line out of the bytes of a single read.
///
/// Only the first line is examined, tokens are whitespace separated and
/// everything after the version is ignored. A missing target is treated
/// as an empty path rather than an error.
pub fn parse_request_line(buf: &[u8]) -> Result<Request, ParseError> {
    let text = String::from_utf8_lossy(buf);
    let line = text.lines().next().ok_or(ParseError::InvalidRequest)?;

    let mut parts = line.split_whitespace();

    let method_str = parts.next().ok_or(ParseError::InvalidRequest)?;
    let target = parts.next().unwrap_or("");
    let version = parts.next().unwrap_or("");

    let method = Method::from_str(method_str).ok_or(ParseError::InvalidMethod)?;

    Ok(Request::new(method, target, version))
}

use std::collections::HashMap;

use crate::http::query;

/// HTTP request methods.
///
/// Every method is recognised by the parser, but the hiscore router only
/// serves GET and answers everything else with 405 Method Not Allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Example
    ///
    /// ```
    /// # use hiscore_proxy::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }
}

/// A request line taken from the first read of a connection.
///
/// Headers and body are not retained; nothing downstream of the router
/// looks at them.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The raw request target, query string included (e.g. "/player?name=x")
    pub target: String,
    /// Target up to the first `?`
    pub path: String,
    /// Decoded query parameters, values as raw bytes
    pub query: HashMap<String, Vec<u8>>,
    /// HTTP version, empty if the client sent none
    pub version: String,
}

impl Request {
    /// Builds a request from its method and raw target, splitting off and
    /// decoding the query string.
    pub fn new(method: Method, target: impl Into<String>, version: impl Into<String>) -> Self {
        let target = target.into();
        let (path, query) = match target.split_once('?') {
            Some((path, qs)) => (path.to_string(), query::parse(qs)),
            None => (target.clone(), HashMap::new()),
        };

        Self {
            method,
            target,
            path,
            query,
            version: version.into(),
        }
    }

    /// Looks up a decoded query parameter.
    pub fn param(&self, key: &str) -> Option<&[u8]> {
        self.query.get(key).map(|v| v.as_slice())
    }
}

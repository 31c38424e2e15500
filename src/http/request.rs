/// HTTP request methods.
///
/// Only `GET` is served. Every other method is recognised so it can be
/// reported back in the 501 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other token, kept as sent.
    Other(String),
}

impl Method {
    /// Parses an HTTP method token.
    ///
    /// Matching is case-insensitive, so `get` and `GET` are the same method.
    /// Unknown tokens are preserved in [`Method::Other`].
    ///
    /// # Example
    ///
    /// ```
    /// # use tiny::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("get"), Method::GET);
    /// assert_eq!(Method::parse("BREW"), Method::Other("BREW".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            _ => Method::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(s) => s,
        }
    }
}

/// A request line as read off the wire.
///
/// Header lines are drained and discarded by the connection; nothing here
/// holds on to them.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request URI exactly as sent, not URL-decoded
    pub uri: String,
    /// HTTP version token (typically "HTTP/1.0")
    pub version: String,
}

impl Request {
    pub fn new(method: Method, uri: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            version: version.into(),
        }
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }
}

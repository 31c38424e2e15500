/// HTTP status codes the server can emit.
///
/// - `Ok` (200): static file or CGI output follows
/// - `BadRequest` (400): unparsable or oversized request line
/// - `Forbidden` (403): target exists but is not a readable/executable regular file
/// - `NotFound` (404): target does not exist
/// - `NotImplemented` (501): any method other than GET
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use tiny::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }
}

/// A response ready to be serialized.
///
/// Headers keep insertion order so identical requests produce byte-identical
/// responses.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Phrase written after the code on the status line
    pub reason: String,
    /// Headers in the order they are written
    pub headers: Vec<(String, String)>,
    /// Response body; empty when the body is streamed separately
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-type", "text/plain")
///     .body(b"hi".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    reason: Option<String>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            reason: None,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Overrides the reason phrase on the status line.
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Adds a header, replacing any existing header with the same
    /// (case-insensitive) name in place.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
            Some(existing) => existing.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// Appends a `Content-length` header matching the body unless one was
    /// already set.
    pub fn build(self) -> Response {
        let len = self.body.len();
        let has_length = self
            .headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case("Content-length"));

        let builder = if has_length {
            self
        } else {
            self.header("Content-length", len.to_string())
        };

        builder.build_head()
    }

    /// Builds the response exactly as configured, without adding a length.
    ///
    /// Used when the body is produced by someone else after the head is sent.
    pub fn build_head(self) -> Response {
        Response {
            reason: self
                .reason
                .unwrap_or_else(|| self.status.reason_phrase().to_string()),
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Builds the HTML error page sent for every failed transaction.
    ///
    /// `cause` is the offending file name or method, `short` goes on the
    /// status line and `long` is the human-readable explanation.
    pub fn client_error(cause: &str, status: StatusCode, short: &str, long: &str) -> Self {
        let code = status.as_u16();

        let mut body = String::new();
        body.push_str("<html><title>Tiny Error</title>");
        body.push_str("<body bgcolor=\"ffffff\">\r\n");
        body.push_str(&format!("{}: {}\r\n", code, short));
        body.push_str(&format!("<p>{}: {}\r\n", long, cause));
        body.push_str("<hr><em>The Tiny Web server</em>\r\n");

        ResponseBuilder::new(status)
            .reason(short)
            .header("Content-type", "text/html")
            .body(body.into_bytes())
            .build()
    }

    /// Returns the value of a header by case-insensitive name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

use std::fmt;

use crate::http::request::{Method, Request};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer than three whitespace-separated tokens.
    Malformed,
    /// A line exceeded the configured maximum before its newline arrived.
    LineTooLong,
    /// More header lines than the configured maximum.
    TooManyHeaders,
    InvalidUtf8,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Malformed => f.write_str("malformed request line"),
            ParseError::LineTooLong => f.write_str("line too long"),
            ParseError::TooManyHeaders => f.write_str("too many header lines"),
            ParseError::InvalidUtf8 => f.write_str("request line is not valid UTF-8"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Splits a request line into method, URI and version.
///
/// Tokens are separated by any run of whitespace; anything after the third
/// token is ignored. The trailing line terminator, if present, is stripped.
pub fn parse_request_line(line: &[u8]) -> Result<Request, ParseError> {
    let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidUtf8)?;

    let mut parts = line.split_whitespace();

    let method = parts.next().ok_or(ParseError::Malformed)?;
    let uri = parts.next().ok_or(ParseError::Malformed)?;
    let version = parts.next().ok_or(ParseError::Malformed)?;

    Ok(Request::new(Method::parse(method), uri, version))
}

/// True for the blank line that ends the header block.
///
/// The terminator is exactly `"\r\n"`; a bare `"\n"` is accepted too since
/// plenty of hand-typed clients send one.
pub fn is_header_terminator(line: &[u8]) -> bool {
    line == b"\r\n" || line == b"\n"
}

/// Strips the trailing CRLF (or LF) from a raw line.
pub fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

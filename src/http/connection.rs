use std::os::unix::fs::PermissionsExt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tokio::net::TcpStream;

use crate::config::SiteConfig;
use crate::content::cgi::serve_dynamic;
use crate::content::static_files::serve_static;
use crate::content::{ContentKind, Target};
use crate::http::parser::{ParseError, is_header_terminator, parse_request_line, trim_line_ending};
use crate::http::reader::{LineReader, ReadError};
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;

const OWNER_READ: u32 = 0o400;
const OWNER_EXEC: u32 = 0o100;

/// One request/response transaction on an accepted socket.
pub struct Connection {
    stream: TcpStream,
    reader: LineReader,
    site: Arc<SiteConfig>,
    state: ConnectionState,
}

pub enum ConnectionState {
    /// Waiting for the request line
    Reading,
    /// Request line parsed; method check and header drain pending
    Processing(Request),
    /// Exactly one of these is written before the socket closes
    Serving(Dispatch),
    Closed,
}

/// What a request resolved to.
#[derive(Debug)]
pub enum Dispatch {
    /// `cause` is the offending method, URI or line, kept for the log
    Error { cause: String, response: Response },
    Static { path: PathBuf, name: String, size: u64 },
    Dynamic { program: PathBuf, query: String },
}

impl Dispatch {
    pub fn error(cause: &str, status: StatusCode, short: &str, long: &str) -> Self {
        Dispatch::Error {
            cause: cause.to_string(),
            response: Response::client_error(cause, status, short, long),
        }
    }
}

impl Connection {
    pub fn new(stream: TcpStream, site: Arc<SiteConfig>) -> Self {
        let max_line_len = site.max_line_len;
        Self {
            stream,
            reader: LineReader::new(max_line_len),
            site,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the transaction to completion. Returns once a response has been
    /// written or the peer went away; closing the socket is left to the caller
    /// dropping the connection.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request_line().await? {
                        Some(Ok(req)) => ConnectionState::Processing(req),
                        Some(Err(rejected)) => ConnectionState::Serving(rejected),
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    if !req.is_get() {
                        self.state = ConnectionState::Serving(Dispatch::error(
                            req.method.as_str(),
                            StatusCode::NotImplemented,
                            "Not implemented",
                            "Tiny does not implement this method",
                        ));
                        continue;
                    }

                    self.state = match self.drain_headers().await? {
                        Some(Ok(())) => ConnectionState::Serving(self.dispatch(&req).await),
                        Some(Err(rejected)) => ConnectionState::Serving(rejected),
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Serving(dispatch) => {
                    self.serve(dispatch).await?;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// `None` when the peer closed before a full line arrived, `Some(Err)`
    /// carrying a 400 for lines that cannot be a request.
    async fn read_request_line(&mut self) -> anyhow::Result<Option<Result<Request, Dispatch>>> {
        let line = match self.reader.read_line(&mut self.stream).await {
            Ok(Some(line)) => line,
            Ok(None) => return Ok(None),
            Err(ReadError::TooLong) => return Ok(Some(Err(bad_request(&ParseError::LineTooLong)))),
            Err(ReadError::Io(e)) => return Err(e.into()),
        };

        let text = String::from_utf8_lossy(trim_line_ending(&line)).into_owned();

        match parse_request_line(&line) {
            Ok(req) => {
                tracing::info!(request = %text, "Request line received");
                Ok(Some(Ok(req)))
            }
            Err(e) => {
                tracing::warn!(request = %text, error = %e, "Rejecting request line");
                Ok(Some(Err(Dispatch::error(
                    &text,
                    StatusCode::BadRequest,
                    "Bad request",
                    "Tiny couldn't parse the request line",
                ))))
            }
        }
    }

    /// Reads and discards header lines up to and including the blank line.
    /// More than `max_headers` lines is answered with a 400.
    async fn drain_headers(&mut self) -> anyhow::Result<Option<Result<(), Dispatch>>> {
        let mut count = 0usize;
        loop {
            let line = match self.reader.read_line(&mut self.stream).await {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(None),
                Err(ReadError::TooLong) => return Ok(Some(Err(bad_request(&ParseError::LineTooLong)))),
                Err(ReadError::Io(e)) => return Err(e.into()),
            };

            if is_header_terminator(&line) {
                return Ok(Some(Ok(())));
            }

            count += 1;
            if count > self.site.max_headers {
                tracing::warn!(limit = self.site.max_headers, "Too many header lines");
                return Ok(Some(Err(bad_request(&ParseError::TooManyHeaders))));
            }

            tracing::debug!(header = %String::from_utf8_lossy(trim_line_ending(&line)), "Header");
        }
    }

    /// Classifies the URI and checks the target on disk.
    pub async fn dispatch(&self, req: &Request) -> Dispatch {
        resolve(&self.site, &self.site.classify(&req.uri)).await
    }

    async fn serve(&mut self, dispatch: Dispatch) -> anyhow::Result<()> {
        match dispatch {
            Dispatch::Error { cause, response } => {
                tracing::warn!(status = response.status.as_u16(), cause = %cause, "Sending error response");
                ResponseWriter::new(&response).write_to_stream(&mut self.stream).await
            }
            Dispatch::Static { path, name, size } => {
                tracing::debug!(path = %name, size, "Serving static content");
                serve_static(&mut self.stream, &path, &name, size, &self.site.server_name).await
            }
            Dispatch::Dynamic { program, query } => {
                tracing::debug!(program = %program.display(), query = %query, "Serving dynamic content");
                serve_dynamic(&mut self.stream, &program, &query, &self.site.root, &self.site.server_name)
                    .await
                    .map(|_| ())
            }
        }
    }
}

/// Stats `target` under the web root and decides how it is served.
pub async fn resolve(site: &SiteConfig, target: &Target) -> Dispatch {
    if has_parent_component(&target.path) {
        return Dispatch::error(
            &target.path,
            StatusCode::Forbidden,
            "Forbidden",
            "Tiny won't serve files outside the web root",
        );
    }

    let path = site.root.join(&target.path);

    let meta = match tokio::fs::metadata(&path).await {
        Ok(meta) => meta,
        Err(_) => {
            return Dispatch::error(
                &target.path,
                StatusCode::NotFound,
                "Not found",
                "Tiny couldn't find this file",
            );
        }
    };

    let mode = meta.permissions().mode();

    match target.kind {
        ContentKind::Static => {
            if !meta.is_file() || mode & OWNER_READ == 0 {
                return Dispatch::error(
                    &target.path,
                    StatusCode::Forbidden,
                    "Forbidden",
                    "Tiny couldn't read the file",
                );
            }
            Dispatch::Static {
                path,
                name: target.path.clone(),
                size: meta.len(),
            }
        }
        ContentKind::Dynamic => {
            if !meta.is_file() || mode & OWNER_EXEC == 0 {
                return Dispatch::error(
                    &target.path,
                    StatusCode::Forbidden,
                    "Forbidden",
                    "Tiny couldn't run the CGI program",
                );
            }
            Dispatch::Dynamic {
                program: path,
                query: target.query.clone(),
            }
        }
    }
}

fn has_parent_component(path: &str) -> bool {
    Path::new(path)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
}

/// 400 for input the reader refused before a request could be formed.
fn bad_request(err: &ParseError) -> Dispatch {
    Dispatch::error(
        &err.to_string(),
        StatusCode::BadRequest,
        "Bad request",
        "Tiny couldn't read the request",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_components_escape() {
        assert!(has_parent_component("./../etc/passwd"));
        assert!(has_parent_component("./a/../../b"));
        assert!(!has_parent_component("./a..b/home.html"));
        assert!(!has_parent_component("./home.html"));
    }

    #[tokio::test]
    async fn missing_file_keeps_path_as_cause() {
        let site = SiteConfig {
            root: std::env::temp_dir(),
            ..SiteConfig::default()
        };
        let target = site.classify(&format!("/tiny-absent-{}.html", std::process::id()));

        match resolve(&site, &target).await {
            Dispatch::Error { cause, response } => {
                assert_eq!(cause, target.path);
                assert_eq!(response.status, StatusCode::NotFound);
            }
            other => panic!("expected an error dispatch, got {:?}", other),
        }
    }

    #[test]
    fn oversized_input_reports_line_too_long() {
        match bad_request(&ParseError::LineTooLong) {
            Dispatch::Error { cause, response } => {
                assert_eq!(cause, "line too long");
                assert_eq!(response.status, StatusCode::BadRequest);
                assert!(String::from_utf8_lossy(&response.body).contains("Tiny couldn't read the request: line too long"));
            }
            other => panic!("expected an error dispatch, got {:?}", other),
        }
    }
}

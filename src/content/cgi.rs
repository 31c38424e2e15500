//! Running CGI programs with their standard output wired to the client.

use std::os::fd::{AsFd, OwnedFd};
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use anyhow::Context;
use tokio::net::TcpStream;
use tokio::process::Command;

use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::http::writer::ResponseWriter;

/// Environment variable carrying the raw query string.
pub const QUERY_STRING: &str = "QUERY_STRING";

/// Status line and `Server` header. The header block is left open; the
/// program writes the rest.
pub fn dynamic_head(server_name: &str) -> Response {
    ResponseBuilder::new(StatusCode::Ok)
        .header("Server", server_name)
        .build_head()
}

/// A duplicate of the client socket handed to the child as stdout.
///
/// The runtime keeps sockets non-blocking, and that flag is shared by every
/// duplicate of the descriptor. The child expects ordinary blocking writes, so
/// the socket is switched to blocking mode while this guard lives and back
/// again on drop. Nothing may touch the stream through the runtime meanwhile.
struct BlockingStdout {
    socket: std::net::TcpStream,
}

impl BlockingStdout {
    fn new(stream: &TcpStream) -> std::io::Result<Self> {
        let fd = stream.as_fd().try_clone_to_owned()?;
        let socket = std::net::TcpStream::from(fd);
        socket.set_nonblocking(false)?;
        Ok(Self { socket })
    }

    fn stdio(&self) -> std::io::Result<Stdio> {
        let fd: OwnedFd = self.socket.try_clone()?.into();
        Ok(Stdio::from(fd))
    }
}

impl Drop for BlockingStdout {
    fn drop(&mut self) {
        if let Err(e) = self.socket.set_nonblocking(true) {
            tracing::warn!(error = %e, "Failed to restore non-blocking mode on client socket");
        }
    }
}

/// Sends the 200 head, then runs `program` with `QUERY_STRING` set to `query`
/// and its stdout redirected to `stream`, waiting for it to exit.
///
/// The child gets no arguments besides its own name, inherits this process's
/// environment, runs in `workdir` and reads from an empty stdin. Once the head
/// is out there is no way to report a failure to the client, so spawn and wait
/// errors are returned for the caller to log.
pub async fn serve_dynamic(
    stream: &mut TcpStream,
    program: &Path,
    query: &str,
    workdir: &Path,
    server_name: &str,
) -> anyhow::Result<ExitStatus> {
    ResponseWriter::open_head(&dynamic_head(server_name))
        .write_to_stream(stream)
        .await?;

    let stdout = BlockingStdout::new(stream).context("failed to hand client socket to CGI program")?;

    let mut child = Command::new(program)
        .env(QUERY_STRING, query)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(stdout.stdio()?)
        .spawn()
        .with_context(|| format!("failed to spawn CGI program {}", program.display()))?;

    tracing::debug!(program = %program.display(), pid = ?child.id(), query, "CGI program started");

    let status = child
        .wait()
        .await
        .with_context(|| format!("failed waiting for CGI program {}", program.display()))?;

    drop(stdout);

    if status.success() {
        tracing::info!(program = %program.display(), %status, "CGI program finished");
    } else {
        tracing::warn!(program = %program.display(), %status, "CGI program exited unsuccessfully");
    }

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::writer::serialize_open_head;

    #[test]
    fn head_is_left_open() {
        let head = dynamic_head("Tiny Web Server");

        assert_eq!(
            serialize_open_head(&head),
            b"HTTP/1.0 200 OK\r\nServer: Tiny Web Server\r\n".to_vec()
        );
    }
}

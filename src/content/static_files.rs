//! Sending regular files as the response body.

use std::path::Path;

use anyhow::Context;
use tokio::fs::File;
use tokio::io::AsyncWrite;

use crate::http::mime;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::http::writer::ResponseWriter;

/// Head of a static response: `Server`, `Content-length`, `Content-type`,
/// in that order.
pub fn static_head(name: &str, size: u64, server_name: &str) -> Response {
    ResponseBuilder::new(StatusCode::Ok)
        .header("Server", server_name)
        .header("Content-length", size.to_string())
        .header("Content-type", mime::content_type(name))
        .build_head()
}

/// Writes a 200 response carrying the bytes of the file at `path`.
///
/// `name` is the resolved request path used to pick the content type and
/// `size` the length reported by the earlier stat. The file is opened before
/// anything is written, so an open failure leaves the connection untouched.
pub async fn serve_static<W>(
    stream: &mut W,
    path: &Path,
    name: &str,
    size: u64,
    server_name: &str,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut file = File::open(path)
        .await
        .with_context(|| format!("failed to open {}", path.display()))?;

    let head = static_head(name, size, server_name);
    ResponseWriter::new(&head).write_to_stream(stream).await?;

    let sent = tokio::io::copy(&mut file, stream)
        .await
        .with_context(|| format!("failed to send {}", path.display()))?;
    drop(file);

    if sent != size {
        tracing::warn!(path = %path.display(), expected = size, sent, "File changed size while being served");
    }

    tracing::debug!(path = %path.display(), bytes = sent, "Static content sent");
    Ok(())
}

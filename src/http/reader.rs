//! Bounded line reading over the client connection.
//!
//! Request lines and header lines are pulled one at a time into a growable
//! buffer. A line that would exceed the configured limit is rejected instead of
//! being truncated.

use std::fmt;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Bytes requested from the socket per read.
const READ_CHUNK: usize = 1024;

#[derive(Debug)]
pub enum ReadError {
    /// No newline within `max_len` bytes.
    TooLong,
    Io(std::io::Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::TooLong => f.write_str("line exceeds maximum length"),
            ReadError::Io(e) => write!(f, "read failed: {}", e),
        }
    }
}

impl std::error::Error for ReadError {}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> Self {
        ReadError::Io(e)
    }
}

pub struct LineReader {
    buffer: BytesMut,
    /// Prefix of `buffer` already known to contain no newline.
    scanned: usize,
    max_len: usize,
}

impl LineReader {
    pub fn new(max_len: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(READ_CHUNK),
            scanned: 0,
            max_len,
        }
    }

    /// Reads the next line, terminator included.
    ///
    /// Returns `Ok(None)` when the peer closes the connection before a full
    /// line arrives; a dangling partial line is discarded.
    pub async fn read_line<R>(&mut self, src: &mut R) -> Result<Option<Bytes>, ReadError>
    where
        R: AsyncRead + Unpin,
    {
        loop {
            if let Some(pos) = self.buffer[self.scanned..].iter().position(|&b| b == b'\n') {
                let end = self.scanned + pos + 1;
                if end > self.max_len {
                    return Err(ReadError::TooLong);
                }
                self.scanned = 0;
                return Ok(Some(self.buffer.split_to(end).freeze()));
            }

            self.scanned = self.buffer.len();
            if self.scanned >= self.max_len {
                return Err(ReadError::TooLong);
            }

            self.buffer.reserve(READ_CHUNK);
            let n = src.read_buf(&mut self.buffer).await?;

            if n == 0 {
                return Ok(None);
            }
        }
    }
}

//! Line-oriented input for chat sessions.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tracing::debug;

/// Reads `\n`-terminated lines with a length limit.
///
/// A trailing `\r` is stripped and invalid UTF-8 is replaced, since Telnet
/// clients send whatever their terminal produces.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    max_line_length: usize,
    buf: Vec<u8>,
}

impl<R> LineReader<R> {
    /// Create a reader accepting lines up to `max_line_length` bytes.
    pub fn new(inner: R, max_line_length: usize) -> Self {
        Self {
            inner,
            max_line_length: max_line_length.max(1),
            buf: Vec::new(),
        }
    }

    /// Get the line length limit.
    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    /// Read one line.
    ///
    /// Returns:
    /// - `Ok(Some(line))` for a complete line (may be empty),
    /// - `Ok(None)` when the peer closed the stream,
    /// - `Err` with `InvalidData` when a line exceeds the limit.
    pub async fn read_line(&mut self) -> std::io::Result<Option<String>> {
        self.buf.clear();

        // Room for the terminator and an optional carriage return.
        let limit = self.max_line_length as u64 + 2;
        let n = (&mut self.inner)
            .take(limit)
            .read_until(b'\n', &mut self.buf)
            .await?;

        if n == 0 {
            return Ok(None);
        }

        if self.buf.last() != Some(&b'\n') {
            if n as u64 >= limit {
                return Err(line_too_long());
            }
            debug!("Discarding {} bytes of unterminated input at EOF", n);
            return Ok(None);
        }

        self.buf.pop();
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }

        if self.buf.len() > self.max_line_length {
            return Err(line_too_long());
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

fn line_too_long() -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, "line too long")
}

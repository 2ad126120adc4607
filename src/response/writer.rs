use bytes::{BufMut, BytesMut};
use std::fmt;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::{ResponseError, StatusCode};
use crate::headers::Headers;
use crate::matches::CRLF;

const DEFAULT_BUFFER_CAP: usize = 512;

/// Next call a [`ResponseWriter`] accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WritePhase {
    /// Nothing written yet.
    StatusLine,
    /// Status line written.
    Headers,
    /// Headers written, body framing not chosen yet.
    Body,
    /// Plain body is being written.
    FixedBody,
    /// Chunked body is being written.
    ChunkedBody,
    /// Last chunk written, trailers may follow.
    Trailers,
    /// Response complete.
    Done,
}

impl fmt::Display for WritePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StatusLine => "status line",
            Self::Headers => "headers",
            Self::Body => "body",
            Self::FixedBody => "plain body",
            Self::ChunkedBody => "chunked body",
            Self::Trailers => "trailers",
            Self::Done => "nothing",
        })
    }
}

/// HTTP/1.1 response writer.
///
/// Each method writes its bytes to the underlying IO before returning. The call sequence is:
///
/// 1. [`write_status_line`]
/// 2. [`write_headers`]
/// 3. either [`write_body`], or one or more [`write_chunked_body`] followed by
///    [`write_chunked_body_done`] and [`write_trailers`]
///
/// [`write_chunked_body_done`] only emits the `0\r\n` last chunk line. The empty line that ends a
/// chunked message is written by [`write_trailers`], so it must be called even with empty
/// trailers.
///
/// [`write_status_line`]: ResponseWriter::write_status_line
/// [`write_headers`]: ResponseWriter::write_headers
/// [`write_body`]: ResponseWriter::write_body
/// [`write_chunked_body`]: ResponseWriter::write_chunked_body
/// [`write_chunked_body_done`]: ResponseWriter::write_chunked_body_done
/// [`write_trailers`]: ResponseWriter::write_trailers
pub struct ResponseWriter<W> {
    io: W,
    buffer: BytesMut,
    phase: WritePhase,
}

impl<W> ResponseWriter<W> {
    /// Create new [`ResponseWriter`] over `io`.
    pub fn new(io: W) -> Self {
        Self {
            io,
            buffer: BytesMut::with_capacity(DEFAULT_BUFFER_CAP),
            phase: WritePhase::StatusLine,
        }
    }

    /// Returns the next call this writer accepts.
    #[inline]
    pub fn phase(&self) -> WritePhase {
        self.phase
    }

    /// Returns shared reference to the underlying IO.
    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.io
    }

    /// Consume the writer and returns the underlying IO.
    #[inline]
    pub fn into_inner(self) -> W {
        self.io
    }

    fn advance(
        &mut self,
        call: &'static str,
        allowed: &[WritePhase],
        next: WritePhase,
    ) -> Result<(), ResponseError> {
        if !allowed.contains(&self.phase) {
            return Err(ResponseError::OutOfOrder { call, phase: self.phase });
        }
        self.phase = next;
        Ok(())
    }
}

impl<W> ResponseWriter<W>
where
    W: AsyncWrite + Unpin,
{
    /// Write `HTTP/1.1 <code> <reason>\r\n`.
    pub async fn write_status_line(&mut self, status: StatusCode) -> Result<(), ResponseError> {
        use WritePhase as P;
        self.advance("write_status_line", &[P::StatusLine], P::Headers)?;

        self.buffer.put_slice(status.status_line().as_bytes());
        self.flush_buffer().await
    }

    /// Write one `name: value` line per header, followed by the empty line ending the head.
    pub async fn write_headers(&mut self, headers: &Headers) -> Result<(), ResponseError> {
        use WritePhase as P;
        self.advance("write_headers", &[P::Headers], P::Body)?;

        put_fields(&mut self.buffer, headers);
        self.flush_buffer().await
    }

    /// Write `body` as is.
    ///
    /// Can be called multiple times, the bytes are concatenated.
    pub async fn write_body(&mut self, body: &[u8]) -> Result<usize, ResponseError> {
        use WritePhase as P;
        self.advance("write_body", &[P::Body, P::FixedBody], P::FixedBody)?;

        self.io.write_all(body).await?;
        self.io.flush().await?;
        Ok(body.len())
    }

    /// Write `chunk` as a single chunk: `<hex length>\r\n<chunk>\r\n`.
    ///
    /// An empty chunk writes nothing, as a zero length chunk would end the body.
    pub async fn write_chunked_body(&mut self, chunk: &[u8]) -> Result<usize, ResponseError> {
        use WritePhase as P;
        self.advance("write_chunked_body", &[P::Body, P::ChunkedBody], P::ChunkedBody)?;

        if chunk.is_empty() {
            return Ok(0);
        }

        put_hex(&mut self.buffer, chunk.len());
        self.buffer.put_slice(CRLF);
        self.io.write_all_buf(&mut self.buffer).await?;
        self.io.write_all(chunk).await?;
        self.io.write_all(CRLF).await?;
        self.io.flush().await?;
        Ok(chunk.len())
    }

    /// Write the last chunk line `0\r\n`.
    pub async fn write_chunked_body_done(&mut self) -> Result<(), ResponseError> {
        use WritePhase as P;
        self.advance("write_chunked_body_done", &[P::Body, P::ChunkedBody], P::Trailers)?;

        self.buffer.put_slice(b"0");
        self.buffer.put_slice(CRLF);
        self.flush_buffer().await
    }

    /// Write trailer fields followed by the empty line ending the chunked message.
    pub async fn write_trailers(&mut self, trailers: &Headers) -> Result<(), ResponseError> {
        use WritePhase as P;
        self.advance("write_trailers", &[P::Trailers], P::Done)?;

        put_fields(&mut self.buffer, trailers);
        self.flush_buffer().await
    }

    /// Shutdown the write side of the underlying IO.
    pub async fn shutdown(&mut self) -> Result<(), ResponseError> {
        self.io.shutdown().await?;
        Ok(())
    }

    async fn flush_buffer(&mut self) -> Result<(), ResponseError> {
        self.io.write_all_buf(&mut self.buffer).await?;
        self.io.flush().await?;
        Ok(())
    }
}

impl<W> fmt::Debug for ResponseWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseWriter")
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

fn put_fields(buf: &mut BytesMut, headers: &Headers) {
    for (name, value) in headers {
        buf.put_slice(name.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(value.as_bytes());
        buf.put_slice(CRLF);
    }
    buf.put_slice(CRLF);
}

/// Write lowercase hex digits of `n` without leading zeros.
fn put_hex(buf: &mut BytesMut, mut n: usize) {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut digits = [0u8; 2 * size_of::<usize>()];
    let mut i = digits.len();
    loop {
        i -= 1;
        digits[i] = HEX[n & 0xf];
        n >>= 4;
        if n == 0 {
            break;
        }
    }
    buf.put_slice(&digits[i..]);
}

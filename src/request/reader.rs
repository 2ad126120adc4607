use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use super::{Request, RequestError};

/// Initial capacity of the per request read buffer.
pub const INITIAL_BUFFER_CAP: usize = 1024;

impl Request {
    /// Read and parse a single request from `io`.
    ///
    /// Bytes are read into a buffer, fed to [`Request::parse`], and the consumed prefix is
    /// dropped. When the buffer is full and nothing could be consumed, its capacity is doubled.
    ///
    /// There is no upper bound on the buffer size and no read timeout: a peer that never
    /// completes its request holds the buffer and the task indefinitely.
    ///
    /// A clean end of stream before any byte finishes with an empty [`Done`] request. An end of
    /// stream in the middle of the headers or body is an error.
    ///
    /// [`Done`]: super::ParseState::Done
    pub async fn from_reader<R>(io: &mut R) -> Result<Request, RequestError>
    where
        R: AsyncRead + Unpin,
    {
        let mut request = Request::new();
        let mut buffer = BytesMut::with_capacity(INITIAL_BUFFER_CAP);

        while !request.is_finished() {
            if buffer.len() == buffer.capacity() {
                buffer.reserve(buffer.capacity().max(INITIAL_BUFFER_CAP));
            }

            let read = io.read_buf(&mut buffer).await?;
            if read == 0 {
                request.parse_eof(&buffer)?;
                break;
            }

            let consumed = request.parse(&buffer)?;
            buffer.advance(consumed);
        }

        Ok(request)
    }
}

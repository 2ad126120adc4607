use std::{fmt, io};

use crate::headers::HeaderError;

/// An error that can occur while reading a request.
#[derive(Debug)]
pub enum RequestError {
    /// Request line is not exactly three space separated tokens.
    MalformedRequestLine,
    /// Version token is not `HTTP/1.1`.
    UnsupportedHttpVersion,
    /// Invalid header field.
    Header(HeaderError),
    /// Parsing was resumed after it already failed.
    RequestInErrorState,
    /// Stream ended before the header section was complete.
    IncompleteHeaders,
    /// Stream ended before `Content-Length` bytes of body arrived.
    ShortBodyAtEndOfStream {
        received: usize,
        expected: usize,
    },
    /// IO error other than a clean end of stream.
    Io(io::Error),
}

impl RequestError {
    /// Returns `true` if the error comes from the underlying IO rather than the request bytes.
    #[inline]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(..))
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Header(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRequestLine => f.write_str("malformed request line"),
            Self::UnsupportedHttpVersion => f.write_str("unsupported HTTP version"),
            Self::Header(err) => write!(f, "header error: {err}"),
            Self::RequestInErrorState => f.write_str("request in error state"),
            Self::IncompleteHeaders => f.write_str("stream ended before end of headers"),
            Self::ShortBodyAtEndOfStream { received, expected } => write!(
                f,
                "body shorter than Content-Length: got {received}, expected {expected}"
            ),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl From<HeaderError> for RequestError {
    fn from(v: HeaderError) -> Self {
        Self::Header(v)
    }
}

impl From<io::Error> for RequestError {
    fn from(v: io::Error) -> Self {
        Self::Io(v)
    }
}

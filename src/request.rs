//! HTTP Request.
//!
//! A [`Request`] starts empty and is filled by [`Request::parse`] as bytes arrive. The parser
//! moves through [`ParseState`] until it reaches [`ParseState::Done`] or
//! [`ParseState::Error`], both terminal.
//!
//! [`Request::from_reader`] drives the parser from an async byte stream.
use bytes::{Bytes, BytesMut};

use crate::headers::Headers;

mod error;
mod parser;
mod reader;

#[cfg(test)]
mod test;

pub use error::RequestError;
pub use parser::parse_request_line;
pub use reader::INITIAL_BUFFER_CAP;

/// Request line, e.g: `GET /index.html HTTP/1.1`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestLine {
    /// Request method, e.g: `GET`.
    pub method: String,
    /// Raw request target, e.g: `/index.html`.
    pub target: String,
    /// HTTP version without the `HTTP/` prefix, always `1.1`.
    pub version: String,
}

/// Request parser state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParseState {
    /// Waiting for the request line.
    #[default]
    Init,
    /// Request line parsed, reading header fields.
    Headers,
    /// Header section complete, reading `Content-Length` bytes of body.
    Body,
    /// Request fully parsed.
    Done,
    /// Parsing failed, any further parse returns [`RequestError::RequestInErrorState`].
    Error,
}

impl ParseState {
    /// Returns `true` for [`Done`] or [`Error`].
    ///
    /// [`Done`]: ParseState::Done
    /// [`Error`]: ParseState::Error
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

/// HTTP Request.
#[derive(Debug, Default)]
pub struct Request {
    request_line: RequestLine,
    headers: Headers,
    body: BytesMut,
    content_len: usize,
    state: ParseState,
}

impl Request {
    /// Create new empty [`Request`] in [`ParseState::Init`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns shared reference to [`RequestLine`].
    #[inline]
    pub fn request_line(&self) -> &RequestLine {
        &self.request_line
    }

    /// Returns shared reference to [`Headers`].
    #[inline]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the body bytes read so far.
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consume the request and returns the body.
    #[inline]
    pub fn into_body(self) -> Bytes {
        self.body.freeze()
    }

    /// Returns current [`ParseState`].
    #[inline]
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Returns `true` if the parser reached a terminal state.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns the expected body length.
    ///
    /// Only meaningful once the header section is complete. Missing or non-numeric
    /// `Content-Length` is treated as `0`.
    #[inline]
    pub fn content_len(&self) -> usize {
        self.content_len
    }
}

use super::{ParseState, Request, RequestError, RequestLine};
use crate::common::ParseResult;
use crate::matches::{self, CRLF};

const VERSION: &[u8] = b"HTTP/1.1";
const VERSION_NUMBER: &str = "1.1";

// ===== Request Line =====

/// Parse request line from the start of `bytes`.
///
/// Returns [`ParseResult::Pending`] if no CRLF is found yet. On success, returns the request
/// line and the number of bytes consumed including the CRLF.
pub fn parse_request_line(bytes: &[u8]) -> ParseResult<(RequestLine, usize), RequestError> {
    let Some(idx) = matches::find_crlf(bytes) else {
        return ParseResult::Pending;
    };

    let mut parts = bytes[..idx].split(|&b| b == b' ');

    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return ParseResult::Err(RequestError::MalformedRequestLine);
    };

    if method.is_empty() || target.is_empty() {
        return ParseResult::Err(RequestError::MalformedRequestLine);
    }

    if version != VERSION {
        return ParseResult::Err(RequestError::UnsupportedHttpVersion);
    }

    let (Ok(method), Ok(target)) = (std::str::from_utf8(method), std::str::from_utf8(target)) else {
        return ParseResult::Err(RequestError::MalformedRequestLine);
    };

    let line = RequestLine {
        method: method.to_owned(),
        target: target.to_owned(),
        version: VERSION_NUMBER.to_owned(),
    };

    ParseResult::Ok((line, idx + CRLF.len()))
}

// ===== State Machine =====

impl Request {
    /// Advance the parser with currently unconsumed bytes.
    ///
    /// Returns the number of bytes consumed, which the caller must drop from the front of its
    /// buffer before calling again. Returning less than `bytes.len()` without reaching a terminal
    /// state means more bytes are required.
    ///
    /// Any error moves the parser to [`ParseState::Error`].
    pub fn parse(&mut self, bytes: &[u8]) -> Result<usize, RequestError> {
        let mut read = 0;

        loop {
            let rest = &bytes[read..];

            match self.state {
                ParseState::Error => return Err(RequestError::RequestInErrorState),
                ParseState::Init => match parse_request_line(rest) {
                    ParseResult::Ok((line, len)) => {
                        read += len;
                        self.request_line = line;
                        self.state = ParseState::Headers;
                    }
                    ParseResult::Pending => break,
                    ParseResult::Err(err) => return Err(self.fail(err)),
                },
                ParseState::Headers => {
                    let (len, done) = match self.headers.parse(rest) {
                        Ok(ok) => ok,
                        Err(err) => return Err(self.fail(err.into())),
                    };
                    read += len;

                    if !done {
                        break;
                    }

                    self.content_len = self
                        .headers
                        .get("content-length")
                        .and_then(|value| value.parse().ok())
                        .unwrap_or(0);

                    self.state = match self.content_len {
                        0 => ParseState::Done,
                        _ => ParseState::Body,
                    };
                }
                ParseState::Body => {
                    let len = (self.content_len - self.body.len()).min(rest.len());
                    self.body.extend_from_slice(&rest[..len]);
                    read += len;

                    if self.body.len() == self.content_len {
                        self.state = ParseState::Done;
                    }
                    break;
                }
                ParseState::Done => break,
            }
        }

        Ok(read)
    }

    /// Finish parsing after the stream signaled end of input.
    ///
    /// `remaining` is the buffered bytes that were not consumed.
    pub(crate) fn parse_eof(&mut self, remaining: &[u8]) -> Result<(), RequestError> {
        match self.state {
            ParseState::Init if !remaining.is_empty() => {
                Err(self.fail(RequestError::MalformedRequestLine))
            }
            ParseState::Init | ParseState::Done => {
                self.state = ParseState::Done;
                Ok(())
            }
            ParseState::Headers => Err(self.fail(RequestError::IncompleteHeaders)),
            ParseState::Body => {
                let err = RequestError::ShortBodyAtEndOfStream {
                    received: self.body.len(),
                    expected: self.content_len,
                };
                Err(self.fail(err))
            }
            ParseState::Error => Err(RequestError::RequestInErrorState),
        }
    }

    fn fail(&mut self, err: RequestError) -> RequestError {
        self.state = ParseState::Error;
        err
    }
}

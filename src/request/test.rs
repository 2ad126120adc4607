use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};

use super::{INITIAL_BUFFER_CAP, ParseState, Request, RequestError, RequestLine, parse_request_line};
use crate::common::ParseResult;

/// Reader that returns at most `per_read` bytes on each read.
struct ChunkReader {
    data: Vec<u8>,
    per_read: usize,
    pos: usize,
}

impl ChunkReader {
    fn new(data: impl Into<Vec<u8>>, per_read: usize) -> Self {
        Self { data: data.into(), per_read, pos: 0 }
    }
}

impl AsyncRead for ChunkReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let end = (self.pos + self.per_read).min(self.data.len());
        let len = (end - self.pos).min(buf.remaining());
        let pos = self.pos;
        buf.put_slice(&self.data[pos..pos + len]);
        self.pos += len;
        Poll::Ready(Ok(()))
    }
}

/// Reader that fails after yielding its data.
struct ResetReader {
    inner: ChunkReader,
}

impl AsyncRead for ResetReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.inner.pos == self.inner.data.len() {
            return Poll::Ready(Err(io::ErrorKind::ConnectionReset.into()));
        }
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

async fn read_chunked(input: &[u8], per_read: usize) -> Result<Request, RequestError> {
    Request::from_reader(&mut ChunkReader::new(input, per_read)).await
}

#[test]
fn test_parse_request_line() {
    macro_rules! test {
        (#[pending] $input:literal) => {
            assert!(parse_request_line($input).is_pending(), "input {:?}", $input);
        };
        (#[error($err:ident)] $input:literal) => {
            match parse_request_line($input) {
                ParseResult::Err(RequestError::$err) => {}
                other => panic!("expected `Err({})`, but its {other:?}", stringify!($err)),
            }
        };
        {
            $input:literal;
            $method:literal, $target:literal;
            $read:expr
        } => {
            let ParseResult::Ok((line, read)) = parse_request_line($input) else {
                panic!("expected `Ok` for {:?}", $input);
            };
            assert_eq!(line.method, $method);
            assert_eq!(line.target, $target);
            assert_eq!(line.version, "1.1");
            assert_eq!(read, $read, "invalid consumed length");
        };
    }

    test! {
        b"GET / HTTP/1.1\r\n";
        "GET", "/";
        16
    }
    test! {
        b"GET /coffee HTTP/1.1\r\nHost: localhost:42069\r\n";
        "GET", "/coffee";
        22
    }
    test! {
        b"POST /search?search=adequate&filter=available HTTP/1.1\r\n";
        "POST", "/search?search=adequate&filter=available";
        56
    }
    test! {
        b"OPTIONS * HTTP/1.1\r\n\r\n";
        "OPTIONS", "*";
        20
    }

    test!(#[error(UnsupportedHttpVersion)] b"GET / HTTP/2.0\r\n");
    test!(#[error(UnsupportedHttpVersion)] b"GET / HTTP/1.0\r\n");
    test!(#[error(UnsupportedHttpVersion)] b"GET / http/1.1\r\n");
    test!(#[error(MalformedRequestLine)] b"GET /\r\n");
    test!(#[error(MalformedRequestLine)] b"/coffee HTTP/1.1\r\n");
    test!(#[error(MalformedRequestLine)] b"GET /coffee HTTP/1.1 extra\r\n");
    test!(#[error(MalformedRequestLine)] b"GET  /coffee HTTP/1.1\r\n");
    test!(#[error(MalformedRequestLine)] b"GET /caf\xff HTTP/1.1\r\n");

    test!(#[pending] b"");
    test!(#[pending] b"GET / HTTP/1.1");
    test!(#[pending] b"GET / HTTP/1.1\r");
    test!(#[pending] b"GET /\n");
}

#[test]
fn test_state_machine() {
    let input = b"POST /submit HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
    let mut request = Request::new();
    assert_eq!(request.state(), ParseState::Init);

    // request line
    assert_eq!(request.parse(&input[..10]).unwrap(), 0);
    assert_eq!(request.state(), ParseState::Init);

    let read = request.parse(&input[..30]).unwrap();
    assert_eq!(read, 23);
    assert_eq!(request.state(), ParseState::Headers);

    let read = read + request.parse(&input[read..44]).unwrap();
    assert_eq!(read, 44);
    assert_eq!(request.state(), ParseState::Body);
    assert_eq!(request.content_len(), 5);

    let read = read + request.parse(&input[read..46]).unwrap();
    assert_eq!(request.body(), b"he");
    assert_eq!(request.state(), ParseState::Body);

    request.parse(&input[read..]).unwrap();
    assert_eq!(request.body(), b"hello");
    assert_eq!(request.state(), ParseState::Done);

    // terminal
    assert_eq!(request.parse(b"more").unwrap(), 0);
    assert_eq!(request.state(), ParseState::Done);
}

#[test]
fn test_error_state_is_terminal() {
    let mut request = Request::new();
    assert!(matches!(
        request.parse(b"GET / HTTP/2.0\r\n"),
        Err(RequestError::UnsupportedHttpVersion)
    ));
    assert_eq!(request.state(), ParseState::Error);
    assert!(request.is_finished());

    assert!(matches!(
        request.parse(b"GET / HTTP/1.1\r\n\r\n"),
        Err(RequestError::RequestInErrorState)
    ));

    let mut request = Request::new();
    assert!(matches!(
        request.parse(b"GET / HTTP/1.1\r\nHost : x\r\n\r\n"),
        Err(RequestError::Header(crate::headers::HeaderError::MalformedHeaderKey))
    ));
    assert_eq!(request.state(), ParseState::Error);
}

#[tokio::test]
async fn request_line_with_any_chunking() {
    let input = b"GET /coffee HTTP/1.1\r\nHost: localhost:42069\r\nUser-Agent: curl/7.81.0\r\nAccept: */*\r\n\r\n";
    let expected = RequestLine {
        method: "GET".into(),
        target: "/coffee".into(),
        version: "1.1".into(),
    };

    for per_read in 1..=input.len() {
        let request = read_chunked(input, per_read).await.unwrap();
        assert_eq!(request.request_line(), &expected, "per_read {per_read}");
        assert_eq!(request.headers().get("host"), Some("localhost:42069"));
        assert_eq!(request.headers().get("User-Agent"), Some("curl/7.81.0"));
        assert_eq!(request.headers().get("accept"), Some("*/*"));
        assert_eq!(request.headers().len(), 3);
        assert_eq!(request.state(), ParseState::Done);
        assert!(request.body().is_empty());
    }
}

#[tokio::test]
async fn request_with_body() {
    let input = b"POST /submit HTTP/1.1\r\nHost: localhost:42069\r\nContent-Length: 13\r\n\r\nhello world!\n";
    for per_read in [1, 3, 7, input.len()] {
        let request = read_chunked(input, per_read).await.unwrap();
        assert_eq!(request.request_line().method, "POST");
        assert_eq!(request.body(), b"hello world!\n");
        assert_eq!(request.into_body(), &b"hello world!\n"[..]);
    }
}

#[tokio::test]
async fn request_body_length_enforced() {
    let input = b"POST /submit HTTP/1.1\r\nContent-Length: 5\r\n\r\nabc";
    match read_chunked(input, 3).await {
        Err(RequestError::ShortBodyAtEndOfStream { received, expected }) => {
            assert_eq!((received, expected), (3, 5));
        }
        other => panic!("expected short body, but its {other:?}"),
    }

    let input = b"POST /submit HTTP/1.1\r\nContent-Length: 5\r\n\r\nabcde";
    let request = read_chunked(input, 3).await.unwrap();
    assert_eq!(request.body(), b"abcde");

    // bytes past Content-Length are not part of the body
    let input = b"POST /submit HTTP/1.1\r\nContent-Length: 5\r\n\r\nabcdefgh";
    let request = read_chunked(input, input.len()).await.unwrap();
    assert_eq!(request.body(), b"abcde");
}

#[tokio::test]
async fn request_without_content_length() {
    let input = b"POST /submit HTTP/1.1\r\nHost: x\r\n\r\nignored";
    let request = read_chunked(input, 4).await.unwrap();
    assert!(request.body().is_empty());
    assert_eq!(request.content_len(), 0);

    let input = b"POST /submit HTTP/1.1\r\nContent-Length: five\r\n\r\nhello";
    let request = read_chunked(input, 4).await.unwrap();
    assert!(request.body().is_empty());
    assert_eq!(request.state(), ParseState::Done);
}

#[tokio::test]
async fn request_duplicate_headers_combined() {
    let input = b"GET / HTTP/1.1\r\nX-Tag: a\r\nx-tag: b\r\n\r\n";
    let request = read_chunked(input, 2).await.unwrap();
    assert_eq!(request.headers().get("X-Tag"), Some("a,b"));
}

#[tokio::test]
async fn request_malformed() {
    assert!(matches!(
        read_chunked(b"GET / HTTP/2.0\r\n\r\n", 3).await,
        Err(RequestError::UnsupportedHttpVersion)
    ));
    assert!(matches!(
        read_chunked(b"GET /\r\n\r\n", 3).await,
        Err(RequestError::MalformedRequestLine)
    ));
    assert!(matches!(
        read_chunked(b"GET / HTTP/1.1\r\nHost localhost\r\n\r\n", 3).await,
        Err(RequestError::Header(crate::headers::HeaderError::MalformedHeader))
    ));
}

#[tokio::test]
async fn request_end_of_stream() {
    // nothing sent
    let request = read_chunked(b"", 8).await.unwrap();
    assert_eq!(request.state(), ParseState::Done);
    assert_eq!(request.request_line(), &RequestLine::default());

    assert!(matches!(
        read_chunked(b"GET / HTTP/1.1\r\nHost: x\r\n", 8).await,
        Err(RequestError::IncompleteHeaders)
    ));
    assert!(matches!(
        read_chunked(b"GET / HTTP/1.1", 8).await,
        Err(RequestError::MalformedRequestLine)
    ));
}

#[tokio::test]
async fn request_buffer_grows() {
    let value = "v".repeat(INITIAL_BUFFER_CAP * 3);
    let input = format!("GET / HTTP/1.1\r\nX-Large: {value}\r\n\r\n");

    for per_read in [64, input.len()] {
        let request = read_chunked(input.as_bytes(), per_read).await.unwrap();
        assert_eq!(request.headers().get("x-large"), Some(value.as_str()));
    }
}

#[tokio::test]
async fn request_io_error() {
    let mut io = ResetReader {
        inner: ChunkReader::new(&b"GET / HTTP/1.1\r\n"[..], 4),
    };
    match Request::from_reader(&mut io).await {
        Err(err @ RequestError::Io(_)) => assert!(err.is_io()),
        other => panic!("expected io error, but its {other:?}"),
    }
}

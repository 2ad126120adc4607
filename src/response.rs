//! HTTP Response.
//!
//! [`ResponseWriter`] emits a response in a fixed order: status line, headers, then either a
//! plain body or a chunked body followed by trailers. Calls made out of that order are rejected
//! with [`ResponseError::OutOfOrder`].
use crate::headers::Headers;

mod error;
mod status;
mod writer;


pub use error::ResponseError;
pub use status::StatusCode;
pub use writer::{ResponseWriter, WritePhase};

/// Returns the baseline response headers.
///
/// Contains `Connection: close`, `Content-Type: text/plain` and `Content-Length` with the given
/// length. Callers adjust the collection with [`Headers::replace`], [`Headers::remove`] or
/// [`Headers::set`] before writing it.
pub fn default_headers(content_len: usize) -> Headers {
    let mut headers = Headers::with_capacity(3);
    headers.set("Connection", "close");
    headers.set("Content-Type", "text/plain");
    headers.set("Content-Length", itoa::Buffer::new().format(content_len));
    headers
}

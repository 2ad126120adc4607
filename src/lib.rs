//! HTTP/1.1 message engine.
//!
//! - [`headers`] case-insensitive header collection and header section parser
//! - [`request`] incremental request parser and its stream driver
//! - [`response`] status line, headers, plain and chunked body writer
//! - [`server`] connection dispatcher tying a socket to the parts above
#![warn(missing_debug_implementations)]

mod log;
mod matches;

pub mod common;
pub mod headers;
pub mod request;
pub mod response;
pub mod server;

pub use headers::Headers;
pub use request::{Request, RequestError, RequestLine};
pub use response::{ResponseError, ResponseWriter, StatusCode};
pub use server::{Handler, Server, serve};

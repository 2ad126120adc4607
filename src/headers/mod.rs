//! HTTP Header Collection.
//!
//! [`Headers`] is a case-insensitive map from lowercase header name to a single value. Setting a
//! name that is already present combines the values with a comma, see [`Headers::set`].
//!
//! [`Headers::parse`] works on chunked bytes, given any prefix of a header section, it consumes
//! every complete line and leaves the incomplete tail to be parsed again once more bytes arrive.
mod map;
mod parse;
mod error;


pub use map::{Headers, Iter};
pub use error::HeaderError;

//! Error types that can occur during header parsing.

/// An error that can occur while parsing a header line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderError {
    /// Header line does not contain a `:` separator.
    MalformedHeader,
    /// Header name is empty, has whitespace before the colon, or contains non-token byte.
    MalformedHeaderKey,
    /// Header value is not valid UTF-8.
    MalformedHeaderValue,
}

impl HeaderError {
    pub(crate) const fn message(&self) -> &'static str {
        match self {
            Self::MalformedHeader => "malformed header",
            Self::MalformedHeaderKey => "malformed header key",
            Self::MalformedHeaderValue => "malformed header value",
        }
    }
}

impl std::error::Error for HeaderError {}

impl std::fmt::Display for HeaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

use super::{HeaderError, Headers};
use crate::matches::{self, CRLF};

impl Headers {
    /// Parse header lines from the start of `bytes`.
    ///
    /// Returns the number of bytes consumed and whether the empty line that ends the header
    /// section was found. Consumption always stops at a line boundary, and only complete lines
    /// are inserted, so calling this again with the unconsumed remainder plus newly read bytes
    /// never inserts a line twice.
    ///
    /// Each field is inserted with [`Headers::set`], so repeated names are combined.
    pub fn parse(&mut self, bytes: &[u8]) -> Result<(usize, bool), HeaderError> {
        let mut read = 0;

        loop {
            let Some(idx) = matches::find_crlf(&bytes[read..]) else {
                return Ok((read, false));
            };

            if idx == 0 {
                read += CRLF.len();
                return Ok((read, true));
            }

            let (name, value) = parse_field(&bytes[read..read + idx])?;
            self.set(name, value);
            read += idx + CRLF.len();
        }
    }
}

/// Split a field line without its CRLF into trimmed name and value.
fn parse_field(line: &[u8]) -> Result<(&str, &str), HeaderError> {
    let Some(colon) = line.iter().position(|&b| b == b':') else {
        return Err(HeaderError::MalformedHeader);
    };

    let (name, value) = (&line[..colon], &line[colon + 1..]);

    // no whitespace is allowed between the field name and colon
    if name.ends_with(b" ") {
        return Err(HeaderError::MalformedHeaderKey);
    }

    let name = name.trim_ascii_start();
    if name.is_empty() || !name.iter().copied().all(matches::is_token) {
        return Err(HeaderError::MalformedHeaderKey);
    }

    let name = std::str::from_utf8(name).map_err(|_| HeaderError::MalformedHeaderKey)?;
    let value = std::str::from_utf8(value.trim_ascii()).map_err(|_| HeaderError::MalformedHeaderValue)?;

    Ok((name, value))
}

use std::{fmt, io};

use super::WritePhase;

/// An error that can occur while writing a response.
#[derive(Debug)]
pub enum ResponseError {
    /// Status code has no reason phrase in this writer.
    UnsupportedStatus(u16),
    /// Writer method called out of the status line, headers, body order.
    OutOfOrder {
        call: &'static str,
        phase: WritePhase,
    },
    /// IO error.
    Io(io::Error),
}

impl std::error::Error for ResponseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedStatus(code) => write!(f, "unsupported status code: {code}"),
            Self::OutOfOrder { call, phase } => {
                write!(f, "`{call}` called while the writer expects {phase}")
            }
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl From<io::Error> for ResponseError {
    fn from(v: io::Error) -> Self {
        Self::Io(v)
    }
}

//! Logging macros.
//!
//! Forwards to the `log` crate when the `log` feature is enabled. Otherwise the arguments are
//! only type checked, so bindings used solely for logging are still used.
#![allow(unused, reason = "logger")]

macro_rules! info {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::info!(target: "plinth", $($tt)*);
        #[cfg(not(feature = "log"))]
        { let _ = ::core::format_args!($($tt)*); }
    };
}

macro_rules! debug {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::debug!(target: "plinth", $($tt)*);
        #[cfg(not(feature = "log"))]
        { let _ = ::core::format_args!($($tt)*); }
    };
}

macro_rules! warning {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::warn!(target: "plinth", $($tt)*);
        #[cfg(not(feature = "log"))]
        { let _ = ::core::format_args!($($tt)*); }
    };
}

macro_rules! error {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::error!(target: "plinth", $($tt)*);
        #[cfg(not(feature = "log"))]
        { let _ = ::core::format_args!($($tt)*); }
    };
}

pub(crate) use {info, debug, warning, error};

#[cfg(test)]
#[deny(unused_variables)]
#[test]
fn log_macros_use_their_arguments() {
    let peer = "127.0.0.1:42069";
    let err = std::io::Error::from(std::io::ErrorKind::ConnectionReset);
    let closed = true;
    let len = 3usize;

    info!("listening on {peer}");
    debug!("accepted {}", peer);
    warning!("closed: {closed}");
    error!("failed after {len} bytes: {err}");
}

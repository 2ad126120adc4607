use super::ResponseError;

macro_rules! status_code {
    (
        $(
            $(#[$doc:meta])*
            $int:literal $id:ident $msg:literal;
        )*
    ) => {
        /// HTTP [Status Code][rfc] supported by the response writer.
        ///
        /// [rfc]: <https://datatracker.ietf.org/doc/html/rfc9110#name-status-codes>
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u16)]
        pub enum StatusCode {
            $(
                $(#[$doc])*
                $id = $int,
            )*
        }

        impl StatusCode {
            /// Returns status code value, e.g: `200`.
            #[inline]
            pub const fn code(&self) -> u16 {
                *self as u16
            }

            /// Returns reason phrase, e.g: `"OK"`.
            #[inline]
            pub const fn reason(&self) -> &'static str {
                match self {
                    $(
                        Self::$id => $msg,
                    )*
                }
            }

            /// Returns status code and reason phrase, e.g: `"200 OK"`.
            #[inline]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(
                        Self::$id => concat!(stringify!($int), " ", $msg),
                    )*
                }
            }

            /// Returns full status line with CRLF, e.g: `"HTTP/1.1 200 OK\r\n"`.
            #[inline]
            pub const fn status_line(&self) -> &'static str {
                match self {
                    $(
                        Self::$id => concat!("HTTP/1.1 ", stringify!($int), " ", $msg, "\r\n"),
                    )*
                }
            }
        }

        impl TryFrom<u16> for StatusCode {
            type Error = ResponseError;

            fn try_from(code: u16) -> Result<Self, Self::Error> {
                match code {
                    $(
                        $int => Ok(Self::$id),
                    )*
                    _ => Err(ResponseError::UnsupportedStatus(code)),
                }
            }
        }
    };
}

status_code! {
    /// `200`. The request succeeded.
    200 Ok "OK";
    /// `400`. The server cannot or will not process the request due to something that is perceived to be
    /// a client error.
    400 BadRequest "Bad Request";
    /// `500`. The server has encountered a situation it does not know how to handle.
    500 InternalServerError "Internal Server Error";
}

impl Default for StatusCode {
    #[inline]
    fn default() -> Self {
        Self::Ok
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_tuple("StatusCode").field(&self.as_str()).finish()
    }
}

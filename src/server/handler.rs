use tokio::net::TcpStream;

use crate::request::Request;
use crate::response::{ResponseError, ResponseWriter};

/// Application handler invoked once per parsed request.
///
/// The handler owns the [`ResponseWriter`] and must drive it through the status line, headers
/// and body sequence before the returned future completes. The connection closes when the writer
/// is dropped.
///
/// Implemented for any `Fn(ResponseWriter<TcpStream>, Request) -> impl Future`, so an `async fn`
/// with that signature can be passed directly.
pub trait Handler: Send + Sync + 'static {
    type Future: Future<Output = Result<(), ResponseError>> + Send + 'static;

    fn call(&self, writer: ResponseWriter<TcpStream>, request: Request) -> Self::Future;
}

impl<F, Fut> Handler for F
where
    F: Fn(ResponseWriter<TcpStream>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ResponseError>> + Send + 'static,
{
    type Future = Fut;

    #[inline]
    fn call(&self, writer: ResponseWriter<TcpStream>, request: Request) -> Self::Future {
        self(writer, request)
    }
}

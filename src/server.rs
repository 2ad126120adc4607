//! Connection Dispatcher.
//!
//! [`serve`] binds a listener and accepts connections on a spawned task. Every connection gets
//! its own task that reads one [`Request`], hands it to the [`Handler`] together with a
//! [`ResponseWriter`], then closes the connection.
//!
//! There is no connection limit and no read timeout, a peer that never finishes its request
//! keeps its task alive.
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::net::{TcpListener, TcpStream};

use crate::log::{debug, error, info};
use crate::request::Request;
use crate::response::{self, ResponseError, ResponseWriter, StatusCode};

mod handler;


pub use handler::Handler;

/// Bind `0.0.0.0:<port>` and start serving connections with `handler`.
///
/// Returns as soon as the listener is bound, connections are accepted in the background. Port
/// `0` binds an OS assigned port, see [`Server::local_addr`].
pub async fn serve<H: Handler>(port: u16, handler: H) -> io::Result<Server> {
    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await?;
    Server::from_listener(listener, handler)
}

/// Handle to a running accept loop.
#[derive(Debug)]
pub struct Server {
    closed: Arc<AtomicBool>,
    local_addr: SocketAddr,
}

impl Server {
    /// Start serving connections from an already bound `listener`.
    pub fn from_listener<H: Handler>(listener: TcpListener, handler: H) -> io::Result<Server> {
        let local_addr = listener.local_addr()?;
        let closed = Arc::new(AtomicBool::new(false));

        info!("listening on {local_addr}");
        tokio::spawn(accept(listener, Arc::new(handler), Arc::clone(&closed)));

        Ok(Server { closed, local_addr })
    }

    /// Returns the address the listener is bound to.
    #[inline]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting new connections.
    ///
    /// The flag is checked after each accept returns, so the pending accept is not interrupted
    /// and the connection it yields is dropped. In flight connections run to completion.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Returns `true` once [`Server::close`] was called.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

async fn accept<H: Handler>(listener: TcpListener, handler: Arc<H>, closed: Arc<AtomicBool>) {
    loop {
        let accepted = listener.accept().await;

        if closed.load(Ordering::Acquire) {
            info!("server closed, stop accepting");
            return;
        }

        match accepted {
            Ok((io, peer)) => {
                debug!("accepted {peer}");
                tokio::spawn(connection(io, Arc::clone(&handler)));
            }
            Err(err) => {
                error!("failed to accept connection: {err}");
                return;
            }
        }
    }
}

async fn connection<H: Handler>(mut io: TcpStream, handler: Arc<H>) {
    let request = match Request::from_reader(&mut io).await {
        Ok(ok) => ok,
        Err(err) if err.is_io() => {
            error!("failed to read request: {err}");
            return;
        }
        Err(err) => {
            debug!("bad request: {err}");
            if let Err(err) = bad_request(ResponseWriter::new(io)).await {
                error!("failed to write bad request: {err}");
            }
            return;
        }
    };

    // the writer owns the stream, dropping it closes the connection
    if let Err(err) = handler.call(ResponseWriter::new(io), request).await {
        error!("handler failed: {err}");
    }
}

async fn bad_request(mut writer: ResponseWriter<TcpStream>) -> Result<(), ResponseError> {
    writer.write_status_line(StatusCode::BadRequest).await?;
    writer.write_headers(&response::default_headers(0)).await?;
    writer.shutdown().await
}

use clap::Parser;
use plinth::{
    Headers, Request, ResponseError, ResponseWriter, StatusCode,
    response::default_headers,
};
use sha2::{Digest, Sha256};
use tokio::net::TcpStream;

const HTTPBIN: &str = "https://httpbin.org/";

#[derive(Debug, Parser)]
#[command(about = "Demo HTTP/1.1 server")]
struct Args {
    /// Port to listen on.
    #[arg(short, long, default_value_t = 42069)]
    port: u16,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let server = plinth::serve(args.port, handle).await?;
    log::info!("server started on port {}", server.local_addr().port());

    shutdown_signal().await?;
    server.close();
    log::info!("server stopped");
    Ok(())
}

/// Wait for ctrl-c or SIGTERM.
#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

/// Wait for ctrl-c.
#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

async fn handle(mut w: ResponseWriter<TcpStream>, req: Request) -> Result<(), ResponseError> {
    let target = req.request_line().target.as_str();

    let (status, body) = match target {
        "/yourproblem" => (StatusCode::BadRequest, respond_400()),
        "/myproblem" => (StatusCode::InternalServerError, respond_500()),
        _ => match target.strip_prefix("/httpbin/") {
            Some(path) => match proxy(&mut w, path).await {
                Ok(()) => return Ok(()),
                Err(ProxyError::Upstream(err)) => {
                    log::error!("httpbin request failed: {err}");
                    (StatusCode::InternalServerError, respond_500())
                }
                Err(ProxyError::Response(err)) => return Err(err),
            },
            None => (StatusCode::Ok, respond_200()),
        },
    };

    let mut h = default_headers(body.len());
    h.replace("Content-Type", "text/html");
    w.write_status_line(status).await?;
    w.write_headers(&h).await?;
    w.write_body(body.as_bytes()).await?;
    Ok(())
}

// ===== Proxy =====

enum ProxyError {
    Upstream(reqwest::Error),
    Response(ResponseError),
}

impl From<reqwest::Error> for ProxyError {
    fn from(v: reqwest::Error) -> Self {
        Self::Upstream(v)
    }
}

impl From<ResponseError> for ProxyError {
    fn from(v: ResponseError) -> Self {
        Self::Response(v)
    }
}

/// Re-emit the upstream body as chunks, followed by its hash and length as trailers.
async fn proxy(w: &mut ResponseWriter<TcpStream>, path: &str) -> Result<(), ProxyError> {
    let mut upstream = reqwest::get(format!("{HTTPBIN}{path}")).await?;

    let mut h = default_headers(0);
    h.remove("Content-Length");
    h.set("Transfer-Encoding", "chunked");
    h.set("Trailer", "X-Content-SHA256");
    h.set("Trailer", "X-Content-Length");

    w.write_status_line(StatusCode::Ok).await?;
    w.write_headers(&h).await?;

    let mut hasher = Sha256::new();
    let mut len = 0;

    // once the head is written, an upstream failure can only end the body early
    loop {
        let chunk = match upstream.chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(err) => {
                log::error!("httpbin body interrupted: {err}");
                break;
            }
        };
        hasher.update(&chunk);
        len += chunk.len();
        w.write_chunked_body(&chunk).await?;
    }

    w.write_chunked_body_done().await?;

    let mut trailers = Headers::new();
    trailers.set("X-Content-SHA256", &format!("{:x}", hasher.finalize()));
    trailers.set("X-Content-Length", &len.to_string());
    w.write_trailers(&trailers).await?;
    Ok(())
}

// ===== Pages =====

fn respond_400() -> &'static str {
    "<html>
  <head>
    <title>400 Bad Request</title>
  </head>
  <body>
    <h1>Bad Request</h1>
    <p>Your request honestly kinda sucked.</p>
  </body>
</html>"
}

fn respond_500() -> &'static str {
    "<html>
  <head>
    <title>500 Internal Server Error</title>
  </head>
  <body>
    <h1>Internal Server Error</h1>
    <p>Okay, you know what? This one is on me.</p>
  </body>
</html>"
}

fn respond_200() -> &'static str {
    "<html>
  <head>
    <title>200 OK</title>
  </head>
  <body>
    <h1>Success!</h1>
    <p>Your request was an absolute banger.</p>
  </body>
</html>"
}

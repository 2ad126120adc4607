use plinth::Request;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let listener = TcpListener::bind("0.0.0.0:42069").await?;
    log::info!("listening on {}", listener.local_addr()?);

    loop {
        let (mut io, peer) = listener.accept().await?;
        log::info!("connection accepted from {peer}");

        let req = match Request::from_reader(&mut io).await {
            Ok(ok) => ok,
            Err(err) => {
                log::error!("failed to read request: {err}");
                continue;
            }
        };

        let line = req.request_line();
        println!("Request line:");
        println!("- Method: {}", line.method);
        println!("- Target: {}", line.target);
        println!("- Version: {}", line.version);
        println!("Headers:");
        for (name, value) in req.headers() {
            println!("- {name}: {value}");
        }
        if !req.body().is_empty() {
            println!("Body:");
            println!("{}", String::from_utf8_lossy(req.body()));
        }

        log::info!("connection to {peer} closed");
    }
}

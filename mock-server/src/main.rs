use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,mock_server=debug".into());
    fmt().with_env_filter(EnvFilter::new(filter)).init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8030".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("mock gateway listening on http://{addr}/v1");
    mock_server::run(listener).await
}

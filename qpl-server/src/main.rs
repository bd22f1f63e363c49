use anyhow::{Context, Result};
use qpl_server::build_router;
use qpl_server::config::ServerConfig;
use qpl_server::dataset::QplDataset;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    let dataset = QplDataset::load(&config.data_file)?;
    info!(
        "Loaded {} QPL records from {}",
        dataset.len(),
        config.data_file.display()
    );

    let app = build_router(dataset);
    let listener = TcpListener::bind(config.socket_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.socket_addr()))?;

    info!("Server listening on port::{}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use egsa87::api::create_router;
use egsa87::ServerConfig;

#[derive(Parser)]
#[command(name = "api-server")]
#[command(about = "EGSA87 conversion API server")]
#[command(version)]
struct Cli {
    /// Host address to bind to (overrides EGSA87_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides EGSA87_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "egsa87=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = ServerConfig::load()?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let app = create_router(&config);
    let address = config.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!("EGSA87 API server listening on http://{}", address);
    info!("  GET  /api/health");
    info!("  GET  /api/egsa87?latitude=<lat>&longitude=<lon>");
    info!("  GET  /api/wgs84?x=<easting>&y=<northing>");
    info!("  POST /api/well-location/convert");
    info!("  POST /api/upload (multipart/form-data: csv, direction, round)");

    axum::serve(listener, app).await?;

    Ok(())
}

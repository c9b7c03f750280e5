use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use filing_analyst::{analysis::DocumentAnalyzer, config::Config, routes::create_router, utils::init_logger, AppState};

/// Financial document analysis service
#[derive(Debug, Parser)]
#[command(name = "filing-analyst", version, about)]
struct Cli {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    info!("Configuration loaded: {:?}", config.server);

    // The completion client is built once and shared by every request
    let analyzer = DocumentAnalyzer::from_config(&config);
    let state = AppState {
        config: config.clone(),
        analyzer: Arc::new(analyzer),
    };

    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

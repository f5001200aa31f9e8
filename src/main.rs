use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adskip_api::config::{load_config, validation::validate_config, AppConfig};
use adskip_api::lifecycle::{signals::shutdown_signal, Shutdown};
use adskip_api::observability::metrics;
use adskip_api::HttpServer;

/// Ad-segment detection API server.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adskip_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("adskip-api v{} starting", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(|errors| {
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        })?;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        signature_required = config.security.signature_required,
        rate_limit_window_secs = config.rate_limit.window_secs,
        keyword_count = config.detection.keywords.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_rx = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, server_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

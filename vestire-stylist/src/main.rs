//! vestire-stylist - Outfit recommendation service
//!
//! Serves intent extraction, closet classification and outfit
//! recommendations over HTTP. Configuration resolves CLI > ENV > TOML >
//! defaults.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vestire_common::config::{config_file_path, ConfigOverrides, GeneratorProvider, TomlConfig};

use vestire_stylist::AppState;

#[derive(Parser, Debug)]
#[command(name = "vestire-stylist")]
#[command(about = "Outfit recommendation service for Vestire")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "VESTIRE_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long)]
    host: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,

    /// Generator provider: gemini, claude or disabled
    #[arg(long)]
    provider: Option<GeneratorProvider>,

    /// Generator API key (prefer GEMINI_API_KEY / CLAUDE_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = TomlConfig::load(ConfigOverrides {
        config_path: args.config.clone(),
        host: args.host,
        port: args.port,
        provider: args.provider,
        api_key: args.api_key,
        log_level: args.log_level,
    })
    .context("Failed to load configuration")?;

    init_tracing(&config)?;

    info!(
        "Starting vestire-stylist {} ({}, {} build, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("VESTIRE_GIT_HASH"),
        env!("VESTIRE_BUILD_PROFILE"),
        env!("VESTIRE_BUILD_TIMESTAMP"),
    );
    match config_file_path(args.config.as_deref()).filter(|path| path.exists()) {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file, using defaults and environment"),
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config);
    let app = vestire_stylist::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Console logging, plus a log file when configured
fn init_tracing(config: &TomlConfig) -> Result<()> {
    let file_layer = match &config.logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    let default_filter = format!("{},tower_http=info", config.logging.level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

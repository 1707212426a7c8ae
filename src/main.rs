//! Beacon Notification Hub - Entry Point
//!
//! Starts the API server with graceful shutdown support.

use std::sync::Arc;

use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use beacon::api::ApiServer;
use beacon::config::{Config, LogConfig};
use beacon::hub::{DashboardStore, NotificationHub};

#[tokio::main]
async fn main() -> beacon::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log);

    info!("Starting Beacon notification hub");

    // Dashboard snapshots are served from the last published aggregate
    let dashboard = Arc::new(DashboardStore::default());
    let hub = NotificationHub::new(dashboard.clone());

    // Create shutdown channel
    let (shutdown_tx, _) = watch::channel(false);

    let api_server = ApiServer::new(config.clone(), hub.clone(), dashboard);
    let api_shutdown = shutdown_tx.subscribe();
    let api_task = tokio::spawn(async move {
        if let Err(e) = api_server.run(api_shutdown).await {
            error!("API server error: {}", e);
        }
    });

    info!(
        "Server started - API: {}, observers: {}",
        config.api_addr(),
        config.hub.ws_path
    );

    // Wait for shutdown signal
    shutdown_signal().await;
    info!(
        "Shutdown signal received ({} observers connected)",
        hub.connection_count()
    );

    let _ = shutdown_tx.send(true);
    let _ = api_task.await;

    info!("Beacon notification hub stopped");
    Ok(())
}

fn env_filter(log: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("beacon={},tower_http=debug", log.level).into())
}

fn init_tracing(log: &LogConfig) {
    if log.is_json() {
        tracing_subscriber::registry()
            .with(env_filter(log))
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter(log))
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

//! API server using Axum
//!
//! Serves the monitoring WebSocket and the producer-facing REST endpoints.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::config::Config;
use crate::error::{BeaconError, Result};
use crate::hub::{DashboardStore, NotificationHub};

use super::middleware::cors_layer;
use super::routes;

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub hub: NotificationHub,
    pub dashboard: Arc<DashboardStore>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config, hub: NotificationHub, dashboard: Arc<DashboardStore>) -> Self {
        Self {
            config,
            hub,
            dashboard,
            started_at: Instant::now(),
        }
    }
}

/// API server
pub struct ApiServer {
    state: AppState,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: Config, hub: NotificationHub, dashboard: Arc<DashboardStore>) -> Self {
        Self {
            state: AppState::new(config, hub, dashboard),
        }
    }

    /// Build the router
    pub fn build_router(&self) -> Router {
        let cors = cors_layer(&self.state.config.api.cors_origins);

        routes::create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the API server
    #[instrument(skip(self, shutdown))]
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let addr: SocketAddr = self.state.config.api_addr().parse().map_err(|_| {
            BeaconError::InvalidConfig(format!(
                "Invalid API server address: {}",
                self.state.config.api_addr()
            ))
        })?;

        let router = self.build_router();

        info!(
            "API server listening on {} (observers on {})",
            addr, self.state.config.hub.ws_path
        );

        let listener = tokio::net::TcpListener::bind(addr).await?;

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.changed().await;
            })
            .await
            .map_err(|e| BeaconError::Internal(e.to_string()))?;

        info!("API server shut down");
        Ok(())
    }
}

//! Dashboard handlers

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use tracing::debug;

use super::events::DeliveryResponse;
use crate::api::server::AppState;
use crate::error::BeaconError;
use crate::models::DashboardSummary;

/// Get the current dashboard aggregate
pub async fn get_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.current().as_ref().clone())
}

/// Store a new dashboard aggregate and push it to every observer
pub async fn publish_dashboard(
    State(state): State<AppState>,
    Json(summary): Json<DashboardSummary>,
) -> Result<impl IntoResponse, BeaconError> {
    debug!(
        total_services = summary.total_services,
        open_incidents = summary.open_incidents,
        "publishing dashboard"
    );

    state.dashboard.replace(summary.clone());
    let report = state.hub.notify_dashboard(summary)?;
    Ok(Json(DeliveryResponse::from(report)))
}

//! Producer event handlers

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::api::server::AppState;
use crate::error::BeaconError;
use crate::hub::DeliveryReport;
use crate::models::{ActionResult, HealthCheckResult, Incident, MetricsSample, ServiceId};

/// Response body for publish endpoints
#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    pub delivered: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl From<DeliveryReport> for DeliveryResponse {
    fn from(report: DeliveryReport) -> Self {
        Self {
            delivered: report.delivered,
            skipped: report.skipped,
            failed: report.failed,
        }
    }
}

fn ensure_same_service(path_id: ServiceId, body_id: ServiceId) -> Result<(), BeaconError> {
    if path_id != body_id {
        return Err(BeaconError::InvalidRequest(format!(
            "serviceId {} in body does not match service {} in path",
            body_id, path_id
        )));
    }
    Ok(())
}

/// Publish a health-check result for one service
pub async fn publish_health(
    State(state): State<AppState>,
    Path(service_id): Path<ServiceId>,
    Json(result): Json<HealthCheckResult>,
) -> Result<impl IntoResponse, BeaconError> {
    ensure_same_service(service_id, result.service_id)?;
    let report = state.hub.notify_health(service_id, result)?;
    Ok(Json(DeliveryResponse::from(report)))
}

/// Publish a metrics sample for one service
pub async fn publish_metrics(
    State(state): State<AppState>,
    Path(service_id): Path<ServiceId>,
    Json(sample): Json<MetricsSample>,
) -> Result<impl IntoResponse, BeaconError> {
    ensure_same_service(service_id, sample.service_id)?;
    let report = state.hub.notify_metrics(service_id, sample)?;
    Ok(Json(DeliveryResponse::from(report)))
}

/// Publish a newly created incident
pub async fn publish_incident(
    State(state): State<AppState>,
    Json(incident): Json<Incident>,
) -> Result<impl IntoResponse, BeaconError> {
    let report = state.hub.notify_incident(incident)?;
    Ok(Json(DeliveryResponse::from(report)))
}

/// Publish the result of a lifecycle action
pub async fn publish_action(
    State(state): State<AppState>,
    Json(result): Json<ActionResult>,
) -> Result<impl IntoResponse, BeaconError> {
    let report = state.hub.notify_action(result)?;
    Ok(Json(DeliveryResponse::from(report)))
}

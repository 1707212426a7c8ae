//! Monitored-service records carried as event payloads.
//!
//! These are plain data: the hub never inspects them beyond serializing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a monitored service
pub type ServiceId = i64;

/// Health state of a monitored service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Down,
    #[default]
    Unknown,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "HEALTHY",
            Self::Degraded => "DEGRADED",
            Self::Down => "DOWN",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Per-service line of the dashboard aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    pub service_id: ServiceId,
    pub name: String,
    pub status: HealthStatus,
    pub last_checked: Option<DateTime<Utc>>,
}

/// Result of one health probe against a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResult {
    pub service_id: ServiceId,
    pub status: HealthStatus,
    /// Probe round-trip in milliseconds
    pub response_time_ms: Option<i64>,
    pub status_code: Option<u16>,
    pub message: Option<String>,
    pub checked_at: DateTime<Utc>,
}

/// One metrics sample reported for a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSample {
    pub service_id: ServiceId,
    /// CPU usage percentage
    pub cpu_usage: f64,
    /// Memory usage percentage
    pub memory_usage: f64,
    /// Requests per second
    pub request_rate: f64,
    /// Error ratio (0-1)
    pub error_rate: f64,
    /// Average latency in milliseconds
    pub avg_latency_ms: f64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentStatus {
    Open,
    Acknowledged,
    Resolved,
}

/// Incident raised against a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: i64,
    pub service_id: ServiceId,
    pub title: String,
    pub description: Option<String>,
    pub severity: IncidentSeverity,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Lifecycle operations an operator can run against a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleAction {
    Start,
    Stop,
    Restart,
    Scale,
}

/// Outcome of a lifecycle action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub service_id: ServiceId,
    pub action: LifecycleAction,
    pub success: bool,
    pub message: Option<String>,
    /// Who requested the action, when known
    pub requested_by: Option<String>,
    pub executed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Degraded).unwrap(),
            "\"DEGRADED\""
        );
        assert_eq!(HealthStatus::Down.as_str(), "DOWN");
        assert_eq!(HealthStatus::default(), HealthStatus::Unknown);
    }

    #[test]
    fn test_action_result_parses_from_producer_payload() {
        let result: ActionResult = serde_json::from_str(
            r#"{"serviceId":4,"action":"RESTART","success":true,
                "message":null,"requestedBy":"ops",
                "executedAt":"2026-03-01T12:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(result.service_id, 4);
        assert_eq!(result.action, LifecycleAction::Restart);
        assert_eq!(result.requested_by.as_deref(), Some("ops"));
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Incident, ServiceHealth};

/// Dashboard aggregate pushed to observers as `DASHBOARD_UPDATE`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Number of monitored services
    pub total_services: i64,
    /// Services whose last health check passed
    pub healthy_services: i64,
    /// Services responding but outside their thresholds
    pub degraded_services: i64,
    /// Services failing their health checks
    pub down_services: i64,
    /// Incidents not yet resolved
    pub open_incidents: i64,
    /// Per-service health overview
    #[serde(default)]
    pub services: Vec<ServiceHealth>,
    /// Most recent incidents, newest first
    #[serde(default)]
    pub recent_incidents: Vec<Incident>,
    /// When the aggregate was computed
    pub generated_at: DateTime<Utc>,
}

impl Default for DashboardSummary {
    fn default() -> Self {
        Self {
            total_services: 0,
            healthy_services: 0,
            degraded_services: 0,
            down_services: 0,
            open_incidents: 0,
            services: Vec::new(),
            recent_incidents: Vec::new(),
            generated_at: Utc::now(),
        }
    }
}

/// Live hub status reported by `/api/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubStatus {
    pub status: String,
    pub version: String,
    /// Uptime in seconds
    pub uptime: u64,
    /// Number of open observer connections
    pub active_connections: usize,
}

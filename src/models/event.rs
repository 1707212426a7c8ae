//! Wire types exchanged with observers over the monitoring socket.

use serde::{de, Deserialize, Serialize};

use super::{ActionResult, DashboardSummary, HealthCheckResult, Incident, MetricsSample, ServiceId};
use crate::error::{BeaconError, Result};

/// Outbound event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    DashboardUpdate,
    HealthUpdate,
    MetricsUpdate,
    IncidentCreated,
    ActionExecuted,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DashboardUpdate => "DASHBOARD_UPDATE",
            Self::HealthUpdate => "HEALTH_UPDATE",
            Self::MetricsUpdate => "METRICS_UPDATE",
            Self::IncidentCreated => "INCIDENT_CREATED",
            Self::ActionExecuted => "ACTION_EXECUTED",
        }
    }
}

/// Outbound push: `{"type": ..., "serviceId": ..., "data": ...}`
///
/// `service_id` is the target service. When it is `None` the event is
/// delivered to every connection regardless of subscription.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope<T> {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub service_id: Option<ServiceId>,
    pub data: T,
}

impl<T: Serialize> EventEnvelope<T> {
    pub fn new(event_type: EventType, service_id: Option<ServiceId>, data: T) -> Self {
        Self {
            event_type,
            service_id,
            data,
        }
    }

    pub fn target_service(&self) -> Option<ServiceId> {
        self.service_id
    }
}

impl EventEnvelope<DashboardSummary> {
    pub fn dashboard(summary: DashboardSummary) -> Self {
        Self::new(EventType::DashboardUpdate, None, summary)
    }
}

impl EventEnvelope<HealthCheckResult> {
    pub fn health(service_id: ServiceId, result: HealthCheckResult) -> Self {
        Self::new(EventType::HealthUpdate, Some(service_id), result)
    }
}

impl EventEnvelope<MetricsSample> {
    pub fn metrics(service_id: ServiceId, sample: MetricsSample) -> Self {
        Self::new(EventType::MetricsUpdate, Some(service_id), sample)
    }
}

impl EventEnvelope<Incident> {
    pub fn incident(incident: Incident) -> Self {
        Self::new(EventType::IncidentCreated, None, incident)
    }
}

impl EventEnvelope<ActionResult> {
    pub fn action(result: ActionResult) -> Self {
        Self::new(EventType::ActionExecuted, None, result)
    }
}

/// Inbound control message kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlType {
    SubscribeService,
    UnsubscribeService,
    GetDashboard,
    /// Any other `type` value, kept for logging
    Unrecognized(String),
}

impl From<String> for ControlType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "SUBSCRIBE_SERVICE" => Self::SubscribeService,
            "UNSUBSCRIBE_SERVICE" => Self::UnsubscribeService,
            "GET_DASHBOARD" => Self::GetDashboard,
            _ => Self::Unrecognized(raw),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawControlMessage {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    service_id: Option<ServiceId>,
}

/// Inbound message: `{"type": ..., "serviceId": ...}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlMessage {
    pub kind: ControlType,
    pub service_id: Option<ServiceId>,
}

impl ControlMessage {
    /// Parse one text frame received from an observer
    pub fn parse(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text).map_err(BeaconError::Parse)?;
        // A derived struct would also accept `["TYPE", id]`; only objects are valid.
        if !value.is_object() {
            return Err(BeaconError::Parse(de::Error::custom(
                "control message must be a JSON object",
            )));
        }
        let raw: RawControlMessage = serde_json::from_value(value).map_err(BeaconError::Parse)?;
        Ok(Self {
            kind: ControlType::from(raw.kind),
            service_id: raw.service_id,
        })
    }
}

//! Inbound control messages
//!
//! Observers narrow their feed or request a fresh dashboard by sending
//! `{"type": ..., "serviceId": ...}` text frames.

use std::sync::Arc;

use tracing::{debug, info};

use super::dispatcher::Broadcaster;
use super::registry::Connection;
use super::snapshot::SnapshotProvider;
use crate::error::{BeaconError, Result};
use crate::models::{ControlMessage, ControlType, EventEnvelope, ServiceId};

/// What a handled control message did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlOutcome {
    Subscribed(ServiceId),
    Unsubscribed,
    DashboardSent,
    /// Connection was no longer registered
    Stale,
    Ignored(String),
}

#[derive(Clone)]
pub struct ControlHandler {
    broadcaster: Broadcaster,
    snapshots: Arc<dyn SnapshotProvider>,
}

impl ControlHandler {
    pub fn new(broadcaster: Broadcaster, snapshots: Arc<dyn SnapshotProvider>) -> Self {
        Self {
            broadcaster,
            snapshots,
        }
    }

    /// Parse and apply one text frame from `connection_id`
    pub fn handle(&self, connection_id: &str, text: &str) -> Result<ControlOutcome> {
        let message = ControlMessage::parse(text)?;
        let registry = self.broadcaster.registry();

        match message.kind {
            ControlType::SubscribeService => {
                let service_id = message.service_id.ok_or_else(|| {
                    BeaconError::InvalidRequest("SUBSCRIBE_SERVICE requires a serviceId".into())
                })?;
                if !registry.set_subscription(connection_id, Some(service_id)) {
                    return Ok(ControlOutcome::Stale);
                }
                info!(conn_id = %connection_id, service_id, "observer subscribed to service");
                Ok(ControlOutcome::Subscribed(service_id))
            }
            ControlType::UnsubscribeService => {
                if !registry.set_subscription(connection_id, None) {
                    return Ok(ControlOutcome::Stale);
                }
                info!(conn_id = %connection_id, "observer unsubscribed");
                Ok(ControlOutcome::Unsubscribed)
            }
            ControlType::GetDashboard => match registry.get(connection_id) {
                Some(connection) => {
                    self.send_dashboard(&connection)?;
                    Ok(ControlOutcome::DashboardSent)
                }
                None => Ok(ControlOutcome::Stale),
            },
            ControlType::Unrecognized(kind) => {
                debug!(conn_id = %connection_id, message_type = %kind, "ignoring unknown control message");
                Ok(ControlOutcome::Ignored(kind))
            }
        }
    }

    /// Unicast the current dashboard aggregate to one connection
    pub fn send_dashboard(&self, connection: &Connection) -> Result<()> {
        let summary = self.snapshots.dashboard_summary()?;
        self.broadcaster
            .send_to(connection, &EventEnvelope::dashboard(summary))
    }
}

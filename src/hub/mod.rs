//! Notification hub
//!
//! Tracks observer connections and pushes monitoring events to them.
//!
//! - `registry`: live connections and their service subscription
//! - `dispatcher`: serialize-once, filtered fan-out
//! - `control`: inbound `SUBSCRIBE_SERVICE` / `UNSUBSCRIBE_SERVICE` / `GET_DASHBOARD`
//! - `snapshot`: dashboard aggregate providers

pub mod control;
pub mod dispatcher;
pub mod registry;
pub mod snapshot;

pub use control::{ControlHandler, ControlOutcome};
pub use dispatcher::{Broadcaster, DeliveryReport};
pub use registry::{Connection, ConnectionRegistry, ConnectionSink, Frame};
pub use snapshot::{DashboardStore, SnapshotProvider};

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{BeaconError, Result};
use crate::models::{
    ActionResult, DashboardSummary, EventEnvelope, HealthCheckResult, Incident, MetricsSample,
    ServiceId,
};

/// Transport-facing lifecycle callbacks for one observer connection
///
/// The transport calls these serially per connection, concurrently across
/// connections.
pub trait ConnectionHandler: Send + Sync {
    /// Connection established and ready for writes
    fn on_connect(&self, connection: Connection);

    /// Text frame received from the observer
    fn on_message(&self, connection_id: &str, text: &str);

    /// Close handshake completed
    fn on_close(&self, connection_id: &str);

    /// Transport reported a fault; the connection is finished
    fn on_error(&self, connection_id: &str, error: &BeaconError);
}

/// Connection registry, dispatcher and control handler wired together
#[derive(Clone)]
pub struct NotificationHub {
    registry: Arc<ConnectionRegistry>,
    broadcaster: Broadcaster,
    control: ControlHandler,
}

impl NotificationHub {
    pub fn new(snapshots: Arc<dyn SnapshotProvider>) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let broadcaster = Broadcaster::new(registry.clone());
        let control = ControlHandler::new(broadcaster.clone(), snapshots);

        Self {
            registry,
            broadcaster,
            control,
        }
    }

    /// Number of open observer connections
    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Fan an envelope out to every eligible connection
    pub fn broadcast<T: Serialize>(&self, envelope: &EventEnvelope<T>) -> Result<DeliveryReport> {
        self.broadcaster.broadcast(envelope)
    }

    pub fn notify_health(&self, service_id: ServiceId, result: HealthCheckResult) -> Result<DeliveryReport> {
        self.broadcast(&EventEnvelope::health(service_id, result))
    }

    pub fn notify_metrics(&self, service_id: ServiceId, sample: MetricsSample) -> Result<DeliveryReport> {
        self.broadcast(&EventEnvelope::metrics(service_id, sample))
    }

    pub fn notify_incident(&self, incident: Incident) -> Result<DeliveryReport> {
        self.broadcast(&EventEnvelope::incident(incident))
    }

    pub fn notify_action(&self, result: ActionResult) -> Result<DeliveryReport> {
        self.broadcast(&EventEnvelope::action(result))
    }

    /// Push a dashboard aggregate to every connection
    pub fn notify_dashboard(&self, summary: DashboardSummary) -> Result<DeliveryReport> {
        self.broadcast(&EventEnvelope::dashboard(summary))
    }

    fn disconnect(&self, connection_id: &str) {
        if self.registry.unregister(connection_id) {
            info!(conn_id = %connection_id, active = self.registry.len(), "observer disconnected");
        } else {
            debug!(conn_id = %connection_id, "connection already unregistered");
        }
    }
}

impl ConnectionHandler for NotificationHub {
    fn on_connect(&self, connection: Connection) {
        // Queue the snapshot before registering so it precedes any broadcast.
        // A `notify_dashboard` landing between the read and `register` misses
        // this connection; it holds that snapshot until the next push.
        if let Err(e) = self.control.send_dashboard(&connection) {
            warn!(conn_id = %connection.id(), error = %e, "failed to send initial dashboard");
        }

        let id = connection.id().to_string();
        self.registry.register(connection);
        info!(conn_id = %id, active = self.registry.len(), "observer connected");
    }

    fn on_message(&self, connection_id: &str, text: &str) {
        match self.control.handle(connection_id, text) {
            Ok(outcome) => {
                debug!(conn_id = %connection_id, ?outcome, "handled control message");
            }
            Err(e @ BeaconError::Parse(_)) => {
                warn!(conn_id = %connection_id, error = %e, "dropping malformed control message");
            }
            Err(e) => {
                warn!(conn_id = %connection_id, error = %e, "control message failed");
            }
        }
    }

    fn on_close(&self, connection_id: &str) {
        self.disconnect(connection_id);
    }

    fn on_error(&self, connection_id: &str, error: &BeaconError) {
        warn!(conn_id = %connection_id, error = %error, "observer transport error");
        self.disconnect(connection_id);
    }
}

//! Broadcast dispatcher
//!
//! Serializes an envelope once and fans the frame out to every connection
//! whose subscription accepts the envelope's target.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, warn};

use super::registry::{Connection, ConnectionRegistry, Frame};
use crate::error::{BeaconError, Result};
use crate::models::EventEnvelope;

/// Outcome of one broadcast call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Connections the frame was queued for
    pub delivered: usize,
    /// Connections filtered out by subscription
    pub skipped: usize,
    /// Connections whose write failed
    pub failed: usize,
}

/// Serialize an envelope into a shareable text frame
pub fn encode<T: Serialize>(envelope: &EventEnvelope<T>) -> Result<Frame> {
    serde_json::to_string(envelope)
        .map(Frame::from)
        .map_err(|source| BeaconError::Serialization {
            event_type: envelope.event_type.as_str(),
            source,
        })
}

#[derive(Debug, Clone)]
pub struct Broadcaster {
    registry: Arc<ConnectionRegistry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Push an envelope to every eligible connection
    ///
    /// Fails only when the envelope cannot be serialized, in which case
    /// nothing is written. Per-connection write failures are logged and
    /// counted in the report.
    pub fn broadcast<T: Serialize>(&self, envelope: &EventEnvelope<T>) -> Result<DeliveryReport> {
        let event_type = envelope.event_type.as_str();
        let frame = encode(envelope).inspect_err(|e| {
            error!(event_type, error = %e, "dropping unserializable event");
        })?;

        let target = envelope.target_service();
        let mut report = DeliveryReport::default();

        for conn in self.registry.snapshot() {
            if !conn.accepts(target) {
                report.skipped += 1;
                continue;
            }

            // Closed but not yet unregistered by the transport
            if conn.is_closed() {
                report.failed += 1;
                debug!(conn_id = %conn.id(), event_type, "skipping closed connection");
                continue;
            }

            match conn.write(Arc::clone(&frame)) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    report.failed += 1;
                    warn!(conn_id = %conn.id(), event_type, error = %e, "failed to deliver event");
                }
            }
        }

        debug!(
            event_type,
            service_id = ?target,
            recipients = report.delivered,
            skipped = report.skipped,
            failed = report.failed,
            "broadcast event"
        );

        Ok(report)
    }

    /// Write an envelope to one connection, bypassing the subscription filter
    pub fn send_to<T: Serialize>(
        &self,
        connection: &Connection,
        envelope: &EventEnvelope<T>,
    ) -> Result<()> {
        let frame = encode(envelope)?;
        connection.write(frame)
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }
}

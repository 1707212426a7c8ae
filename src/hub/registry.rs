//! Connection registry
//!
//! Tracks live observer connections and their per-connection subscription.
//! Entries live in a sharded `DashMap`, so register/unregister/subscribe on
//! one connection never holds a lock across the whole registry. Broadcasts
//! iterate a cloned snapshot and write outside any shard lock.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{BeaconError, Result};
use crate::models::ServiceId;

/// One serialized outbound text frame, shared by every recipient of a broadcast
pub type Frame = Arc<str>;

/// Write half of an observer connection
///
/// Writes go into a bounded per-connection channel drained by the transport,
/// so a slow observer never stalls the caller.
#[derive(Debug, Clone)]
pub struct ConnectionSink {
    tx: mpsc::Sender<Frame>,
}

impl ConnectionSink {
    pub fn new(tx: mpsc::Sender<Frame>) -> Self {
        Self { tx }
    }

    /// Queue a frame without waiting
    pub fn try_write(&self, connection_id: &str, frame: Frame) -> Result<()> {
        self.tx.try_send(frame).map_err(|e| {
            let reason = match e {
                mpsc::error::TrySendError::Full(_) => "outbound buffer full",
                mpsc::error::TrySendError::Closed(_) => "connection closed",
            };
            BeaconError::Delivery {
                connection_id: connection_id.to_string(),
                reason: reason.to_string(),
            }
        })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Registry entry for one observer connection
#[derive(Debug, Clone)]
pub struct Connection {
    id: String,
    sink: ConnectionSink,
    subscription: Option<ServiceId>,
}

impl Connection {
    /// Create a connection with no subscription
    pub fn new(id: impl Into<String>, sink: ConnectionSink) -> Self {
        Self {
            id: id.into(),
            sink,
            subscription: None,
        }
    }

    /// Create a connection with a fresh id and a bounded outbound channel
    ///
    /// The returned receiver is the transport's end: it must be drained into
    /// the socket for as long as the connection is open.
    pub fn open(buffer_size: usize) -> (Self, mpsc::Receiver<Frame>) {
        let (tx, rx) = mpsc::channel(buffer_size.max(1));
        let id = Uuid::new_v4().to_string();
        (Self::new(id, ConnectionSink::new(tx)), rx)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn subscription(&self) -> Option<ServiceId> {
        self.subscription
    }

    /// Whether an event with the given target should reach this connection
    ///
    /// Untargeted events go to everyone. Targeted events only reach a
    /// connection subscribed to that exact service.
    pub fn accepts(&self, target: Option<ServiceId>) -> bool {
        match (target, self.subscription) {
            (None, _) => true,
            (Some(target), Some(subscribed)) => target == subscribed,
            (Some(_), None) => false,
        }
    }

    /// Queue a frame for this connection
    pub fn write(&self, frame: Frame) -> Result<()> {
        self.sink.try_write(&self.id, frame)
    }

    pub fn is_closed(&self) -> bool {
        self.sink.is_closed()
    }
}

/// Live observer connections keyed by connection id
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: DashMap<String, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Add a connection; its subscription starts empty
    pub fn register(&self, mut connection: Connection) {
        connection.subscription = None;
        let id = connection.id.clone();
        if self.connections.insert(id.clone(), connection).is_some() {
            debug!(conn_id = %id, "replaced existing registry entry");
        }
    }

    /// Remove a connection; returns false if it was not registered
    pub fn unregister(&self, connection_id: &str) -> bool {
        self.connections.remove(connection_id).is_some()
    }

    /// Replace a connection's subscription; `None` clears it
    ///
    /// Returns false when the connection is no longer registered.
    pub fn set_subscription(&self, connection_id: &str, service_id: Option<ServiceId>) -> bool {
        match self.connections.get_mut(connection_id) {
            Some(mut entry) => {
                entry.subscription = service_id;
                true
            }
            None => false,
        }
    }

    /// Look up a single connection
    pub fn get(&self, connection_id: &str) -> Option<Connection> {
        self.connections.get(connection_id).map(|c| c.clone())
    }

    pub fn subscription(&self, connection_id: &str) -> Option<ServiceId> {
        self.connections
            .get(connection_id)
            .and_then(|c| c.subscription)
    }

    pub fn contains(&self, connection_id: &str) -> bool {
        self.connections.contains_key(connection_id)
    }

    /// Point-in-time copy of every registered connection
    pub fn snapshot(&self) -> Vec<Connection> {
        self.connections.iter().map(|c| c.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

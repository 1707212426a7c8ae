//! Beacon - Monitoring Notification Hub
//!
//! Pushes health, metrics, incident and action events for a service-monitoring
//! console to connected observers over WebSocket.
//!
//! ## Features
//!
//! - Connection registry with per-connection service subscription
//! - Serialize-once broadcast with subscription filtering
//! - Best-effort, non-blocking delivery isolated per connection
//! - Dashboard snapshot on connect and on request
//! - REST endpoints for producers to publish events

pub mod api;
pub mod config;
pub mod error;
pub mod hub;
pub mod models;

pub use config::Config;
pub use error::{BeaconError, Result};
pub use hub::{ConnectionHandler, NotificationHub};

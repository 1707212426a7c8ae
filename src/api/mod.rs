//! API server implementation
//!
//! Serves the observer WebSocket feed and the endpoints producers publish to.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod websocket;

pub use server::{ApiServer, AppState};

//! WebSocket handlers
//!
//! Each observer connection gets a bounded outbound channel sized by
//! `HUB_WS_BUFFER_SIZE`; the hub writes with `try_send` and never waits on
//! a slow socket.

pub mod monitoring;

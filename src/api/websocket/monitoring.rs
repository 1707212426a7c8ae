//! Monitoring WebSocket handler
//!
//! Bridges one axum socket to the notification hub: outbound frames are
//! drained from the connection's channel, inbound text frames become
//! control messages.

use std::fmt::Display;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{Sink, SinkExt, Stream, StreamExt};
use tracing::debug;

use crate::api::server::AppState;
use crate::error::{BeaconError, Result};
use crate::hub::{Connection, ConnectionHandler, NotificationHub};

/// WebSocket handler for the monitoring feed
pub async fn monitoring_ws(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_monitoring_ws(socket, state))
}

async fn handle_monitoring_ws(socket: WebSocket, state: AppState) {
    let (sender, receiver) = socket.split();
    let _ = run_connection(
        sender,
        receiver,
        state.hub.clone(),
        state.config.hub.ws_buffer_size,
    )
    .await;
}

/// Drive one observer connection until it closes or fails
///
/// Registers with the hub on entry and always unregisters before returning:
/// `on_close` for a close frame or end of stream, `on_error` (and the
/// returned error) for a send or receive failure.
pub(crate) async fn run_connection<W, R, E>(
    mut sender: W,
    mut receiver: R,
    hub: NotificationHub,
    buffer_size: usize,
) -> Result<()>
where
    W: Sink<Message> + Unpin + Send + 'static,
    W::Error: Display,
    R: Stream<Item = std::result::Result<Message, E>> + Unpin + Send + 'static,
    E: Display,
{
    let (connection, mut rx) = Connection::open(buffer_size);
    let conn_id = connection.id().to_string();

    hub.on_connect(connection);

    // Forward queued frames to the socket
    let send_id = conn_id.clone();
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(frame.to_string())).await {
                return Some(BeaconError::Transport {
                    connection_id: send_id,
                    reason: e.to_string(),
                });
            }
        }
        None
    });

    // Feed inbound text frames to the control handler
    let recv_hub = hub.clone();
    let recv_id = conn_id.clone();
    let mut receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => recv_hub.on_message(&recv_id, &text),
                Ok(Message::Close(_)) => {
                    debug!(conn_id = %recv_id, "monitoring WebSocket received close");
                    return None;
                }
                Ok(Message::Binary(_)) => {
                    debug!(conn_id = %recv_id, "ignoring binary frame");
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    // Pong is handled automatically by axum
                }
                Err(e) => {
                    return Some(BeaconError::Transport {
                        connection_id: recv_id,
                        reason: e.to_string(),
                    });
                }
            }
        }
        None
    });

    // Wait for either side to finish
    let failure = tokio::select! {
        res = &mut send_task => res.ok().flatten(),
        res = &mut receive_task => res.ok().flatten(),
    };

    send_task.abort();
    receive_task.abort();

    match failure {
        Some(err) => {
            hub.on_error(&conn_id, &err);
            Err(err)
        }
        None => {
            hub.on_close(&conn_id);
            Ok(())
        }
    }
}

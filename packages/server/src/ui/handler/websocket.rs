//! WebSocket connection handlers.
//!
//! Each socket is split into two tasks: one reads client frames and hands them
//! to the hub, the other drains the connection's outbound queue onto the socket.
//! Whichever ends first aborts the other, and the connection is deregistered.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ConnectionId, ConnectionIdFactory},
    ui::state::AppState,
    usecase::SendMessageError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the outbound queue onto the WebSocket.
///
/// Every write is bounded by `send_timeout`; a failed or timed-out write ends
/// the task, which in turn closes the connection.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
    connection_id: ConnectionId,
    send_timeout: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match tokio::time::timeout(send_timeout, sender.send(Message::Text(msg.into()))).await
            {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!("Failed to send to connection '{}': {}", connection_id, e);
                    break;
                }
                Err(_) => {
                    tracing::warn!(
                        "Send to connection '{}' timed out after {:?}",
                        connection_id,
                        send_timeout
                    );
                    break;
                }
            }
        }
        // Best-effort close frame, bounded by the same timeout
        let _ = tokio::time::timeout(send_timeout, sender.close()).await;
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();
    let (sender, mut receiver) = socket.split();

    // Outbound queue for this connection; the registry holds the sending half
    let (tx, rx) = mpsc::channel(state.config.outbound_buffer());

    if let Err(e) = state
        .connect_client_usecase
        .execute(connection_id.clone(), tx)
        .await
    {
        tracing::warn!("Rejecting connection '{}': {}", connection_id, e);
        return;
    }

    let mut send_task = pusher_loop(
        rx,
        sender,
        connection_id.clone(),
        state.config.send_timeout,
    );

    let connection_id_clone = connection_id.clone();
    let state_clone = state.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!(
                        "WebSocket error on connection '{}': {}",
                        connection_id_clone,
                        e
                    );
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    match state_clone
                        .send_message_usecase
                        .execute(&connection_id_clone, text.as_str())
                        .await
                    {
                        Ok(_) => {}
                        Err(SendMessageError::MalformedPayload(e)) => {
                            tracing::warn!(
                                "Dropping malformed payload from '{}': {}",
                                connection_id_clone,
                                e
                            );
                        }
                        Err(e) => {
                            tracing::error!(
                                "Failed to process message from '{}': {}",
                                connection_id_clone,
                                e
                            );
                        }
                    }
                }
                Message::Binary(_) => {
                    tracing::debug!(
                        "Ignoring binary frame from '{}'",
                        connection_id_clone
                    );
                }
                Message::Ping(_) => {
                    // Pong is sent automatically
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_client_usecase
        .execute(&connection_id)
        .await;
}

//! Per-connection handler: registration, the writer task, and routing.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Register with the coordinator → get an outbound channel
//!   2. Spawn a writer task pumping that channel into the socket
//!   3. Loop: receive events → dispatch to the coordinator
//!   4. On stream end (close, kick, or network failure): disconnect
//!
//! Malformed frames never kill the connection — they are logged and
//! skipped, matching the silent no-op policy for client misuse.

use std::sync::Arc;

use parlor_protocol::{ClientEvent, Codec};
use parlor_room::{GameEvent, Outbound};
use parlor_transport::{Connection, WebSocketConnection};

use crate::server::ServerState;
use crate::ParlorError;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), ParlorError>
where
    C: Codec + Clone,
{
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    state.coordinator.connect(conn_id, tx).await;

    // Writer task: drains the outbound channel into the socket. Room
    // actors and the coordinator only ever touch the channel, so a slow
    // socket never blocks them.
    let writer_conn = conn.clone();
    let writer_codec = state.codec.clone();
    let writer = tokio::spawn(async move {
        while let Some(out) = rx.recv().await {
            match out {
                Outbound::Event(event) => {
                    let bytes = match writer_codec.encode(&event) {
                        Ok(bytes) => bytes,
                        Err(e) => {
                            tracing::warn!(
                                %conn_id, error = %e, "failed to encode event"
                            );
                            continue;
                        }
                    };
                    if writer_conn.send(&bytes).await.is_err() {
                        break;
                    }
                }
                Outbound::Close => {
                    // Force-disconnect (kick). The queued kick event was
                    // already sent above; now drop the socket.
                    let _ = writer_conn.close().await;
                    break;
                }
            }
        }
    });

    // Reader loop: every inbound frame is a client event.
    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::debug!(%conn_id, "connection closed");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        };

        let event: ClientEvent = match state.codec.decode(&data) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "failed to decode event");
                continue;
            }
        };

        dispatch(&state, conn_id, event).await;
    }

    // Runs the leave path and drops every sender clone, which lets the
    // writer task finish on its own.
    state.coordinator.disconnect(conn_id).await;
    let _ = writer.await;

    Ok(())
}

/// Routes one decoded client event to the coordinator.
async fn dispatch<C: Codec>(
    state: &Arc<ServerState<C>>,
    conn_id: parlor_transport::ConnectionId,
    event: ClientEvent,
) {
    let coordinator = &state.coordinator;
    match event {
        ClientEvent::JoinRoom {
            room_id,
            username,
            game,
        } => {
            coordinator.join(conn_id, room_id, username, game).await;
        }
        ClientEvent::LeaveRoom => {
            coordinator.leave(conn_id).await;
        }
        ClientEvent::KickUser {
            room_id,
            target,
            username,
        } => {
            coordinator.kick(room_id, target, username).await;
        }
        ClientEvent::ListRooms { room_id } => {
            coordinator.list_rooms(conn_id, room_id).await;
        }
        ClientEvent::Game { name, payload } => {
            coordinator
                .game_event(conn_id, GameEvent::Relay { name, payload })
                .await;
        }
        ClientEvent::MakeMove { cell_index, symbol } => {
            coordinator
                .game_event(conn_id, GameEvent::Move { cell_index, symbol })
                .await;
        }
        ClientEvent::ResetGame => {
            coordinator.game_event(conn_id, GameEvent::Reset).await;
        }
    }
}

//! Membership coordinator: the single entry point the connection handler
//! drives.
//!
//! The coordinator owns the [`ConnectionRegistry`] and [`RoomDirectory`]
//! behind their own mutexes and translates connection-level happenings
//! (accepted, event received, stream ended) into room operations. Locks
//! are only held for the map lookups; every room actor call happens with
//! both guards released, so one room's backlog never delays another's.
//!
//! Client misuse — joining twice, kicking without being the host, playing
//! a move in a room that does not exist — is absorbed as a silent no-op
//! here or in the room actor, never an error back to the caller.

use parlor_protocol::{ConnectionId, GameKind, LobbyEntry, RoomId, ServerEvent};
use tokio::sync::Mutex;

use crate::directory::RoomDirectory;
use crate::registry::{ClientSender, ConnectionRegistry};
use crate::room::{GameEvent, RoomHandle};

/// Coordinates connections, rooms, and the lobby feed.
pub struct Coordinator {
    registry: Mutex<ConnectionRegistry>,
    directory: Mutex<RoomDirectory>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator {
    /// Creates a coordinator with no connections and no rooms.
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(ConnectionRegistry::new()),
            directory: Mutex::new(RoomDirectory::new()),
        }
    }

    /// Registers a freshly accepted connection and sends it the current
    /// lobby so it does not have to wait for the next membership change.
    pub async fn connect(&self, conn: ConnectionId, sender: ClientSender) {
        self.registry.lock().await.register(conn, sender);
        let rooms = self.lobby_snapshot().await;
        self.registry
            .lock()
            .await
            .send_to(conn, ServerEvent::UpdateLobbyList { rooms });
    }

    /// Tears down a connection whose stream ended (voluntary close, kick,
    /// or network failure). Runs the leave path if it was in a room.
    pub async fn disconnect(&self, conn: ConnectionId) {
        let room_id = self.registry.lock().await.unregister(conn);
        if let Some(room_id) = room_id {
            self.leave_room(&room_id, conn).await;
        }
    }

    /// Joins a connection to a room, creating the room (with this member
    /// as host) if it does not exist. A connection already in a room is
    /// left where it is.
    pub async fn join(
        &self,
        conn: ConnectionId,
        room_id: RoomId,
        username: String,
        game: GameKind,
    ) {
        let sender = {
            let registry = self.registry.lock().await;
            if registry.room_of(conn).is_some() {
                tracing::debug!(%conn, "join ignored: already in a room");
                return;
            }
            match registry.sender_of(conn) {
                Some(sender) => sender,
                None => return,
            }
        };

        // The handle can go stale between lookup and join if the room
        // empties in the gap. One retry with a fresh actor covers it.
        let mut handle = self
            .directory
            .lock()
            .await
            .get_or_create(&room_id, game);
        if handle
            .join(conn, username.clone(), sender.clone())
            .await
            .is_err()
        {
            let mut directory = self.directory.lock().await;
            directory.remove(&room_id);
            handle = directory.get_or_create(&room_id, game);
            drop(directory);
            if handle.join(conn, username, sender).await.is_err() {
                tracing::warn!(%conn, %room_id, "join failed: room unavailable");
                return;
            }
        }

        self.registry.lock().await.bind(conn, room_id);
        self.broadcast_lobby().await;
    }

    /// Leaves the connection's current room, if any. The connection stays
    /// open and can join another room afterwards.
    pub async fn leave(&self, conn: ConnectionId) {
        let room_id = self.registry.lock().await.unbind(conn);
        if let Some(room_id) = room_id {
            self.leave_room(&room_id, conn).await;
        }
    }

    /// Host-only kick. The room actor authorizes the request; on success
    /// the target has already been sent the `kick` event and we queue the
    /// force-close behind it. The target's stream end then runs the
    /// ordinary disconnect path.
    pub async fn kick(
        &self,
        room_id: RoomId,
        target: ConnectionId,
        requester: String,
    ) {
        let Some(handle) = self.room_handle(&room_id).await else {
            return;
        };
        match handle.kick(target, requester).await {
            Ok(Some(target)) => {
                self.registry.lock().await.force_close(target);
            }
            Ok(None) | Err(_) => {}
        }
    }

    /// Routes a member's in-room action to its room actor. Connections in
    /// no room are ignored.
    pub async fn game_event(&self, conn: ConnectionId, event: GameEvent) {
        let room_id = {
            let registry = self.registry.lock().await;
            registry.room_of(conn).cloned()
        };
        let Some(room_id) = room_id else {
            tracing::debug!(%conn, "game event outside a room, ignoring");
            return;
        };
        if let Some(handle) = self.room_handle(&room_id).await {
            let _ = handle.game(conn, event).await;
        }
    }

    /// Answers a `list-rooms` request: every live room, or only the room
    /// whose id equals the filter.
    pub async fn list_rooms(&self, conn: ConnectionId, filter: Option<String>) {
        let mut rooms = self.lobby_snapshot().await;
        if let Some(filter) = filter {
            rooms.retain(|entry| entry.room_id.as_str() == filter);
        }
        self.registry
            .lock()
            .await
            .send_to(conn, ServerEvent::RoomList { rooms });
    }

    /// Number of live connections. Used by server stats and tests.
    pub async fn connection_count(&self) -> usize {
        self.registry.lock().await.len()
    }

    /// Number of live rooms. Used by server stats and tests.
    pub async fn room_count(&self) -> usize {
        self.directory.lock().await.len()
    }

    /// Runs the leave path against a room and refreshes the lobby if the
    /// membership actually changed.
    async fn leave_room(&self, room_id: &RoomId, conn: ConnectionId) {
        let Some(handle) = self.room_handle(room_id).await else {
            return;
        };
        let Ok(outcome) = handle.leave(conn).await else {
            // Actor already gone; make sure the table entry is too.
            self.directory.lock().await.remove(room_id);
            return;
        };
        if outcome.now_empty {
            self.directory.lock().await.remove(room_id);
        }
        if outcome.removed {
            self.broadcast_lobby().await;
        }
    }

    async fn room_handle(&self, room_id: &RoomId) -> Option<RoomHandle> {
        self.directory.lock().await.get(room_id)
    }

    /// Collects every live room's lobby projection. Rooms that die while
    /// we iterate simply drop out of the snapshot.
    async fn lobby_snapshot(&self) -> Vec<LobbyEntry> {
        let handles = self.directory.lock().await.handles();
        let mut rooms = Vec::with_capacity(handles.len());
        for handle in handles {
            if let Ok(entry) = handle.snapshot().await {
                rooms.push(entry);
            }
        }
        rooms
    }

    /// Pushes the full lobby to every live connection.
    async fn broadcast_lobby(&self) {
        let rooms = self.lobby_snapshot().await;
        self.registry
            .lock()
            .await
            .broadcast_all(ServerEvent::UpdateLobbyList { rooms });
    }
}

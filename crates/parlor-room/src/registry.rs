//! Connection registry: live connections and which room each belongs to.
//!
//! Leaf of the coordination layer. The registry owns nothing but
//! channels: each connection's writer task sits on the receiving end of
//! an unbounded [`Outbound`] channel, and the registry holds the sending
//! ends so room actors and the coordinator can reach any connection.
//!
//! Not thread-safe by itself — the [`Coordinator`](crate::Coordinator)
//! owns it behind a mutex. Keeping the plain `HashMap`s here avoids
//! hidden locking on every send.

use std::collections::HashMap;

use parlor_protocol::{ConnectionId, RoomId, ServerEvent};
use tokio::sync::mpsc;

/// An instruction for a connection's writer task.
#[derive(Debug)]
pub enum Outbound {
    /// Encode and send this event to the client.
    Event(ServerEvent),
    /// Close the transport. Used to force-disconnect a kicked member;
    /// queued *after* the user-facing `kick` event so the client sees the
    /// message before the socket drops.
    Close,
}

/// Sending end of a connection's outbound channel.
///
/// Unbounded: delivery is fire-and-forget, and a slow client must never
/// be able to stall a room actor mid-broadcast.
pub type ClientSender = mpsc::UnboundedSender<Outbound>;

/// Tracks every live connection and its (at most one) room binding.
#[derive(Default)]
pub struct ConnectionRegistry {
    /// Outbound channel per live connection.
    conns: HashMap<ConnectionId, ClientSender>,

    /// Which room each connection is currently in. Absent = in no room
    /// (connected clients browsing the lobby still receive
    /// `update-lobby-list`).
    rooms: HashMap<ConnectionId, RoomId>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a freshly accepted connection.
    pub fn register(&mut self, conn: ConnectionId, sender: ClientSender) {
        self.conns.insert(conn, sender);
        tracing::debug!(%conn, total = self.conns.len(), "connection registered");
    }

    /// Removes a connection entirely. Returns the room it was bound to,
    /// if any, so the caller can run the leave path.
    pub fn unregister(&mut self, conn: ConnectionId) -> Option<RoomId> {
        self.conns.remove(&conn);
        let room = self.rooms.remove(&conn);
        tracing::debug!(%conn, total = self.conns.len(), "connection unregistered");
        room
    }

    /// Binds a connection to a room. A connection is in at most one room;
    /// rebinding replaces the previous binding.
    pub fn bind(&mut self, conn: ConnectionId, room_id: RoomId) {
        self.rooms.insert(conn, room_id);
    }

    /// Clears a connection's room binding, returning it.
    pub fn unbind(&mut self, conn: ConnectionId) -> Option<RoomId> {
        self.rooms.remove(&conn)
    }

    /// The room a connection is currently bound to.
    pub fn room_of(&self, conn: ConnectionId) -> Option<&RoomId> {
        self.rooms.get(&conn)
    }

    /// The outbound sender for a connection, cloned for a room actor to
    /// hold.
    pub fn sender_of(&self, conn: ConnectionId) -> Option<ClientSender> {
        self.conns.get(&conn).cloned()
    }

    /// Sends an event to one connection. A missing or closed target is a
    /// harmless miss.
    pub fn send_to(&self, conn: ConnectionId, event: ServerEvent) {
        if let Some(sender) = self.conns.get(&conn) {
            let _ = sender.send(Outbound::Event(event));
        }
    }

    /// Broadcasts an event to every live connection — in rooms or not.
    /// This is how lobby updates reach clients still picking a room.
    pub fn broadcast_all(&self, event: ServerEvent) {
        for sender in self.conns.values() {
            let _ = sender.send(Outbound::Event(event.clone()));
        }
    }

    /// Tells a connection's writer task to close the transport. The
    /// resulting stream end runs the standard disconnect path.
    pub fn force_close(&self, conn: ConnectionId) {
        if let Some(sender) = self.conns.get(&conn) {
            let _ = sender.send(Outbound::Close);
        }
    }

    /// Number of live connections.
    pub fn len(&self) -> usize {
        self.conns.len()
    }

    /// Returns `true` if no connections are registered.
    pub fn is_empty(&self) -> bool {
        self.conns.is_empty()
    }
}

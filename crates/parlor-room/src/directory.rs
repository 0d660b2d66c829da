//! Room directory: the table of live rooms.
//!
//! Rooms come into existence the moment a first member joins (there is no
//! separate "create" call) and disappear the moment the last member
//! leaves. The directory only maps ids to actor handles; all per-room
//! state lives inside the actors.

use std::collections::HashMap;

use parlor_protocol::{GameKind, RoomId};

use crate::room::{spawn_room, RoomHandle};

/// Default command-channel capacity for a room actor.
const DEFAULT_ROOM_CHANNEL_SIZE: usize = 256;

/// Maps room ids to their running actors.
pub struct RoomDirectory {
    rooms: HashMap<RoomId, RoomHandle>,
    channel_size: usize,
}

impl Default for RoomDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
            channel_size: DEFAULT_ROOM_CHANNEL_SIZE,
        }
    }

    /// Looks up a live room, dropping a stale entry whose actor has
    /// already exited.
    pub fn get(&mut self, room_id: &RoomId) -> Option<RoomHandle> {
        let stale = self
            .rooms
            .get(room_id)
            .is_some_and(|handle| handle.is_closed());
        if stale {
            self.rooms.remove(room_id);
            return None;
        }
        self.rooms.get(room_id).cloned()
    }

    /// Returns the room's handle, spawning a fresh actor if the room does
    /// not exist yet. `game` only applies on creation; an existing room
    /// keeps the kind it was created with.
    pub fn get_or_create(
        &mut self,
        room_id: &RoomId,
        game: GameKind,
    ) -> RoomHandle {
        if let Some(handle) = self.get(room_id) {
            return handle;
        }
        let handle = spawn_room(room_id.clone(), game, self.channel_size);
        self.rooms.insert(room_id.clone(), handle.clone());
        handle
    }

    /// Drops a room's entry. The id becomes available for reuse.
    pub fn remove(&mut self, room_id: &RoomId) {
        self.rooms.remove(room_id);
    }

    /// Handles of every room currently in the table. Stale entries are
    /// filtered out (their removal happens lazily via [`get`]).
    ///
    /// [`get`]: RoomDirectory::get
    pub fn handles(&self) -> Vec<RoomHandle> {
        self.rooms
            .values()
            .filter(|h| !h.is_closed())
            .cloned()
            .collect()
    }

    /// Number of live rooms in the table.
    pub fn len(&self) -> usize {
        self.rooms.values().filter(|h| !h.is_closed()).count()
    }

    /// Returns `true` if no live rooms exist.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

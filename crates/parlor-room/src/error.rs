//! Error types for the room layer.
//!
//! Client misuse (unknown room, non-host kick, illegal move) is a silent
//! no-op by contract, not an error. What's left is plumbing: a room actor
//! whose channel is gone because the room emptied and was destroyed.

use parlor_protocol::RoomId;

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room's command channel is closed — the room has been
    /// destroyed (or is being destroyed) since the handle was obtained.
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),
}

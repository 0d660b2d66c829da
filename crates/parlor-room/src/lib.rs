//! Room lifecycle, membership coordination, and event relay for Parlor.
//!
//! Each room runs as an isolated Tokio task (actor model) that owns the
//! room's members, host record, canvas-bootstrap queue, and — for the
//! turn-based board game — the authoritative match state. Mutation of a
//! room's state only ever happens inside its actor, which structurally
//! serializes concurrent joins, leaves, and moves on the *same* room
//! while leaving distinct rooms fully independent.
//!
//! # Key types
//!
//! - [`Coordinator`] — membership coordinator: connect/disconnect, join,
//!   leave, kick, game-event routing, lobby broadcasts
//! - [`ConnectionRegistry`] — live connections and their room bindings
//! - [`RoomDirectory`] — room table, created-on-join / destroyed-on-empty
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`GameEvent`] — a member's in-room action (relay, move, reset)

mod coordinator;
mod directory;
mod error;
mod registry;
mod room;

pub use coordinator::Coordinator;
pub use directory::RoomDirectory;
pub use error::RoomError;
pub use registry::{ClientSender, ConnectionRegistry, Outbound};
pub use room::{GameEvent, LeaveOutcome, RoomHandle};

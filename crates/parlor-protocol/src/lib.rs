//! Wire protocol for Parlor.
//!
//! This crate defines the "language" that clients and the relay speak:
//!
//! - **Types** ([`ClientEvent`], [`ServerEvent`], [`Member`],
//!   [`LobbyEntry`], etc.) — the event structures that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those events are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw frames) and the room
//! layer (membership, relay, game state). It doesn't know which room a
//! connection is in — it only knows how to serialize and deserialize
//! events.
//!
//! ```text
//! Transport (frames) → Protocol (ClientEvent) → Rooms (membership, relay)
//! ```

mod codec;
mod error;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use types::{
    Board, ClientEvent, GameKind, GameResult, LobbyEntry, Member, RoomId,
    ServerEvent, Symbol, BOARD_CELLS,
};

// Connections are identified at the transport layer; the id is re-exported
// here because `Member` carries it on the wire.
pub use parlor_transport::ConnectionId;

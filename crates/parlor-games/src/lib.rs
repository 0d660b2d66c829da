//! Game logic for Parlor, free of any I/O.
//!
//! Two halves:
//!
//! - [`relay`] — the per-game adapter tables for host-authoritative games:
//!   which event names each game speaks, how outbound names are remapped,
//!   and which kinds participate in the canvas bootstrap.
//! - [`board`] — the turn-based authority engine ([`Match`]), the one game
//!   whose state lives on the server.
//!
//! The room actor in `parlor-room` drives both; nothing here touches a
//! socket or a channel, which is what keeps it exhaustively unit-testable.

pub mod board;
pub mod relay;

pub use board::{GameStatus, JoinOutcome, Match, MoveOutcome};

//! # Parlor
//!
//! Room-based multiplayer relay server for small browser games.
//!
//! Parlor groups WebSocket connections into rooms, broadcasts membership
//! and lobby changes, relays game events between roommates, and runs one
//! server-authoritative turn-based board game. Everything else — pong
//! physics, drawing strokes, battleship boards — lives on the clients;
//! the server just forwards.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parlor::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ParlorError> {
//!     let server = ParlorServer::builder()
//!         .bind("0.0.0.0:8080")
//!         .build()
//!         .await?;
//!     server.run().await
//! }
//! ```

mod error;
mod handler;
mod server;

pub use error::ParlorError;
pub use server::{ParlorServer, ParlorServerBuilder};

/// The common imports for building on Parlor.
pub mod prelude {
    pub use crate::{ParlorError, ParlorServer, ParlorServerBuilder};
    pub use parlor_protocol::{
        Board, ClientEvent, GameKind, GameResult, LobbyEntry, Member,
        RoomId, ServerEvent, Symbol,
    };
    pub use parlor_transport::ConnectionId;
}

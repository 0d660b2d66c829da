//! Core protocol types for Parlor's wire format.
//!
//! Every type here travels "on the wire": it gets serialized to a JSON
//! text frame, sent over the WebSocket, and deserialized on the other
//! side. Event names use the same kebab-case vocabulary the browser
//! clients already speak (`join-room`, `update-user-list`, `kick`, …).

use parlor_transport::ConnectionId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Maximum accepted length for a room id.
const MAX_ROOM_ID_LEN: usize = 32;

/// Length of server-minted room codes.
const GENERATED_ROOM_ID_LEN: usize = 4;

/// A room identifier: a non-empty alphanumeric string, unique while the
/// room is non-empty. Ids may be reused once the room has been destroyed.
///
/// Clients usually mint these themselves (short shareable codes like
/// `"ABCD"`); [`RoomId::generate`] exists for clients that want the server
/// to pick one. Validation happens at the `TryFrom<String>` boundary, so a
/// deserialized `RoomId` is always well-formed — an inbound event carrying
/// a malformed id fails to decode and is dropped, which matches the
/// relay's silent no-op policy for malformed requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomId(String);

impl RoomId {
    /// Parses and validates a room id.
    pub fn parse(id: impl Into<String>) -> Result<Self, crate::ProtocolError> {
        let id = id.into();
        if id.is_empty()
            || id.len() > MAX_ROOM_ID_LEN
            || !id.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(crate::ProtocolError::InvalidRoomId(id));
        }
        Ok(Self(id))
    }

    /// Mints a random 4-character uppercase alphanumeric room code.
    pub fn generate() -> Self {
        const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        let mut rng = rand::rng();
        let code: String = (0..GENERATED_ROOM_ID_LEN)
            .map(|_| {
                let i = rand::Rng::random_range(&mut rng, 0..ALPHABET.len());
                ALPHABET[i] as char
            })
            .collect();
        Self(code)
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = crate::ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<RoomId> for String {
    fn from(id: RoomId) -> String {
        id.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Game kinds
// ---------------------------------------------------------------------------

/// The game a room was created for. Fixed at room creation; a later
/// joiner's requested kind is ignored (the room's original kind wins).
///
/// The wire values are the display strings the clients send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    #[serde(rename = "DRAW")]
    Draw,
    #[serde(rename = "PONG")]
    Pong,
    #[serde(rename = "BATTLESHIP")]
    Battleship,
    #[serde(rename = "CONNECT FOUR")]
    ConnectFour,
    #[serde(rename = "TIC TAC TOE")]
    TicTacToe,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Draw => "DRAW",
            Self::Pong => "PONG",
            Self::Battleship => "BATTLESHIP",
            Self::ConnectFour => "CONNECT FOUR",
            Self::TicTacToe => "TIC TAC TOE",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Membership projections
// ---------------------------------------------------------------------------

/// A room member as broadcast in `update-user-list`.
///
/// `username` is client-supplied and not re-validated by the relay; `host`
/// is true for exactly one member per non-empty room — the member who
/// created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The member's connection id.
    pub id: ConnectionId,
    /// Client-supplied display name.
    pub username: String,
    /// Whether this member created the room.
    pub host: bool,
}

/// A public projection of a room, broadcast to *every* connection in
/// `update-lobby-list` whenever any room's membership changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyEntry {
    /// The game this room plays.
    pub game: GameKind,
    /// The room's id.
    pub room_id: RoomId,
    /// Display name of the room's host.
    pub host: String,
    /// Number of members currently in the room.
    pub player_count: usize,
    /// Display names of all members, in join order.
    pub players: Vec<String>,
}

// ---------------------------------------------------------------------------
// Board game types
// ---------------------------------------------------------------------------

/// Number of cells on the turn-based game board.
pub const BOARD_CELLS: usize = 9;

/// A player symbol in the turn-based board game.
///
/// Assigned in join order — first joiner is `X`, second is `O` — and
/// permanent for the life of the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// The symbol that plays after this one.
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::O => write!(f, "O"),
        }
    }
}

/// The 9-cell board, serialized as a flat array of `"X"` / `"O"` / `null`.
pub type Board = [Option<Symbol>; BOARD_CELLS];

/// Outcome reported in `game-over`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    X,
    O,
    #[serde(rename = "draw")]
    Draw,
}

impl From<Symbol> for GameResult {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Self::X,
            Symbol::O => Self::O,
        }
    }
}

// ---------------------------------------------------------------------------
// ClientEvent — everything a client can send
// ---------------------------------------------------------------------------

/// Inbound events (client → server).
///
/// `#[serde(tag = "event")]` produces internally tagged JSON, e.g.:
///
/// ```json
/// { "event": "join-room", "room_id": "ABCD", "username": "ada", "game": "PONG" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Join a room, creating it (with this connection as host) if it does
    /// not currently exist. Permissive: no capacity check, no error reply.
    JoinRoom {
        room_id: RoomId,
        username: String,
        game: GameKind,
    },

    /// Leave the current room without closing the connection.
    /// Transport close triggers the same path implicitly.
    LeaveRoom,

    /// Host-only: remove a member from the room. Authorized by display-name
    /// equality with the room's recorded host — not connection identity.
    /// Silently ignored for non-hosts, unknown rooms, or stale targets.
    KickUser {
        room_id: RoomId,
        target: ConnectionId,
        username: String,
    },

    /// Read-only discovery: list all rooms, or only rooms whose id equals
    /// the filter. Replies with [`ServerEvent::RoomList`].
    ListRooms {
        #[serde(default)]
        room_id: Option<String>,
    },

    /// A generic relay event. The payload is opaque to the server and is
    /// forwarded, unmodified, to every *other* member of the sender's room.
    Game { name: String, payload: Value },

    /// Turn-based board game: place `symbol` at `cell_index` (0–8).
    /// Rejected silently unless it is that symbol's turn, the room is
    /// playing, and the cell is empty.
    MakeMove { cell_index: usize, symbol: Symbol },

    /// Turn-based board game: clear the board and start a fresh game.
    /// The only way out of a finished game.
    ResetGame,
}

// ---------------------------------------------------------------------------
// ServerEvent — everything the server can send
// ---------------------------------------------------------------------------

/// Outbound events (server → client).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Room-scoped: the room's full member list after any change.
    UpdateUserList { members: Vec<Member> },

    /// Broadcast to all connections: the full lobby after any room's
    /// membership changed.
    UpdateLobbyList { rooms: Vec<LobbyEntry> },

    /// Reply to [`ClientEvent::ListRooms`].
    RoomList { rooms: Vec<LobbyEntry> },

    /// Targeted: you are being removed from the room. Sent just before the
    /// server force-closes the target's connection.
    Kick { message: String },

    /// A relayed game event. `name` may differ from the inbound name where
    /// the per-game adapter remaps it (battleship `attack` → `attacked`).
    Game { name: String, payload: Value },

    /// Canvas bootstrap: asks an existing drawing-room member to report
    /// its current canvas snapshot for a newly joined viewer.
    GetCanvasState,

    /// Board game, targeted at a joiner: the symbol they will play.
    AssignSymbol { symbol: Symbol },

    /// Board game, room-scoped: a fresh game is starting.
    GameStart { board: Board },

    /// Board game, room-scoped: a move was accepted.
    MoveMade { board: Board, current_turn: Symbol },

    /// Board game, room-scoped: the game ended.
    GameOver { winner: GameResult, board: Board },
}

// =========================================================================
// Tests
// =========================================================================

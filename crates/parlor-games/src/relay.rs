//! Per-game relay adapters.
//!
//! The relay itself is generic — receive from one member, rebroadcast to
//! the rest of the room — and never inspects payloads. What *is*
//! game-specific is thin: the event vocabulary each game speaks, one
//! outbound rename (battleship reports an `attack` to the defender as
//! `attacked`), whether a game bootstraps late joiners from a member's
//! canvas snapshot, and whether the game is server-authoritative at all.

use parlor_protocol::GameKind;

/// Event name of a drawing-room canvas snapshot. The room actor watches
/// for this name to satisfy pending bootstrap requests.
pub const CANVAS_STATE: &str = "canvas-state";

/// Outbound name for a relayed canvas snapshot.
pub const CANVAS_STATE_FROM_SERVER: &str = "canvas-state-from-server";

/// Per-game relay event vocabularies.
///
/// The relay does not validate that an event belongs to the room's game —
/// misuse is a client concern — so these are documentation and test
/// fixtures, not a gate.
pub mod events {
    /// Collaborative drawing.
    pub mod draw {
        pub const LINE: &str = "draw-line";
        pub const CURSOR: &str = "draw-cursor";
        pub const CLEAR: &str = "clear";
        pub const CANVAS_STATE: &str = super::super::CANVAS_STATE;
    }

    /// Pong. All physics run on the host; the relay carries its results.
    pub mod pong {
        pub const BALL: &str = "pong-ball";
        pub const PADDLE: &str = "pong-paddle";
        pub const SCORE: &str = "pong-score";
        pub const GAME_STATUS: &str = "pong-game-status";
    }

    /// Battleship. Hits are reported by the attacked client, not verified
    /// by the relay.
    pub mod battleship {
        pub const ATTACK: &str = "attack";
        pub const ATTACKED: &str = "attacked";
        pub const HIT: &str = "hit";
        pub const PLAYER_STATE: &str = "player-state";
    }

    /// Connect four. The host computes the board; the relay syncs it.
    pub mod connect_four {
        pub const DROP_PIECE: &str = "connect-four-drop-piece";
        pub const BOARD: &str = "connect-four-board";
        pub const RESET: &str = "connect-four-reset";
    }
}

/// Maps an inbound relay event name to the name the rest of the room
/// receives. Identity for everything except battleship's `attack` and the
/// drawing game's canvas snapshot.
pub fn outbound_name(game: GameKind, name: &str) -> &str {
    match (game, name) {
        (GameKind::Battleship, events::battleship::ATTACK) => {
            events::battleship::ATTACKED
        }
        (GameKind::Draw, CANVAS_STATE) => CANVAS_STATE_FROM_SERVER,
        _ => name,
    }
}

/// Whether new members of this game's rooms are bootstrapped from an
/// existing member's canvas snapshot.
pub fn uses_canvas(game: GameKind) -> bool {
    matches!(game, GameKind::Draw)
}

/// Whether the server holds authoritative state for this game.
///
/// For authoritative kinds the room actor routes `make-move`/`reset-game`
/// into the board engine instead of the relay.
pub fn is_authoritative(game: GameKind) -> bool {
    matches!(game, GameKind::TicTacToe)
}

/// The relay vocabulary of a host-authoritative game, in no particular
/// order. Empty for the server-authoritative kind.
pub fn known_events(game: GameKind) -> &'static [&'static str] {
    use events::*;
    match game {
        GameKind::Draw => {
            &[draw::LINE, draw::CURSOR, draw::CLEAR, draw::CANVAS_STATE]
        }
        GameKind::Pong => {
            &[pong::BALL, pong::PADDLE, pong::SCORE, pong::GAME_STATUS]
        }
        GameKind::Battleship => &[
            battleship::ATTACK,
            battleship::HIT,
            battleship::PLAYER_STATE,
        ],
        GameKind::ConnectFour => &[
            connect_four::DROP_PIECE,
            connect_four::BOARD,
            connect_four::RESET,
        ],
        GameKind::TicTacToe => &[],
    }
}

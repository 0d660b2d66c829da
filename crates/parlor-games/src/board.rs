//! The turn-based authority engine: the one game whose state the server
//! owns and enforces.
//!
//! A [`Match`] tracks the 9-cell board, whose turn it is, the game status,
//! and which connections hold the two seats. The room actor feeds it
//! joins, disconnects, moves, and resets; everything here is synchronous
//! and deterministic.
//!
//! Invalid moves are *rejected*, not errored: the relay trusts
//! well-behaved clients, so a move out of turn, onto an occupied cell, or
//! after the game finished produces no state change and no broadcast.

use parlor_protocol::{BOARD_CELLS, Board, Symbol};
use parlor_transport::ConnectionId;

/// The canonical win lines: 3 rows, 3 columns, 2 diagonals.
const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Lifecycle of a match.
///
/// ```text
/// Waiting (0–1 seated) → Playing (second seat taken) → Finished
///                              ↑                           │
///                              └──────── reset ────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Fewer than two seated players; moves are rejected.
    Waiting,
    /// Two seats taken, alternating turns.
    Playing,
    /// Won or drawn. Only `reset` leaves this state.
    Finished,
}

/// Result of seating a joiner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The joiner took a seat. `started` is true exactly when this join
    /// filled the second seat and flipped the match to `Playing`.
    Seated { symbol: Symbol, started: bool },
    /// Both seats were already taken; the joiner is a member of the room
    /// but holds no symbol. The relay imposes no capacity limit.
    Spectating,
}

/// Result of applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No state change, no broadcast.
    Rejected,
    /// The symbol was placed; play continues with `current_turn`.
    Placed { board: Board, current_turn: Symbol },
    /// The move completed a win line.
    Won { winner: Symbol, board: Board },
    /// The move filled the ninth cell with no win line.
    Drawn { board: Board },
}

/// Server-authoritative state for one room's match.
#[derive(Debug, Clone)]
pub struct Match {
    board: Board,
    current_turn: Symbol,
    status: GameStatus,
    /// Seated players in join order: first is X, second is O. The
    /// assignment is permanent for the room.
    players: Vec<ConnectionId>,
}

impl Match {
    /// Creates an empty match waiting for players.
    pub fn new() -> Self {
        Self {
            board: [None; BOARD_CELLS],
            current_turn: Symbol::X,
            status: GameStatus::Waiting,
            players: Vec::with_capacity(2),
        }
    }

    /// Seats a joiner if a seat is free.
    ///
    /// First joiner plays X, second plays O; the second join transitions
    /// the match to `Playing`. Later joiners spectate.
    pub fn add_player(&mut self, conn: ConnectionId) -> JoinOutcome {
        if self.players.contains(&conn) || self.players.len() >= 2 {
            return JoinOutcome::Spectating;
        }
        self.players.push(conn);
        let symbol = if self.players.len() == 1 {
            Symbol::X
        } else {
            Symbol::O
        };
        let started = self.players.len() == 2;
        if started {
            self.status = GameStatus::Playing;
        }
        JoinOutcome::Seated { symbol, started }
    }

    /// Removes a disconnected player's seat.
    ///
    /// Deliberately does *not* reset an in-progress game; the remaining
    /// player keeps the board as it stands.
    pub fn remove_player(&mut self, conn: ConnectionId) {
        self.players.retain(|p| *p != conn);
    }

    /// Applies a move: place `symbol` at `cell_index`.
    ///
    /// Rejected unless the match is `Playing`, it is `symbol`'s turn, the
    /// index is on the board, and the cell is empty. On acceptance the
    /// turn flips, then terminal conditions are checked: win line first,
    /// then draw.
    pub fn apply_move(
        &mut self,
        cell_index: usize,
        symbol: Symbol,
    ) -> MoveOutcome {
        if self.status != GameStatus::Playing
            || symbol != self.current_turn
            || cell_index >= BOARD_CELLS
            || self.board[cell_index].is_some()
        {
            return MoveOutcome::Rejected;
        }

        self.board[cell_index] = Some(symbol);
        self.current_turn = symbol.other();

        if let Some(winner) = winner_of(&self.board) {
            self.status = GameStatus::Finished;
            return MoveOutcome::Won {
                winner,
                board: self.board,
            };
        }
        if self.board.iter().all(Option::is_some) {
            self.status = GameStatus::Finished;
            return MoveOutcome::Drawn { board: self.board };
        }
        MoveOutcome::Placed {
            board: self.board,
            current_turn: self.current_turn,
        }
    }

    /// Clears the board for a fresh game: empty cells, X to move,
    /// status `Playing`. The only way out of `Finished`.
    pub fn reset(&mut self) -> Board {
        self.board = [None; BOARD_CELLS];
        self.current_turn = Symbol::X;
        self.status = GameStatus::Playing;
        self.board
    }

    /// The current board.
    pub fn board(&self) -> Board {
        self.board
    }

    /// The current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Whose turn it is.
    pub fn current_turn(&self) -> Symbol {
        self.current_turn
    }

    /// Number of seated players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The symbol a connection holds, if seated.
    pub fn symbol_of(&self, conn: ConnectionId) -> Option<Symbol> {
        self.players.iter().position(|p| *p == conn).map(|i| {
            if i == 0 { Symbol::X } else { Symbol::O }
        })
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the symbol owning a full win line, if any.
fn winner_of(board: &Board) -> Option<Symbol> {
    for [a, b, c] in WIN_LINES {
        if let Some(symbol) = board[a] {
            if board[b] == Some(symbol) && board[c] == Some(symbol) {
                return Some(symbol);
            }
        }
    }
    None
}

// =========================================================================
// Tests
// =========================================================================

//! Room actor: an isolated Tokio task that owns one room's state.
//!
//! Everything that can mutate a room — joins, leaves, kicks, relayed
//! events, board moves — arrives as a [`RoomCommand`] on the actor's
//! channel and is processed one at a time. That is the whole concurrency
//! story: commands touching the same room are serialized by the mailbox,
//! commands for different rooms run on different tasks and never block
//! each other.
//!
//! The actor exits on its own the moment its member list becomes empty;
//! the [`RoomDirectory`](crate::RoomDirectory) entry is removed by the
//! coordinator in the same handler step.

use parlor_protocol::{
    ConnectionId, GameKind, LobbyEntry, Member, RoomId, ServerEvent, Symbol,
};
use parlor_games::board::{JoinOutcome, Match, MoveOutcome};
use parlor_games::relay;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::{ClientSender, Outbound, RoomError};

/// Message sent to the kicked member before its transport is closed.
const KICK_MESSAGE: &str = "You have been kicked from the room.";

/// A member's in-room action, routed by game kind: relay events are
/// rebroadcast, board-game actions go through the authority engine.
#[derive(Debug)]
pub enum GameEvent {
    /// Generic relay: forward `payload` under (possibly remapped) `name`
    /// to every other member.
    Relay { name: String, payload: Value },
    /// Board game: place `symbol` at `cell_index`.
    Move { cell_index: usize, symbol: Symbol },
    /// Board game: fresh board, X to move.
    Reset,
}

/// What a leave did to the room.
#[derive(Debug, Clone, Copy)]
pub struct LeaveOutcome {
    /// Whether the connection was actually a member.
    pub removed: bool,
    /// Whether the room is now empty (and its actor has exited).
    pub now_empty: bool,
}

/// Commands sent to a room actor through its channel.
enum RoomCommand {
    /// Admit a member. The first member becomes (and stays) the host.
    Join {
        conn: ConnectionId,
        username: String,
        sender: ClientSender,
        reply: oneshot::Sender<()>,
    },

    /// Remove a member (leave, disconnect, or post-kick cleanup).
    Leave {
        conn: ConnectionId,
        reply: oneshot::Sender<LeaveOutcome>,
    },

    /// Host-only removal request. Replies with the target's connection id
    /// if the kick was authorized and the target is a member; `None` is a
    /// silent no-op.
    Kick {
        target: ConnectionId,
        requester: String,
        reply: oneshot::Sender<Option<ConnectionId>>,
    },

    /// A member's in-room action.
    Game {
        from: ConnectionId,
        event: GameEvent,
    },

    /// Request the room's lobby projection.
    Snapshot { reply: oneshot::Sender<LobbyEntry> },
}

/// Handle to a running room actor. Cheap to clone.
#[derive(Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// The room this handle points at.
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Returns `true` if the actor has exited (room destroyed).
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Admits a member into the room.
    pub async fn join(
        &self,
        conn: ConnectionId,
        username: String,
        sender: ClientSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                conn,
                username,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Removes a member from the room.
    pub async fn leave(
        &self,
        conn: ConnectionId,
    ) -> Result<LeaveOutcome, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Leave {
                conn,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Requests a kick. `Some(target)` means the target was notified and
    /// should now be force-disconnected by the caller.
    pub async fn kick(
        &self,
        target: ConnectionId,
        requester: String,
    ) -> Result<Option<ConnectionId>, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Kick {
                target,
                requester,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Delivers a member's in-room action (fire-and-forget).
    pub async fn game(
        &self,
        from: ConnectionId,
        event: GameEvent,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Game { from, event })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Requests the room's lobby projection.
    pub async fn snapshot(&self) -> Result<LobbyEntry, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }
}

/// One member's record inside the actor.
struct RoomMember {
    conn: ConnectionId,
    username: String,
    host: bool,
    sender: ClientSender,
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    room_id: RoomId,
    game: GameKind,
    /// Display name of the member who created the room. Never reassigned,
    /// even after the host disconnects — kick authorization compares
    /// against this for the room's entire life.
    host_name: Option<String>,
    /// Members in join order.
    members: Vec<RoomMember>,
    /// Joiners waiting for a canvas snapshot (drawing rooms only).
    /// The first snapshot that arrives serves and clears all of them.
    pending_canvas: Vec<ConnectionId>,
    /// Authoritative match state; `Some` only for the board game.
    match_state: Option<Match>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop until the room empties.
    async fn run(mut self) {
        tracing::info!(room_id = %self.room_id, game = %self.game, "room created");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    conn,
                    username,
                    sender,
                    reply,
                } => {
                    self.handle_join(conn, username, sender);
                    let _ = reply.send(());
                }
                RoomCommand::Leave { conn, reply } => {
                    let outcome = self.handle_leave(conn);
                    let _ = reply.send(outcome);
                    if outcome.now_empty {
                        break;
                    }
                }
                RoomCommand::Kick {
                    target,
                    requester,
                    reply,
                } => {
                    let _ = reply.send(self.handle_kick(target, requester));
                }
                RoomCommand::Game { from, event } => {
                    self.handle_game(from, event);
                }
                RoomCommand::Snapshot { reply } => {
                    let _ = reply.send(self.snapshot());
                }
            }
        }

        tracing::info!(room_id = %self.room_id, "room destroyed");
    }

    fn handle_join(
        &mut self,
        conn: ConnectionId,
        username: String,
        sender: ClientSender,
    ) {
        if self.members.iter().any(|m| m.conn == conn) {
            // Duplicate join from the same connection; nothing to do.
            return;
        }

        let host = self.members.is_empty();
        if host {
            self.host_name = Some(username.clone());
        }
        self.members.push(RoomMember {
            conn,
            username,
            host,
            sender,
        });
        tracing::info!(
            room_id = %self.room_id,
            %conn,
            members = self.members.len(),
            host,
            "member joined"
        );

        self.broadcast_members();

        // Drawing rooms: ask the existing members for their canvas so the
        // joiner doesn't start from a blank screen.
        if relay::uses_canvas(self.game) && self.members.len() > 1 {
            self.broadcast_except(conn, ServerEvent::GetCanvasState);
            self.pending_canvas.push(conn);
        }

        // Board game: seat the joiner if a seat is free.
        if relay::is_authoritative(self.game) {
            let game_match =
                self.match_state.get_or_insert_with(Match::new);
            if let JoinOutcome::Seated { symbol, started } =
                game_match.add_player(conn)
            {
                let board = game_match.board();
                self.send_to(conn, ServerEvent::AssignSymbol { symbol });
                if started {
                    self.broadcast(ServerEvent::GameStart { board });
                }
            }
        }
    }

    fn handle_leave(&mut self, conn: ConnectionId) -> LeaveOutcome {
        let before = self.members.len();
        self.members.retain(|m| m.conn != conn);
        let removed = self.members.len() < before;
        if !removed {
            // A stray leave must not report the room as empty: a fresh
            // actor with queued joins would be torn down for nothing.
            return LeaveOutcome {
                removed: false,
                now_empty: false,
            };
        }

        self.pending_canvas.retain(|c| *c != conn);
        if let Some(game_match) = &mut self.match_state {
            // Frees the seat; deliberately does not reset the game.
            game_match.remove_player(conn);
        }

        tracing::info!(
            room_id = %self.room_id,
            %conn,
            members = self.members.len(),
            "member left"
        );

        let now_empty = self.members.is_empty();
        if !now_empty {
            // The host slot is never re-elected: if the host just left,
            // the list simply no longer contains a host entry.
            self.broadcast_members();
        }
        LeaveOutcome {
            removed: true,
            now_empty,
        }
    }

    fn handle_kick(
        &self,
        target: ConnectionId,
        requester: String,
    ) -> Option<ConnectionId> {
        // Authorization is display-name equality with the recorded host,
        // not connection identity.
        if self.host_name.as_deref() != Some(requester.as_str()) {
            tracing::debug!(
                room_id = %self.room_id,
                requester,
                "kick refused: not the host"
            );
            return None;
        }
        let member = self.members.iter().find(|m| m.conn == target)?;
        let _ = member.sender.send(Outbound::Event(ServerEvent::Kick {
            message: KICK_MESSAGE.to_string(),
        }));
        tracing::info!(room_id = %self.room_id, %target, "member kicked");
        Some(target)
    }

    fn handle_game(&mut self, from: ConnectionId, event: GameEvent) {
        if !self.members.iter().any(|m| m.conn == from) {
            tracing::debug!(
                room_id = %self.room_id,
                %from,
                "game event from non-member, ignoring"
            );
            return;
        }

        match event {
            GameEvent::Relay { name, payload } => {
                self.handle_relay(from, &name, payload);
            }
            GameEvent::Move { cell_index, symbol } => {
                self.handle_move(cell_index, symbol);
            }
            GameEvent::Reset => {
                if let Some(game_match) = &mut self.match_state {
                    let board = game_match.reset();
                    self.broadcast(ServerEvent::GameStart { board });
                }
            }
        }
    }

    /// Generic relay: forward to every other member, unmodified, under
    /// the adapter's outbound name. The one wrinkle is the canvas
    /// bootstrap: a snapshot that arrives while joiners are waiting goes
    /// to exactly those joiners (first responder wins; the pending list
    /// is cleared). Later snapshots fall through to the ordinary relay.
    fn handle_relay(
        &mut self,
        from: ConnectionId,
        name: &str,
        payload: Value,
    ) {
        let out_name = relay::outbound_name(self.game, name).to_string();

        if name == relay::CANVAS_STATE && !self.pending_canvas.is_empty() {
            let waiting = std::mem::take(&mut self.pending_canvas);
            for conn in waiting {
                self.send_to(
                    conn,
                    ServerEvent::Game {
                        name: out_name.clone(),
                        payload: payload.clone(),
                    },
                );
            }
            return;
        }

        self.broadcast_except(
            from,
            ServerEvent::Game {
                name: out_name,
                payload,
            },
        );
    }

    fn handle_move(&mut self, cell_index: usize, symbol: Symbol) {
        let Some(game_match) = &mut self.match_state else {
            return;
        };
        match game_match.apply_move(cell_index, symbol) {
            MoveOutcome::Rejected => {
                // Silent by contract: no state change, no broadcast.
                tracing::debug!(
                    room_id = %self.room_id,
                    cell_index,
                    %symbol,
                    "move rejected"
                );
            }
            MoveOutcome::Placed {
                board,
                current_turn,
            } => {
                self.broadcast(ServerEvent::MoveMade {
                    board,
                    current_turn,
                });
            }
            MoveOutcome::Won { winner, board } => {
                tracing::info!(room_id = %self.room_id, %winner, "game over");
                self.broadcast(ServerEvent::GameOver {
                    winner: winner.into(),
                    board,
                });
            }
            MoveOutcome::Drawn { board } => {
                tracing::info!(room_id = %self.room_id, "game drawn");
                self.broadcast(ServerEvent::GameOver {
                    winner: parlor_protocol::GameResult::Draw,
                    board,
                });
            }
        }
    }

    /// The `update-user-list` broadcast: the full member list, to every
    /// member including the one who just changed it.
    fn broadcast_members(&self) {
        let members: Vec<Member> = self
            .members
            .iter()
            .map(|m| Member {
                id: m.conn,
                username: m.username.clone(),
                host: m.host,
            })
            .collect();
        self.broadcast(ServerEvent::UpdateUserList { members });
    }

    fn snapshot(&self) -> LobbyEntry {
        LobbyEntry {
            game: self.game,
            room_id: self.room_id.clone(),
            host: self.host_name.clone().unwrap_or_default(),
            player_count: self.members.len(),
            players: self
                .members
                .iter()
                .map(|m| m.username.clone())
                .collect(),
        }
    }

    fn broadcast(&self, event: ServerEvent) {
        for member in &self.members {
            let _ = member.sender.send(Outbound::Event(event.clone()));
        }
    }

    fn broadcast_except(&self, excluded: ConnectionId, event: ServerEvent) {
        for member in &self.members {
            if member.conn != excluded {
                let _ = member.sender.send(Outbound::Event(event.clone()));
            }
        }
    }

    /// Sends to a single member. A gone member is a harmless miss.
    fn send_to(&self, conn: ConnectionId, event: ServerEvent) {
        if let Some(member) = self.members.iter().find(|m| m.conn == conn) {
            let _ = member.sender.send(Outbound::Event(event));
        }
    }
}

/// Spawns a new room actor task and returns a handle to it.
///
/// `channel_size` bounds the command mailbox; senders wait when a room
/// is briefly saturated rather than queueing without limit.
pub(crate) fn spawn_room(
    room_id: RoomId,
    game: GameKind,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        room_id: room_id.clone(),
        game,
        host_name: None,
        members: Vec::new(),
        pending_canvas: Vec::new(),
        match_state: None,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}

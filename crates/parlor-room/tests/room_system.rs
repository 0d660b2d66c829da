//! Integration tests for the room system, driven through the
//! coordinator with channel-backed client senders.

use std::sync::Arc;
use std::time::Duration;

use parlor_protocol::{
    ConnectionId, GameKind, GameResult, RoomId, ServerEvent, Symbol,
};
use parlor_room::{
    ClientSender, Coordinator, GameEvent, Outbound, RoomDirectory,
};
use serde_json::json;
use tokio::sync::mpsc;

// =========================================================================
// Helpers
// =========================================================================

type OutboundRx = mpsc::UnboundedReceiver<Outbound>;

fn conn(id: u64) -> ConnectionId {
    ConnectionId::new(id)
}

fn room(id: &str) -> RoomId {
    RoomId::parse(id).unwrap()
}

fn channel() -> (ClientSender, OutboundRx) {
    mpsc::unbounded_channel()
}

/// Connects a fresh client and drains its initial lobby snapshot.
async fn connect(coord: &Coordinator, id: u64) -> (ConnectionId, OutboundRx) {
    let c = conn(id);
    let (tx, mut rx) = channel();
    coord.connect(c, tx).await;
    let _ = rx.try_recv(); // initial update-lobby-list
    (c, rx)
}

/// Drains every queued event, dropping `Close` markers.
fn drain(rx: &mut OutboundRx) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Ok(out) = rx.try_recv() {
        if let Outbound::Event(event) = out {
            events.push(event);
        }
    }
    events
}

/// Gives fire-and-forget game events a moment to reach the actor.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

// =========================================================================
// Membership and lifecycle
// =========================================================================

#[tokio::test]
async fn test_join_creates_room_with_joiner_as_host() {
    let coord = Coordinator::new();
    let (c1, mut rx1) = connect(&coord, 1).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Pong)
        .await;

    assert_eq!(coord.room_count().await, 1);
    let events = drain(&mut rx1);
    let members = events
        .iter()
        .find_map(|e| match e {
            ServerEvent::UpdateUserList { members } => Some(members),
            _ => None,
        })
        .expect("joiner should receive the member list");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].username, "ada");
    assert!(members[0].host, "first joiner is the host");
}

#[tokio::test]
async fn test_second_joiner_is_not_host() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;
    let (c2, mut rx2) = connect(&coord, 2).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Pong)
        .await;
    coord
        .join(c2, room("ABCD"), "bob".into(), GameKind::Pong)
        .await;

    let events = drain(&mut rx2);
    let members = events
        .iter()
        .find_map(|e| match e {
            ServerEvent::UpdateUserList { members } => Some(members),
            _ => None,
        })
        .unwrap();
    assert_eq!(members.len(), 2);
    assert!(members.iter().find(|m| m.username == "ada").unwrap().host);
    assert!(!members.iter().find(|m| m.username == "bob").unwrap().host);
}

#[tokio::test]
async fn test_room_destroyed_when_last_member_leaves() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Pong)
        .await;
    assert_eq!(coord.room_count().await, 1);

    coord.leave(c1).await;
    assert_eq!(coord.room_count().await, 0);
}

#[tokio::test]
async fn test_room_id_reusable_after_destruction() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;
    let (c2, mut rx2) = connect(&coord, 2).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Pong)
        .await;
    coord.leave(c1).await;

    // Same id, fresh room: the new joiner is its host.
    coord
        .join(c2, room("ABCD"), "bob".into(), GameKind::Draw)
        .await;
    let events = drain(&mut rx2);
    let members = events
        .iter()
        .find_map(|e| match e {
            ServerEvent::UpdateUserList { members } => Some(members),
            _ => None,
        })
        .unwrap();
    assert_eq!(members.len(), 1);
    assert!(members[0].host);
}

#[tokio::test]
async fn test_host_never_reelected() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;
    let (c2, mut rx2) = connect(&coord, 2).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Pong)
        .await;
    coord
        .join(c2, room("ABCD"), "bob".into(), GameKind::Pong)
        .await;
    drain(&mut rx2);

    // Host leaves; the remaining member list has no host entry.
    coord.leave(c1).await;
    let events = drain(&mut rx2);
    let members = events
        .iter()
        .find_map(|e| match e {
            ServerEvent::UpdateUserList { members } => Some(members),
            _ => None,
        })
        .unwrap();
    assert_eq!(members.len(), 1);
    assert!(
        !members[0].host,
        "host privilege must not transfer to a survivor"
    );
}

#[tokio::test]
async fn test_second_joiner_game_kind_is_ignored() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;
    let (c2, mut rx2) = connect(&coord, 2).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Pong)
        .await;
    // The second joiner asks for a different game; the room's original
    // kind wins.
    coord
        .join(c2, room("ABCD"), "bob".into(), GameKind::Draw)
        .await;

    let events = drain(&mut rx2);
    let rooms = events
        .iter()
        .rev()
        .find_map(|e| match e {
            ServerEvent::UpdateLobbyList { rooms } => Some(rooms),
            _ => None,
        })
        .expect("lobby should reflect the join");
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].game, GameKind::Pong, "creator's kind wins");
    assert_eq!(rooms[0].player_count, 2);
}

#[tokio::test]
async fn test_stray_leave_does_not_destroy_fresh_room() {
    let mut directory = RoomDirectory::new();
    let handle = directory.get_or_create(&room("ABCD"), GameKind::Pong);

    // A leave for a connection that never joined is a harmless miss.
    let outcome = handle.leave(conn(9)).await.unwrap();
    assert!(!outcome.removed);
    assert!(!outcome.now_empty, "a miss must not report the room empty");

    // The actor survives and seats its first real member.
    let (tx, mut rx) = channel();
    handle.join(conn(1), "ada".into(), tx).await.unwrap();
    assert!(!handle.is_closed());
    assert!(drain(&mut rx)
        .iter()
        .any(|e| matches!(e, ServerEvent::UpdateUserList { .. })));
}

#[tokio::test]
async fn test_join_while_in_a_room_is_ignored() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Pong)
        .await;
    coord
        .join(c1, room("EFGH"), "ada".into(), GameKind::Pong)
        .await;

    // Only the first room exists.
    assert_eq!(coord.room_count().await, 1);
}

#[tokio::test]
async fn test_disconnect_runs_leave_path() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;
    let (c2, mut rx2) = connect(&coord, 2).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Pong)
        .await;
    coord
        .join(c2, room("ABCD"), "bob".into(), GameKind::Pong)
        .await;
    drain(&mut rx2);

    coord.disconnect(c1).await;

    let events = drain(&mut rx2);
    let members = events
        .iter()
        .find_map(|e| match e {
            ServerEvent::UpdateUserList { members } => Some(members),
            _ => None,
        })
        .expect("survivor should see the shrunk member list");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].username, "bob");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_disconnects_destroy_room_once() {
    // Both members drop at the same time, each on its own worker thread;
    // whichever leave lands second must see the room empty exactly once.
    for _ in 0..50 {
        let coord = Arc::new(Coordinator::new());
        let (c1, _rx1) = connect(&coord, 1).await;
        let (c2, _rx2) = connect(&coord, 2).await;

        coord
            .join(c1, room("ABCD"), "ada".into(), GameKind::Pong)
            .await;
        coord
            .join(c2, room("ABCD"), "bob".into(), GameKind::Pong)
            .await;

        let first = {
            let coord = Arc::clone(&coord);
            tokio::spawn(async move { coord.disconnect(c1).await })
        };
        let second = {
            let coord = Arc::clone(&coord);
            tokio::spawn(async move { coord.disconnect(c2).await })
        };
        first.await.unwrap();
        second.await.unwrap();

        assert_eq!(coord.connection_count().await, 0);
        assert_eq!(coord.room_count().await, 0, "room destroyed exactly once");
    }
}

// =========================================================================
// Lobby feed and discovery
// =========================================================================

#[tokio::test]
async fn test_lobby_broadcast_reaches_roomless_connections() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;
    let (_c2, mut rx2) = connect(&coord, 2).await; // never joins a room

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::ConnectFour)
        .await;

    let events = drain(&mut rx2);
    let rooms = events
        .iter()
        .find_map(|e| match e {
            ServerEvent::UpdateLobbyList { rooms } => Some(rooms),
            _ => None,
        })
        .expect("lobby updates reach clients still picking a room");
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].game, GameKind::ConnectFour);
    assert_eq!(rooms[0].host, "ada");
    assert_eq!(rooms[0].player_count, 1);
    assert_eq!(rooms[0].players, vec!["ada".to_string()]);
}

#[tokio::test]
async fn test_list_rooms_with_filter() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;
    let (c2, _rx2) = connect(&coord, 2).await;
    let (c3, mut rx3) = connect(&coord, 3).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Pong)
        .await;
    coord
        .join(c2, room("EFGH"), "bob".into(), GameKind::Draw)
        .await;
    drain(&mut rx3);

    coord.list_rooms(c3, Some("EFGH".into())).await;
    let events = drain(&mut rx3);
    let rooms = events
        .iter()
        .find_map(|e| match e {
            ServerEvent::RoomList { rooms } => Some(rooms),
            _ => None,
        })
        .unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].room_id.as_str(), "EFGH");

    coord.list_rooms(c3, None).await;
    let events = drain(&mut rx3);
    let rooms = events
        .iter()
        .find_map(|e| match e {
            ServerEvent::RoomList { rooms } => Some(rooms),
            _ => None,
        })
        .unwrap();
    assert_eq!(rooms.len(), 2);
}

// =========================================================================
// Kick
// =========================================================================

#[tokio::test]
async fn test_host_kick_notifies_target_then_closes() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;
    let (c2, mut rx2) = connect(&coord, 2).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Pong)
        .await;
    coord
        .join(c2, room("ABCD"), "bob".into(), GameKind::Pong)
        .await;
    while rx2.try_recv().is_ok() {}

    coord.kick(room("ABCD"), c2, "ada".into()).await;

    // Kick message first, then the close instruction.
    assert!(matches!(
        rx2.try_recv(),
        Ok(Outbound::Event(ServerEvent::Kick { .. }))
    ));
    assert!(matches!(rx2.try_recv(), Ok(Outbound::Close)));
}

#[tokio::test]
async fn test_non_host_kick_is_silently_ignored() {
    let coord = Coordinator::new();
    let (c1, mut rx1) = connect(&coord, 1).await;
    let (c2, _rx2) = connect(&coord, 2).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Pong)
        .await;
    coord
        .join(c2, room("ABCD"), "bob".into(), GameKind::Pong)
        .await;
    drain(&mut rx1);

    // bob tries to kick the host.
    coord.kick(room("ABCD"), c1, "bob".into()).await;

    let events = drain(&mut rx1);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, ServerEvent::Kick { .. })),
        "non-host kick must not reach anyone"
    );
}

#[tokio::test]
async fn test_kick_unknown_target_is_noop() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Pong)
        .await;

    // Target was never in the room; nothing happens.
    coord.kick(room("ABCD"), conn(99), "ada".into()).await;
    assert_eq!(coord.room_count().await, 1);
}

// =========================================================================
// Event relay
// =========================================================================

#[tokio::test]
async fn test_relay_excludes_sender() {
    let coord = Coordinator::new();
    let (c1, mut rx1) = connect(&coord, 1).await;
    let (c2, mut rx2) = connect(&coord, 2).await;
    let (c3, mut rx3) = connect(&coord, 3).await;

    for (c, name) in [(c1, "ada"), (c2, "bob"), (c3, "cyn")] {
        coord
            .join(c, room("ABCD"), name.into(), GameKind::Pong)
            .await;
    }
    drain(&mut rx1);
    drain(&mut rx2);
    drain(&mut rx3);

    coord
        .game_event(
            c1,
            GameEvent::Relay {
                name: "paddle".into(),
                payload: json!({ "y": 120 }),
            },
        )
        .await;
    settle().await;

    assert!(
        drain(&mut rx1).is_empty(),
        "sender must not receive its own relayed event"
    );
    for rx in [&mut rx2, &mut rx3] {
        let events = drain(rx);
        match events.as_slice() {
            [ServerEvent::Game { name, payload }] => {
                assert_eq!(name, "paddle");
                assert_eq!(payload, &json!({ "y": 120 }));
            }
            other => panic!("expected one relayed event, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_relay_payload_is_opaque() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;
    let (c2, mut rx2) = connect(&coord, 2).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Draw)
        .await;
    coord
        .join(c2, room("ABCD"), "bob".into(), GameKind::Draw)
        .await;
    drain(&mut rx2);

    let payload = json!({
        "prevPoint": null,
        "currentPoint": { "x": 12.5, "y": -3 },
        "color": "#000"
    });
    coord
        .game_event(
            c1,
            GameEvent::Relay {
                name: "draw-line".into(),
                payload: payload.clone(),
            },
        )
        .await;
    settle().await;

    let events = drain(&mut rx2);
    // The joiner may also be holding a canvas request; find the relay.
    let relayed = events
        .iter()
        .find_map(|e| match e {
            ServerEvent::Game { name, payload } if name == "draw-line" => {
                Some(payload)
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(relayed, &payload, "payload must be forwarded unmodified");
}

#[tokio::test]
async fn test_battleship_attack_is_renamed_attacked() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;
    let (c2, mut rx2) = connect(&coord, 2).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Battleship)
        .await;
    coord
        .join(c2, room("ABCD"), "bob".into(), GameKind::Battleship)
        .await;
    drain(&mut rx2);

    coord
        .game_event(
            c1,
            GameEvent::Relay {
                name: "attack".into(),
                payload: json!({ "cell": 42 }),
            },
        )
        .await;
    settle().await;

    let events = drain(&mut rx2);
    match events.as_slice() {
        [ServerEvent::Game { name, .. }] => assert_eq!(name, "attacked"),
        other => panic!("expected one renamed event, got {other:?}"),
    }
}

#[tokio::test]
async fn test_two_rooms_are_independent() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;
    let (c2, mut rx2) = connect(&coord, 2).await;
    let (c3, _rx3) = connect(&coord, 3).await;
    let (c4, mut rx4) = connect(&coord, 4).await;

    coord
        .join(c1, room("AAAA"), "ada".into(), GameKind::Pong)
        .await;
    coord
        .join(c2, room("AAAA"), "bob".into(), GameKind::Pong)
        .await;
    coord
        .join(c3, room("BBBB"), "cyn".into(), GameKind::Pong)
        .await;
    coord
        .join(c4, room("BBBB"), "dee".into(), GameKind::Pong)
        .await;
    drain(&mut rx2);
    drain(&mut rx4);

    coord
        .game_event(
            c1,
            GameEvent::Relay {
                name: "ball".into(),
                payload: json!({ "x": 1 }),
            },
        )
        .await;
    settle().await;

    assert_eq!(drain(&mut rx2).len(), 1, "roommate receives the event");
    assert!(
        drain(&mut rx4).is_empty(),
        "other room must not see the event"
    );
}

// =========================================================================
// Canvas bootstrap
// =========================================================================

#[tokio::test]
async fn test_canvas_bootstrap_serves_waiting_joiner() {
    let coord = Coordinator::new();
    let (c1, mut rx1) = connect(&coord, 1).await;
    let (c2, mut rx2) = connect(&coord, 2).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Draw)
        .await;
    drain(&mut rx1);
    coord
        .join(c2, room("ABCD"), "bob".into(), GameKind::Draw)
        .await;
    drain(&mut rx2);

    // The existing member is asked for its canvas.
    let events = drain(&mut rx1);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, ServerEvent::GetCanvasState)),
        "existing member should get a canvas request"
    );

    // It responds; the joiner (and only the joiner) gets the snapshot.
    coord
        .game_event(
            c1,
            GameEvent::Relay {
                name: "canvas-state".into(),
                payload: json!("data:image/png;base64,AAAA"),
            },
        )
        .await;
    settle().await;

    let events = drain(&mut rx2);
    match events.as_slice() {
        [ServerEvent::Game { name, payload }] => {
            assert_eq!(name, "canvas-state-from-server");
            assert_eq!(payload, &json!("data:image/png;base64,AAAA"));
        }
        other => panic!("expected the canvas snapshot, got {other:?}"),
    }
    assert!(
        drain(&mut rx1).is_empty(),
        "responder must not get its own snapshot back"
    );
}

#[tokio::test]
async fn test_canvas_request_not_sent_in_non_drawing_rooms() {
    let coord = Coordinator::new();
    let (c1, mut rx1) = connect(&coord, 1).await;
    let (c2, _rx2) = connect(&coord, 2).await;

    coord
        .join(c1, room("ABCD"), "ada".into(), GameKind::Pong)
        .await;
    drain(&mut rx1);
    coord
        .join(c2, room("ABCD"), "bob".into(), GameKind::Pong)
        .await;

    let events = drain(&mut rx1);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, ServerEvent::GetCanvasState)),
        "canvas bootstrap is drawing-room only"
    );
}

// =========================================================================
// Turn-based board game
// =========================================================================

#[tokio::test]
async fn test_board_game_full_match() {
    let coord = Coordinator::new();
    let (c1, mut rx1) = connect(&coord, 1).await;
    let (c2, mut rx2) = connect(&coord, 2).await;

    coord
        .join(c1, room("TTT1"), "ada".into(), GameKind::TicTacToe)
        .await;
    let events = drain(&mut rx1);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, ServerEvent::AssignSymbol { symbol: Symbol::X })),
        "first joiner plays X"
    );

    coord
        .join(c2, room("TTT1"), "bob".into(), GameKind::TicTacToe)
        .await;
    let events = drain(&mut rx2);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, ServerEvent::AssignSymbol { symbol: Symbol::O })),
        "second joiner plays O"
    );
    assert!(
        events
            .iter()
            .any(|e| matches!(e, ServerEvent::GameStart { .. })),
        "second join starts the game"
    );
    drain(&mut rx1);

    // X takes the top row: X0 O3 X1 O4 X2.
    let moves = [
        (0, Symbol::X),
        (3, Symbol::O),
        (1, Symbol::X),
        (4, Symbol::O),
        (2, Symbol::X),
    ];
    for (cell_index, symbol) in moves {
        coord
            .game_event(c1, GameEvent::Move { cell_index, symbol })
            .await;
    }
    settle().await;

    let events = drain(&mut rx2);
    let over = events
        .iter()
        .find_map(|e| match e {
            ServerEvent::GameOver { winner, board } => Some((winner, board)),
            _ => None,
        })
        .expect("winning move should end the game");
    assert_eq!(*over.0, GameResult::X);
    assert_eq!(over.1[0], Some(Symbol::X));
    assert_eq!(over.1[1], Some(Symbol::X));
    assert_eq!(over.1[2], Some(Symbol::X));

    // Finished: further moves are dead until a reset.
    coord
        .game_event(
            c1,
            GameEvent::Move {
                cell_index: 5,
                symbol: Symbol::O,
            },
        )
        .await;
    settle().await;
    assert!(
        !drain(&mut rx2)
            .iter()
            .any(|e| matches!(e, ServerEvent::MoveMade { .. })),
        "moves after game over must be rejected"
    );

    // Reset brings a fresh board for everyone.
    coord.game_event(c1, GameEvent::Reset).await;
    settle().await;
    let events = drain(&mut rx2);
    let board = events
        .iter()
        .find_map(|e| match e {
            ServerEvent::GameStart { board } => Some(board),
            _ => None,
        })
        .expect("reset should broadcast a fresh game");
    assert!(board.iter().all(Option::is_none));
}

#[tokio::test]
async fn test_out_of_turn_move_is_rejected_silently() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;
    let (c2, mut rx2) = connect(&coord, 2).await;

    coord
        .join(c1, room("TTT1"), "ada".into(), GameKind::TicTacToe)
        .await;
    coord
        .join(c2, room("TTT1"), "bob".into(), GameKind::TicTacToe)
        .await;
    drain(&mut rx2);

    // O moves first — not its turn.
    coord
        .game_event(
            c2,
            GameEvent::Move {
                cell_index: 0,
                symbol: Symbol::O,
            },
        )
        .await;
    settle().await;

    assert!(
        drain(&mut rx2).is_empty(),
        "rejected move produces no broadcast"
    );
}

#[tokio::test]
async fn test_third_joiner_spectates() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;
    let (c2, _rx2) = connect(&coord, 2).await;
    let (c3, mut rx3) = connect(&coord, 3).await;

    coord
        .join(c1, room("TTT1"), "ada".into(), GameKind::TicTacToe)
        .await;
    coord
        .join(c2, room("TTT1"), "bob".into(), GameKind::TicTacToe)
        .await;
    coord
        .join(c3, room("TTT1"), "cyn".into(), GameKind::TicTacToe)
        .await;

    let events = drain(&mut rx3);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, ServerEvent::AssignSymbol { .. })),
        "third joiner gets no symbol"
    );
    // But still sees membership like everyone else.
    assert!(events
        .iter()
        .any(|e| matches!(e, ServerEvent::UpdateUserList { .. })));

    // And spectators see subsequent moves.
    coord
        .game_event(
            c1,
            GameEvent::Move {
                cell_index: 4,
                symbol: Symbol::X,
            },
        )
        .await;
    settle().await;
    assert!(drain(&mut rx3)
        .iter()
        .any(|e| matches!(e, ServerEvent::MoveMade { .. })));
}

#[tokio::test]
async fn test_player_disconnect_does_not_reset_match() {
    let coord = Coordinator::new();
    let (c1, _rx1) = connect(&coord, 1).await;
    let (c2, mut rx2) = connect(&coord, 2).await;
    let (c3, mut rx3) = connect(&coord, 3).await;

    coord
        .join(c1, room("TTT1"), "ada".into(), GameKind::TicTacToe)
        .await;
    coord
        .join(c2, room("TTT1"), "bob".into(), GameKind::TicTacToe)
        .await;
    coord
        .join(c3, room("TTT1"), "cyn".into(), GameKind::TicTacToe)
        .await;
    drain(&mut rx2);
    drain(&mut rx3);

    // X plays, then disconnects mid-game.
    coord
        .game_event(
            c1,
            GameEvent::Move {
                cell_index: 0,
                symbol: Symbol::X,
            },
        )
        .await;
    settle().await;
    drain(&mut rx2);
    drain(&mut rx3);

    coord.disconnect(c1).await;

    // No game-over, no fresh game-start: the board stands as-is.
    let events = drain(&mut rx3);
    assert!(!events.iter().any(|e| matches!(
        e,
        ServerEvent::GameOver { .. } | ServerEvent::GameStart { .. }
    )));
}

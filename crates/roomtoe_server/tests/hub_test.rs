//! Tests for the hub event loop and its fan-out to connections.

use roomtoe_server::protocol::{ClientMessage, MoveRequest, RoomCodeRequest, RoomRequest, ServerMessage};
use roomtoe_server::{
    ConnectionId, Hub, HubEvent, MemoryRoomStore, OUTBOX_CAPACITY, RoomCoordinator, RoomStore,
};
use roomtoe_tictactoe::Symbol;
use std::time::Duration;
use tokio::sync::mpsc::{self, Receiver};
use tokio::time::timeout;

fn create(code: &str, name: &str) -> ClientMessage {
    ClientMessage::CreateRoom(RoomRequest {
        room_code: code.into(),
        player_name: name.into(),
    })
}

fn join(code: &str, name: &str) -> ClientMessage {
    ClientMessage::JoinRoom(RoomRequest {
        room_code: code.into(),
        player_name: name.into(),
    })
}

fn play(code: &str, position: usize) -> ClientMessage {
    ClientMessage::MakeMove(MoveRequest {
        room_code: code.into(),
        position,
    })
}

async fn next(inbox: &mut Receiver<ServerMessage>) -> ServerMessage {
    timeout(Duration::from_secs(2), inbox.recv())
        .await
        .expect("timed out waiting for message")
        .expect("outbox closed")
}

#[test]
fn test_process_routes_replies_to_connections() {
    let (mut hub, _handle) = Hub::new(RoomCoordinator::new(MemoryRoomStore::new()));
    let alice = ConnectionId::from(1);
    let bob = ConnectionId::from(2);
    let (alice_tx, mut alice_rx) = mpsc::channel(OUTBOX_CAPACITY);
    let (bob_tx, mut bob_rx) = mpsc::channel(OUTBOX_CAPACITY);

    hub.process(HubEvent::Connected { id: alice, outbox: alice_tx });
    hub.process(HubEvent::Connected { id: bob, outbox: bob_tx });
    hub.process(HubEvent::Message { id: alice, message: create("abc", "Alice") });
    hub.process(HubEvent::Message { id: bob, message: join("ABC", "Bob") });

    assert!(matches!(alice_rx.try_recv().unwrap(), ServerMessage::RoomCreated(_)));
    assert!(matches!(alice_rx.try_recv().unwrap(), ServerMessage::GameStarted(_)));
    assert!(matches!(
        alice_rx.try_recv().unwrap(),
        ServerMessage::PlayerJoined(joined) if joined.player_name == "Bob"
    ));
    assert!(alice_rx.try_recv().is_err());

    assert!(matches!(bob_rx.try_recv().unwrap(), ServerMessage::GameStarted(_)));
    assert!(bob_rx.try_recv().is_err());

    // Out of turn: only Bob hears about it.
    hub.process(HubEvent::Message { id: bob, message: play("ABC", 0) });
    assert_eq!(
        bob_rx.try_recv().unwrap(),
        ServerMessage::InvalidMove("Not your turn".into())
    );
    assert!(alice_rx.try_recv().is_err());
}

#[test]
fn test_disconnect_event_notifies_survivor_and_deletes_empty_room() {
    let (mut hub, _handle) = Hub::new(RoomCoordinator::new(MemoryRoomStore::new()));
    let alice = ConnectionId::from(1);
    let bob = ConnectionId::from(2);
    let (alice_tx, mut alice_rx) = mpsc::channel(OUTBOX_CAPACITY);
    let (bob_tx, bob_rx) = mpsc::channel(OUTBOX_CAPACITY);

    hub.process(HubEvent::Connected { id: alice, outbox: alice_tx });
    hub.process(HubEvent::Connected { id: bob, outbox: bob_tx });
    hub.process(HubEvent::Message { id: alice, message: create("ABC", "Alice") });
    hub.process(HubEvent::Message { id: bob, message: join("ABC", "Bob") });
    while alice_rx.try_recv().is_ok() {}
    drop(bob_rx);

    hub.process(HubEvent::Disconnected { id: bob });
    assert_eq!(alice_rx.try_recv().unwrap(), ServerMessage::PlayerDisconnected);
    assert!(!hub.coordinator().room("ABC").unwrap().is_started());

    hub.process(HubEvent::Disconnected { id: alice });
    assert!(hub.coordinator().store().is_empty());
}

#[test]
fn test_message_for_closed_outbox_is_dropped() {
    let (mut hub, _handle) = Hub::new(RoomCoordinator::new(MemoryRoomStore::new()));
    let alice = ConnectionId::from(1);
    let (alice_tx, alice_rx) = mpsc::channel(OUTBOX_CAPACITY);
    drop(alice_rx);

    hub.process(HubEvent::Connected { id: alice, outbox: alice_tx });
    hub.process(HubEvent::Message { id: alice, message: create("ABC", "Alice") });

    // The room still exists even though the reply went nowhere.
    assert!(hub.coordinator().room("ABC").is_some());
}

#[test]
fn test_stalled_reader_does_not_block_the_room() {
    let (mut hub, _handle) = Hub::new(RoomCoordinator::new(MemoryRoomStore::new()));
    let alice = ConnectionId::from(1);
    let bob = ConnectionId::from(2);
    let (alice_tx, mut alice_rx) = mpsc::channel(OUTBOX_CAPACITY);
    // Bob never reads and has room for one message.
    let (bob_tx, _bob_rx) = mpsc::channel(1);

    hub.process(HubEvent::Connected { id: alice, outbox: alice_tx });
    hub.process(HubEvent::Connected { id: bob, outbox: bob_tx });
    hub.process(HubEvent::Message { id: alice, message: create("ABC", "Alice") });
    hub.process(HubEvent::Message { id: bob, message: join("ABC", "Bob") });
    hub.process(HubEvent::Message { id: alice, message: play("ABC", 0) });
    hub.process(HubEvent::Message { id: bob, message: play("ABC", 4) });

    let mut received = Vec::new();
    while let Ok(message) = alice_rx.try_recv() {
        received.push(message);
    }
    assert_eq!(received.len(), 5);
    assert!(matches!(received[3], ServerMessage::MoveMade(_)));
    assert!(matches!(received[4], ServerMessage::MoveMade(_)));
    assert_eq!(
        hub.coordinator().room("ABC").unwrap().game().board().occupied_count(),
        2
    );
}

#[tokio::test]
async fn test_running_hub_plays_a_game() {
    let (hub, handle) = Hub::new(RoomCoordinator::new(MemoryRoomStore::new()));
    let task = tokio::spawn(hub.run());

    let (alice, mut alice_rx) = handle.connect();
    let (bob, mut bob_rx) = handle.connect();
    assert_ne!(alice, bob);

    handle.send(alice, create("abc", "Alice"));
    match next(&mut alice_rx).await {
        ServerMessage::RoomCreated(created) => {
            assert_eq!(created.room_code.as_str(), "ABC");
            assert_eq!(created.symbol, Symbol::X);
        }
        other => panic!("unexpected {other:?}"),
    }

    handle.send(bob, join("abc", "Bob"));
    assert!(matches!(next(&mut alice_rx).await, ServerMessage::GameStarted(_)));
    assert!(matches!(next(&mut alice_rx).await, ServerMessage::PlayerJoined(_)));
    assert!(matches!(next(&mut bob_rx).await, ServerMessage::GameStarted(_)));

    for (id, position) in [(alice, 0), (bob, 4), (alice, 1), (bob, 5)] {
        handle.send(id, play("ABC", position));
        assert!(matches!(next(&mut alice_rx).await, ServerMessage::MoveMade(_)));
        assert!(matches!(next(&mut bob_rx).await, ServerMessage::MoveMade(_)));
    }
    handle.send(alice, play("ABC", 2));
    for inbox in [&mut alice_rx, &mut bob_rx] {
        match next(inbox).await {
            ServerMessage::GameWon(won) => {
                assert_eq!(won.winner, Symbol::X);
                assert_eq!(won.winning_pattern, [0, 1, 2]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    handle.send(bob, ClientMessage::RestartGame(RoomCodeRequest { room_code: "ABC".into() }));
    assert!(matches!(next(&mut alice_rx).await, ServerMessage::GameRestarted(_)));
    assert!(matches!(next(&mut bob_rx).await, ServerMessage::GameRestarted(_)));

    handle.disconnect(bob);
    assert_eq!(next(&mut alice_rx).await, ServerMessage::PlayerDisconnected);

    drop(handle);
    timeout(Duration::from_secs(2), task)
        .await
        .expect("hub did not stop")
        .unwrap();
}

use super::*;

const OPEN: &str =
    r#"0{"sid":"lv_VI97HAXpY6yYWAAAC","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;

// =============================================================
// Engine.IO
// =============================================================

#[test]
fn decodes_open_handshake() {
    let EnginePacket::Open(handshake) = EnginePacket::decode(OPEN).expect("open decodes") else {
        panic!("expected open packet");
    };
    assert_eq!(handshake.sid, "lv_VI97HAXpY6yYWAAAC");
    assert_eq!(handshake.ping_interval, 25_000);
    assert_eq!(handshake.ping_timeout, 20_000);
    assert_eq!(handshake.max_payload, Some(1_000_000));
    assert_eq!(handshake.heartbeat_deadline_ms(), 45_000);
}

#[test]
fn handshake_without_optional_fields() {
    let packet = EnginePacket::decode(r#"0{"sid":"a","pingInterval":10,"pingTimeout":5}"#).expect("decodes");
    let EnginePacket::Open(handshake) = packet else {
        panic!("expected open packet");
    };
    assert!(handshake.upgrades.is_empty());
    assert_eq!(handshake.max_payload, None);
}

#[test]
fn decodes_control_packets() {
    assert_eq!(EnginePacket::decode("1"), Ok(EnginePacket::Close));
    assert_eq!(EnginePacket::decode("2"), Ok(EnginePacket::Ping));
    assert_eq!(EnginePacket::decode("3"), Ok(EnginePacket::Pong));
    assert_eq!(EnginePacket::decode("5"), Ok(EnginePacket::Upgrade));
    assert_eq!(EnginePacket::decode("6"), Ok(EnginePacket::Noop));
    assert_eq!(EnginePacket::decode("4hello"), Ok(EnginePacket::Message("hello".to_owned())));
}

#[test]
fn rejects_bad_engine_packets() {
    assert_eq!(EnginePacket::decode(""), Err(PacketError::Empty));
    assert_eq!(EnginePacket::decode("9"), Err(PacketError::UnknownEngineType('9')));
    assert!(matches!(EnginePacket::decode("0{"), Err(PacketError::Payload(_))));
}

// =============================================================
// Socket.IO
// =============================================================

#[test]
fn decodes_event_with_default_namespace() {
    let packet = SocketPacket::decode(r#"2["msg",{"msg":"<p>hi</p>"}]"#).expect("decodes");
    assert_eq!(packet.kind, SocketPacketKind::Event);
    assert_eq!(packet.namespace, "/");
    assert_eq!(packet.ack_id, None);
    let (name, args) = packet.event().expect("is an event");
    assert_eq!(name, "msg");
    assert_eq!(args, &[serde_json::json!({ "msg": "<p>hi</p>" })]);
}

#[test]
fn decodes_namespace_and_ack_id() {
    let packet = SocketPacket::decode(r#"2/admin,13["ping"]"#).expect("decodes");
    assert_eq!(packet.namespace, "/admin");
    assert_eq!(packet.ack_id, Some(13));
    assert_eq!(packet.event().map(|(name, args)| (name, args.len())), Ok(("ping", 0)));
}

#[test]
fn decodes_connect_with_and_without_body() {
    let bare = SocketPacket::decode("0").expect("decodes");
    assert_eq!(bare.kind, SocketPacketKind::Connect);
    assert_eq!(bare.data, None);

    let with_sid = SocketPacket::decode(r#"0{"sid":"abc"}"#).expect("decodes");
    assert_eq!(with_sid.data, Some(serde_json::json!({ "sid": "abc" })));
}

#[test]
fn rejects_binary_and_unknown_socket_packets() {
    assert_eq!(SocketPacket::decode(r#"51-["upload",{"_placeholder":true,"num":0}]"#), Err(PacketError::Binary));
    assert_eq!(SocketPacket::decode("8"), Err(PacketError::UnknownSocketType('8')));
    assert_eq!(SocketPacket::decode(""), Err(PacketError::Empty));
}

#[test]
fn event_requires_leading_name() {
    let packet = SocketPacket::decode(r#"2[42]"#).expect("decodes");
    assert_eq!(packet.event(), Err(PacketError::MissingEventName));
    let empty = SocketPacket::decode("2[]").expect("decodes");
    assert_eq!(empty.event(), Err(PacketError::MissingEventName));
}

#[test]
fn encodes_namespace_and_ack() {
    let packet = SocketPacket {
        kind: SocketPacketKind::Event,
        namespace: "/admin".to_owned(),
        ack_id: Some(7),
        data: Some(serde_json::json!(["x"])),
    };
    assert_eq!(packet.encode(), r#"2/admin,7["x"]"#);
}

// =============================================================
// Frames
// =============================================================

#[test]
fn outgoing_frames_are_byte_exact() {
    assert_eq!(connect_frame(), "40");
    assert_eq!(pong_frame(), "3");
    assert_eq!(
        event_frame("join_room", &JoinRoom { room_id: "task-123" }).expect("serializes"),
        r#"42["join_room",{"room_id":"task-123"}]"#
    );
}

#[test]
fn decode_frame_reduces_session_traffic() {
    assert!(matches!(decode_frame(OPEN), Ok(Incoming::Open(_))));
    assert_eq!(decode_frame("2"), Ok(Incoming::Ping));
    assert_eq!(decode_frame("1"), Ok(Incoming::Close));
    assert_eq!(decode_frame("3"), Ok(Incoming::Ignored));
    assert_eq!(decode_frame(r#"40{"sid":"x"}"#), Ok(Incoming::Connected));
    assert_eq!(decode_frame("41"), Ok(Incoming::Disconnected));
    assert_eq!(
        decode_frame(r#"44{"message":"Not authorized"}"#),
        Ok(Incoming::ConnectError(Some(serde_json::json!({ "message": "Not authorized" }))))
    );
}

#[test]
fn decode_frame_extracts_summary_message() {
    let incoming = decode_frame(r#"42["msg",{"msg":"<ul><li>done</li></ul>"}]"#).expect("decodes");
    let Incoming::Event { name, args } = incoming else {
        panic!("expected event");
    };
    assert_eq!(name, "msg");
    let payload: SummaryMessage = serde_json::from_value(args[0].clone()).expect("payload shape");
    assert_eq!(payload.msg, "<ul><li>done</li></ul>");
}

#[test]
fn decode_frame_ignores_other_namespaces() {
    assert_eq!(decode_frame(r#"42/chat,["msg",{"msg":"x"}]"#), Ok(Incoming::Ignored));
}

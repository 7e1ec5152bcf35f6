use super::*;

const OPEN: &str = r#"0{"sid":"s1","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#;

fn session() -> ChannelSession {
    ChannelSession::new("task-42", &ChannelConfig::default())
}

#[test]
fn open_requests_namespace_connect() {
    let mut s = session();
    assert_eq!(s.heartbeat_deadline_ms(), None);
    let actions = s.handle_frame(OPEN).expect("open handled");
    assert_eq!(actions, vec![SessionAction::Send("40".to_owned())]);
    assert_eq!(s.heartbeat_deadline_ms(), Some(45_000));
}

#[test]
fn connect_confirmation_joins_room() {
    let mut s = session();
    s.handle_frame(OPEN).expect("open handled");
    let actions = s.handle_frame(r#"40{"sid":"n1"}"#).expect("connect handled");
    assert_eq!(
        actions,
        vec![
            SessionAction::Connected,
            SessionAction::Send(r#"42["join_room",{"room_id":"task-42"}]"#.to_owned()),
        ]
    );
    assert!(s.is_joined());
    assert_eq!(s.room_id(), "task-42");
}

#[test]
fn ping_is_answered_with_pong() {
    let mut s = session();
    assert_eq!(s.handle_frame("2").expect("ping handled"), vec![SessionAction::Send("3".to_owned())]);
}

#[test]
fn message_event_renders_markup() {
    let mut s = session();
    let actions = s.handle_frame(r#"42["msg",{"msg":"<p>Summary</p>"}]"#).expect("event handled");
    assert_eq!(actions, vec![SessionAction::Render("<p>Summary</p>".to_owned())]);
}

#[test]
fn other_events_are_ignored() {
    let mut s = session();
    assert!(s.handle_frame(r#"42["progress",{"pct":50}]"#).expect("handled").is_empty());
}

#[test]
fn malformed_message_payload_is_skipped() {
    let mut s = session();
    assert!(s.handle_frame(r#"42["msg",{"body":"x"}]"#).expect("handled").is_empty());
    assert!(s.handle_frame(r#"42["msg"]"#).expect("handled").is_empty());
}

#[test]
fn transport_close_ends_session_for_reconnect() {
    let mut s = session();
    s.handle_frame("40").expect("connect handled");
    let actions = s.handle_frame("1").expect("close handled");
    assert!(matches!(actions.as_slice(), [SessionAction::Close(_)]));
    assert!(!s.is_joined());
}

#[test]
fn namespace_disconnect_stops_without_reconnect() {
    let mut s = session();
    s.handle_frame("40").expect("connect handled");
    let actions = s.handle_frame("41").expect("disconnect handled");
    assert!(matches!(actions.as_slice(), [SessionAction::Stop(_)]), "got {actions:?}");
    assert!(!s.is_joined());
}

#[test]
fn connect_error_stops_with_reason() {
    let mut s = session();
    let actions = s.handle_frame(r#"44{"message":"Not authorized"}"#).expect("handled");
    let [SessionAction::Stop(reason)] = actions.as_slice() else {
        panic!("expected stop, got {actions:?}");
    };
    assert!(reason.contains("Not authorized"));
}

#[test]
fn undecodable_frame_is_an_error() {
    let mut s = session();
    assert!(matches!(s.handle_frame(""), Err(SiteError::Packet(_))));
    assert!(matches!(s.handle_frame("42not json"), Err(SiteError::Packet(_))));
}

#[test]
fn custom_event_names_are_honored() {
    let config = ChannelConfig { join_event: "subscribe".to_owned(), message_event: "update".to_owned(), ..Default::default() };
    let mut s = ChannelSession::new("r", &config);
    let actions = s.handle_frame("40").expect("connect handled");
    assert_eq!(actions[1], SessionAction::Send(r#"42["subscribe",{"room_id":"r"}]"#.to_owned()));
    let actions = s.handle_frame(r#"42["update",{"msg":"ok"}]"#).expect("event handled");
    assert_eq!(actions, vec![SessionAction::Render("ok".to_owned())]);
}

#[test]
fn endpoint_url_follows_page_protocol() {
    assert_eq!(
        endpoint_url("https:", "learn.distributeddesign.eu", "/socket.io/"),
        "wss://learn.distributeddesign.eu/socket.io/?EIO=4&transport=websocket"
    );
    assert_eq!(endpoint_url("http:", "localhost:5000", "socket.io/"), "ws://localhost:5000/socket.io/?EIO=4&transport=websocket");
}

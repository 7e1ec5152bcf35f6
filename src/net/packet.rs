//! Text packet codec for the live summary channel.
//!
//! The summary server speaks Socket.IO (protocol 5) carried over Engine.IO
//! (protocol 4) on a plain WebSocket. Every WebSocket text frame is one
//! Engine.IO packet: a single type digit followed by an optional payload.
//! Engine.IO `message` packets carry a Socket.IO packet in the same style:
//!
//! ```text
//! <type>[<namespace>,][<ack id>][<json>]
//! ```
//!
//! Only the subset this client needs is implemented: the open handshake,
//! heartbeats, namespace connect/disconnect, and JSON events. Binary
//! attachments are rejected.

#[cfg(test)]
#[path = "packet_test.rs"]
mod packet_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Namespace used when a packet names none.
pub const DEFAULT_NAMESPACE: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    #[error("empty packet")]
    Empty,
    #[error("unknown engine.io packet type {0:?}")]
    UnknownEngineType(char),
    #[error("unknown socket.io packet type {0:?}")]
    UnknownSocketType(char),
    #[error("binary socket.io packets are not supported")]
    Binary,
    #[error("event packet without a name")]
    MissingEventName,
    #[error("malformed packet payload: {0}")]
    Payload(String),
}

impl From<serde_json::Error> for PacketError {
    fn from(value: serde_json::Error) -> Self {
        Self::Payload(value.to_string())
    }
}

/// Engine.IO handshake sent by the server in the `open` packet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    pub ping_interval: u32,
    pub ping_timeout: u32,
    #[serde(default)]
    pub max_payload: Option<u64>,
}

impl Handshake {
    /// Longest silence tolerated before the connection is considered dead.
    #[must_use]
    pub fn heartbeat_deadline_ms(&self) -> u32 {
        self.ping_interval.saturating_add(self.ping_timeout)
    }
}

/// Engine.IO transport packet.
#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping,
    Pong,
    /// Payload of a `message` packet; a Socket.IO packet for this channel.
    Message(String),
    Upgrade,
    Noop,
}

impl EnginePacket {
    /// Decode one WebSocket text frame.
    ///
    /// # Errors
    ///
    /// Fails on an empty frame, an unknown type digit, or a malformed
    /// handshake.
    pub fn decode(text: &str) -> Result<Self, PacketError> {
        let mut chars = text.chars();
        let kind = chars.next().ok_or(PacketError::Empty)?;
        let body = chars.as_str();
        match kind {
            '0' => Ok(Self::Open(serde_json::from_str(body)?)),
            '1' => Ok(Self::Close),
            '2' => Ok(Self::Ping),
            '3' => Ok(Self::Pong),
            '4' => Ok(Self::Message(body.to_owned())),
            '5' => Ok(Self::Upgrade),
            '6' => Ok(Self::Noop),
            other => Err(PacketError::UnknownEngineType(other)),
        }
    }

    /// Encode for sending. Clients never send `open`, so it encodes without
    /// its handshake body.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Open(_) => "0".to_owned(),
            Self::Close => "1".to_owned(),
            Self::Ping => "2".to_owned(),
            Self::Pong => "3".to_owned(),
            Self::Message(body) => format!("4{body}"),
            Self::Upgrade => "5".to_owned(),
            Self::Noop => "6".to_owned(),
        }
    }
}

/// Socket.IO packet type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocketPacketKind {
    Connect,
    Disconnect,
    Event,
    Ack,
    ConnectError,
    BinaryEvent,
    BinaryAck,
}

impl SocketPacketKind {
    fn from_digit(c: char) -> Result<Self, PacketError> {
        match c {
            '0' => Ok(Self::Connect),
            '1' => Ok(Self::Disconnect),
            '2' => Ok(Self::Event),
            '3' => Ok(Self::Ack),
            '4' => Ok(Self::ConnectError),
            '5' => Ok(Self::BinaryEvent),
            '6' => Ok(Self::BinaryAck),
            other => Err(PacketError::UnknownSocketType(other)),
        }
    }

    fn digit(self) -> char {
        match self {
            Self::Connect => '0',
            Self::Disconnect => '1',
            Self::Event => '2',
            Self::Ack => '3',
            Self::ConnectError => '4',
            Self::BinaryEvent => '5',
            Self::BinaryAck => '6',
        }
    }
}

/// Socket.IO packet carried inside an Engine.IO `message`.
#[derive(Debug, Clone, PartialEq)]
pub struct SocketPacket {
    pub kind: SocketPacketKind,
    pub namespace: String,
    pub ack_id: Option<u64>,
    pub data: Option<Value>,
}

impl SocketPacket {
    #[must_use]
    pub fn new(kind: SocketPacketKind, data: Option<Value>) -> Self {
        Self { kind, namespace: DEFAULT_NAMESPACE.to_owned(), ack_id: None, data }
    }

    /// Decode the payload of an Engine.IO `message` packet.
    ///
    /// # Errors
    ///
    /// Fails on an empty payload, an unknown type digit, binary packets, or
    /// invalid JSON data.
    pub fn decode(text: &str) -> Result<Self, PacketError> {
        let mut chars = text.chars();
        let kind = SocketPacketKind::from_digit(chars.next().ok_or(PacketError::Empty)?)?;
        if matches!(kind, SocketPacketKind::BinaryEvent | SocketPacketKind::BinaryAck) {
            return Err(PacketError::Binary);
        }
        let mut rest = chars.as_str();

        let mut namespace = DEFAULT_NAMESPACE.to_owned();
        if rest.starts_with('/') {
            let (ns, tail) = rest.split_once(',').unwrap_or((rest, ""));
            namespace = ns.to_owned();
            rest = tail;
        }

        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (ack, body) = rest.split_at(digits);
        let ack_id = if ack.is_empty() {
            None
        } else {
            Some(ack.parse::<u64>().map_err(|e| PacketError::Payload(e.to_string()))?)
        };

        let data = if body.is_empty() { None } else { Some(serde_json::from_str(body)?) };
        Ok(Self { kind, namespace, ack_id, data })
    }

    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = String::new();
        out.push(self.kind.digit());
        if self.namespace != DEFAULT_NAMESPACE {
            out.push_str(&self.namespace);
            out.push(',');
        }
        if let Some(id) = self.ack_id {
            out.push_str(&id.to_string());
        }
        if let Some(data) = &self.data {
            out.push_str(&data.to_string());
        }
        out
    }

    /// Event name and arguments, for `event` packets.
    ///
    /// # Errors
    ///
    /// Returns [`PacketError::MissingEventName`] when the data is not an
    /// array starting with a string.
    pub fn event(&self) -> Result<(&str, &[Value]), PacketError> {
        let items = self.data.as_ref().and_then(Value::as_array).ok_or(PacketError::MissingEventName)?;
        let (name, args) = items.split_first().ok_or(PacketError::MissingEventName)?;
        let name = name.as_str().ok_or(PacketError::MissingEventName)?;
        Ok((name, args))
    }
}

/// A decoded frame, reduced to what the channel session acts on.
#[derive(Debug, Clone, PartialEq)]
pub enum Incoming {
    Open(Handshake),
    Ping,
    Close,
    /// The default namespace accepted our connect request.
    Connected,
    Disconnected,
    ConnectError(Option<Value>),
    Event { name: String, args: Vec<Value> },
    /// Valid traffic the session does not act on.
    Ignored,
}

/// Decode one WebSocket text frame into an [`Incoming`] event.
///
/// # Errors
///
/// Propagates Engine.IO and Socket.IO decode failures.
pub fn decode_frame(text: &str) -> Result<Incoming, PacketError> {
    let engine = EnginePacket::decode(text)?;
    let body = match engine {
        EnginePacket::Open(handshake) => return Ok(Incoming::Open(handshake)),
        EnginePacket::Ping => return Ok(Incoming::Ping),
        EnginePacket::Close => return Ok(Incoming::Close),
        EnginePacket::Pong | EnginePacket::Upgrade | EnginePacket::Noop => return Ok(Incoming::Ignored),
        EnginePacket::Message(body) => body,
    };

    let packet = SocketPacket::decode(&body)?;
    if packet.namespace != DEFAULT_NAMESPACE {
        return Ok(Incoming::Ignored);
    }
    match packet.kind {
        SocketPacketKind::Connect => Ok(Incoming::Connected),
        SocketPacketKind::Disconnect => Ok(Incoming::Disconnected),
        SocketPacketKind::ConnectError => Ok(Incoming::ConnectError(packet.data)),
        SocketPacketKind::Event => {
            let (name, args) = packet.event()?;
            Ok(Incoming::Event { name: name.to_owned(), args: args.to_vec() })
        }
        SocketPacketKind::Ack | SocketPacketKind::BinaryEvent | SocketPacketKind::BinaryAck => Ok(Incoming::Ignored),
    }
}

/// Frame requesting a connection to the default namespace.
#[must_use]
pub fn connect_frame() -> String {
    EnginePacket::Message(SocketPacket::new(SocketPacketKind::Connect, None).encode()).encode()
}

/// Heartbeat reply.
#[must_use]
pub fn pong_frame() -> String {
    EnginePacket::Pong.encode()
}

/// Frame emitting event `name` with a single JSON argument.
///
/// # Errors
///
/// Fails if `payload` cannot be serialized to JSON.
pub fn event_frame(name: &str, payload: &impl Serialize) -> Result<String, PacketError> {
    let data = Value::Array(vec![Value::String(name.to_owned()), serde_json::to_value(payload)?]);
    Ok(EnginePacket::Message(SocketPacket::new(SocketPacketKind::Event, Some(data)).encode()).encode())
}

/// Payload of the room join request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinRoom<'a> {
    pub room_id: &'a str,
}

/// Payload of a summary update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SummaryMessage {
    pub msg: String,
}

//! Live summary channel: joins the page's room and re-renders on messages.
//!
//! The summary container on a query page is rendered with a placeholder and
//! the id of the background task producing its content. This module opens a
//! socket to the site, joins the task's room, and swaps the container's
//! markup whenever the server pushes a `msg` event.
//!
//! [`ChannelSession`] holds the protocol logic and is driven by decoded
//! frames, so it can be exercised natively. The browser runner (behind the
//! `hydrate` feature) owns the WebSocket, heartbeats, and reconnects.
//!
//! ERROR HANDLING
//! ==============
//! Malformed frames are logged and skipped. Transport failures, transport
//! closes, and missed heartbeats end the session; the runner then waits out a
//! [`Backoff`](crate::net::backoff::Backoff) delay and reconnects, joining
//! the room again on every connect. A namespace disconnect or connect refusal
//! from the server stops the channel for good.

#[cfg(test)]
#[path = "live_channel_test.rs"]
mod live_channel_test;

use crate::config::ChannelConfig;
use crate::error::SiteError;
use crate::net::packet::{self, Incoming, JoinRoom, SummaryMessage};

/// What the runner must do in response to one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Write a text frame to the socket.
    Send(String),
    /// The namespace connect succeeded.
    Connected,
    /// Replace the summary container's markup.
    Render(String),
    /// End this connection and reconnect after a backoff delay.
    Close(String),
    /// End this connection and do not reconnect.
    Stop(String),
}

/// Protocol state for one socket connection.
#[derive(Debug, Clone)]
pub struct ChannelSession {
    room_id: String,
    join_event: String,
    message_event: String,
    heartbeat_deadline_ms: Option<u32>,
    joined: bool,
}

impl ChannelSession {
    pub fn new(room_id: impl Into<String>, config: &ChannelConfig) -> Self {
        Self {
            room_id: room_id.into(),
            join_event: config.join_event.clone(),
            message_event: config.message_event.clone(),
            heartbeat_deadline_ms: None,
            joined: false,
        }
    }

    #[must_use]
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Silence allowed before the connection is considered dead, once the
    /// handshake has been received.
    #[must_use]
    pub fn heartbeat_deadline_ms(&self) -> Option<u32> {
        self.heartbeat_deadline_ms
    }

    #[cfg(test)]
    pub(crate) fn is_joined(&self) -> bool {
        self.joined
    }

    /// Decode a text frame and react to it.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Packet`] for frames that do not decode, and
    /// propagates join payload encoding failures.
    pub fn handle_frame(&mut self, text: &str) -> Result<Vec<SessionAction>, SiteError> {
        let incoming = packet::decode_frame(text)?;
        self.handle(incoming)
    }

    /// React to a decoded frame.
    ///
    /// # Errors
    ///
    /// Propagates join payload encoding failures.
    pub fn handle(&mut self, incoming: Incoming) -> Result<Vec<SessionAction>, SiteError> {
        match incoming {
            Incoming::Open(handshake) => {
                log::debug!("live channel open: sid={}", handshake.sid);
                self.heartbeat_deadline_ms = Some(handshake.heartbeat_deadline_ms());
                Ok(vec![SessionAction::Send(packet::connect_frame())])
            }
            Incoming::Ping => Ok(vec![SessionAction::Send(packet::pong_frame())]),
            Incoming::Connected => {
                self.joined = true;
                let join = packet::event_frame(&self.join_event, &JoinRoom { room_id: &self.room_id })?;
                log::info!("live channel joining room {}", self.room_id);
                Ok(vec![SessionAction::Connected, SessionAction::Send(join)])
            }
            Incoming::Event { name, args } => Ok(self.handle_event(&name, args)),
            Incoming::Close => Ok(vec![self.close("server closed the transport")]),
            Incoming::Disconnected => Ok(vec![self.stop("server disconnected the namespace")]),
            Incoming::ConnectError(data) => {
                let reason = data.map_or_else(|| "connect refused".to_owned(), |d| format!("connect refused: {d}"));
                Ok(vec![self.stop(&reason)])
            }
            Incoming::Ignored => Ok(Vec::new()),
        }
    }

    fn handle_event(&self, name: &str, args: Vec<serde_json::Value>) -> Vec<SessionAction> {
        if name != self.message_event {
            log::debug!("live channel ignoring event {name}");
            return Vec::new();
        }
        let Some(payload) = args.into_iter().next() else {
            log::warn!("live channel {name} event without payload");
            return Vec::new();
        };
        match serde_json::from_value::<SummaryMessage>(payload) {
            Ok(message) => vec![SessionAction::Render(message.msg)],
            Err(e) => {
                log::warn!("live channel {name} payload rejected: {e}");
                Vec::new()
            }
        }
    }

    fn close(&mut self, reason: &str) -> SessionAction {
        self.joined = false;
        SessionAction::Close(reason.to_owned())
    }

    fn stop(&mut self, reason: &str) -> SessionAction {
        self.joined = false;
        SessionAction::Stop(reason.to_owned())
    }
}

/// WebSocket URL of the channel endpoint on the page's own host.
#[must_use]
pub fn endpoint_url(page_protocol: &str, host: &str, path: &str) -> String {
    let scheme = if page_protocol.starts_with("https") { "wss" } else { "ws" };
    let path = if path.starts_with('/') { path.to_owned() } else { format!("/{path}") };
    format!("{scheme}://{host}{path}?EIO=4&transport=websocket")
}

#[cfg(feature = "hydrate")]
pub use self::runner::spawn_live_channel;

#[cfg(feature = "hydrate")]
mod runner {
    use std::time::Duration;

    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;
    use gloo_timers::future::sleep;

    use super::{ChannelSession, SessionAction, endpoint_url};
    use crate::config::ChannelConfig;
    use crate::error::SiteError;
    use crate::net::backoff::Backoff;

    /// Heartbeat deadline used until the server's handshake arrives.
    const HANDSHAKE_TIMEOUT_MS: u32 = 20_000;

    /// How one connection ended.
    enum Ended {
        Retry(String),
        Stopped(String),
    }

    /// Spawn the channel lifecycle as a local async task.
    ///
    /// `on_render` receives the markup of every summary update.
    pub fn spawn_live_channel<F>(room_id: String, config: ChannelConfig, on_render: F)
    where
        F: Fn(&str) + 'static,
    {
        wasm_bindgen_futures::spawn_local(channel_loop(room_id, config, on_render));
    }

    async fn channel_loop<F>(room_id: String, config: ChannelConfig, on_render: F)
    where
        F: Fn(&str),
    {
        let mut backoff = Backoff::from_config(&config);
        loop {
            let url = match page_endpoint(&config) {
                Ok(url) => url,
                Err(e) => {
                    log::warn!("live channel disabled: {e}");
                    return;
                }
            };

            let mut session = ChannelSession::new(room_id.clone(), &config);
            match connect_and_run(&url, &mut session, &mut backoff, &on_render).await {
                Ok(Ended::Retry(reason)) => log::info!("live channel for room {} closed: {reason}", session.room_id()),
                Ok(Ended::Stopped(reason)) => {
                    log::info!("live channel for room {} stopped: {reason}", session.room_id());
                    return;
                }
                Err(e) => log::warn!("live channel for room {} failed: {e}", session.room_id()),
            }

            let delay = backoff.next_delay(js_sys::Math::random());
            log::debug!("live channel reconnecting in {delay}ms (attempt {})", backoff.attempts());
            sleep(Duration::from_millis(u64::from(delay))).await;
        }
    }

    fn page_endpoint(config: &ChannelConfig) -> Result<String, SiteError> {
        let location = web_sys::window().ok_or_else(|| SiteError::missing("window"))?.location();
        Ok(endpoint_url(&location.protocol()?, &location.host()?, &config.path))
    }

    /// Run one connection until it closes.
    async fn connect_and_run<F>(
        url: &str,
        session: &mut ChannelSession,
        backoff: &mut Backoff,
        on_render: &F,
    ) -> Result<Ended, SiteError>
    where
        F: Fn(&str),
    {
        let ws = WebSocket::open(url).map_err(|e| SiteError::Socket(e.to_string()))?;
        let (mut ws_write, mut ws_read) = ws.split();

        loop {
            let deadline = session.heartbeat_deadline_ms().unwrap_or(HANDSHAKE_TIMEOUT_MS);
            let timeout = sleep(Duration::from_millis(u64::from(deadline)));
            let next = match futures::future::select(ws_read.next(), Box::pin(timeout)).await {
                futures::future::Either::Left((next, _)) => next,
                futures::future::Either::Right(_) => return Ok(Ended::Retry(format!("no heartbeat within {deadline}ms"))),
            };

            let text = match next {
                Some(Ok(Message::Text(text))) => text,
                Some(Ok(Message::Bytes(_))) => continue,
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(Ended::Retry("socket ended".to_owned())),
            };

            let actions = match session.handle_frame(&text) {
                Ok(actions) => actions,
                Err(e) => {
                    log::warn!("live channel dropped frame: {e}");
                    continue;
                }
            };

            for action in actions {
                match action {
                    SessionAction::Send(frame) => ws_write.send(Message::Text(frame)).await?,
                    SessionAction::Connected => backoff.reset(),
                    SessionAction::Render(html) => on_render(&html),
                    SessionAction::Close(reason) => return Ok(Ended::Retry(reason)),
                    SessionAction::Stop(reason) => return Ok(Ended::Stopped(reason)),
                }
            }
        }
    }
}

//! Crate-wide error type.
//!
//! ERROR HANDLING
//! ==============
//! Page components return `Result<(), SiteError>` from their setup entry
//! points. The bootstrap logs a failed component and moves on to the next
//! one, so a malformed widget never blocks the rest of the page.

use thiserror::Error;

use crate::net::packet::PacketError;

#[derive(Debug, Error)]
pub enum SiteError {
    /// A required element is not present in the rendered markup.
    #[error("missing element: {0}")]
    MissingElement(String),

    /// A browser API threw.
    #[error("javascript error: {0}")]
    Js(String),

    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Packet(#[from] PacketError),

    /// The live channel transport failed or closed.
    #[error("socket error: {0}")]
    Socket(String),
}

impl SiteError {
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingElement(what.into())
    }
}

#[cfg(feature = "hydrate")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        if let Some(text) = value.as_string() {
            return Self::Js(text);
        }
        match js_sys::JSON::stringify(&value) {
            Ok(text) => Self::Js(String::from(text)),
            Err(_) => Self::Js(format!("{value:?}")),
        }
    }
}

#[cfg(feature = "hydrate")]
impl From<gloo_net::websocket::WebSocketError> for SiteError {
    fn from(value: gloo_net::websocket::WebSocketError) -> Self {
        Self::Socket(value.to_string())
    }
}

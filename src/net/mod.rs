//! Live summary channel networking.
//!
//! SYSTEM CONTEXT
//! ==============
//! `packet` is the wire codec, `backoff` the reconnect policy, and
//! `live_channel` the session logic plus the browser socket runner.

pub mod backoff;
pub mod live_channel;
pub mod packet;

//! Utility helpers shared across page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! `doc_links` is pure link recognition; `dom` isolates the `web-sys` glue
//! and only exists in the browser build.

pub mod doc_links;
#[cfg(feature = "hydrate")]
pub mod dom;

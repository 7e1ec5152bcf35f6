//! Page components: browser wiring for each enhancement.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every component is independent and mounted once at page load by
//! [`crate::run`]. Logic that can be tested without a browser lives in
//! `state`, `net`, and `util::doc_links`; these modules only bind it to the
//! DOM.

pub mod carousel;
pub mod consent_banner;
pub mod link_highlight;
pub mod live_summary;
pub mod query_form;
pub mod stat_counter;
pub mod typing;

//! # ddlh-web
//!
//! Browser-side enhancements for the document library site, compiled to
//! WebAssembly. The server renders complete pages; this crate adds the
//! interactive pieces on top of that markup once the document has loaded.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Selectors, timings, and channel settings with site defaults |
//! | [`error`] | [`error::SiteError`], the crate-wide error type |
//! | [`state`] | DOM-free component logic: carousel layout, stat animation, consent |
//! | [`net`] | Live summary channel: packet codec, backoff, session |
//! | [`util`] | Document link recognition and `web-sys` helpers |
//! | `components` | Browser wiring for each component (`hydrate` only) |
//!
//! Everything outside `components` and `util::dom` builds natively, so the
//! logic is tested with plain `cargo test`. The `hydrate` feature enables the
//! browser bindings and the WebAssembly entry point.

#[cfg(feature = "hydrate")]
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
pub use self::entry::{run, start};

#[cfg(feature = "hydrate")]
mod entry {
    use wasm_bindgen::prelude::wasm_bindgen;

    use crate::components::{carousel, consent_banner, link_highlight, live_summary, query_form, stat_counter, typing};
    use crate::config::{CONFIG_ATTRIBUTE, SiteConfig};
    use crate::error::SiteError;
    use crate::util::dom;

    /// WebAssembly entry point: install logging, then mount every component
    /// once the document has been parsed.
    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
        if let Err(e) = console_log::init_with_level(level) {
            web_sys::console::warn_1(&format!("logger already installed: {e}").into());
        }

        let document = match dom::document() {
            Ok(document) => document,
            Err(e) => {
                log::error!("no document to enhance: {e}");
                return;
            }
        };
        if document.ready_state() == "loading" {
            if let Err(e) = dom::listen(document.as_ref(), "DOMContentLoaded", |_| run()) {
                log::error!("cannot wait for DOMContentLoaded: {e}");
            }
        } else {
            run();
        }
    }

    /// Mount every component. A failing component is logged and the rest
    /// still run.
    pub fn run() {
        let config = load_config();
        report("carousels", carousel::setup_carousels(&config.carousel));
        report("stats", stat_counter::setup_stats(&config.stats));
        report("live summary", live_summary::setup_live_summary(&config));
        report("typing", typing::setup_typing(&config.typing));
        report(
            "document highlight",
            link_highlight::setup_document_link_highlight(&config.summary).map(|_| ()),
        );
        report("query form", query_form::setup_form_click_handler(&config.query_form));
        report("search hint", query_form::setup_search_hint(&config.query_form));
        report("consent banner", consent_banner::setup_consent_banner(&config.consent));
    }

    fn load_config() -> SiteConfig {
        let body = match dom::document() {
            Ok(document) => document.body(),
            Err(e) => {
                log::warn!("site config not read: {e}");
                None
            }
        };
        let raw = body.and_then(|body| body.get_attribute(CONFIG_ATTRIBUTE));
        SiteConfig::resolve(raw.as_deref())
    }

    fn report(component: &str, result: Result<(), SiteError>) {
        match result {
            Ok(()) => log::debug!("{component} ready"),
            Err(e) => log::warn!("{component} skipped: {e}"),
        }
    }
}

//! Cookie consent banner wiring.
//!
//! Shows the banner until the visitor decides, persists the decision to
//! `localStorage`, and forwards an acceptance to the analytics tag.

use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{Element, Storage};

use crate::config::ConsentConfig;
use crate::error::SiteError;
use crate::state::consent::{ConsentBanner, ConsentFlags, ConsentStore};
use crate::util::dom;

#[wasm_bindgen]
extern "C" {
    /// Global site tag function installed by the analytics snippet.
    #[wasm_bindgen(js_name = gtag, catch)]
    fn gtag(command: &str, action: &str, params: &JsValue) -> Result<(), JsValue>;
}

/// `localStorage` as a [`ConsentStore`]. Storage failures (private mode,
/// quota) degrade to "nothing stored".
struct LocalStorage(Storage);

impl ConsentStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.0.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("consent not read: {}", SiteError::from(e));
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = self.0.set_item(key, value) {
            log::warn!("consent not persisted: {}", SiteError::from(e));
        }
    }
}

fn local_storage() -> Result<LocalStorage, SiteError> {
    let storage = dom::window()?.local_storage()?.ok_or_else(|| SiteError::missing("localStorage"))?;
    Ok(LocalStorage(storage))
}

fn send_consent_update(flags: ConsentFlags) -> Result<(), SiteError> {
    let json = serde_json::to_string(&flags).map_err(|e| SiteError::Js(e.to_string()))?;
    let params = js_sys::JSON::parse(&json)?;
    gtag("consent", "update", &params)?;
    Ok(())
}

fn wire_button<F>(banner: &Element, selector: &str, on_click: F) -> Result<(), SiteError>
where
    F: Fn() -> Result<(), SiteError> + 'static,
{
    let button = banner
        .query_selector(selector)?
        .ok_or_else(|| SiteError::missing(selector.to_owned()))?;
    let banner = banner.clone();
    dom::listen(button.as_ref(), "click", move |event| {
        event.prevent_default();
        if let Err(e) = on_click() {
            log::warn!("consent: {e}");
        }
        if let Err(e) = dom::set_display(&banner, "none") {
            log::warn!("consent banner not hidden: {e}");
        }
    })
}

/// Show the consent banner if no decision is stored.
///
/// # Errors
///
/// Fails if storage is unavailable or the banner lacks its buttons.
pub fn setup_consent_banner(config: &ConsentConfig) -> Result<(), SiteError> {
    let logic = ConsentBanner::new(config.storage_key.clone());
    let store = local_storage()?;
    if !logic.should_show(&store) {
        log::debug!("consent already decided: {:?}", logic.stored(&store));
        return Ok(());
    }
    let Some(banner) = dom::query(&config.banner_selector)? else {
        log::debug!("no consent banner on this page");
        return Ok(());
    };

    let accept = logic.clone();
    wire_button(&banner, &config.accept_selector, move || {
        let flags = accept.accept(&mut local_storage()?);
        send_consent_update(flags)
    })?;

    let reject = logic;
    wire_button(&banner, &config.reject_selector, move || {
        reject.reject(&mut local_storage()?);
        Ok(())
    })?;

    dom::set_display(&banner, "flex")
}

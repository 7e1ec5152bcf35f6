//! Typing-text effect, delegated to the page's TypeIt library.

use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::config::TypingConfig;
use crate::error::SiteError;
use crate::util::dom;

#[wasm_bindgen]
extern "C" {
    type TypeIt;

    #[wasm_bindgen(constructor, catch)]
    fn new(selector: &str, options: &JsValue) -> Result<TypeIt, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn go(this: &TypeIt) -> Result<JsValue, JsValue>;
}

/// Start the effect if the page has a typing target.
///
/// # Errors
///
/// Fails if the document cannot be queried or TypeIt is not loaded.
pub fn setup_typing(config: &TypingConfig) -> Result<(), SiteError> {
    if dom::query(&config.selector)?.is_none() {
        return Ok(());
    }
    let options = js_sys::Object::new();
    js_sys::Reflect::set(&options, &JsValue::from_str("loop"), &JsValue::from_bool(config.looped))?;
    TypeIt::new(&config.selector, &options)?.go()?;
    Ok(())
}

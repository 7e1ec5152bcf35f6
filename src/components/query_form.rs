//! Focus helpers for the search form.

use crate::config::QueryFormConfig;
use crate::error::SiteError;
use crate::util::dom;

/// Clicking anywhere on the query form focuses its query input.
///
/// # Errors
///
/// Fails if the document cannot be queried.
pub fn setup_form_click_handler(config: &QueryFormConfig) -> Result<(), SiteError> {
    let Some(form) = dom::query(&config.form_selector)? else {
        return Ok(());
    };
    let target = form.clone();
    let input_selector = config.query_input_selector.clone();
    dom::listen(form.as_ref(), "click", move |_| {
        let focused = target
            .query_selector(&input_selector)
            .map_err(SiteError::from)
            .and_then(|input| input.map_or(Ok(()), |input| dom::focus(&input)));
        if let Err(e) = focused {
            log::warn!("query form focus: {e}");
        }
    })
}

/// Clicking the search hint focuses the query form's text input.
///
/// # Errors
///
/// Fails if the document cannot be queried.
pub fn setup_search_hint(config: &QueryFormConfig) -> Result<(), SiteError> {
    let Some(hint) = dom::query(&config.hint_selector)? else {
        return Ok(());
    };
    let target_selector = config.hint_target_selector.clone();
    dom::listen(hint.as_ref(), "click", move |_| {
        let focused = dom::query(&target_selector).and_then(|input| input.map_or(Ok(()), |input| dom::focus(&input)));
        if let Err(e) = focused {
            log::warn!("search hint focus: {e}");
        }
    })
}

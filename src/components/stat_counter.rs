//! Stat count-up: drives [`StatAnimation`] from a repeating timer.

use futures::StreamExt;
use gloo_timers::future::IntervalStream;
use web_sys::Element;

use crate::config::StatConfig;
use crate::error::SiteError;
use crate::state::stat::{StatAnimation, StatPhase, timer_millis};
use crate::util::dom;

/// Start the count-up on `element`, whose text is the target value.
///
/// Text that is not a non-negative integer leaves the element untouched.
pub fn animate_stat(element: Element, duration_ms: f64) {
    let text = element.text_content().unwrap_or_default();
    let Some(mut animation) = StatAnimation::from_text(&text) else {
        log::warn!("stat value {text:?} is not an integer; leaving it as rendered");
        return;
    };

    element.set_text_content(Some("0"));
    let Some(interval) = animation.interval_ms(duration_ms) else {
        return;
    };

    wasm_bindgen_futures::spawn_local(async move {
        // Dropping the stream at the end of the loop clears the timer.
        let mut ticks = IntervalStream::new(timer_millis(interval));
        while ticks.next().await.is_some() {
            let phase = animation.tick();
            element.set_text_content(Some(&animation.displayed().to_string()));
            if phase == StatPhase::Done {
                break;
            }
        }
    });
}

/// Animate every stat on the page.
///
/// # Errors
///
/// Fails if the document cannot be queried.
pub fn setup_stats(config: &StatConfig) -> Result<(), SiteError> {
    for element in dom::query_all(&config.selector)? {
        animate_stat(element, config.duration_ms);
    }
    Ok(())
}

//! Thin helpers over `web-sys` DOM calls used by every component.
//!
//! Listeners registered here live as long as the page, so their closures are
//! handed to the browser with `Closure::forget`.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList};

use crate::error::SiteError;

pub fn window() -> Result<web_sys::Window, SiteError> {
    web_sys::window().ok_or_else(|| SiteError::missing("window"))
}

pub fn document() -> Result<Document, SiteError> {
    window()?.document().ok_or_else(|| SiteError::missing("document"))
}

/// Collect the elements of a `NodeList`, skipping non-element nodes.
#[must_use]
pub fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| match node.dyn_into::<Element>() {
            Ok(element) => Some(element),
            Err(_) => None,
        })
        .collect()
}

/// All elements in the document matching `selector`.
pub fn query_all(selector: &str) -> Result<Vec<Element>, SiteError> {
    Ok(elements(&document()?.query_selector_all(selector)?))
}

/// All descendants of `root` matching `selector`.
pub fn query_all_in(root: &Element, selector: &str) -> Result<Vec<Element>, SiteError> {
    Ok(elements(&root.query_selector_all(selector)?))
}

/// First element in the document matching `selector`, if any.
pub fn query(selector: &str) -> Result<Option<Element>, SiteError> {
    Ok(document()?.query_selector(selector)?)
}

/// Attach a page-lifetime listener.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), SiteError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Set the inline `display` style of `element`.
pub fn set_display(element: &Element, display: &str) -> Result<(), SiteError> {
    let html = element
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| SiteError::Js("element is not an HTMLElement".to_owned()))?;
    html.style().set_property("display", display)?;
    Ok(())
}

/// Focus `element` if it is focusable.
pub fn focus(element: &Element) -> Result<(), SiteError> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        html.focus()?;
    }
    Ok(())
}

/// Add or remove `class` on every element carrying `tag_class`.
pub fn toggle_class_on_tagged(tag_class: &str, class: &str, on: bool) -> Result<(), SiteError> {
    let tagged = document()?.get_elements_by_class_name(tag_class);
    for i in 0..tagged.length() {
        if let Some(el) = tagged.item(i) {
            if on {
                el.class_list().add_1(class)?;
            } else {
                el.class_list().remove_1(class)?;
            }
        }
    }
    Ok(())
}

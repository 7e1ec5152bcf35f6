//! Carousel widget: browser wiring around [`CarouselState`].
//!
//! ARCHITECTURE
//! ============
//! The index and layout math live in `state::carousel`. This module measures
//! the rendered slides, applies a layout to the DOM (active marker, boundary
//! dummy, scroll offset), and routes clicks, swipes, touches, and resizes
//! back into the state.
//!
//! Real slides are stamped with `data-carousel-index` at mount. A dummy is a
//! deep clone of a boundary slide, so it carries its source's index, which is
//! exactly the slide a click on it should select. One delegated click
//! listener on the container therefore serves slides and dummies alike.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, TouchEvent};

use crate::config::CarouselConfig;
use crate::error::SiteError;
use crate::state::carousel::{CarouselLayout, CarouselState, DummyPlacement, DummySlide, SlideMetrics, TouchDrag};
use crate::util::dom;

const INDEX_ATTRIBUTE: &str = "data-carousel-index";

/// Live measurements of a mounted slide container.
struct DomMetrics<'a> {
    container: &'a Element,
}

impl SlideMetrics for DomMetrics<'_> {
    fn slide_count(&self) -> usize {
        self.container.children().length() as usize
    }

    fn slide_width(&self) -> f64 {
        self.container
            .children()
            .item(0)
            .and_then(|el| el.dyn_ref::<HtmlElement>().map(HtmlElement::offset_width))
            .map_or(0.0, f64::from)
    }

    fn viewport_width(&self) -> f64 {
        let width = dom::window().and_then(|window| window.inner_width().map_err(SiteError::from));
        match width {
            Ok(width) => width.as_f64().unwrap_or(0.0),
            Err(e) => {
                log::warn!("carousel viewport not measured: {e}");
                0.0
            }
        }
    }
}

struct CarouselInner {
    container: Element,
    config: CarouselConfig,
    state: RefCell<CarouselState>,
    drag: RefCell<TouchDrag>,
}

/// A mounted carousel. Cloning shares the same widget.
#[derive(Clone)]
pub struct Carousel {
    inner: Rc<CarouselInner>,
}

impl Carousel {
    /// Mount a carousel on `outer`, wire its listeners, and render slide 0.
    ///
    /// # Errors
    ///
    /// Fails if the slide container is missing or a listener cannot be
    /// attached.
    pub fn mount(outer: &Element, config: &CarouselConfig) -> Result<Self, SiteError> {
        let container = if outer.matches(&config.slides_selector)? {
            outer.clone()
        } else {
            outer
                .query_selector(&config.slides_selector)?
                .ok_or_else(|| SiteError::missing(config.slides_selector.clone()))?
        };

        let children = container.children();
        for i in 0..children.length() {
            if let Some(slide) = children.item(i) {
                slide.set_attribute(INDEX_ATTRIBUTE, &i.to_string())?;
            }
        }

        let carousel = Self {
            inner: Rc::new(CarouselInner {
                container,
                config: config.clone(),
                state: RefCell::new(CarouselState::new()),
                drag: RefCell::new(TouchDrag::default()),
            }),
        };
        carousel.wire(outer)?;
        carousel.render()?;
        Ok(carousel)
    }

    /// Select slide `index` (wrapped at either end) and re-render.
    pub fn go_to(&self, index: isize) -> Result<(), SiteError> {
        self.inner.state.borrow_mut().go_to(index);
        self.render()
    }

    /// Move `delta` slides and re-render.
    pub fn step(&self, delta: isize) -> Result<(), SiteError> {
        self.inner.state.borrow_mut().step(delta);
        self.render()
    }

    /// Re-render at the current index.
    pub fn render(&self) -> Result<(), SiteError> {
        let container = &self.inner.container;
        let config = &self.inner.config;

        for dummy in dom::query_all_in(container, &format!(".{}", config.dummy_class))? {
            dummy.remove();
        }
        let children = container.children();
        for i in 0..children.length() {
            if let Some(slide) = children.item(i) {
                slide.class_list().remove_1(&config.active_class)?;
            }
        }

        let Some(layout) = self.inner.state.borrow_mut().layout(&DomMetrics { container }) else {
            log::debug!("carousel has no slides");
            return Ok(());
        };
        self.apply(&layout)
    }

    fn apply(&self, layout: &CarouselLayout) -> Result<(), SiteError> {
        let container = &self.inner.container;
        let config = &self.inner.config;
        let children = container.children();

        let active = u32::try_from(layout.active).map_err(|e| SiteError::Js(e.to_string()))?;
        if let Some(slide) = children.item(active) {
            slide.class_list().add_1(&config.active_class)?;
        }

        if let Some(dummy) = layout.dummy() {
            self.insert_dummy(dummy)?;
        }

        set_scroll_left(container, layout.scroll_left);
        Ok(())
    }

    fn insert_dummy(&self, dummy: DummySlide) -> Result<(), SiteError> {
        let container = &self.inner.container;
        let config = &self.inner.config;

        let source_index = u32::try_from(dummy.source).map_err(|e| SiteError::Js(e.to_string()))?;
        let source = container.children().item(source_index).ok_or_else(|| SiteError::missing("carousel slide"))?;
        let clone = source
            .clone_node_with_deep(true)?
            .dyn_into::<Element>()
            .map_err(|_| SiteError::Js("slide clone is not an element".to_owned()))?;
        clone.class_list().add_1(&config.dummy_class)?;
        clone.class_list().remove_1(&config.active_class)?;
        clone.set_attribute(INDEX_ATTRIBUTE, &dummy.jump_to.to_string())?;
        match dummy.placement {
            DummyPlacement::Before => container.prepend_with_node_1(&clone)?,
            DummyPlacement::After => container.append_with_node_1(&clone)?,
        }
        Ok(())
    }

    fn wire(&self, outer: &Element) -> Result<(), SiteError> {
        let container: &web_sys::EventTarget = self.inner.container.as_ref();

        let this = self.clone();
        dom::listen(container, "click", move |event| {
            if let Some(index) = clicked_index(&event, &this.inner.container) {
                report(this.go_to(index));
            }
        })?;

        let this = self.clone();
        dom::listen(container, "swiped-left", move |_| report(this.step(1)))?;
        let this = self.clone();
        dom::listen(container, "swiped-right", move |_| report(this.step(-1)))?;

        let this = self.clone();
        dom::listen(container, "touchstart", move |_| {
            let scroll = f64::from(this.inner.container.scroll_left());
            this.inner.drag.borrow_mut().start(scroll);
        })?;
        let this = self.clone();
        dom::listen(container, "touchmove", move |event| {
            let target = touch_x(&event).and_then(|x| this.inner.drag.borrow().scroll_for(x));
            if let Some(scroll) = target {
                set_scroll_left(&this.inner.container, scroll);
            }
        })?;
        for name in ["touchend", "touchcancel"] {
            let this = self.clone();
            dom::listen(container, name, move |_| {
                let restored = this.inner.drag.borrow_mut().finish();
                if let Some(scroll) = restored {
                    set_scroll_left(&this.inner.container, scroll);
                }
                report(this.render());
            })?;
        }

        for (selector, delta) in [(&self.inner.config.left_arrow_selector, -1), (&self.inner.config.right_arrow_selector, 1)] {
            let Some(arrow) = outer.query_selector(selector)? else {
                continue;
            };
            let this = self.clone();
            dom::listen(arrow.as_ref(), "click", move |event| {
                event.prevent_default();
                report(this.step(delta));
            })?;
        }

        let this = self.clone();
        dom::listen(dom::window()?.as_ref(), "resize", move |_| report(this.render()))?;
        Ok(())
    }
}

/// Index of the slide (or dummy) under a click inside `container`.
fn clicked_index(event: &Event, container: &Element) -> Option<isize> {
    let target = event.target()?;
    let slide = match target.dyn_ref::<Element>()?.closest(&format!("[{INDEX_ATTRIBUTE}]")) {
        Ok(slide) => slide?,
        Err(e) => {
            log::warn!("carousel click target lookup: {}", SiteError::from(e));
            return None;
        }
    };
    if slide.parent_element().as_ref() != Some(container) {
        return None;
    }
    match slide.get_attribute(INDEX_ATTRIBUTE)?.parse() {
        Ok(index) => Some(index),
        Err(e) => {
            log::warn!("carousel slide index unreadable: {e}");
            None
        }
    }
}

fn touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(f64::from(touch.client_x()))
}

fn set_scroll_left(container: &Element, scroll: f64) {
    #[allow(clippy::cast_possible_truncation)]
    container.set_scroll_left(scroll.round() as i32);
}

fn report(result: Result<(), SiteError>) {
    if let Err(e) = result {
        log::warn!("carousel: {e}");
    }
}

/// Mount a carousel on every matching element.
///
/// # Errors
///
/// Fails if the document cannot be queried. A carousel that fails to mount
/// is logged and skipped.
pub fn setup_carousels(config: &CarouselConfig) -> Result<(), SiteError> {
    for outer in dom::query_all(&config.selector)? {
        if let Err(e) = Carousel::mount(&outer, config) {
            log::warn!("carousel not mounted: {e}");
        }
    }
    Ok(())
}

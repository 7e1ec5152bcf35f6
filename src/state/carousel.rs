//! Carousel index state and layout derivation.
//!
//! The carousel shows one "active" slide centered in the viewport and fakes
//! infinite looping by duplicating at most one boundary slide: when the first
//! slide is active a copy of the last slide sits before it, and when the last
//! slide is active a copy of the first slide sits after it.
//!
//! Everything here is independent of the DOM. Slide count and widths come
//! from a [`SlideMetrics`] provider so layouts can be computed against a fake
//! in tests and against live element measurements in the browser.

#[cfg(test)]
#[path = "carousel_test.rs"]
mod carousel_test;

/// Live measurements of a rendered slide set.
pub trait SlideMetrics {
    /// Number of real (non-dummy) slides.
    fn slide_count(&self) -> usize;
    /// Width of one slide in CSS pixels.
    fn slide_width(&self) -> f64;
    /// Width of the visible viewport in CSS pixels.
    fn viewport_width(&self) -> f64;
}

/// Where a dummy slide is inserted relative to the real slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DummyPlacement {
    /// Before the first real slide.
    Before,
    /// After the last real slide.
    After,
}

/// A transient copy of a boundary slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DummySlide {
    /// Real slide the dummy is cloned from.
    pub source: usize,
    pub placement: DummyPlacement,
    /// Index selected when the dummy is clicked.
    pub jump_to: usize,
}

/// One entry in the visible slide sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleSlide {
    Real(usize),
    Dummy(DummySlide),
}

/// Everything the renderer needs to draw one carousel frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselLayout {
    /// Wrapped index of the active slide.
    pub active: usize,
    /// Visible sequence, from [`visible_slides`].
    pub slides: Vec<VisibleSlide>,
    /// Position of the active slide within `slides`.
    pub effective_offset: usize,
    pub scroll_left: f64,
}

impl CarouselLayout {
    /// The boundary dummy in the visible sequence, if any.
    #[must_use]
    pub fn dummy(&self) -> Option<DummySlide> {
        self.slides.iter().find_map(|slide| match slide {
            VisibleSlide::Dummy(dummy) => Some(*dummy),
            VisibleSlide::Real(_) => None,
        })
    }
}

/// Wrap a requested index into `[0, count - 1]`.
///
/// Indices below zero select the last slide and indices past the end select
/// the first, matching a single step off either end. Returns `None` for an
/// empty slide set.
#[must_use]
pub fn wrap_index(index: isize, count: usize) -> Option<usize> {
    let last = count.checked_sub(1)?;
    match usize::try_from(index) {
        Err(_) => Some(last),
        Ok(i) if i > last => Some(0),
        Ok(i) => Some(i),
    }
}

/// The boundary dummy required when `active` is displayed, if any.
///
/// A single-slide set counts as "at the first slide" and gets a copy of
/// itself in front.
#[must_use]
pub fn boundary_dummy(active: usize, count: usize) -> Option<DummySlide> {
    let last = count.checked_sub(1)?;
    if active == 0 {
        Some(DummySlide { source: last, placement: DummyPlacement::Before, jump_to: last })
    } else if active == last {
        Some(DummySlide { source: 0, placement: DummyPlacement::After, jump_to: 0 })
    } else {
        None
    }
}

/// Derive the visible slide sequence: the real slides plus at most one
/// synthetic boundary slide.
#[must_use]
pub fn visible_slides(active: usize, count: usize) -> Vec<VisibleSlide> {
    let mut slides: Vec<VisibleSlide> = (0..count).map(VisibleSlide::Real).collect();
    match boundary_dummy(active, count) {
        Some(dummy @ DummySlide { placement: DummyPlacement::Before, .. }) => {
            slides.insert(0, VisibleSlide::Dummy(dummy));
        }
        Some(dummy) => slides.push(VisibleSlide::Dummy(dummy)),
        None => {}
    }
    slides
}

/// Horizontal scroll offset that centers slide number `offset` in the viewport.
#[must_use]
pub fn scroll_left(slide_width: f64, viewport_width: f64, offset: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let offset = offset as f64;
    slide_width * offset - (viewport_width - slide_width) / 2.0
}

/// Mutable carousel state: the single current index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarouselState {
    current_index: isize,
}

impl CarouselState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn current_index(&self) -> isize {
        self.current_index
    }

    /// Select `index`. The value is wrapped on the next [`Self::layout`].
    pub fn go_to(&mut self, index: isize) {
        self.current_index = index;
    }

    /// Move by `delta` slides relative to the current index.
    pub fn step(&mut self, delta: isize) {
        self.current_index = self.current_index.saturating_add(delta);
    }

    /// Wrap the current index against live metrics and compute the layout.
    ///
    /// Returns `None` when the slide set is empty.
    pub fn layout(&mut self, metrics: &impl SlideMetrics) -> Option<CarouselLayout> {
        let count = metrics.slide_count();
        let active = wrap_index(self.current_index, count)?;
        // `active < count`, and slide counts never approach isize::MAX.
        self.current_index = isize::try_from(active).unwrap_or(isize::MAX);

        let slides = visible_slides(active, count);
        let effective_offset = slides
            .iter()
            .position(|slide| *slide == VisibleSlide::Real(active))
            .unwrap_or(active);
        let width = metrics.slide_width();
        Some(CarouselLayout {
            active,
            slides,
            effective_offset,
            scroll_left: scroll_left(width, metrics.viewport_width(), effective_offset),
        })
    }
}

/// Touch drag tracking between `touchstart` and `touchend`.
///
/// While a finger is down the strip scrolls to the pre-gesture offset minus
/// the finger's viewport x; on release it snaps back to where the gesture
/// began and the carousel re-renders.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchDrag {
    scroll_before: Option<f64>,
}

impl TouchDrag {
    /// Record the scroll offset at gesture start.
    pub fn start(&mut self, scroll_left: f64) {
        self.scroll_before = Some(scroll_left);
    }

    /// Scroll offset for the finger now at `client_x`, or `None` outside a gesture.
    #[must_use]
    pub fn scroll_for(&self, client_x: f64) -> Option<f64> {
        self.scroll_before.map(|before| before - client_x)
    }

    /// End the gesture, returning the pre-gesture scroll offset to restore.
    pub fn finish(&mut self) -> Option<f64> {
        self.scroll_before.take()
    }

    #[cfg(test)]
    pub(crate) fn is_dragging(&self) -> bool {
        self.scroll_before.is_some()
    }
}

//! Count-up animation for numeric page statistics.
//!
//! The displayed value starts at zero and increases by one per tick until it
//! equals the target. The tick interval is `duration / target`, so every stat
//! on the page finishes in the same wall-clock time regardless of magnitude.

#[cfg(test)]
#[path = "stat_test.rs"]
mod stat_test;

/// Animation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatPhase {
    Animating,
    /// Terminal: displayed equals target.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatAnimation {
    displayed: u32,
    target: u32,
}

impl StatAnimation {
    #[must_use]
    pub fn new(target: u32) -> Self {
        Self { displayed: 0, target }
    }

    /// Parse the target from an element's text content.
    ///
    /// Returns `None` for anything other than a non-negative decimal integer.
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        match text.trim().parse::<u32>() {
            Ok(target) => Some(Self::new(target)),
            Err(_) => None,
        }
    }

    #[must_use]
    pub fn displayed(&self) -> u32 {
        self.displayed
    }

    #[must_use]
    pub fn target(&self) -> u32 {
        self.target
    }

    #[must_use]
    pub fn phase(&self) -> StatPhase {
        if self.displayed < self.target { StatPhase::Animating } else { StatPhase::Done }
    }

    /// Advance one tick. Increments the displayed value while animating and
    /// returns the phase after the step; a finished animation stays put.
    pub fn tick(&mut self) -> StatPhase {
        if self.phase() == StatPhase::Animating {
            self.displayed += 1;
        }
        self.phase()
    }

    /// Milliseconds between ticks for a total animation time of `duration_ms`.
    ///
    /// Returns `None` when there is nothing to animate.
    #[must_use]
    pub fn interval_ms(&self, duration_ms: f64) -> Option<f64> {
        (self.target > 0).then(|| duration_ms / f64::from(self.target))
    }
}

/// Round a tick interval to the platform timer's whole-millisecond granularity.
#[must_use]
pub fn timer_millis(interval_ms: f64) -> u32 {
    if !interval_ms.is_finite() || interval_ms <= 1.0 {
        return 1;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let millis = interval_ms.round().min(f64::from(u32::MAX)) as u32;
    millis
}

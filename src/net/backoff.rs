//! Reconnect delay policy for the live channel.
//!
//! Exponential backoff with randomization: attempt `n` waits
//! `base * 2^n` milliseconds, capped at `max`, then spread by up to
//! `±factor` of itself so many tabs reconnecting after a server restart do
//! not arrive together. A successful connect resets the attempt counter.

#[cfg(test)]
#[path = "backoff_test.rs"]
mod backoff_test;

use crate::config::ChannelConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Backoff {
    base_ms: u32,
    max_ms: u32,
    factor: f64,
    attempts: u32,
}

impl Backoff {
    #[must_use]
    pub fn new(base_ms: u32, max_ms: u32, factor: f64) -> Self {
        Self { base_ms, max_ms: max_ms.max(base_ms), factor: factor.clamp(0.0, 1.0), attempts: 0 }
    }

    #[must_use]
    pub fn from_config(config: &ChannelConfig) -> Self {
        Self::new(config.reconnect_delay_ms, config.reconnect_delay_max_ms, config.randomization_factor)
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Delay before the next attempt, consuming one attempt.
    ///
    /// `roll` is a uniform sample in `[0, 1)`; the browser passes
    /// `Math.random()`, tests pass fixed values.
    pub fn next_delay(&mut self, roll: f64) -> u32 {
        let exp = 2f64.powi(i32::try_from(self.attempts).unwrap_or(i32::MAX));
        self.attempts = self.attempts.saturating_add(1);

        let mut delay = (f64::from(self.base_ms) * exp).min(f64::from(u32::MAX));
        if self.factor > 0.0 {
            let deviation = roll.clamp(0.0, 1.0) * self.factor * delay;
            // The low bit of the scaled roll picks the direction.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let up = ((roll * 10.0).floor() as u64) & 1 == 1;
            delay = if up { delay + deviation } else { delay - deviation };
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let millis = delay.clamp(0.0, f64::from(self.max_ms)).floor() as u32;
        millis
    }

    /// Forget previous failures after a successful connect.
    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}

//! Tick-driven counter.
//!
//! A free-running hardware count is compared against a threshold derived from
//! the timer clock, the prescale and the wanted increment rate:
//!
//! ```text
//! threshold = clock_hz / (prescale * target_hz) - 1
//! ```
//!
//! Reaching the threshold increments the counter once and asks the caller to
//! zero the free-running count. The count therefore cycles through
//! `threshold + 1` states per increment.
//!
//! # Wraparound
//!
//! The counter holds `0..=COUNTER_CEILING`. [`Counter::increment`] is the only
//! place the ceiling is checked: the increment after the ceiling yields zero,
//! so no out-of-range value is ever observable.

use crate::config::{COUNTER_CEILING, DisplayConfig};

/// Free-running count at which one counter increment is due.
///
/// # Panics
///
/// Panics if `prescale` or `target_hz` is zero, or if the timer is too slow
/// to reach even one count per increment.
pub const fn tick_threshold(
    clock_hz: u32,
    prescale: u32,
    target_hz: u32,
) -> u32 {
    assert!(prescale > 0, "timer prescale must be non-zero");
    assert!(target_hz > 0, "target frequency must be non-zero");

    // u64 so prescale * target_hz cannot overflow
    let counts_per_increment = clock_hz as u64 / (prescale as u64 * target_hz as u64);
    assert!(counts_per_increment > 0, "target frequency too high for timer clock");
    (counts_per_increment - 1) as u32
}

// =============================================================================
// Counter
// =============================================================================

/// Non-negative counter that wraps to zero after [`COUNTER_CEILING`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Counter {
    value: u16,
}

impl Counter {
    /// Create a counter at zero.
    pub const fn new() -> Self { Self { value: 0 } }

    /// Create a counter at `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value` exceeds [`COUNTER_CEILING`].
    #[cfg(test)]
    pub(crate) const fn starting_at(value: u16) -> Self {
        assert!(value <= COUNTER_CEILING, "counter starts above its ceiling");
        Self { value }
    }

    /// Current value.
    #[inline]
    pub const fn value(&self) -> u16 { self.value }

    /// Advance by one, wrapping past the ceiling. Returns the new value.
    #[inline]
    pub fn increment(&mut self) -> u16 {
        self.value = if self.value >= COUNTER_CEILING { 0 } else { self.value + 1 };
        self.value
    }
}

// =============================================================================
// Free-running Timer
// =============================================================================

/// A pollable hardware count, already divided by the prescale.
pub trait FreeRunningTimer {
    /// Prescaled counts since the last reset.
    fn count(&self) -> u32;

    /// Zero the count.
    fn reset(&mut self);
}

impl<T: FreeRunningTimer + ?Sized> FreeRunningTimer for &mut T {
    #[inline]
    fn count(&self) -> u32 { (**self).count() }

    #[inline]
    fn reset(&mut self) { (**self).reset() }
}

// =============================================================================
// Tick Counter
// =============================================================================

/// Result of one tick check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct TickOutcome {
    /// Counter value after the check.
    pub value: u16,
    /// True when the threshold was reached; the free-running count must be zeroed.
    pub reset_count: bool,
}

/// Counter advanced by a free-running count crossing a threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickCounter {
    threshold: u32,
    counter: Counter,
}

impl TickCounter {
    /// Create a tick counter at zero with an explicit threshold.
    pub const fn new(threshold: u32) -> Self {
        Self {
            threshold,
            counter: Counter::new(),
        }
    }

    /// Create a tick counter for the configured timer and increment rate.
    pub const fn from_config(config: &DisplayConfig) -> Self { Self::new(config.tick_threshold()) }

    /// Threshold the free-running count is compared against.
    #[inline]
    pub const fn threshold(&self) -> u32 { self.threshold }

    /// Current counter value.
    #[inline]
    pub const fn value(&self) -> u16 { self.counter.value() }

    /// Check a free-running count reading.
    ///
    /// Increments exactly once when `free_running >= threshold`.
    pub fn on_tick(
        &mut self,
        free_running: u32,
    ) -> TickOutcome {
        if free_running >= self.threshold {
            TickOutcome {
                value: self.counter.increment(),
                reset_count: true,
            }
        } else {
            TickOutcome {
                value: self.counter.value(),
                reset_count: false,
            }
        }
    }

    /// Read `timer`, check it, and zero it when an increment happened.
    pub fn poll(
        &mut self,
        timer: &mut impl FreeRunningTimer,
    ) -> TickOutcome {
        let outcome = self.on_tick(timer.count());
        if outcome.reset_count {
            timer.reset();
        }
        outcome
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Refresh and counter timing configuration.
//!
//! All values are compile-time constants with validation assertions, so a
//! zero frequency or a hold that cannot fit in the refresh period fails the
//! build instead of producing a garbage display.
//!
//! # Pre-computed Timing
//!
//! The tick threshold, per-digit hold and task periods are derived at compile
//! time from [`DEFAULT`]. Nothing here divides at runtime.

/// Number of physical digit positions on the display.
pub const DIGIT_COUNT: usize = 4;

/// Largest value the counter holds before wrapping to zero.
pub const COUNTER_CEILING: u16 = i16::MAX as u16;

/// Microseconds per second, used for period arithmetic.
const MICROS_PER_SEC: u32 = 1_000_000;

// =============================================================================
// Display Configuration
// =============================================================================

/// Timing options for the display refresh and the counter tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Target visual refresh rate of a full 4-digit pass (Hz).
    pub display_refresh_hz: u32,
    /// Rate at which the displayed value increments (Hz).
    pub counter_tick_hz: u32,
    /// Divisor applied to the hardware timer clock before counting.
    pub timer_prescale: u32,
    /// Hardware timer clock feeding the prescaler (Hz).
    pub timer_clock_hz: u32,
    /// Share of each digit slot spent lit (1-100).
    ///
    /// Below 100 the refresh context leaves time for the counter tick.
    pub hold_duty_percent: u32,
}

impl DisplayConfig {
    /// Build a validated configuration.
    ///
    /// # Panics
    ///
    /// Panics when any frequency, the prescale or the duty is zero, or when
    /// the duty exceeds 100%. In a `const` context this is a build error.
    pub const fn new(
        display_refresh_hz: u32,
        counter_tick_hz: u32,
        timer_prescale: u32,
        timer_clock_hz: u32,
        hold_duty_percent: u32,
    ) -> Self {
        assert!(display_refresh_hz > 0, "display_refresh_hz must be non-zero");
        assert!(counter_tick_hz > 0, "counter_tick_hz must be non-zero");
        assert!(timer_prescale > 0, "timer_prescale must be non-zero");
        assert!(timer_clock_hz > 0, "timer_clock_hz must be non-zero");
        assert!(
            hold_duty_percent > 0 && hold_duty_percent <= 100,
            "hold_duty_percent must be in 1..=100"
        );

        let config = Self {
            display_refresh_hz,
            counter_tick_hz,
            timer_prescale,
            timer_clock_hz,
            hold_duty_percent,
        };
        assert!(config.digit_hold_us() > 0, "refresh rate too high for a non-zero digit hold");
        config
    }

    /// Full refresh period in microseconds (one pass over all positions).
    pub const fn refresh_period_us(&self) -> u32 { MICROS_PER_SEC / self.display_refresh_hz }

    /// Counter increment period in microseconds.
    pub const fn counter_period_us(&self) -> u32 { MICROS_PER_SEC / self.counter_tick_hz }

    /// Time each digit stays lit during a pass, in microseconds.
    ///
    /// The refresh period is split evenly across [`DIGIT_COUNT`] slots and
    /// scaled by `hold_duty_percent`.
    pub const fn digit_hold_us(&self) -> u32 {
        let slot_us = self.refresh_period_us() / DIGIT_COUNT as u32;
        slot_us * self.hold_duty_percent / 100
    }

    /// Free-running count at which the counter increments.
    pub const fn tick_threshold(&self) -> u32 {
        crate::counter::tick_threshold(self.timer_clock_hz, self.timer_prescale, self.counter_tick_hz)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self { DEFAULT }
}

// =============================================================================
// Firmware Defaults
// =============================================================================

/// Full-pass refresh rate. 60 Hz is the flicker-free target (16.7 ms/pass).
pub const DISPLAY_REFRESH_HZ: u32 = 60;

/// Counter increments per second.
pub const COUNTER_TICK_HZ: u32 = 100;

/// Prescale applied to the 1 MHz RP2350 timer.
pub const TIMER_PRESCALE: u32 = 64;

/// RP2350 TIMER tick rate (embassy-time default tick rate).
pub const TIMER_CLOCK_HZ: u32 = 1_000_000;

/// Lit share of each digit slot.
///
/// The rest of each period is left to the thread-mode heartbeat and logging;
/// the counter tick preempts the hold instead of waiting for a gap.
pub const HOLD_DUTY_PERCENT: u32 = 80;

/// Configuration used by the firmware.
pub const DEFAULT: DisplayConfig = DisplayConfig::new(
    DISPLAY_REFRESH_HZ,
    COUNTER_TICK_HZ,
    TIMER_PRESCALE,
    TIMER_CLOCK_HZ,
    HOLD_DUTY_PERCENT,
);

// Compile-time validation: lit time never exceeds the refresh period
const _: () = assert!(DEFAULT.digit_hold_us() * DIGIT_COUNT as u32 <= DEFAULT.refresh_period_us());
const _: () = assert!(DEFAULT.tick_threshold() > 0);

// =============================================================================
// Tests
// =============================================================================

//! Free-running count derived from the embassy time driver.
//!
//! The RP2350 TIMER ticks at `embassy_time::TICK_HZ` (1 MHz). Dividing elapsed
//! ticks by the prescale gives the count the polling scheduler compares
//! against its threshold. `reset` discards the partial prescale period, the
//! same as zeroing a hardware counter register.

use embassy_time::Instant;
use segmux_counter::FreeRunningTimer;

/// Elapsed TIMER ticks since the last reset, divided by a prescale.
pub struct PrescaledTimer {
    origin: Instant,
    prescale: u64,
}

impl PrescaledTimer {
    /// Start counting now.
    ///
    /// # Panics
    ///
    /// Panics if `prescale` is zero.
    pub fn new(prescale: u32) -> Self {
        assert!(prescale > 0, "timer prescale must be non-zero");
        Self {
            origin: Instant::now(),
            prescale: u64::from(prescale),
        }
    }
}

impl FreeRunningTimer for PrescaledTimer {
    fn count(&self) -> u32 {
        let counts = self.origin.elapsed().as_ticks() / self.prescale;
        counts.min(u64::from(u32::MAX)) as u32
    }

    fn reset(&mut self) { self.origin = Instant::now(); }
}

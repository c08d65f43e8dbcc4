//! Refresh statistics shared between the refresh and counter contexts.
//!
//! Plain atomics so the interrupt-priority refresh pass can record without
//! taking a lock. Read by the idle loop for periodic logging.
//!
//! # Overflow Handling
//!
//! Counters use wrapping `fetch_add`; at 60 passes/s the pass counter wraps
//! after ~2.2 years.

use core::sync::atomic::{AtomicU32, Ordering};

/// Counters describing how the refresh engine is keeping up.
pub struct RefreshStats {
    passes: AtomicU32,
    increments: AtomicU32,
    overruns: AtomicU32,
    last_pass_us: AtomicU32,
}

/// Point-in-time copy of [`RefreshStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct StatsSnapshot {
    /// Completed refresh passes.
    pub passes: u32,
    /// Counter increments.
    pub increments: u32,
    /// Passes that took longer than the refresh period.
    pub overruns: u32,
    /// Duration of the most recent pass in microseconds.
    pub last_pass_us: u32,
}

impl RefreshStats {
    /// All counters at zero.
    pub const fn new() -> Self {
        Self {
            passes: AtomicU32::new(0),
            increments: AtomicU32::new(0),
            overruns: AtomicU32::new(0),
            last_pass_us: AtomicU32::new(0),
        }
    }

    /// Record a completed pass. A pass longer than `period_us` is an overrun.
    pub fn record_pass(
        &self,
        pass_us: u32,
        period_us: u32,
    ) {
        self.passes.fetch_add(1, Ordering::Relaxed);
        self.last_pass_us.store(pass_us, Ordering::Relaxed);
        if pass_us > period_us {
            self.overruns.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a counter increment.
    #[inline]
    pub fn record_increment(&self) { self.increments.fetch_add(1, Ordering::Relaxed); }

    /// Copy the current counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            passes: self.passes.load(Ordering::Relaxed),
            increments: self.increments.load(Ordering::Relaxed),
            overruns: self.overruns.load(Ordering::Relaxed),
            last_pass_us: self.last_pass_us.load(Ordering::Relaxed),
        }
    }
}

impl Default for RefreshStats {
    fn default() -> Self { Self::new() }
}

impl StatsSnapshot {
    /// Passes per second between `earlier` and `self`, over `elapsed_ms`.
    pub fn pass_rate_hz(
        &self,
        earlier: &Self,
        elapsed_ms: u32,
    ) -> u32 {
        if elapsed_ms == 0 {
            return 0;
        }
        let passes = self.passes.wrapping_sub(earlier.passes) as u64;
        (passes * 1000 / elapsed_ms as u64) as u32
    }
}

/// Share of the refresh period spent busy-waiting in a pass, 0-100.
///
/// Uses u64 internally and clamps; a zero period reports 0.
pub fn refresh_duty_percent(
    pass_us: u32,
    period_us: u32,
) -> u32 {
    if period_us == 0 {
        return 0;
    }
    let duty = (pass_us as u64 * 100) / period_us as u64;
    duty.min(100) as u32
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero() {
        assert_eq!(RefreshStats::new().snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_record_pass_within_period() {
        let stats = RefreshStats::new();
        stats.record_pass(13_000, 16_666);
        let snap = stats.snapshot();
        assert_eq!(snap.passes, 1);
        assert_eq!(snap.overruns, 0);
        assert_eq!(snap.last_pass_us, 13_000);
    }

    #[test]
    fn test_record_pass_overrun() {
        let stats = RefreshStats::new();
        stats.record_pass(16_667, 16_666);
        stats.record_pass(16_666, 16_666);
        assert_eq!(stats.snapshot().overruns, 1);
        assert_eq!(stats.snapshot().passes, 2);
    }

    #[test]
    fn test_record_increment() {
        let stats = RefreshStats::new();
        stats.record_increment();
        stats.record_increment();
        assert_eq!(stats.snapshot().increments, 2);
    }

    #[test]
    fn test_pass_rate() {
        let earlier = StatsSnapshot { passes: 100, ..Default::default() };
        let later = StatsSnapshot { passes: 700, ..Default::default() };
        assert_eq!(later.pass_rate_hz(&earlier, 10_000), 60);
        assert_eq!(later.pass_rate_hz(&earlier, 0), 0);
    }

    #[test]
    fn test_pass_rate_across_wrap() {
        let earlier = StatsSnapshot { passes: u32::MAX - 29, ..Default::default() };
        let later = StatsSnapshot { passes: 30, ..Default::default() };
        assert_eq!(later.pass_rate_hz(&earlier, 1_000), 60);
    }

    #[test]
    fn test_duty_percent() {
        assert_eq!(refresh_duty_percent(13_332, 16_666), 79);
        assert_eq!(refresh_duty_percent(20_000, 16_666), 100);
        assert_eq!(refresh_duty_percent(1_000, 0), 0);
    }
}

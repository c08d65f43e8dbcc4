//! Display refresh task.
//!
//! Runs on an interrupt executor so a full pass preempts the thread-mode idle
//! loop. Only the counter tick preempts it, for a few microseconds per hold.
//! It is the only owner of the output registers and never awaits mid-pass,
//! so a pass cannot interleave with another one.

use defmt::{info, unwrap};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Delay, Duration, Instant, Ticker};
use segmux_counter::stats::RefreshStats;
use segmux_counter::{CounterWatch, RefreshHandler};

use crate::drivers::{SegmentPort, SelectPort};

/// Latest counter value, written by the counter task, read once per pass.
///
/// Critical-section protected, so the refresh side never sees a torn value
/// even though the two tasks run at different interrupt priorities.
pub static COUNTER_VALUE: CounterWatch<CriticalSectionRawMutex> = CounterWatch::new();

/// Refresh statistics for periodic logging.
pub static STATS: RefreshStats = RefreshStats::new();

/// Display refresh task - one full multiplex pass per period.
///
/// The per-digit hold is a blocking busy-wait (`embassy_time::Delay`); the
/// only await point is between passes.
#[embassy_executor::task]
pub async fn display_refresh_task(
    mut handler: RefreshHandler<SegmentPort, SelectPort>,
    period: Duration,
) {
    info!("Display refresh task started (period {} us, hold {} us)", period.as_micros(), handler.hold_us());

    let mut receiver = unwrap!(COUNTER_VALUE.receiver());
    let period_us = period.as_micros() as u32;
    let mut delay = Delay;
    let mut ticker = Ticker::every(period);

    loop {
        let pass_start = Instant::now();
        // Stale by at most one counter tick
        handler.refresh_latest(&mut receiver, &mut delay);
        STATS.record_pass(pass_start.elapsed().as_micros() as u32, period_us);

        ticker.next().await;
    }
}

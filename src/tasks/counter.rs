//! Counter increment task.
//!
//! Owns the counter; publishes each new value to the refresh task through
//! [`COUNTER_VALUE`]. This is the only writer.
//!
//! Runs at a higher interrupt priority than the refresh task, so a tick lands
//! on time even in the middle of a busy-wait hold. The work per tick is one
//! increment and one critical-section store.

use defmt::{debug, info};
use embassy_time::{Duration, Ticker};
use segmux_counter::CounterPublisher;

use super::{COUNTER_VALUE, STATS};

/// Counter tick task - one increment per period, wrapping at the ceiling.
#[embassy_executor::task]
pub async fn counter_tick_task(period: Duration) {
    info!("Counter tick task started (period {} us)", period.as_micros());

    let mut publisher = CounterPublisher::new(&COUNTER_VALUE);
    let mut ticker = Ticker::every(period);
    loop {
        ticker.next().await;

        let value = publisher.on_counter_tick();
        STATS.record_increment();

        if value == 0 {
            debug!("Counter wrapped");
        }
    }
}

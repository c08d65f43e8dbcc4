//! 4-digit 7-segment counter firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Shows a counter incrementing at `COUNTER_TICK_HZ` on a common-anode
//! multiplexed display, redrawn fast enough to look steady.
//!
//! # Architecture
//!
//! With `scheduler-interrupt` (default):
//! - Counter task: highest interrupt executor, one increment per counter period
//! - Refresh task: lower interrupt executor, one full pass per refresh period
//! - Main task: thread mode, heartbeat LED and periodic statistics
//!
//! With `scheduler-polling`:
//! - Main task: redraw, then poll the prescaled timer, forever
//!
//! # Building
//!
//! ```bash
//! cargo build --release --target thumbv8m.main-none-eabihf
//! cargo build --release --target thumbv8m.main-none-eabihf --no-default-features --features scheduler-polling
//! ```

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

// Modules only used in the binary (not testable on host)
#[cfg(target_arch = "arm")]
mod drivers;
#[cfg(all(target_arch = "arm", feature = "scheduler-interrupt"))]
mod tasks;

#[cfg(all(target_arch = "arm", feature = "scheduler-interrupt"))]
use embassy_rp::interrupt;
#[cfg(target_arch = "arm")]
use {
    defmt::info,
    embassy_executor::Spawner,
    embassy_rp::gpio::{Level, Output},
    segmux_counter::config::DEFAULT,
    segmux_counter::{Multiplexer, PinPort, SCHEDULER_MODE},
    {defmt_rtt as _, panic_probe as _},
};

// The polling threshold is computed against the embassy tick rate
#[cfg(target_arch = "arm")]
const _: () = assert!(DEFAULT.timer_clock_hz as u64 == embassy_time::TICK_HZ);

// Program metadata for `picotool info`
#[cfg(target_arch = "arm")]
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"segmux-counter"),
    embassy_rp::binary_info::rp_program_description!(c"4-digit multiplexed 7-segment counter"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

// =============================================================================
// Interrupt Executors (counter above refresh)
// =============================================================================

#[cfg(all(target_arch = "arm", feature = "scheduler-interrupt"))]
static EXECUTOR_COUNTER: embassy_executor::InterruptExecutor = embassy_executor::InterruptExecutor::new();

#[cfg(all(target_arch = "arm", feature = "scheduler-interrupt"))]
static EXECUTOR_REFRESH: embassy_executor::InterruptExecutor = embassy_executor::InterruptExecutor::new();

#[cfg(all(target_arch = "arm", feature = "scheduler-interrupt"))]
#[interrupt]
unsafe fn SWI_IRQ_0() {
    // SAFETY: SWI_IRQ_0 is reserved for EXECUTOR_COUNTER and started once in main
    unsafe { EXECUTOR_COUNTER.on_interrupt() }
}

#[cfg(all(target_arch = "arm", feature = "scheduler-interrupt"))]
#[interrupt]
unsafe fn SWI_IRQ_1() {
    // SAFETY: SWI_IRQ_1 is reserved for EXECUTOR_REFRESH and started once in main
    unsafe { EXECUTOR_REFRESH.on_interrupt() }
}

/// Heartbeat LED toggle interval.
#[cfg(all(target_arch = "arm", feature = "scheduler-interrupt"))]
const HEARTBEAT_MS: u64 = 500;

/// Heartbeats between statistics log lines (~5 s).
#[cfg(all(target_arch = "arm", feature = "scheduler-interrupt"))]
const STATS_EVERY: u32 = 10;

#[cfg(target_arch = "arm")]
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Segment counter starting...");
    let p = embassy_rp::init(Default::default());

    info!(
        "Config: refresh {} Hz, counter {} Hz, prescale {}, hold {} us, threshold {}, scheduler {}",
        DEFAULT.display_refresh_hz,
        DEFAULT.counter_tick_hz,
        DEFAULT.timer_prescale,
        DEFAULT.digit_hold_us(),
        DEFAULT.tick_threshold(),
        SCHEDULER_MODE
    );

    // Segment lines idle high (active-low: all segments off)
    let segments: drivers::SegmentPort = PinPort::new([
        Output::new(p.PIN_0, Level::High),
        Output::new(p.PIN_1, Level::High),
        Output::new(p.PIN_2, Level::High),
        Output::new(p.PIN_3, Level::High),
        Output::new(p.PIN_4, Level::High),
        Output::new(p.PIN_5, Level::High),
        Output::new(p.PIN_6, Level::High),
        Output::new(p.PIN_7, Level::High),
    ]);

    // Digit-select lines idle low (no position lit)
    let select: drivers::SelectPort = PinPort::new([
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
    ]);

    let mux = Multiplexer::new(segments, select, DEFAULT.digit_hold_us());
    info!("Display initialized");

    // Onboard LED (GPIO25) as heartbeat
    let led = Output::new(p.PIN_25, Level::Low);

    #[cfg(feature = "scheduler-interrupt")]
    run_interrupt_driven(mux, led).await;

    #[cfg(feature = "scheduler-polling")]
    run_polling(mux, led);
}

/// Spawn the refresh and counter tasks, then idle with heartbeat and stats.
#[cfg(all(target_arch = "arm", feature = "scheduler-interrupt"))]
async fn run_interrupt_driven(
    mux: Multiplexer<drivers::SegmentPort, drivers::SelectPort>,
    mut led: Output<'static>,
) {
    use defmt::{unwrap, warn};
    use embassy_rp::interrupt::{InterruptExt, Priority};
    use embassy_time::{Duration, Timer};
    use segmux_counter::RefreshHandler;
    use segmux_counter::stats::refresh_duty_percent;

    use crate::tasks::{STATS, counter_tick_task, display_refresh_task};

    let refresh_period = Duration::from_micros(u64::from(DEFAULT.refresh_period_us()));
    let counter_period = Duration::from_micros(u64::from(DEFAULT.counter_period_us()));

    // Counter ticks preempt the refresh busy-wait so increments stay evenly spaced
    interrupt::SWI_IRQ_0.set_priority(Priority::P1);
    let counter_spawner = EXECUTOR_COUNTER.start(interrupt::SWI_IRQ_0);
    unwrap!(counter_spawner.spawn(counter_tick_task(counter_period)));
    info!("Counter tick task spawned");

    // Refresh preempts everything in thread mode
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let refresh_spawner = EXECUTOR_REFRESH.start(interrupt::SWI_IRQ_1);
    unwrap!(refresh_spawner.spawn(display_refresh_task(RefreshHandler::new(mux), refresh_period)));
    info!("Display refresh task spawned");

    let mut last = STATS.snapshot();
    let mut beats = 0u32;
    loop {
        Timer::after_millis(HEARTBEAT_MS).await;
        led.toggle();

        beats += 1;
        if beats < STATS_EVERY {
            continue;
        }
        beats = 0;

        let snap = STATS.snapshot();
        info!(
            "Refresh: {} Hz, duty {}%, increments {}, overruns {}",
            snap.pass_rate_hz(&last, (HEARTBEAT_MS as u32) * STATS_EVERY),
            refresh_duty_percent(snap.last_pass_us, DEFAULT.refresh_period_us()),
            snap.increments,
            snap.overruns
        );
        if snap.overruns != last.overruns {
            warn!("{} refresh passes overran their period", snap.overruns.wrapping_sub(last.overruns));
        }
        last = snap;
    }
}

/// Redraw-then-poll forever. Never yields.
#[cfg(all(target_arch = "arm", feature = "scheduler-polling"))]
fn run_polling(
    mux: Multiplexer<drivers::SegmentPort, drivers::SelectPort>,
    mut led: Output<'static>,
) -> ! {
    use embassy_time::{Delay, Instant};
    use segmux_counter::stats::RefreshStats;
    use segmux_counter::{PollingScheduler, TickCounter};

    use crate::drivers::PrescaledTimer;

    /// Counter increments between heartbeat toggles and log lines.
    const LOG_EVERY: u16 = 100;

    let stats = RefreshStats::new();
    let timer = PrescaledTimer::new(DEFAULT.timer_prescale);
    let mut scheduler = PollingScheduler::new(mux, TickCounter::from_config(&DEFAULT), timer);
    let mut last_step = Instant::now();

    info!("Polling loop starting");
    scheduler.run(&mut Delay, |outcome| {
        // A polling pass has no fixed period; the loop time is the refresh period
        let now = Instant::now();
        let loop_us = (now - last_step).as_micros() as u32;
        stats.record_pass(loop_us, DEFAULT.refresh_period_us());
        last_step = now;

        if outcome.reset_count {
            stats.record_increment();
            if outcome.value % LOG_EVERY == 0 {
                led.toggle();
                let snap = stats.snapshot();
                info!("Value {}, loop {} us, slow loops {}", outcome.value, snap.last_pass_us, snap.overruns);
            }
        }
    })
}

/// Host builds have no hardware; the library is exercised with `cargo test --lib`.
#[cfg(not(target_arch = "arm"))]
fn main() {}

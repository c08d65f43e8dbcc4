//! Refresh scheduling: when the multiplexer runs relative to counter ticks.
//!
//! Two shapes, picked at build time with exactly one cargo feature:
//!
//! - `scheduler-polling`: [`PollingScheduler`] redraws, then polls the
//!   free-running timer, forever. Redraw rate is bounded by loop speed plus
//!   the per-digit hold.
//! - `scheduler-interrupt`: a periodic refresh tick calls
//!   [`RefreshHandler::refresh_latest`] while a separate counter tick drives a
//!   [`CounterPublisher`]. The value crosses between them through an
//!   `embassy-sync` [`Watch`], so the refresh side never sees a torn value and
//!   the refresh rate no longer depends on counter latency.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::watch::{Receiver, Sender, Watch};
use embedded_hal::delay::DelayNs;

use crate::counter::{Counter, FreeRunningTimer, TickCounter, TickOutcome};
use crate::multiplex::{Frame, Multiplexer};
use crate::port::OutputPort;

/// Scheduler shape compiled into this build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum SchedulerMode {
    /// Single loop: redraw, then poll the counter timer.
    Polling,
    /// Independent refresh and counter ticks.
    InterruptDriven,
}

/// The shape selected by cargo features.
#[cfg(feature = "scheduler-polling")]
pub const SCHEDULER_MODE: SchedulerMode = SchedulerMode::Polling;

/// The shape selected by cargo features.
#[cfg(feature = "scheduler-interrupt")]
pub const SCHEDULER_MODE: SchedulerMode = SchedulerMode::InterruptDriven;

// =============================================================================
// Polling Shape
// =============================================================================

/// Unbounded redraw-then-poll loop.
pub struct PollingScheduler<S, D, T> {
    mux: Multiplexer<S, D>,
    ticks: TickCounter,
    timer: T,
}

impl<S: OutputPort, D: OutputPort, T: FreeRunningTimer> PollingScheduler<S, D, T> {
    /// Zero the timer and take ownership of the display and counter.
    pub fn new(
        mux: Multiplexer<S, D>,
        ticks: TickCounter,
        mut timer: T,
    ) -> Self {
        timer.reset();
        Self { mux, ticks, timer }
    }

    /// Value currently shown.
    #[inline]
    pub const fn value(&self) -> u16 { self.ticks.value() }

    /// One loop iteration: a refresh pass for the current value, then a tick check.
    pub fn step(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> TickOutcome {
        self.mux.refresh(self.ticks.value(), delay);
        self.ticks.poll(&mut self.timer)
    }

    /// Run forever, calling `on_step` after each iteration.
    pub fn run(
        &mut self,
        delay: &mut impl DelayNs,
        mut on_step: impl FnMut(TickOutcome),
    ) -> ! {
        loop {
            let outcome = self.step(delay);
            on_step(outcome);
        }
    }
}

// =============================================================================
// Interrupt-driven Shape
// =============================================================================

/// Receivers of the shared counter value: the refresh tick, plus one spare.
pub const COUNTER_WATCH_RECEIVERS: usize = 2;

/// Latest counter value shared by the counter tick and the refresh tick.
pub type CounterWatch<M> = Watch<M, u16, COUNTER_WATCH_RECEIVERS>;

/// Counter-tick side of the interrupt-driven shape. The only writer.
pub struct CounterPublisher<'a, M: RawMutex> {
    counter: Counter,
    sender: Sender<'a, M, u16, COUNTER_WATCH_RECEIVERS>,
}

impl<'a, M: RawMutex> CounterPublisher<'a, M> {
    /// Start at zero and publish it so the first pass has a value.
    pub fn new(watch: &'a CounterWatch<M>) -> Self {
        let counter = Counter::new();
        let sender = watch.sender();
        sender.send(counter.value());
        Self { counter, sender }
    }

    /// Increment (wrapping at the ceiling) and publish the new value.
    pub fn on_counter_tick(&mut self) -> u16 {
        let value = self.counter.increment();
        self.sender.send(value);
        value
    }
}

/// Refresh-tick side of the interrupt-driven shape.
///
/// Caches the frame so digit extraction and encoding only run when the value
/// changes; the per-tick work is the pass itself.
pub struct RefreshHandler<S, D> {
    mux: Multiplexer<S, D>,
    shown: Option<(u16, Frame)>,
}

impl<S: OutputPort, D: OutputPort> RefreshHandler<S, D> {
    /// Take ownership of the multiplexer.
    pub const fn new(mux: Multiplexer<S, D>) -> Self { Self { mux, shown: None } }

    /// Run one full pass for `value`.
    pub fn on_refresh_tick(
        &mut self,
        value: u16,
        delay: &mut impl DelayNs,
    ) {
        let frame = match self.shown {
            Some((shown, frame)) if shown == value => frame,
            _ => {
                let frame = Frame::from_value(value);
                self.shown = Some((value, frame));
                frame
            }
        };
        self.mux.show(&frame, delay);
    }

    /// Run one full pass for the latest published value and return it.
    ///
    /// The value is latched once before the pass; a counter tick landing
    /// mid-pass shows on the next one. Nothing published yet shows zero.
    pub fn refresh_latest<M: RawMutex>(
        &mut self,
        receiver: &mut Receiver<'_, M, u16, COUNTER_WATCH_RECEIVERS>,
        delay: &mut impl DelayNs,
    ) -> u16 {
        let value = receiver.try_get().unwrap_or(0);
        self.on_refresh_tick(value, delay);
        value
    }

    /// Per-digit hold of the owned multiplexer.
    #[inline]
    pub const fn hold_us(&self) -> u32 { self.mux.hold_us() }
}

// =============================================================================
// Tests
// =============================================================================

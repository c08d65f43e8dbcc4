//! Host-side test doubles for ports, pins, delays and timers.

use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::counter::FreeRunningTimer;
use crate::port::OutputPort;

/// One observable effect of a refresh pass, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Segments(u8),
    Select(u8),
    Hold(u32),
}

/// Shared, ordered log of port writes and holds.
#[derive(Clone, Default)]
pub struct Trace(Rc<RefCell<Vec<Event>>>);

impl Trace {
    pub fn segments_port(&self) -> TracePort {
        TracePort {
            trace: self.clone(),
            select: false,
        }
    }

    pub fn select_port(&self) -> TracePort {
        TracePort {
            trace: self.clone(),
            select: true,
        }
    }

    pub fn delay(&self) -> TraceDelay { TraceDelay(self.clone()) }

    pub fn events(&self) -> Vec<Event> { self.0.borrow().clone() }

    pub fn clear(&self) { self.0.borrow_mut().clear(); }

    pub fn segment_writes(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Segments(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn selects(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Select(bits) => Some(bits),
                _ => None,
            })
            .collect()
    }

    pub fn holds(&self) -> Vec<u32> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Hold(us) => Some(us),
                _ => None,
            })
            .collect()
    }

    fn push(
        &self,
        event: Event,
    ) {
        self.0.borrow_mut().push(event);
    }
}

/// Output port that appends to a [`Trace`].
pub struct TracePort {
    trace: Trace,
    select: bool,
}

impl OutputPort for TracePort {
    fn write(
        &mut self,
        value: u8,
    ) {
        let event = if self.select { Event::Select(value) } else { Event::Segments(value) };
        self.trace.push(event);
    }
}

/// Delay that records holds instead of sleeping.
pub struct TraceDelay(Trace);

impl DelayNs for TraceDelay {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        self.0.push(Event::Hold(ns / 1_000));
    }

    fn delay_us(
        &mut self,
        us: u32,
    ) {
        self.0.push(Event::Hold(us));
    }
}

/// Output port that keeps every byte written.
#[derive(Default)]
pub struct RecordingPort {
    pub values: Vec<u8>,
}

impl OutputPort for RecordingPort {
    fn write(
        &mut self,
        value: u8,
    ) {
        self.values.push(value);
    }
}

/// GPIO line that remembers its level.
#[derive(Clone, Copy, Default)]
pub struct FakePin {
    pub high: bool,
    pub writes: u32,
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}

/// Free-running timer advanced by hand.
#[derive(Default)]
pub struct ManualTimer {
    count: u32,
    pub resets: u32,
}

impl ManualTimer {
    pub fn advance(
        &mut self,
        counts: u32,
    ) {
        self.count += counts;
    }
}

impl FreeRunningTimer for ManualTimer {
    fn count(&self) -> u32 { self.count }

    fn reset(&mut self) {
        self.count = 0;
        self.resets += 1;
    }
}

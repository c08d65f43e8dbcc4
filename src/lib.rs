//! Counter firmware library - testable modules for the 7-segment multiplexer.
//!
//! This library contains the refresh engine that can be tested on the host
//! machine. The binary (`main.rs`) wires it to RP2350 GPIOs and embassy timers.
//!
//! - [`segments`]: digit to active-low segment pattern
//! - [`digits`]: decimal digit extraction, LSB first
//! - [`multiplex`]: one refresh pass over the four digit positions
//! - [`counter`]: tick-driven counter with wraparound
//! - [`scheduler`]: polling and interrupt-driven refresh shapes
//! - [`port`]: 8-bit output register abstraction over `embedded-hal` pins
//! - [`config`]: timing configuration
//! - [`stats`]: refresh statistics
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! cargo test --lib --no-default-features --features scheduler-polling
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Exactly one scheduler shape per build
#[cfg(all(feature = "scheduler-polling", feature = "scheduler-interrupt"))]
compile_error!(
    "Only one scheduler feature can be enabled at a time. Use --no-default-features --features scheduler-polling \
     for the polling shape."
);

#[cfg(not(any(feature = "scheduler-polling", feature = "scheduler-interrupt")))]
compile_error!("Choose a refresh scheduler: enable either scheduler-polling or scheduler-interrupt.");

// === Pure logic modules (testable on host, no ARM dependencies) ===

pub mod config;
pub mod counter;
pub mod digits;
pub mod multiplex;
pub mod port;
pub mod scheduler;
pub mod segments;
pub mod stats;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use config::{DIGIT_COUNT, DisplayConfig};
pub use counter::{Counter, FreeRunningTimer, TickCounter, TickOutcome};
pub use multiplex::{DIGIT_SELECT_START, Frame, Multiplexer};
pub use port::{OutputPort, PinPort};
pub use scheduler::{
    CounterPublisher, CounterWatch, PollingScheduler, RefreshHandler, SCHEDULER_MODE, SchedulerMode,
};

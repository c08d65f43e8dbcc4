//! Hardware drivers for the counter display.
//!
//! - `display`: GPIO mapping for the segment and digit-select registers
//! - `timer`: Prescaled free-running count over the RP2350 TIMER (polling scheduler)

mod display;
#[cfg(feature = "scheduler-polling")]
mod timer;

pub use display::{SegmentPort, SelectPort};
#[cfg(feature = "scheduler-polling")]
pub use timer::PrescaledTimer;

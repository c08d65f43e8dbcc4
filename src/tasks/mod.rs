//! Async tasks for the interrupt-driven scheduler.
//!
//! - `refresh`: Display refresh task (interrupt executor, below the counter)
//! - `counter`: Counter increment task (interrupt executor, preempts refresh)

pub mod counter;
pub mod refresh;

pub use counter::counter_tick_task;
pub use refresh::{COUNTER_VALUE, STATS, display_refresh_task};

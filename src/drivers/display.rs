//! GPIO mapping for a common-anode 4-digit 7-segment display.
//!
//! Pin mapping:
//! - Segments a-g, dp: GPIO0-GPIO7 (bit 0 = a), active-low
//! - Digit select: GPIO8-GPIO11 (bit 0 = leftmost digit, bit 3 = rightmost)
//!
//! Digit-select lines drive the digit common through a transistor, so a high
//! bit lights that position.

use embassy_rp::gpio::Output;
use segmux_counter::PinPort;

/// Number of segment lines (a-g plus decimal point).
pub const SEGMENT_LINES: usize = 8;

/// Number of digit-select lines.
pub const DIGIT_SELECT_LINES: usize = segmux_counter::DIGIT_COUNT;

/// Segment register: one byte across GPIO0-GPIO7.
pub type SegmentPort = PinPort<Output<'static>, SEGMENT_LINES>;

/// Digit-select register: low nibble across GPIO8-GPIO11.
pub type SelectPort = PinPort<Output<'static>, DIGIT_SELECT_LINES>;

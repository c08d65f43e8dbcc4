//! Display multiplexer: one refresh pass over the four digit positions.
//!
//! A pass walks the digit-select line from the rightmost position
//! ([`DIGIT_SELECT_START`]) to the left, one bit shift per slot:
//!
//! ```text
//! SelectFirstDigit -> { WriteDigit -> Hold -> AdvanceSelect } x4 -> Idle
//! ```
//!
//! Every slot gets the same hold, lit or blank, so brightness does not depend
//! on how many digits the value has. Segments are blanked before the select
//! line moves to avoid ghosting the previous pattern onto the next digit.
//!
//! # Blanking Policy
//!
//! Positions beyond the most significant digit are written [`BLANK`]. The
//! thousands position is additionally forced dark whenever the thousands digit
//! is zero, which also covers values above 9999 whose fifth digit is dropped.
//! Zero has no significant digits and shows an all-dark pass.

use embedded_hal::delay::DelayNs;

use crate::config::DIGIT_COUNT;
use crate::digits::extract;
use crate::port::OutputPort;
use crate::segments::{BLANK, encode};

/// Digit-select value that lights the rightmost (least-significant) position.
pub const DIGIT_SELECT_START: u8 = 0x08;

/// Index of the thousands position within a [`Frame`].
const THOUSANDS: usize = DIGIT_COUNT - 1;

// Compile-time validation: the start bit shifts through exactly DIGIT_COUNT positions
const _: () = assert!(DIGIT_SELECT_START.count_ones() == 1);
const _: () = assert!(DIGIT_SELECT_START >> (DIGIT_COUNT - 1) == 0x01);

// =============================================================================
// Frame
// =============================================================================

/// Segment patterns for one pass, index 0 is the rightmost position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Frame {
    patterns: [u8; DIGIT_COUNT],
}

impl Frame {
    /// A frame with every position dark.
    pub const DARK: Self = Self {
        patterns: [BLANK; DIGIT_COUNT],
    };

    /// Build the frame for `value` under the blanking policy.
    pub fn from_value(value: u16) -> Self {
        let mut frame = Self::DARK;
        for (position, digit) in extract(u32::from(value)).take(DIGIT_COUNT).enumerate() {
            frame.patterns[position] = encode(digit);
        }
        if thousands_digit(value) == 0 {
            frame.patterns[THOUSANDS] = BLANK;
        }
        frame
    }

    /// Patterns from the rightmost position to the leftmost.
    #[inline]
    pub const fn patterns(&self) -> [u8; DIGIT_COUNT] { self.patterns }

    /// Pattern shown at `position` (0 = rightmost).
    #[inline]
    pub const fn pattern(
        &self,
        position: usize,
    ) -> u8 {
        self.patterns[position]
    }
}

impl Default for Frame {
    fn default() -> Self { Self::DARK }
}

#[inline]
const fn thousands_digit(value: u16) -> u16 { (value / 1000) % 10 }

// =============================================================================
// Pass State Machine
// =============================================================================

/// Where a refresh pass currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Reset the select register to the rightmost position.
    SelectFirstDigit,
    /// Drive the pattern for the slot onto the segment lines.
    WriteDigit(usize),
    /// Busy-wait so the lit digit persists.
    Hold(usize),
    /// Blank the segments and shift the select line one position left.
    AdvanceSelect(usize),
    /// Pass complete, select back at the start, segments dark.
    Idle,
}

/// Drives a 4-digit multiplexed display through two output registers.
///
/// Owned by exactly one refresh context; `&mut self` on [`refresh`] is what
/// keeps a pass from reentering itself.
///
/// [`refresh`]: Multiplexer::refresh
pub struct Multiplexer<S, D> {
    segments: S,
    select: D,
    select_bits: u8,
    hold_us: u32,
}

impl<S: OutputPort, D: OutputPort> Multiplexer<S, D> {
    /// Take ownership of the segment and digit-select registers.
    ///
    /// Both registers are driven to the idle state: segments dark, select at
    /// [`DIGIT_SELECT_START`].
    ///
    /// # Panics
    ///
    /// Panics if `hold_us` is zero.
    pub fn new(
        segments: S,
        select: D,
        hold_us: u32,
    ) -> Self {
        assert!(hold_us > 0, "digit hold must be non-zero");
        let mut mux = Self {
            segments,
            select,
            select_bits: DIGIT_SELECT_START,
            hold_us,
        };
        mux.segments.write(BLANK);
        mux.select.write(DIGIT_SELECT_START);
        mux
    }

    /// Per-digit hold in microseconds.
    #[inline]
    pub const fn hold_us(&self) -> u32 { self.hold_us }

    /// Run one full refresh pass for `value`.
    ///
    /// Blocks for `DIGIT_COUNT * hold_us`; the hold is the persistence timing
    /// and must not yield.
    pub fn refresh(
        &mut self,
        value: u16,
        delay: &mut impl DelayNs,
    ) {
        self.show(&Frame::from_value(value), delay);
    }

    /// Run one full refresh pass for a pre-built frame.
    pub fn show(
        &mut self,
        frame: &Frame,
        delay: &mut impl DelayNs,
    ) {
        let mut phase = Phase::SelectFirstDigit;
        while phase != Phase::Idle {
            phase = self.step(phase, frame, delay);
        }
    }

    /// Execute one phase and return the next.
    fn step(
        &mut self,
        phase: Phase,
        frame: &Frame,
        delay: &mut impl DelayNs,
    ) -> Phase {
        match phase {
            Phase::SelectFirstDigit => {
                self.select_bits = DIGIT_SELECT_START;
                self.select.write(self.select_bits);
                Phase::WriteDigit(0)
            }
            Phase::WriteDigit(slot) => {
                self.segments.write(frame.pattern(slot));
                Phase::Hold(slot)
            }
            Phase::Hold(slot) => {
                delay.delay_us(self.hold_us);
                Phase::AdvanceSelect(slot)
            }
            Phase::AdvanceSelect(slot) => {
                self.segments.write(BLANK);
                if slot + 1 < DIGIT_COUNT {
                    self.select_bits >>= 1;
                    self.select.write(self.select_bits);
                    Phase::WriteDigit(slot + 1)
                } else {
                    self.select_bits = DIGIT_SELECT_START;
                    self.select.write(self.select_bits);
                    Phase::Idle
                }
            }
            Phase::Idle => Phase::Idle,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digits::significant_digits;
    use crate::testing::{Event, Trace};

    const HOLD_US: u32 = 2_000;

    fn mux(trace: &Trace) -> Multiplexer<crate::testing::TracePort, crate::testing::TracePort> {
        let mux = Multiplexer::new(trace.segments_port(), trace.select_port(), HOLD_US);
        trace.clear();
        mux
    }

    /// Number of positions that light at least one segment.
    fn lit_positions(frame: &Frame) -> usize { frame.patterns().iter().filter(|&&p| p != BLANK).count() }

    /// Segment pattern latched while each select value was active.
    fn lit_by_select(events: &[Event]) -> Vec<(u8, u8)> {
        let mut select = 0;
        let mut out = Vec::new();
        for event in events {
            match *event {
                Event::Select(bits) => select = bits,
                Event::Segments(pattern) if pattern != BLANK => out.push((select, pattern)),
                _ => {}
            }
        }
        out
    }

    #[test]
    fn test_new_drives_idle_state() {
        let trace = Trace::default();
        let _mux = Multiplexer::new(trace.segments_port(), trace.select_port(), HOLD_US);
        assert_eq!(trace.events(), vec![Event::Segments(BLANK), Event::Select(DIGIT_SELECT_START)]);
    }

    #[test]
    #[should_panic(expected = "digit hold must be non-zero")]
    fn test_zero_hold_panics() {
        let trace = Trace::default();
        let _ = Multiplexer::new(trace.segments_port(), trace.select_port(), 0);
    }

    #[test]
    fn test_pass_write_sequence_for_105() {
        let trace = Trace::default();
        let mut mux = mux(&trace);
        mux.refresh(105, &mut trace.delay());

        let expected = vec![
            Event::Select(0x08),
            Event::Segments(0x92),
            Event::Hold(HOLD_US),
            Event::Segments(BLANK),
            Event::Select(0x04),
            Event::Segments(0xC0),
            Event::Hold(HOLD_US),
            Event::Segments(BLANK),
            Event::Select(0x02),
            Event::Segments(0xF9),
            Event::Hold(HOLD_US),
            Event::Segments(BLANK),
            Event::Select(0x01),
            Event::Segments(BLANK),
            Event::Hold(HOLD_US),
            Event::Segments(BLANK),
            Event::Select(0x08),
        ];
        assert_eq!(trace.events(), expected);
    }

    #[test]
    fn test_frame_for_105() {
        let frame = Frame::from_value(105);
        assert_eq!(frame.patterns(), [0x92, 0xC0, 0xF9, BLANK]);
        assert_eq!(lit_positions(&frame), 3);
    }

    #[test]
    fn test_frame_four_digits() {
        assert_eq!(Frame::from_value(1234).patterns(), [0x99, 0xB0, 0xA4, 0xF9]);
        assert_eq!(Frame::from_value(9000).patterns(), [0xC0, 0xC0, 0xC0, 0x90]);
    }

    #[test]
    fn test_frame_single_digit() {
        assert_eq!(Frame::from_value(7).patterns(), [0xF8, BLANK, BLANK, BLANK]);
    }

    #[test]
    fn test_zero_is_dark() {
        assert_eq!(Frame::from_value(0), Frame::DARK);

        let trace = Trace::default();
        let mut mux = mux(&trace);
        mux.refresh(0, &mut trace.delay());
        assert!(lit_by_select(&trace.events()).is_empty());
        // Timing is the same as a fully lit pass
        assert_eq!(trace.holds(), vec![HOLD_US; DIGIT_COUNT]);
    }

    #[test]
    fn test_lit_positions_match_significant_digits() {
        for value in 0..9999u16 {
            let frame = Frame::from_value(value);
            let significant = significant_digits(u32::from(value));
            assert_eq!(lit_positions(&frame), significant, "value {value}");
            for position in significant..DIGIT_COUNT {
                assert_eq!(frame.pattern(position), BLANK, "value {value} position {position}");
            }
        }
    }

    #[test]
    fn test_below_1000_thousands_dark() {
        for value in [1, 42, 999] {
            assert_eq!(Frame::from_value(value).pattern(THOUSANDS), BLANK);
        }
    }

    #[test]
    fn test_above_9999_truncates_and_blanks_zero_thousands() {
        // 10500 -> digits 0,0,5,0,(1 dropped); thousands digit is zero
        assert_eq!(Frame::from_value(10_500).patterns(), [0xC0, 0xC0, 0x92, BLANK]);
        // 32767 -> 7,6,7,2,(3 dropped)
        assert_eq!(Frame::from_value(32_767).patterns(), [0xF8, 0x82, 0xF8, 0xA4]);
    }

    #[test]
    fn test_pass_is_idempotent() {
        let trace = Trace::default();
        let mut mux = mux(&trace);

        mux.refresh(4_321, &mut trace.delay());
        let first = trace.events();
        trace.clear();
        mux.refresh(4_321, &mut trace.delay());

        assert_eq!(trace.events(), first);
    }

    #[test]
    fn test_select_walks_one_bit_right() {
        let trace = Trace::default();
        let mut mux = mux(&trace);
        mux.refresh(8_888, &mut trace.delay());

        assert_eq!(trace.selects(), vec![0x08, 0x04, 0x02, 0x01, 0x08]);
        assert_eq!(
            lit_by_select(&trace.events()),
            vec![(0x08, 0x80), (0x04, 0x80), (0x02, 0x80), (0x01, 0x80)]
        );
    }

    #[test]
    fn test_segments_blank_before_every_select_change() {
        let trace = Trace::default();
        let mut mux = mux(&trace);
        mux.refresh(1_111, &mut trace.delay());

        let events = trace.events();
        for (i, event) in events.iter().enumerate().skip(1) {
            if matches!(event, Event::Select(_)) {
                assert_eq!(events[i - 1], Event::Segments(BLANK), "event {i}");
            }
        }
    }

    #[test]
    fn test_show_prebuilt_frame() {
        let trace = Trace::default();
        let mut mux = mux(&trace);
        mux.show(&Frame::from_value(56), &mut trace.delay());
        assert_eq!(lit_by_select(&trace.events()), vec![(0x08, 0x82), (0x04, 0x92)]);
    }

    #[test]
    fn test_step_transitions() {
        let trace = Trace::default();
        let mut mux = mux(&trace);
        let frame = Frame::from_value(3);
        let mut delay = trace.delay();

        assert_eq!(mux.step(Phase::SelectFirstDigit, &frame, &mut delay), Phase::WriteDigit(0));
        assert_eq!(mux.step(Phase::WriteDigit(0), &frame, &mut delay), Phase::Hold(0));
        assert_eq!(mux.step(Phase::Hold(0), &frame, &mut delay), Phase::AdvanceSelect(0));
        assert_eq!(mux.step(Phase::AdvanceSelect(0), &frame, &mut delay), Phase::WriteDigit(1));
        assert_eq!(mux.step(Phase::AdvanceSelect(3), &frame, &mut delay), Phase::Idle);
        assert_eq!(mux.step(Phase::Idle, &frame, &mut delay), Phase::Idle);
    }
}

//! Segment patterns for a common-anode 7-segment digit.
//!
//! Bit layout of a pattern byte:
//!
//! ```text
//!  bit:  7   6   5   4   3   2   1   0
//!  seg:  dp  g   f   e   d   c   b   a
//! ```
//!
//! Patterns are active-low: a `0` bit lights the segment, so `0xFF` is dark.

/// Segment A (top).
pub const SEG_A: u8 = 0b_0000_0001;
/// Segment B (top right).
pub const SEG_B: u8 = 0b_0000_0010;
/// Segment C (bottom right).
pub const SEG_C: u8 = 0b_0000_0100;
/// Segment D (bottom).
pub const SEG_D: u8 = 0b_0000_1000;
/// Segment E (bottom left).
pub const SEG_E: u8 = 0b_0001_0000;
/// Segment F (top left).
pub const SEG_F: u8 = 0b_0010_0000;
/// Segment G (middle).
pub const SEG_G: u8 = 0b_0100_0000;
/// Decimal point.
pub const SEG_DP: u8 = 0b_1000_0000;

/// All segments off.
pub const BLANK: u8 = 0xFF;

/// Active-low patterns for digits 0-9.
pub const DIGIT_PATTERNS: [u8; 10] = [
    0xC0, // 0
    0xF9, // 1
    0xA4, // 2
    0xB0, // 3
    0x99, // 4
    0x92, // 5
    0x82, // 6
    0xF8, // 7
    0x80, // 8
    0x90, // 9
];

// Compile-time validation: no digit lights the decimal point, every digit lights something
const _: () = {
    let mut i = 0;
    while i < DIGIT_PATTERNS.len() {
        assert!(DIGIT_PATTERNS[i] & SEG_DP != 0);
        assert!(DIGIT_PATTERNS[i] != BLANK);
        i += 1;
    }
};

/// Encode a single decimal digit as its segment pattern.
///
/// # Panics
///
/// Panics if `digit > 9`. Writing an arbitrary byte to the segment lines is
/// harder to diagnose than a halted device.
#[inline]
pub const fn encode(digit: u8) -> u8 {
    assert!(digit <= 9, "segment encoder takes a single decimal digit");
    DIGIT_PATTERNS[digit as usize]
}

// =============================================================================
// Tests
// =============================================================================

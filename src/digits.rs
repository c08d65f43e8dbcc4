//! Decimal digit extraction, least-significant digit first.
//!
//! `extract(0)` yields nothing; zero-fill and blanking are the multiplexer's
//! job, not the extractor's.

/// Lazy iterator over the decimal digits of a value, LSB first.
///
/// Finite and not restartable: once a digit is yielded it is gone.
#[derive(Clone, Debug)]
pub struct Digits {
    remaining: u32,
}

/// Decompose `value` into its decimal digits, least-significant first.
#[inline]
pub const fn extract(value: u32) -> Digits { Digits { remaining: value } }

/// Number of digits `extract(value)` will yield.
pub const fn significant_digits(value: u32) -> usize {
    let mut value = value;
    let mut count = 0;
    while value > 0 {
        value /= 10;
        count += 1;
    }
    count
}

impl Iterator for Digits {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let digit = (self.remaining % 10) as u8;
        self.remaining /= 10;
        Some(digit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = significant_digits(self.remaining);
        (len, Some(len))
    }
}

impl ExactSizeIterator for Digits {}

impl core::iter::FusedIterator for Digits {}

// =============================================================================
// Tests
// =============================================================================

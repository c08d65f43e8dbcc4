//! 8-bit output register abstraction.
//!
//! The multiplexer writes whole bytes; [`PinPort`] fans a byte out to
//! individual GPIO lines through `embedded-hal`, bit 0 on the first pin.

use core::convert::Infallible;

use embedded_hal::digital::{OutputPin, PinState};

/// A write-only 8-bit output register.
pub trait OutputPort {
    /// Drive the full byte onto the port.
    fn write(
        &mut self,
        value: u8,
    );
}

impl<T: OutputPort + ?Sized> OutputPort for &mut T {
    #[inline]
    fn write(
        &mut self,
        value: u8,
    ) {
        (**self).write(value);
    }
}

/// Up to 8 GPIO lines driven as one register.
///
/// Bit `n` of the written byte drives `pins[n]`; bits at or above `N` are
/// ignored.
pub struct PinPort<P, const N: usize> {
    pins: [P; N],
}

impl<P, const N: usize> PinPort<P, N> {
    /// Wrap an array of output pins, least-significant bit first.
    pub const fn new(pins: [P; N]) -> Self {
        const { assert!(N > 0 && N <= 8, "a port drives between 1 and 8 lines") };
        Self { pins }
    }
}

impl<P: OutputPin<Error = Infallible>, const N: usize> OutputPort for PinPort<P, N> {
    fn write(
        &mut self,
        value: u8,
    ) {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            let Ok(()) = pin.set_state(PinState::from(value & (1 << bit) != 0));
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

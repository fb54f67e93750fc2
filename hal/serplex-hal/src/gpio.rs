//! Digital output line abstractions
//!
//! The drivers only ever issue "set line state" commands, so the trait is
//! write-only. Implementations handle the register access for the chip.

/// Digital output line
pub trait OutputPin {
    /// Set the line high (logic 1)
    fn set_high(&mut self);

    /// Set the line low (logic 0)
    fn set_low(&mut self);

    /// Set the line to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

impl<P: OutputPin + ?Sized> OutputPin for &mut P {
    fn set_high(&mut self) {
        (**self).set_high();
    }

    fn set_low(&mut self) {
        (**self).set_low();
    }
}

/// Placeholder for an optional line that is not wired
///
/// Used as the type of the clear line when CLR is strapped high on the
/// board. Writes are discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoPin;

impl OutputPin for NoPin {
    fn set_high(&mut self) {}

    fn set_low(&mut self) {}
}

/// Adapter for any `embedded-hal` 1.0 output pin
///
/// Pin errors are discarded: the drivers have no read-back and no fatal
/// conditions, and on every supported chip GPIO writes are infallible.
#[derive(Debug)]
pub struct EhOutput<P>(pub P);

impl<P> EhOutput<P> {
    /// Wrap an `embedded-hal` pin
    pub fn new(pin: P) -> Self {
        Self(pin)
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: embedded_hal::digital::OutputPin> OutputPin for EhOutput<P> {
    fn set_high(&mut self) {
        let _ = self.0.set_high();
    }

    fn set_low(&mut self) {
        let _ = self.0.set_low();
    }
}

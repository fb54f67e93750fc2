//! Pattern sink trait
//!
//! The narrow view of a shift register driver that the scan engine is
//! allowed to use.

use serplex_hal::Micros;

use crate::error::DriverError;

/// Something that puts pattern bytes onto a shared output register
pub trait PatternSink {
    /// Reset in place and drive the idle line levels
    fn begin(&mut self, now: Micros);

    /// Advance at most one timed step
    fn poll(&mut self, now: Micros);

    /// Queue a shift-and-latch of `pattern`
    ///
    /// Fails with [`DriverError::QueueFull`] without side effects.
    fn submit_pattern(&mut self, pattern: u8) -> Result<(), DriverError>;

    /// Check if any work is queued or in flight
    fn is_busy(&self) -> bool;

    /// Minimum time between bus steps (µs), used for timing budget checks
    fn step_interval_us(&self) -> u32;
}

impl<S: PatternSink + ?Sized> PatternSink for &mut S {
    fn begin(&mut self, now: Micros) {
        (**self).begin(now);
    }

    fn poll(&mut self, now: Micros) {
        (**self).poll(now);
    }

    fn submit_pattern(&mut self, pattern: u8) -> Result<(), DriverError> {
        (**self).submit_pattern(pattern)
    }

    fn is_busy(&self) -> bool {
        (**self).is_busy()
    }

    fn step_interval_us(&self) -> u32 {
        (**self).step_interval_us()
    }
}

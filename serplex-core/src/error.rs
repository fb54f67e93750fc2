//! Error types
//!
//! Nothing in the core is fatal. The worst outcome of any error is a
//! rejected request and a stale frame on the outputs.

/// Errors from the shift register driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// Command queue already holds its capacity; nothing was queued
    QueueFull,
    /// Bit position outside 0..=7
    InvalidBit,
    /// Driver has outstanding work (test pattern refused)
    Busy,
}

/// Errors from the scan engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanError {
    /// Slot index outside the configured range; nothing changed
    InvalidSlot,
}

//! Inter-task communication channels
//!
//! The scan task owns the display; everything else reaches it through
//! these signals.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Number of digits on the board
pub const DIGITS: usize = 3;

/// Content for every digit at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Segment pattern per digit, segment A in bit 7 down to G in bit 1
    pub patterns: [u8; DIGITS],
    /// Decimal points, bit N for digit N
    pub points: u8,
}

/// Display update request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayCommand {
    /// Show a frame on every digit
    Show(Frame),
    /// Blank every digit
    Blank,
}

/// Latest display request (updated by the feeder, applied by the scan task)
///
/// Only the newest request matters, so a signal rather than a channel.
pub static DISPLAY_CMD: Signal<CriticalSectionRawMutex, DisplayCommand> = Signal::new();

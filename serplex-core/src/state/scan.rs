//! Scan engine states

/// Slot switching sequence
///
/// `Idle` holds the active slot for its dwell time; the other states walk
/// through one slot switch, one state per poll at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanState {
    /// Active slot is showing; waiting for dwell to elapse
    Idle,
    /// Turning every selector off
    DisablingSlots,
    /// Holding all selectors off for the blanking interval
    Blanking,
    /// Waiting for the driver to take the next slot's pattern
    WritingPattern,
    /// Pattern submitted; waiting for it to be latched
    AwaitingWrite,
    /// Pattern latched; selecting the slot
    EnablingSlot,
}

impl ScanState {
    /// Check if every selector is guaranteed off in this state
    pub fn selectors_off(&self) -> bool {
        matches!(
            self,
            ScanState::Blanking
                | ScanState::WritingPattern
                | ScanState::AwaitingWrite
                | ScanState::EnablingSlot
        )
    }
}

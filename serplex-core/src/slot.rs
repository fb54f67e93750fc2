//! Multiplexed output slot

/// One multiplexed output position (e.g. one display digit)
///
/// Owned by the scan engine. The host mutates slots between polls; a poll
/// only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slot {
    /// Pattern byte, before encoding
    pub pattern: u8,
    /// Auxiliary output (decimal point on a 7-segment digit)
    pub aux: bool,
    /// Disabled slots still get their dwell slice, written blank
    pub enabled: bool,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            pattern: 0,
            aux: false,
            enabled: true,
        }
    }
}

impl Slot {
    /// Create an enabled slot showing `pattern`
    pub const fn new(pattern: u8, aux: bool) -> Self {
        Self {
            pattern,
            aux,
            enabled: true,
        }
    }
}

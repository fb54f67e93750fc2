//! Segment pattern encoder
//!
//! Default [`SlotEncoder`] for 7-segment digits: the auxiliary flag is the
//! decimal point, and common-anode wiring makes outputs active-low.

use serplex_core::traits::SlotEncoder;
use serplex_core::Slot;

/// Output drive polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Segment lights when its output is LOW (common anode)
    #[default]
    ActiveLow,
    /// Segment lights when its output is HIGH (common cathode)
    ActiveHigh,
}

/// Segment encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentEncoder {
    /// Bit(s) set when the slot's aux flag is on
    pub aux_mask: u8,
    /// Output polarity
    pub polarity: Polarity,
}

impl Default for SegmentEncoder {
    fn default() -> Self {
        Self {
            aux_mask: 1 << 0, // DP on P1
            polarity: Polarity::ActiveLow,
        }
    }
}

impl SegmentEncoder {
    /// Create an encoder
    pub const fn new(aux_mask: u8, polarity: Polarity) -> Self {
        Self { aux_mask, polarity }
    }

    fn apply_polarity(&self, lit: u8) -> u8 {
        match self.polarity {
            Polarity::ActiveLow => !lit,
            Polarity::ActiveHigh => lit,
        }
    }
}

impl SlotEncoder for SegmentEncoder {
    fn encode(&self, slot: &Slot) -> u8 {
        let mut lit = slot.pattern;
        if slot.aux {
            lit |= self.aux_mask;
        }
        self.apply_polarity(lit)
    }

    fn blank(&self) -> u8 {
        self.apply_polarity(0x00)
    }
}

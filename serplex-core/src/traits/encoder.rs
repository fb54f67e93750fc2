//! Slot encoding strategy
//!
//! Turns a slot's logical content into the byte that goes on the wire.
//! Board wiring (which bit is the decimal point, whether outputs sink or
//! source current) lives here, not in the scan engine.

use crate::slot::Slot;

/// Slot-to-wire encoding strategy
pub trait SlotEncoder {
    /// Wire byte for an enabled slot
    fn encode(&self, slot: &Slot) -> u8;

    /// Wire byte that lights nothing
    fn blank(&self) -> u8;

    /// Wire byte for any slot, blank when disabled
    fn wire_pattern(&self, slot: &Slot) -> u8 {
        if slot.enabled {
            self.encode(slot)
        } else {
            self.blank()
        }
    }
}

impl<E: SlotEncoder + ?Sized> SlotEncoder for &E {
    fn encode(&self, slot: &Slot) -> u8 {
        (**self).encode(slot)
    }

    fn blank(&self) -> u8 {
        (**self).blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pass-through encoder
    struct Raw;

    impl SlotEncoder for Raw {
        fn encode(&self, slot: &Slot) -> u8 {
            slot.pattern
        }

        fn blank(&self) -> u8 {
            0
        }
    }

    #[test]
    fn test_disabled_slot_is_blank() {
        let mut slot = Slot::new(0x7E, false);
        assert_eq!(Raw.wire_pattern(&slot), 0x7E);

        slot.enabled = false;
        assert_eq!(Raw.wire_pattern(&slot), 0);
    }
}

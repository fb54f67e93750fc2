//! Slot selector line
//!
//! One GPIO per slot, usually switching a digit's common anode or cathode
//! through a transistor. PNP high-side switches are active-low.

use serplex_hal::OutputPin;

/// Selector line for one slot
pub struct SelectorLine<P> {
    pin: P,
    /// If true, selected = pin LOW
    active_low: bool,
    /// Current logical state (true = slot selected)
    active: bool,
}

impl<P: OutputPin> SelectorLine<P> {
    /// Create a selector, driven to the deselected level
    ///
    /// # Arguments
    /// - `pin`: The GPIO driving the slot's switch
    /// - `active_low`: If true, the slot is selected when the pin is LOW
    pub fn new(pin: P, active_low: bool) -> Self {
        let mut line = Self {
            pin,
            active_low,
            active: true,
        };
        // Ensure slot starts off
        line.set_active(false);
        line
    }

    /// Create a selector that is active when high (NPN low-side switch)
    pub fn active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a selector that is active when low (PNP high-side switch)
    pub fn active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Select or deselect the slot
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        // active xor inverted gives the pin level
        self.pin.set_state(active != self.active_low);
    }

    /// Select the slot
    pub fn activate(&mut self) {
        self.set_active(true);
    }

    /// Deselect the slot
    pub fn deactivate(&mut self) {
        self.set_active(false);
    }

    /// Check if the slot is selected
    pub fn is_active(&self) -> bool {
        self.active
    }
}

//! Slot scan engine
//!
//! Makes N slots look simultaneously lit by showing them one at a time,
//! each for a dwell window, through a single shared register.
//!
//! Every slot switch walks the same sequence, one state per poll:
//!
//! ```text
//! Idle ─dwell─► DisablingSlots ─► Blanking ─blanking─► WritingPattern
//!   ▲                                                       │ sink idle
//!   │                                                       ▼
//!   └──────────── EnablingSlot ◄─── sink idle ───── AwaitingWrite
//! ```
//!
//! The pattern is always latched before its selector goes on, and every
//! selector is off before the register changes, so a slot never shows a
//! neighbour's pattern. Disabled slots are written blank but keep their
//! dwell slice, so cycle length does not depend on which slots are on.

use heapless::Vec;

use serplex_core::config::{validate_slot_count, ConfigError, ScanTiming, MAX_SLOTS};
use serplex_core::state::ScanState;
use serplex_core::traits::{PatternSink, SlotEncoder};
use serplex_core::{ScanError, Slot};
use serplex_hal::{elapsed_us, Clock, Micros, OutputPin};

use super::encoder::SegmentEncoder;
use super::selector::SelectorLine;

/// Multiplexing engine over a pattern sink
///
/// The engine is the sink's only producer. The host updates slots between
/// polls and may reach the sink through [`ScanEngine::sink_mut`] for
/// housekeeping (e.g. dropping queued writes), but must not submit its own
/// patterns while the engine is enabled.
pub struct ScanEngine<K, P, E = SegmentEncoder> {
    sink: K,
    selectors: Vec<SelectorLine<P>, MAX_SLOTS>,
    slots: Vec<Slot, MAX_SLOTS>,
    encoder: E,
    timing: ScanTiming,
    state: ScanState,
    enabled: bool,
    /// Slot being prepared, shown next
    cursor: usize,
    /// Slot currently selected
    active: Option<usize>,
    dwell_start: Micros,
    blank_start: Micros,
}

impl<K, P, E> ScanEngine<K, P, E>
where
    K: PatternSink,
    P: OutputPin,
    E: SlotEncoder,
{
    /// Create an engine with one slot per selector line
    ///
    /// The slot count is fixed for the life of the engine. Fails on
    /// invalid timing, no selectors, or more than [`MAX_SLOTS`].
    pub fn new<I>(
        sink: K,
        selectors: I,
        encoder: E,
        timing: ScanTiming,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = SelectorLine<P>>,
    {
        timing.validate()?;

        let mut lines = Vec::new();
        for line in selectors {
            lines.push(line).map_err(|_| ConfigError::TooManySlots)?;
        }
        validate_slot_count(lines.len())?;

        let slots = lines.iter().map(|_| Slot::default()).collect();

        let engine = Self {
            sink,
            selectors: lines,
            slots,
            encoder,
            timing,
            state: ScanState::Idle,
            enabled: true,
            cursor: 0,
            active: None,
            dwell_start: 0,
            blank_start: 0,
        };
        engine.warn_if_overrun();
        Ok(engine)
    }

    /// Reset in place: deselect everything, restart at slot 0, begin the sink
    pub fn begin(&mut self, now: Micros) {
        self.sink.begin(now);
        self.deselect_all();
        self.state = ScanState::Idle;
        self.cursor = 0;
        self.dwell_start = now;
        self.blank_start = now;
    }

    /// Poll the sink, then take at most one switching step
    pub fn poll(&mut self, now: Micros) {
        self.sink.poll(now);

        if !self.enabled {
            return;
        }

        match self.state {
            ScanState::Idle => {
                let due = match self.active {
                    Some(_) => elapsed_us(self.dwell_start, now) >= self.timing.dwell_us,
                    None => true,
                };
                if due {
                    self.state = ScanState::DisablingSlots;
                }
            }
            ScanState::DisablingSlots => {
                self.deselect_all();
                self.blank_start = now;
                self.state = ScanState::Blanking;
            }
            ScanState::Blanking => {
                if elapsed_us(self.blank_start, now) >= self.timing.blanking_us {
                    self.state = ScanState::WritingPattern;
                }
            }
            ScanState::WritingPattern => {
                if !self.sink.is_busy() {
                    let pattern = self.encoder.wire_pattern(&self.slots[self.cursor]);
                    // An idle sink has an empty queue; retry next poll otherwise
                    if self.sink.submit_pattern(pattern).is_ok() {
                        self.state = ScanState::AwaitingWrite;
                    }
                }
            }
            ScanState::AwaitingWrite => {
                if !self.sink.is_busy() {
                    self.state = ScanState::EnablingSlot;
                }
            }
            ScanState::EnablingSlot => {
                self.selectors[self.cursor].activate();
                self.active = Some(self.cursor);
                self.cursor = (self.cursor + 1) % self.selectors.len();
                self.dwell_start = now;
                self.state = ScanState::Idle;
            }
        }
    }

    /// Poll using a clock
    pub fn update<C: Clock>(&mut self, clock: &C) {
        self.poll(clock.now_us());
    }

    /// Number of slots
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Read a slot
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Set a slot's pattern and aux flag, enabling it
    pub fn set_slot(&mut self, index: usize, pattern: u8, aux: bool) -> Result<(), ScanError> {
        let slot = self.slot_mut(index)?;
        slot.pattern = pattern;
        slot.aux = aux;
        slot.enabled = true;
        Ok(())
    }

    /// Set a slot's pattern
    pub fn set_pattern(&mut self, index: usize, pattern: u8) -> Result<(), ScanError> {
        self.slot_mut(index)?.pattern = pattern;
        Ok(())
    }

    /// Set a slot's aux flag
    pub fn set_aux(&mut self, index: usize, aux: bool) -> Result<(), ScanError> {
        self.slot_mut(index)?.aux = aux;
        Ok(())
    }

    /// Enable or disable a slot; disabled slots show blank
    pub fn set_slot_enabled(&mut self, index: usize, enabled: bool) -> Result<(), ScanError> {
        self.slot_mut(index)?.enabled = enabled;
        Ok(())
    }

    /// Enable every slot
    pub fn enable_all(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.enabled = true;
        }
    }

    /// Disable every slot
    pub fn disable_all(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.enabled = false;
        }
    }

    /// Blank the display: disable every slot and deselect now
    ///
    /// Scanning continues, writing blank patterns.
    pub fn clear_display(&mut self) {
        self.disable_all();
        self.deselect_all();
    }

    /// Turn scanning on or off
    ///
    /// Turning it off deselects every slot; the sink keeps being polled so
    /// a write already submitted still completes. Turning it back on
    /// resumes with the slot that was being prepared.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("scan engine enabled={}", enabled);

        self.enabled = enabled;
        if !enabled {
            self.deselect_all();
            self.state = ScanState::Idle;
        }
    }

    /// Check if scanning is on
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Currently selected slot
    pub fn active_slot(&self) -> Option<usize> {
        self.active
    }

    /// Current switching state
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Current timing
    pub fn timing(&self) -> ScanTiming {
        self.timing
    }

    /// Replace the timing; rejected timing leaves the old one in place
    pub fn set_timing(&mut self, timing: ScanTiming) -> Result<(), ConfigError> {
        timing.validate()?;
        self.timing = timing;
        self.warn_if_overrun();
        Ok(())
    }

    /// Set the dwell time (µs)
    pub fn set_dwell_us(&mut self, dwell_us: u32) -> Result<(), ConfigError> {
        self.set_timing(ScanTiming {
            dwell_us,
            ..self.timing
        })
    }

    /// Set the blanking time (µs)
    pub fn set_blanking_us(&mut self, blanking_us: u32) -> Result<(), ConfigError> {
        self.set_timing(ScanTiming {
            blanking_us,
            ..self.timing
        })
    }

    /// Check if one slot switch fits in a dwell window at the sink's speed
    pub fn fits_dwell(&self) -> bool {
        self.timing.fits(self.sink.step_interval_us())
    }

    /// Shared access to the sink
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Exclusive access to the sink
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Pattern encoder
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Slot, ScanError> {
        self.slots.get_mut(index).ok_or(ScanError::InvalidSlot)
    }

    fn deselect_all(&mut self) {
        for line in self.selectors.iter_mut() {
            line.deactivate();
        }
        self.active = None;
    }

    fn warn_if_overrun(&self) {
        #[cfg(feature = "defmt")]
        if !self.fits_dwell() {
            defmt::warn!(
                "slot switch needs {}us, dwell is {}us",
                self.timing.sequence_budget_us(self.sink.step_interval_us()),
                self.timing.dwell_us
            );
        }
    }
}

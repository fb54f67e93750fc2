//! Timing configuration for the driver and the scan engine

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of slots a scan engine can multiplex
pub const MAX_SLOTS: usize = 8;

/// Timed driver steps needed to put one pattern on the outputs:
/// one dequeue, two per bit, two for the latch pulse
pub const WRITE_SEQUENCE_STEPS: u32 = 1 + 8 * 2 + 2;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Dwell time of zero would never let a slot be seen
    ZeroDwell,
    /// Blanking must be strictly shorter than dwell
    BlankingNotBelowDwell,
    /// Scan engine needs at least one selector line
    NoSlots,
    /// More selector lines than [`MAX_SLOTS`]
    TooManySlots,
}

/// Shift register protocol timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriverTiming {
    /// Minimum time between two bus micro-steps (µs)
    pub step_interval_us: u32,
    /// Time between test pattern frames (µs)
    pub pattern_interval_us: u32,
}

impl Default for DriverTiming {
    fn default() -> Self {
        Self {
            step_interval_us: 1,        // NJU3711 is good for 5 MHz
            pattern_interval_us: 500_000, // 500 ms
        }
    }
}

/// Slot multiplexing timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanTiming {
    /// How long each slot stays selected (µs)
    pub dwell_us: u32,
    /// All-selectors-off gap between slots (µs)
    pub blanking_us: u32,
}

impl Default for ScanTiming {
    fn default() -> Self {
        Self {
            dwell_us: 2000,
            blanking_us: 50,
        }
    }
}

impl ScanTiming {
    /// Create a timing configuration
    pub const fn new(dwell_us: u32, blanking_us: u32) -> Self {
        Self {
            dwell_us,
            blanking_us,
        }
    }

    /// Check `dwell > 0` and `blanking < dwell`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dwell_us == 0 {
            return Err(ConfigError::ZeroDwell);
        }
        if self.blanking_us >= self.dwell_us {
            return Err(ConfigError::BlankingNotBelowDwell);
        }
        Ok(())
    }

    /// Minimum time one slot switch takes with the given bus step interval
    ///
    /// Each driver step takes at least one poll, so a zero step interval
    /// still costs a microsecond per step.
    pub fn sequence_budget_us(&self, step_interval_us: u32) -> u32 {
        let step = step_interval_us.max(1);
        self.blanking_us
            .saturating_add(step.saturating_mul(WRITE_SEQUENCE_STEPS))
    }

    /// Check if a full slot switch fits inside one dwell window
    ///
    /// When it does not, slots borrow time from each other and brightness
    /// becomes uneven.
    pub fn fits(&self, step_interval_us: u32) -> bool {
        self.sequence_budget_us(step_interval_us) < self.dwell_us
    }

    /// Length of one full cycle over `slots` slots (µs)
    pub fn cycle_us(&self, slots: usize) -> u32 {
        self.dwell_us.saturating_mul(slots as u32)
    }
}

/// Check a selector count against [`MAX_SLOTS`]
pub fn validate_slot_count(count: usize) -> Result<(), ConfigError> {
    match count {
        0 => Err(ConfigError::NoSlots),
        n if n > MAX_SLOTS => Err(ConfigError::TooManySlots),
        _ => Ok(()),
    }
}

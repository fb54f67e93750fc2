//! Shift register driver states

use crate::command::Command;

/// Two timed steps of a strobe or clear pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulsePhase {
    /// Next step pulls the line low
    Assert,
    /// Line is low; next step returns it high
    Release,
}

/// Clock line position while shifting one bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockPhase {
    /// Next step presents the data bit and raises the clock
    Low,
    /// Clock is high; next step lowers it and moves to the next bit
    High,
}

/// Synthesized test sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TestPatternKind {
    /// 0x00, 0xFF, 0x00, ...
    AllOnOff,
    /// 0x55, 0xAA, 0x55, ...
    Alternating,
    /// A single set bit walking from bit 0 to bit 7
    WalkingBit,
    /// 0, 1, 2, ... wrapping at 255
    Counter,
}

impl TestPatternKind {
    /// Payload for the given step
    pub fn payload(self, step: u8) -> u8 {
        match self {
            TestPatternKind::AllOnOff => {
                if step & 1 == 0 {
                    0x00
                } else {
                    0xFF
                }
            }
            TestPatternKind::Alternating => {
                if step & 1 == 0 {
                    0x55
                } else {
                    0xAA
                }
            }
            TestPatternKind::WalkingBit => 1 << (step % 8),
            TestPatternKind::Counter => step,
        }
    }

    /// Step that follows `step`
    pub fn advance(self, step: u8) -> u8 {
        match self {
            TestPatternKind::AllOnOff | TestPatternKind::Alternating => step ^ 1,
            TestPatternKind::WalkingBit | TestPatternKind::Counter => step.wrapping_add(1),
        }
    }
}

/// Shift register driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// Waiting for the next queued command
    Idle,
    /// Clocking out `command.payload`, MSB first, currently at `bit`
    Shifting {
        /// Write or ShiftOnly being executed
        command: Command,
        /// Bit index, 7 down to 0
        bit: u8,
        /// Clock line position for this bit
        clock: ClockPhase,
    },
    /// Pulsing the strobe line to latch the shift register
    Latching(PulsePhase),
    /// Pulsing the hardware clear line
    Clearing(PulsePhase),
    /// Waiting out the pattern interval before the next test frame
    TestPattern {
        /// Sequence being generated
        kind: TestPatternKind,
        /// Position in the sequence
        step: u8,
    },
}

impl DriverState {
    /// Check if the driver is idle
    pub fn is_idle(&self) -> bool {
        matches!(self, DriverState::Idle)
    }

    /// Check if a bus operation is mid-flight
    pub fn is_transferring(&self) -> bool {
        matches!(
            self,
            DriverState::Shifting { .. } | DriverState::Latching(_) | DriverState::Clearing(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(kind: TestPatternKind, frames: usize) -> heapless::Vec<u8, 16> {
        let mut out = heapless::Vec::new();
        let mut step = 0;
        for _ in 0..frames {
            out.push(kind.payload(step)).unwrap();
            step = kind.advance(step);
        }
        out
    }

    #[test]
    fn test_all_on_off_sequence() {
        assert_eq!(
            sequence(TestPatternKind::AllOnOff, 4).as_slice(),
            &[0x00, 0xFF, 0x00, 0xFF]
        );
    }

    #[test]
    fn test_alternating_sequence() {
        assert_eq!(
            sequence(TestPatternKind::Alternating, 3).as_slice(),
            &[0x55, 0xAA, 0x55]
        );
    }

    #[test]
    fn test_walking_bit_wraps() {
        assert_eq!(
            sequence(TestPatternKind::WalkingBit, 10).as_slice(),
            &[0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x01, 0x02]
        );
    }

    #[test]
    fn test_counter_wraps() {
        assert_eq!(TestPatternKind::Counter.payload(7), 7);
        assert_eq!(TestPatternKind::Counter.advance(255), 0);
    }

    #[test]
    fn test_state_predicates() {
        assert!(DriverState::Idle.is_idle());
        assert!(DriverState::Latching(PulsePhase::Assert).is_transferring());
        assert!(!DriverState::TestPattern {
            kind: TestPatternKind::Counter,
            step: 0
        }
        .is_transferring());
    }
}

//! Shift register commands

/// What a queued command does on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    /// Shift 8 bits MSB-first, then latch them to the outputs
    Write,
    /// Shift 8 bits MSB-first and leave them in the shift register
    ShiftOnly,
    /// Latch whatever the shift register currently holds
    LatchOnly,
    /// Clear the outputs
    Clear,
}

impl CommandKind {
    /// Check if this command shifts bits onto the data line
    pub fn shifts(self) -> bool {
        matches!(self, CommandKind::Write | CommandKind::ShiftOnly)
    }
}

/// A queued bus operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    /// Operation to perform
    pub kind: CommandKind,
    /// Byte to shift (ignored by latch and clear)
    pub payload: u8,
}

impl Command {
    /// Shift and latch a byte
    pub const fn write(payload: u8) -> Self {
        Self {
            kind: CommandKind::Write,
            payload,
        }
    }

    /// Shift a byte without latching
    pub const fn shift(payload: u8) -> Self {
        Self {
            kind: CommandKind::ShiftOnly,
            payload,
        }
    }

    /// Latch the shift register
    pub const fn latch() -> Self {
        Self {
            kind: CommandKind::LatchOnly,
            payload: 0,
        }
    }

    /// Clear the outputs
    pub const fn clear() -> Self {
        Self {
            kind: CommandKind::Clear,
            payload: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Command::write(0x5A).kind, CommandKind::Write);
        assert_eq!(Command::write(0x5A).payload, 0x5A);
        assert_eq!(Command::shift(0x01).kind, CommandKind::ShiftOnly);
        assert_eq!(Command::latch().kind, CommandKind::LatchOnly);
        assert_eq!(Command::clear().kind, CommandKind::Clear);
    }

    #[test]
    fn test_shifts() {
        assert!(CommandKind::Write.shifts());
        assert!(CommandKind::ShiftOnly.shifts());
        assert!(!CommandKind::LatchOnly.shifts());
        assert!(!CommandKind::Clear.shifts());
    }
}

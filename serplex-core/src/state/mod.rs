//! State machine definitions
//!
//! Two-phase pulses are explicit sub-states so every reachable state can
//! be enumerated and asserted on in tests.

pub mod driver;
pub mod scan;

pub use driver::{ClockPhase, DriverState, PulsePhase, TestPatternKind};
pub use scan::ScanState;

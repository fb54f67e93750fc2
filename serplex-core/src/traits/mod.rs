//! Capability traits
//!
//! The scan engine is composed over these rather than over a concrete
//! driver, so it only sees "submit a pattern" and "are you busy".

pub mod encoder;
pub mod sink;

pub use encoder::SlotEncoder;
pub use sink::PatternSink;

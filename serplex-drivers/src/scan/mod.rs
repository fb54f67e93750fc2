//! Slot multiplexing
//!
//! Time-division multiplexes several output slots through one shift
//! register, with one selector line per slot.

pub mod encoder;
pub mod engine;
pub mod selector;

pub use encoder::{Polarity, SegmentEncoder};
pub use engine::ScanEngine;
pub use selector::SelectorLine;

//! Board-agnostic core types for serplex
//!
//! This crate contains everything the drivers share that does not touch
//! a pin:
//!
//! - Commands and the bounded command queue
//! - Driver and scan state enums (every reachable state is a variant)
//! - Timing configuration and validation
//! - The narrow capability traits the scan engine composes over
//!   ([`traits::PatternSink`], [`traits::SlotEncoder`])

#![no_std]
#![deny(unsafe_code)]

// proptest needs std in unit tests
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod command;
pub mod config;
pub mod error;
pub mod queue;
pub mod slot;
pub mod state;
pub mod traits;

pub use command::{Command, CommandKind};
pub use error::{DriverError, ScanError};
pub use queue::{CommandQueue, QUEUE_CAPACITY};
pub use slot::Slot;

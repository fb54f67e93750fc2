//! Driver implementations
//!
//! This crate provides the two cooperative state machines built on the
//! traits in serplex-core:
//!
//! - Shift register protocol driver (NJU3711, 74HC595 and friends)
//! - Scan engine multiplexing N slots through one register
//!
//! Neither blocks. Both advance at most one timed step per `poll()`.

#![no_std]
#![deny(unsafe_code)]

// proptest needs std in unit tests
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod scan;
pub mod shift;

#[cfg(test)]
mod mock;

//! Configuration types
//!
//! Timing parameters are owned by the caller and may change at runtime.

pub mod timing;

pub use timing::*;

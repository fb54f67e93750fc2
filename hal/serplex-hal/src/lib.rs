//! Serplex Hardware Abstraction Layer
//!
//! This crate defines the two things the shift register driver and the
//! scan engine need from a board: digital output lines and a monotonic
//! microsecond clock. Chip HALs plug in through the `embedded-hal`
//! adapter or by implementing the traits directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (serplex-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  serplex-drivers (ShiftRegister, Scan)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  serplex-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │ embassy-time  │
//! │  OutputPin    │       │   Instant     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output line (never read back)
//! - [`clock::Clock`] - Wrapping microsecond counter

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use clock::{elapsed_us, Clock, Micros};
pub use gpio::{EhOutput, NoPin, OutputPin};

#[cfg(feature = "embassy-time")]
pub use clock::EmbassyClock;

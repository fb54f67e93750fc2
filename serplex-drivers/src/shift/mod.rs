//! Serial-to-parallel shift register driver

pub mod register;

pub use register::ShiftRegister;

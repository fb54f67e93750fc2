//! Embassy async tasks

pub mod feeder;
pub mod scan;

pub use feeder::feeder_task;
pub use scan::{scan_task, Display};

//! Serplex - multiplexed display demo firmware
//!
//! Drives a three-digit common-anode 7-segment display from one NJU3711
//! shift register on an RP2040 board. One task scans the digits, another
//! feeds it content.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use {defmt_rtt as _, panic_probe as _};

use serplex_core::config::ScanTiming;
use serplex_drivers::scan::{ScanEngine, SegmentEncoder, SelectorLine};
use serplex_drivers::shift::ShiftRegister;
use serplex_hal::EhOutput;

mod channels;
mod tasks;

/// 2 ms per digit, ~167 Hz refresh over three digits
const SCAN_TIMING: ScanTiming = ScanTiming::new(2000, 50);

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Serplex firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Register lines: DATA=GPIO2, CLK=GPIO3, STB=GPIO4 (CLR strapped high)
    let register = ShiftRegister::new(
        EhOutput::new(Output::new(p.PIN_2, Level::Low)),
        EhOutput::new(Output::new(p.PIN_3, Level::Low)),
        EhOutput::new(Output::new(p.PIN_4, Level::High)),
    );

    // Digit anodes through PNP high-side switches on GPIO5-7
    let selectors = [
        SelectorLine::active_low(EhOutput::new(Output::new(p.PIN_5, Level::High))),
        SelectorLine::active_low(EhOutput::new(Output::new(p.PIN_6, Level::High))),
        SelectorLine::active_low(EhOutput::new(Output::new(p.PIN_7, Level::High))),
    ];

    let display: tasks::Display = match ScanEngine::new(
        register,
        selectors,
        SegmentEncoder::default(),
        SCAN_TIMING,
    ) {
        Ok(display) => display,
        Err(e) => {
            error!("Invalid display configuration: {}", e);
            loop {
                cortex_m::asm::wfi();
            }
        }
    };

    info!(
        "Display: {} digits, {}us dwell, {}us blanking, {}us cycle",
        display.slot_count(),
        SCAN_TIMING.dwell_us,
        SCAN_TIMING.blanking_us,
        SCAN_TIMING.cycle_us(display.slot_count())
    );

    spawner.spawn(tasks::scan_task(display)).unwrap();
    spawner.spawn(tasks::feeder_task()).unwrap();

    info!("All tasks spawned");
}

//! Display scan task
//!
//! Polls the scan engine as fast as the executor allows and applies
//! display requests between polls. The engine never blocks, so the task
//! yields after every poll to let other tasks run.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::gpio::Output;

use serplex_drivers::scan::ScanEngine;
use serplex_drivers::shift::ShiftRegister;
use serplex_hal::{Clock, EhOutput, EmbassyClock};

use crate::channels::{DisplayCommand, Frame, DISPLAY_CMD};

/// GPIO line as seen by the drivers
pub type Line = EhOutput<Output<'static>>;

/// Register with CLR strapped high
pub type Register = ShiftRegister<Line, Line, Line>;

/// The board's digit multiplexer
pub type Display = ScanEngine<Register, Line>;

/// Scan task - owns the display and keeps it multiplexing
#[embassy_executor::task]
pub async fn scan_task(mut display: Display) {
    info!("Scan task started ({} digits)", display.slot_count());

    let clock = EmbassyClock;
    display.begin(clock.now_us());

    loop {
        if let Some(command) = DISPLAY_CMD.try_take() {
            apply(&mut display, command);
        }

        display.update(&clock);
        yield_now().await;
    }
}

fn apply(display: &mut Display, command: DisplayCommand) {
    match command {
        DisplayCommand::Show(frame) => show(display, &frame),
        DisplayCommand::Blank => display.clear_display(),
    }
}

fn show(display: &mut Display, frame: &Frame) {
    for (digit, pattern) in frame.patterns.iter().enumerate() {
        let point = frame.points & (1 << digit) != 0;
        if display.set_slot(digit, *pattern, point).is_err() {
            warn!("Frame has more digits than the display ({})", digit);
            break;
        }
    }
}

//! Display feeder task
//!
//! Produces the demo content: a lamp test, then a single segment chasing
//! around the outer ring of every digit, blanking briefly after each lap.

use defmt::*;
use embassy_time::{Duration, Ticker, Timer};

use crate::channels::{DisplayCommand, Frame, DIGITS, DISPLAY_CMD};

/// Time per animation step
const STEP_MS: u64 = 150;

/// Lamp test duration at boot
const LAMP_TEST_MS: u64 = 1000;

/// Blank gap between laps
const LAP_GAP_MS: u64 = 300;

/// Outer ring segments A..F (A in bit 7)
const RING: [u8; 6] = [0x80, 0x40, 0x20, 0x10, 0x08, 0x04];

/// Every segment of every digit, points included
const LAMP_TEST: Frame = Frame {
    patterns: [0xFE; DIGITS],
    points: (1 << DIGITS) - 1,
};

/// Frame for one chase step; neighbouring digits are two segments apart
fn chase_frame(step: usize) -> Frame {
    let mut patterns = [0u8; DIGITS];
    for (digit, pattern) in patterns.iter_mut().enumerate() {
        *pattern = RING[(step + digit * 2) % RING.len()];
    }
    Frame {
        patterns,
        points: 1 << (step % DIGITS),
    }
}

/// Feeder task - the display's only content source
#[embassy_executor::task]
pub async fn feeder_task() {
    info!("Feeder task started");

    DISPLAY_CMD.signal(DisplayCommand::Show(LAMP_TEST));
    Timer::after(Duration::from_millis(LAMP_TEST_MS)).await;

    let mut ticker = Ticker::every(Duration::from_millis(STEP_MS));
    let mut step = 0usize;

    loop {
        DISPLAY_CMD.signal(DisplayCommand::Show(chase_frame(step)));
        ticker.next().await;

        step = (step + 1) % RING.len();
        if step == 0 {
            debug!("Chase lap complete");
            DISPLAY_CMD.signal(DisplayCommand::Blank);
            Timer::after(Duration::from_millis(LAP_GAP_MS)).await;
            ticker.reset();
        }
    }
}

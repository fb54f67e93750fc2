//! Simulated register board for tests
//!
//! Every line writes into one shared [`Board`], which behaves like a
//! serial-in/parallel-out register: rising clock edges shift the data
//! level in, a falling strobe copies the shift stage to the outputs and a
//! falling clear zeroes them. Selector lines are active-high.

use core::cell::RefCell;

use heapless::Vec;
use serplex_hal::{Micros, OutputPin};

pub(crate) const SELECTORS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BusEvent {
    Latched { at: Micros, value: u8 },
    Cleared { at: Micros },
    Selected { at: Micros, slot: usize },
    Deselected { at: Micros, slot: usize },
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Line {
    Data,
    Clock,
    Strobe,
    Clear,
    Selector(usize),
}

pub(crate) struct Board {
    /// Timestamp stamped on events; tests advance it alongside polls
    pub now: Micros,
    data: bool,
    clock: bool,
    strobe: bool,
    clear: bool,
    stage: u8,
    bits: u8,
    /// Parallel outputs
    pub outputs: u8,
    /// Every completed 8-bit shift, in bus order
    pub bytes: Vec<u8, 64>,
    pub selectors: [bool; SELECTORS],
    /// Highest number of selectors seen active at once
    pub max_active: usize,
    pub events: Vec<BusEvent, 1024>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            now: 0,
            data: false,
            clock: false,
            strobe: true,
            clear: true,
            stage: 0,
            bits: 0,
            outputs: 0,
            bytes: Vec::new(),
            selectors: [false; SELECTORS],
            max_active: 0,
            events: Vec::new(),
        }
    }

    pub fn active_count(&self) -> usize {
        self.selectors.iter().filter(|s| **s).count()
    }

    pub fn latch_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BusEvent::Latched { .. }))
            .count()
    }

    fn record(&mut self, event: BusEvent) {
        let _ = self.events.push(event);
    }

    fn drive(&mut self, line: Line, high: bool) {
        let at = self.now;
        match line {
            Line::Data => self.data = high,
            Line::Clock => {
                if high && !self.clock {
                    self.stage = (self.stage << 1) | self.data as u8;
                    self.bits += 1;
                    if self.bits == 8 {
                        let _ = self.bytes.push(self.stage);
                        self.bits = 0;
                    }
                }
                self.clock = high;
            }
            Line::Strobe => {
                if !high && self.strobe {
                    self.outputs = self.stage;
                    self.record(BusEvent::Latched {
                        at,
                        value: self.outputs,
                    });
                }
                self.strobe = high;
            }
            Line::Clear => {
                if !high && self.clear {
                    self.outputs = 0;
                    self.record(BusEvent::Cleared { at });
                }
                self.clear = high;
            }
            Line::Selector(slot) => {
                let was = self.selectors[slot];
                self.selectors[slot] = high;
                if high && !was {
                    self.record(BusEvent::Selected { at, slot });
                    self.max_active = self.max_active.max(self.active_count());
                } else if !high && was {
                    self.record(BusEvent::Deselected { at, slot });
                }
            }
        }
    }
}

pub(crate) struct MockLine<'a> {
    board: &'a RefCell<Board>,
    line: Line,
}

impl<'a> MockLine<'a> {
    pub fn new(board: &'a RefCell<Board>, line: Line) -> Self {
        Self { board, line }
    }
}

impl OutputPin for MockLine<'_> {
    fn set_high(&mut self) {
        self.board.borrow_mut().drive(self.line, true);
    }

    fn set_low(&mut self) {
        self.board.borrow_mut().drive(self.line, false);
    }
}

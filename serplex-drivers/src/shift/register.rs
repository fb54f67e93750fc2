//! Non-blocking serial-to-parallel register driver
//!
//! Drives an NJU3711-style register (DATA, CLK, STB and an optional CLR)
//! from a polling loop. Operations are queued and then clocked out one
//! timed micro-step per [`ShiftRegister::poll`] call:
//!
//! ```text
//!  Idle ──dequeue──► Shifting(7..0) ──Write──► Latching ──► Idle
//!    │                     └──ShiftOnly──────────────────► Idle
//!    ├──LatchOnly──► Latching ──► Idle
//!    └──Clear─────► Clearing ──► Idle     (hardware CLR only)
//! ```
//!
//! Each bit takes two steps (data + clock high, then clock low); each
//! pulse takes two steps (line low, then high).
//!
//! # Usage
//!
//! ```ignore
//! let mut reg = ShiftRegister::new(data, clock, strobe);
//! reg.begin(clock.now_us());
//! reg.write(0b1010_0101)?;
//!
//! loop {
//!     reg.poll(clock.now_us());
//! }
//! ```

use serplex_core::config::DriverTiming;
use serplex_core::state::{ClockPhase, DriverState, PulsePhase, TestPatternKind};
use serplex_core::traits::PatternSink;
use serplex_core::{Command, CommandKind, CommandQueue, DriverError};
use serplex_hal::{elapsed_us, Clock, Micros, NoPin, OutputPin};

/// Running test pattern bookkeeping
#[derive(Debug, Clone, Copy)]
struct TestRun {
    kind: TestPatternKind,
    step: u8,
    last_frame: Micros,
}

/// Shift register driver
///
/// The clear line is optional. Without it, clears are queued as a write
/// of `0x00` in the clear's own queue position.
pub struct ShiftRegister<D, C, S, R = NoPin> {
    data: D,
    clock: C,
    strobe: S,
    clear: Option<R>,
    timing: DriverTiming,
    state: DriverState,
    queue: CommandQueue,
    /// Value last latched to the outputs
    current: u8,
    /// Value the shift stage holds
    stage: u8,
    /// Outputs once every queued command has run
    projected: u8,
    /// Shift stage once every queued command has run
    projected_stage: u8,
    last_step: Micros,
    test_run: Option<TestRun>,
}

impl<D, C, S> ShiftRegister<D, C, S, NoPin>
where
    D: OutputPin,
    C: OutputPin,
    S: OutputPin,
{
    /// Create a driver for a register with CLR strapped high
    pub fn new(data: D, clock: C, strobe: S) -> Self {
        Self::build(data, clock, strobe, None)
    }
}

impl<D, C, S, R> ShiftRegister<D, C, S, R>
where
    D: OutputPin,
    C: OutputPin,
    S: OutputPin,
    R: OutputPin,
{
    /// Create a driver with a hardware clear line
    pub fn with_clear(data: D, clock: C, strobe: S, clear: R) -> Self {
        Self::build(data, clock, strobe, Some(clear))
    }

    fn build(data: D, clock: C, strobe: S, clear: Option<R>) -> Self {
        Self {
            data,
            clock,
            strobe,
            clear,
            timing: DriverTiming::default(),
            state: DriverState::Idle,
            queue: CommandQueue::new(),
            current: 0,
            stage: 0,
            projected: 0,
            projected_stage: 0,
            last_step: 0,
            test_run: None,
        }
    }

    /// Drive idle line levels, reset in place and queue a clear
    ///
    /// STB idles high (shifting), CLR idles high (outputs enabled).
    pub fn begin(&mut self, now: Micros) {
        self.data.set_low();
        self.clock.set_low();
        self.strobe.set_high();
        if let Some(clear) = self.clear.as_mut() {
            clear.set_high();
        }

        self.state = DriverState::Idle;
        self.queue.clear();
        self.test_run = None;
        self.current = 0;
        self.stage = 0;
        self.projected = 0;
        self.projected_stage = 0;
        self.last_step = now;

        // The queue was just emptied, so the push always succeeds
        let blank = self.blank_command();
        if self.queue.push(blank).is_ok() {
            self.project(blank);
        }
    }

    /// Advance at most one micro-step
    ///
    /// Does nothing until `step_interval_us` has passed since the last
    /// step that touched a line.
    pub fn poll(&mut self, now: Micros) {
        if elapsed_us(self.last_step, now) < self.timing.step_interval_us {
            return;
        }

        match self.state {
            DriverState::Idle => {
                if let Some(command) = self.queue.pop() {
                    self.start(command, now);
                }
            }
            DriverState::Shifting {
                command,
                bit,
                clock: ClockPhase::Low,
            } => {
                self.data.set_state((command.payload >> bit) & 0x01 != 0);
                self.clock.set_high();
                self.state = DriverState::Shifting {
                    command,
                    bit,
                    clock: ClockPhase::High,
                };
                self.last_step = now;
            }
            DriverState::Shifting {
                command,
                bit,
                clock: ClockPhase::High,
            } => {
                self.clock.set_low();
                self.last_step = now;

                if bit > 0 {
                    self.state = DriverState::Shifting {
                        command,
                        bit: bit - 1,
                        clock: ClockPhase::Low,
                    };
                } else {
                    self.stage = command.payload;
                    self.state = if command.kind == CommandKind::Write {
                        DriverState::Latching(PulsePhase::Assert)
                    } else {
                        self.resting_state()
                    };
                }
            }
            DriverState::Latching(PulsePhase::Assert) => {
                self.strobe.set_low();
                self.state = DriverState::Latching(PulsePhase::Release);
                self.last_step = now;
            }
            DriverState::Latching(PulsePhase::Release) => {
                self.strobe.set_high();
                self.current = self.stage;
                self.state = self.resting_state();
                self.last_step = now;
            }
            DriverState::Clearing(PulsePhase::Assert) => {
                if let Some(clear) = self.clear.as_mut() {
                    clear.set_low();
                }
                self.state = DriverState::Clearing(PulsePhase::Release);
                self.last_step = now;
            }
            DriverState::Clearing(PulsePhase::Release) => {
                if let Some(clear) = self.clear.as_mut() {
                    clear.set_high();
                }
                self.current = 0;
                self.state = self.resting_state();
                self.last_step = now;
            }
            DriverState::TestPattern { .. } => self.step_test_pattern(now),
        }
    }

    /// Poll using a clock
    pub fn update<K: Clock>(&mut self, clock: &K) {
        self.poll(clock.now_us());
    }

    /// Check if any command is queued or in flight
    ///
    /// A running test pattern counts as busy.
    pub fn is_busy(&self) -> bool {
        !self.state.is_idle() || !self.queue.is_empty()
    }

    /// Value last latched to the outputs
    ///
    /// This is a cache, not a read-back.
    pub fn current_value(&self) -> u8 {
        self.current
    }

    /// Value the outputs will hold once the queue drains
    pub fn projected_value(&self) -> u8 {
        self.projected
    }

    /// Current state machine state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Check if a hardware clear line is wired
    pub fn has_clear_line(&self) -> bool {
        self.clear.is_some()
    }

    /// Queue a command
    ///
    /// Fails with [`DriverError::QueueFull`] and changes nothing when the
    /// queue is full. Any accepted command cancels a running test pattern.
    pub fn submit(&mut self, command: Command) -> Result<(), DriverError> {
        let command = match command.kind {
            CommandKind::Clear => self.blank_command(),
            _ => command,
        };

        if let Err(e) = self.queue.push(command) {
            #[cfg(feature = "defmt")]
            defmt::warn!("shift queue full, dropped {}", command);
            return Err(e);
        }

        self.project(command);
        self.stop_test_pattern();
        Ok(())
    }

    /// Shift and latch a byte
    pub fn write(&mut self, value: u8) -> Result<(), DriverError> {
        self.submit(Command::write(value))
    }

    /// Shift a byte without latching it
    pub fn shift(&mut self, value: u8) -> Result<(), DriverError> {
        self.submit(Command::shift(value))
    }

    /// Latch the shift stage to the outputs
    pub fn latch(&mut self) -> Result<(), DriverError> {
        self.submit(Command::latch())
    }

    /// Clear the outputs
    pub fn clear(&mut self) -> Result<(), DriverError> {
        self.submit(Command::clear())
    }

    /// Set one output bit
    pub fn set_bit(&mut self, bit: u8) -> Result<(), DriverError> {
        let mask = Self::bit_mask(bit)?;
        self.write(self.projected | mask)
    }

    /// Clear one output bit
    pub fn clear_bit(&mut self, bit: u8) -> Result<(), DriverError> {
        let mask = Self::bit_mask(bit)?;
        self.write(self.projected & !mask)
    }

    /// Toggle one output bit
    pub fn toggle_bit(&mut self, bit: u8) -> Result<(), DriverError> {
        let mask = Self::bit_mask(bit)?;
        self.write(self.projected ^ mask)
    }

    /// Set one output bit to `value`
    pub fn write_bit(&mut self, bit: u8, value: bool) -> Result<(), DriverError> {
        if value {
            self.set_bit(bit)
        } else {
            self.clear_bit(bit)
        }
    }

    /// Number of commands waiting in the queue
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Drop pending commands
    ///
    /// A command already on the bus runs to completion.
    pub fn clear_queue(&mut self) {
        self.queue.clear();

        let (outputs, stage) = match self.state {
            DriverState::Shifting { command, .. } if command.kind == CommandKind::Write => {
                (command.payload, command.payload)
            }
            DriverState::Shifting { command, .. } => (self.current, command.payload),
            DriverState::Latching(_) => (self.stage, self.stage),
            DriverState::Clearing(_) => (0, self.stage),
            _ => (self.current, self.stage),
        };
        self.projected = outputs;
        self.projected_stage = stage;
    }

    /// Start a synthesized test sequence
    ///
    /// The first frame goes out one `interval_us` after `now`. Refused
    /// with [`DriverError::Busy`] while other work is outstanding.
    pub fn start_test_pattern(
        &mut self,
        kind: TestPatternKind,
        interval_us: u32,
        now: Micros,
    ) -> Result<(), DriverError> {
        if self.is_busy() {
            return Err(DriverError::Busy);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("test pattern {} every {}us", kind, interval_us);

        self.timing.pattern_interval_us = interval_us;
        self.test_run = Some(TestRun {
            kind,
            step: 0,
            last_frame: now,
        });
        self.state = DriverState::TestPattern { kind, step: 0 };
        Ok(())
    }

    /// Stop the test sequence
    ///
    /// A frame already on the bus finishes; the driver then goes idle.
    pub fn stop_test_pattern(&mut self) {
        if self.test_run.take().is_some() {
            #[cfg(feature = "defmt")]
            defmt::debug!("test pattern stopped");
        }
        if let DriverState::TestPattern { .. } = self.state {
            self.state = DriverState::Idle;
        }
    }

    /// Running test sequence, if any
    pub fn test_pattern(&self) -> Option<TestPatternKind> {
        self.test_run.map(|run| run.kind)
    }

    /// Current timing
    pub fn timing(&self) -> DriverTiming {
        self.timing
    }

    /// Replace the timing
    pub fn set_timing(&mut self, timing: DriverTiming) {
        self.timing = timing;
    }

    /// Set the minimum time between bus steps (µs)
    pub fn set_step_interval(&mut self, step_interval_us: u32) {
        self.timing.step_interval_us = step_interval_us;
    }

    /// Clear as the bus will run it: a pulse on CLR, or a write of zero
    /// when CLR is strapped
    fn blank_command(&self) -> Command {
        match self.clear {
            Some(_) => Command::clear(),
            None => Command::write(0x00),
        }
    }

    fn bit_mask(bit: u8) -> Result<u8, DriverError> {
        if bit > 7 {
            return Err(DriverError::InvalidBit);
        }
        Ok(1 << bit)
    }

    fn start(&mut self, command: Command, now: Micros) {
        self.state = match command.kind {
            kind if kind.shifts() => {
                self.strobe.set_high();
                DriverState::Shifting {
                    command,
                    bit: 7,
                    clock: ClockPhase::Low,
                }
            }
            CommandKind::Clear => DriverState::Clearing(PulsePhase::Assert),
            _ => DriverState::Latching(PulsePhase::Assert),
        };
        self.last_step = now;
    }

    fn step_test_pattern(&mut self, now: Micros) {
        let interval = self.timing.pattern_interval_us;
        let Some(run) = self.test_run.as_mut() else {
            self.state = DriverState::Idle;
            return;
        };
        if elapsed_us(run.last_frame, now) < interval {
            return;
        }

        let payload = run.kind.payload(run.step);
        run.step = run.kind.advance(run.step);
        run.last_frame = now;

        let frame = Command::write(payload);
        self.project(frame);
        self.start(frame, now);
    }

    /// State to return to once a bus operation completes
    fn resting_state(&self) -> DriverState {
        match self.test_run {
            Some(run) => DriverState::TestPattern {
                kind: run.kind,
                step: run.step,
            },
            None => DriverState::Idle,
        }
    }

    fn project(&mut self, command: Command) {
        match command.kind {
            CommandKind::Write => {
                self.projected_stage = command.payload;
                self.projected = command.payload;
            }
            CommandKind::ShiftOnly => self.projected_stage = command.payload,
            CommandKind::LatchOnly => self.projected = self.projected_stage,
            CommandKind::Clear => self.projected = 0,
        }
    }
}

impl<D, C, S, R> PatternSink for ShiftRegister<D, C, S, R>
where
    D: OutputPin,
    C: OutputPin,
    S: OutputPin,
    R: OutputPin,
{
    fn begin(&mut self, now: Micros) {
        ShiftRegister::begin(self, now);
    }

    fn poll(&mut self, now: Micros) {
        ShiftRegister::poll(self, now);
    }

    fn submit_pattern(&mut self, pattern: u8) -> Result<(), DriverError> {
        self.write(pattern)
    }

    fn is_busy(&self) -> bool {
        ShiftRegister::is_busy(self)
    }

    fn step_interval_us(&self) -> u32 {
        self.timing.step_interval_us
    }
}

//! Command surface for front ends.
//!
//! Wraps the [`Sequencer`] with the operations a user interface offers:
//! direct manipulation of the machine, loading an algorithm from operand
//! text, and playback control. Every command returns the resulting
//! [`Snapshot`].

use std::time::{Duration, Instant};
use crate::algo::{self, parse_integer, Algorithm, AlgorithmError};
use crate::decimal::Decimal;
use crate::machine::{Shift, Turn};
use crate::sequencer::{PlaybackConfig, Sequencer, Snapshot};

/// A Brunsviga 13 RK with an operator's step player attached.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    sequencer: Sequencer,
}

impl Calculator {
    /// A cleared calculator with default playback settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// A cleared calculator with the given playback settings.
    pub fn with_config(config: PlaybackConfig) -> Self {
        Self {
            sequencer: Sequencer::new(config),
        }
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn snapshot(&self) -> Snapshot {
        self.sequencer.snapshot()
    }

    // ==================== Manual operation ====================

    pub fn clear_result(&mut self) -> Snapshot {
        self.sequencer.machine_mut().clear_result();
        self.snapshot()
    }

    pub fn clear_input(&mut self) -> Snapshot {
        self.sequencer.machine_mut().clear_input();
        self.snapshot()
    }

    pub fn clear_revolution(&mut self) -> Snapshot {
        self.sequencer.machine_mut().clear_revolution();
        self.snapshot()
    }

    /// Turn one setting wheel up, 9 wrapping to 0. Positions past the last
    /// wheel are ignored.
    pub fn increment_input_digit(&mut self, position: usize) -> Snapshot {
        self.sequencer.machine_mut().increment_input_digit(position);
        self.snapshot()
    }

    /// Turn one setting wheel down, 0 wrapping to 9.
    pub fn decrement_input_digit(&mut self, position: usize) -> Snapshot {
        self.sequencer.machine_mut().decrement_input_digit(position);
        self.snapshot()
    }

    pub fn move_carriage(&mut self, shift: Shift) -> Snapshot {
        self.sequencer.machine_mut().move_carriage(shift);
        self.snapshot()
    }

    pub fn crank(&mut self, turn: Turn) -> Snapshot {
        self.sequencer.machine_mut().crank(turn);
        self.snapshot()
    }

    // ==================== Algorithms ====================

    fn load(&mut self, generated: Result<Algorithm, AlgorithmError>) -> Result<&Algorithm, AlgorithmError> {
        Ok(self.sequencer.load(generated?))
    }

    pub fn run_addition(&mut self, a: &str, b: &str) -> Result<&Algorithm, AlgorithmError> {
        let generated = algo::addition(parse_integer(a)?, parse_integer(b)?);
        self.load(generated)
    }

    pub fn run_subtraction(&mut self, a: &str, b: &str) -> Result<&Algorithm, AlgorithmError> {
        let generated = algo::subtraction(parse_integer(a)?, parse_integer(b)?);
        self.load(generated)
    }

    pub fn run_multiplication(&mut self, a: &str, b: &str) -> Result<&Algorithm, AlgorithmError> {
        let generated = algo::multiplication(parse_integer(a)?, parse_integer(b)?);
        self.load(generated)
    }

    pub fn run_division(&mut self, a: &str, b: &str) -> Result<&Algorithm, AlgorithmError> {
        let generated = algo::division(parse_integer(a)?, parse_integer(b)?);
        self.load(generated)
    }

    /// Decimal division; operands may use `.` or `,` as the separator.
    pub fn run_decimal_division(&mut self, a: &str, b: &str) -> Result<&Algorithm, AlgorithmError> {
        let generated = algo::decimal_division(&Decimal::parse(a)?, &Decimal::parse(b)?);
        self.load(generated)
    }

    pub fn run_square_root(&mut self, a: &str) -> Result<&Algorithm, AlgorithmError> {
        let generated = algo::square_root(&Decimal::parse(a)?);
        self.load(generated)
    }

    // ==================== Playback ====================

    /// Start timed playback with the given step interval.
    pub fn play(&mut self, interval: Duration, now: Instant) -> Snapshot {
        self.sequencer.set_interval(interval);
        self.sequencer.play(now);
        self.snapshot()
    }

    pub fn pause(&mut self) -> Snapshot {
        self.sequencer.pause();
        self.snapshot()
    }

    pub fn step_forward(&mut self) -> Snapshot {
        self.sequencer.step_forward();
        self.snapshot()
    }

    pub fn step_back(&mut self) -> Snapshot {
        self.sequencer.step_back();
        self.snapshot()
    }

    pub fn stop(&mut self) -> Snapshot {
        self.sequencer.stop();
        self.snapshot()
    }

    /// Drive timed playback; returns a snapshot only when a step was applied.
    pub fn tick(&mut self, now: Instant) -> Option<Snapshot> {
        self.sequencer.tick(now).then(|| self.snapshot())
    }

    /// Apply every remaining step at once.
    pub fn run_to_end(&mut self) -> Snapshot {
        self.sequencer.run_to_end();
        self.snapshot()
    }
}

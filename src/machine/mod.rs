//! The Brunsviga 13 RK mechanism.
//!
//! This module models the physical state of the calculator:
//! - Result register: 13-digit accumulator, with an optional decimal marker
//! - Input register: 13 setting wheels holding the operand
//! - Carriage: offset between the two, from -6 to +6
//! - Revolution counter: 8-digit signed tally of crank turns

pub mod register;
pub mod carriage;
pub mod crank;
pub mod counter;

pub use register::DigitRegister;
pub use carriage::{Carriage, Shift, CARRIAGE_MIN, CARRIAGE_MAX};
pub use crank::{apply_crank, Turn};
pub use counter::{RevolutionCounter, COUNTER_WIDTH};

use log::debug;
use serde::{Serialize, Deserialize};
use crate::decimal::Decimal;

/// Width of the result register.
pub const RESULT_WIDTH: usize = 13;

/// Width of the input register.
pub const INPUT_WIDTH: usize = 13;

/// The 13-digit accumulator.
pub type ResultRegister = DigitRegister<RESULT_WIDTH>;

/// The 13 setting wheels.
pub type InputRegister = DigitRegister<INPUT_WIDTH>;

/// Complete machine state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Machine {
    /// Result register (accumulator).
    pub result: ResultRegister,
    /// Index of the first fractional digit in the result register, if the
    /// value was set as a decimal.
    pub decimal_marker: Option<usize>,
    /// Input register (setting mechanism).
    pub input: InputRegister,
    /// Carriage.
    pub carriage: Carriage,
    /// Revolution counter.
    pub counter: RevolutionCounter,
}

impl Machine {
    /// Create a machine with every register cleared and the carriage home.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything and bring the carriage home.
    pub fn reset(&mut self) {
        self.result.clear();
        self.decimal_marker = None;
        self.input.clear();
        self.carriage.home();
        self.counter.clear();
    }

    /// Clear the result register (and its decimal marker).
    pub fn clear_result(&mut self) {
        self.result.clear();
        self.decimal_marker = None;
    }

    /// Clear the input register.
    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Clear the revolution counter.
    pub fn clear_revolution(&mut self) {
        self.counter.clear();
    }

    /// Set the input register to a value, right-aligned.
    pub fn set_input(&mut self, value: u64) {
        self.input.set_value(value);
    }

    /// Set the input register with the value's units wheel at `rightmost`.
    pub fn set_input_at(&mut self, value: u64, rightmost: usize) {
        self.input.place_value(value, rightmost);
    }

    /// Set the result register to an integer value.
    pub fn set_result(&mut self, value: u64) {
        self.result.set_value(value);
        self.decimal_marker = None;
    }

    /// Set the result register to `|value|` shown with `places` fractional
    /// digits. The marker points at the first fractional wheel.
    pub fn set_result_decimal(&mut self, value: &Decimal, places: u32) {
        self.result.set_big(&value.rescaled_digits(places));
        self.decimal_marker = if places == 0 {
            None
        } else {
            Some(RESULT_WIDTH.saturating_sub(places as usize))
        };
    }

    /// Advance one input wheel, wrapping 9 to 0.
    pub fn increment_input_digit(&mut self, position: usize) {
        self.input.increment(position);
    }

    /// Move one input wheel back, wrapping 0 to 9.
    pub fn decrement_input_digit(&mut self, position: usize) {
        self.input.decrement(position);
    }

    /// Move the carriage one notch; ignored against the stops.
    pub fn move_carriage(&mut self, shift: Shift) {
        if !self.carriage.shift(shift) {
            debug!("carriage already at {}, {} shift ignored", self.carriage.position(), shift);
        }
    }

    /// Turn the crank once.
    pub fn crank(&mut self, turn: Turn) {
        let offset = self.carriage.position();
        let lost = apply_crank(&mut self.result, &self.input, offset, turn);
        if lost != 0 {
            debug!("crank {} at carriage {} lost carry {}", turn, offset, lost);
        }
        self.counter.update(offset, turn);
    }
}

//! Revolution counter.
//!
//! An 8-digit sign-magnitude tally of crank turns. Which digit a turn lands
//! on depends on the carriage: at carriage 0 a turn counts units, at -1 tens,
//! and so on. Backward turns drive the tally negative (the machine shows
//! these digits in red), which is how quotients and roots are read off.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::machine::crank::Turn;
use crate::machine::register::DigitRegister;

/// Number of counter digits.
pub const COUNTER_WIDTH: usize = 8;

/// Carriage position + bias = counter index. Carriage 0 maps to the units
/// digit (index 7); positive carriage positions fall off the right end.
pub const COUNTER_BIAS: i8 = COUNTER_WIDTH as i8 - 1;

const MODULUS: u64 = 100_000_000;

/// Signed, carriage-indexed revolution counter.
#[derive(Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RevolutionCounter {
    digits: DigitRegister<COUNTER_WIDTH>,
    negative: bool,
}

impl RevolutionCounter {
    /// A counter showing zero.
    pub const fn new() -> Self {
        Self {
            digits: DigitRegister::zero(),
            negative: false,
        }
    }

    /// Digits, most significant first.
    pub fn digits(&self) -> &[u8; COUNTER_WIDTH] {
        self.digits.digits()
    }

    /// True when the tally is below zero.
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// Signed tally.
    pub fn value(&self) -> i64 {
        let magnitude = self.digits.value() as i64;
        if self.negative { -magnitude } else { magnitude }
    }

    /// Record one crank turn at the given carriage position.
    ///
    /// Positions whose index falls outside the counter are not recorded.
    pub fn update(&mut self, carriage: i8, turn: Turn) {
        let index = carriage as i16 + COUNTER_BIAS as i16;
        if index < 0 || index >= COUNTER_WIDTH as i16 {
            return;
        }
        let exponent = (COUNTER_WIDTH as i16 - 1 - index) as u32;
        let next = self.value() + turn.sign() as i64 * 10i64.pow(exponent);

        self.negative = next < 0;
        self.digits.set_value(next.unsigned_abs() % MODULUS);
        if self.digits.is_zero() {
            self.negative = false;
        }
    }

    /// Reset to zero.
    pub fn clear(&mut self) {
        self.digits.clear();
        self.negative = false;
    }
}

impl fmt::Debug for RevolutionCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RevolutionCounter({})", self)
    }
}

impl fmt::Display for RevolutionCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", if self.negative { "-" } else { "+" }, self.digits)
    }
}

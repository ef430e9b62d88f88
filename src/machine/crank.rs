//! The crank: one turn adds (or subtracts) the input register into the
//! result register with ripple carry.
//!
//! The pass runs from the units wheel of the input register towards the
//! most significant one, so every carry or borrow is already known when the
//! next wheel is processed.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::machine::register::DigitRegister;

/// Direction of a crank turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// Clockwise: add the input register.
    Forward,
    /// Counter-clockwise: subtract the input register.
    Backward,
}

impl Turn {
    /// +1 for forward, -1 for backward.
    #[inline]
    pub const fn sign(self) -> i8 {
        match self {
            Turn::Forward => 1,
            Turn::Backward => -1,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Forward => write!(f, "forward"),
            Turn::Backward => write!(f, "backward"),
        }
    }
}

/// Add a digit, an incoming carry and the current wheel value.
/// Returns `(new_digit, carry_out)`.
#[inline]
fn ripple(wheel: u8, delta: i8, carry: i8) -> (u8, i8) {
    let mut value = wheel as i8 + delta + carry;
    if value > 9 {
        let carry_out = value / 10;
        value -= carry_out * 10;
        (value as u8, carry_out)
    } else if value < 0 {
        ((value + 10) as u8, -1)
    } else {
        (value as u8, 0)
    }
}

/// Apply one crank turn.
///
/// Input wheel `i` is combined into result wheel `i + offset`, where
/// `offset` is the carriage position. Contributions that fall outside the
/// result register are dropped. A carry still pending after the last input
/// wheel keeps running through the higher result wheels; a carry out of the
/// leftmost wheel is lost.
///
/// Returns the lost carry (0 when nothing overflowed).
pub fn apply_crank<const R: usize, const I: usize>(
    result: &mut DigitRegister<R>,
    input: &DigitRegister<I>,
    offset: i8,
    turn: Turn,
) -> i8 {
    let sign = turn.sign();
    let mut carry: i8 = 0;
    let mut highest: Option<usize> = None;

    for i in (0..I).rev() {
        let adjusted = i as isize + offset as isize;
        if adjusted < 0 || adjusted >= R as isize {
            continue;
        }
        let idx = adjusted as usize;
        let (digit, carry_out) = ripple(result.get(idx), input.get(i) as i8 * sign, carry);
        result.set(idx, digit);
        carry = carry_out;
        highest = Some(idx);
    }

    // Finish the carry through the wheels left of the input's reach
    let mut idx = match highest {
        Some(idx) => idx,
        None => return 0,
    };
    while carry != 0 && idx > 0 {
        idx -= 1;
        let (digit, carry_out) = ripple(result.get(idx), 0, carry);
        result.set(idx, digit);
        carry = carry_out;
    }

    carry
}

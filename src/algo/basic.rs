//! Addition, subtraction and shift-and-add multiplication.

use log::debug;
use crate::algo::builder::{carriage_for, input_preshift, StepBuilder};
use crate::algo::{operand, Algorithm, AlgorithmError, AlgorithmKind, Outcome};
use crate::machine::Turn;

/// `a + b`: set and crank each summand in.
pub fn addition(a: i64, b: i64) -> Result<Algorithm, AlgorithmError> {
    let a = operand(a)?;
    let b = operand(b)?;
    let sum = a as u128 + b as u128;

    let mut program = StepBuilder::new();
    program.set_input(a, format!("Set the first summand ({}) on the input wheels", a));
    program.crank(Turn::Forward, 1, "to carry the first summand into the result register");
    program.set_input(b, format!("Set the second summand ({}) on the input wheels", b));
    program.crank(Turn::Forward, 1, "to add the second summand");

    Ok(finish(AlgorithmKind::Addition, program, format!("Result: {}", sum), Outcome::Integer { value: sum }))
}

/// `a - b`: crank the minuend in, then crank the subtrahend out.
///
/// The result register cannot show a negative magnitude, so `a < b` is
/// rejected.
pub fn subtraction(a: i64, b: i64) -> Result<Algorithm, AlgorithmError> {
    let minuend = operand(a)?;
    let subtrahend = operand(b)?;
    if minuend < subtrahend {
        return Err(AlgorithmError::MinuendTooSmall { minuend: a, subtrahend: b });
    }
    let difference = (minuend - subtrahend) as u128;

    let mut program = StepBuilder::new();
    program.set_input(minuend, format!("Set the minuend ({}) on the input wheels", minuend));
    program.crank(Turn::Forward, 1, "to carry the minuend into the result register");
    program.set_input(subtrahend, format!("Set the subtrahend ({}) on the input wheels", subtrahend));
    program.crank(Turn::Backward, 1, "to subtract the subtrahend");

    Ok(finish(
        AlgorithmKind::Subtraction,
        program,
        format!("Result: {}", difference),
        Outcome::Integer { value: difference },
    ))
}

/// `multiplicand * multiplier` by shift-and-add.
///
/// Multiplier digits are taken from the units upwards; digit `d` at place `p`
/// means carriage `-p` and `d` forward turns. The revolution counter ends up
/// showing the multiplier.
///
/// Multipliers longer than seven digits need more carriage travel than the
/// stops allow, so the multiplicand is set further left on the input wheels
/// and the low places are worked at positive carriage positions.
pub fn multiplication(multiplicand: i64, multiplier: i64) -> Result<Algorithm, AlgorithmError> {
    let multiplicand = operand(multiplicand)?;
    let multiplier = operand(multiplier)?;
    let product = multiplicand as u128 * multiplier as u128;

    let digits = multiplier_digits(multiplier);
    let preshift = input_preshift(digits.len() as u32 - 1);

    let mut program = StepBuilder::new();
    program.set_shifted_input(
        multiplicand,
        preshift,
        format!("Set the multiplicand ({}) on the input wheels", multiplicand),
    );

    for (place, digit) in digits.into_iter().enumerate() {
        program.carriage_to(carriage_for(place as u32, preshift));
        if digit == 0 {
            program.note(format!(
                "Partial product {}: digit 0, no crank turns needed",
                place + 1
            ));
        } else {
            program.note(format!(
                "Partial product {}: digit {} at carriage position {}",
                place + 1,
                digit,
                program.carriage()
            ));
            program.crank(Turn::Forward, digit, "for this digit");
        }
    }
    program.carriage_to(0);

    Ok(finish(
        AlgorithmKind::Multiplication,
        program,
        format!("Result: {}", product),
        Outcome::Integer { value: product },
    ))
}

/// Decimal digits, least significant first.
fn multiplier_digits(mut value: u64) -> Vec<u32> {
    let mut digits = vec![(value % 10) as u32];
    value /= 10;
    while value > 0 {
        digits.push((value % 10) as u32);
        value /= 10;
    }
    digits
}

fn finish(kind: AlgorithmKind, program: StepBuilder, summary: String, outcome: Outcome) -> Algorithm {
    let steps = program.finish(summary);
    debug!("generated {} with {} steps", kind, steps.len());
    Algorithm { kind, steps, outcome }
}

//! Division by repeated subtraction.
//!
//! The dividend is set in the result register and the divisor on the input
//! wheels. Starting with the divisor under the leading dividend digits, each
//! carriage position takes as many backward turns as the divisor still fits;
//! that count is the quotient digit for the position.

use log::debug;
use num::{BigInt, BigUint, ToPrimitive};
use crate::algo::builder::{carriage_for, input_preshift, StepBuilder};
use crate::algo::{
    operand, Algorithm, AlgorithmError, AlgorithmKind, Outcome, DECIMAL_PLACES, REGISTER_LIMIT,
};
use crate::decimal::{pow10, Decimal};
use crate::machine::Turn;

/// One quotient digit: how often `divisor * 10^place` was subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stage {
    place: u32,
    digit: u32,
}

fn decimal_len(value: &BigUint) -> u32 {
    value.to_str_radix(10).len() as u32
}

/// Greedy long division, most significant place first.
fn stages(dividend: &BigUint, divisor: &BigUint) -> Vec<Stage> {
    let shift = decimal_len(dividend).saturating_sub(decimal_len(divisor));
    let mut remaining = dividend.clone();
    let mut stages = Vec::with_capacity(shift as usize + 1);

    for place in (0..=shift).rev() {
        let factor = divisor * pow10(place);
        let digit = (&remaining / &factor).to_u32().map_or(9, |d| d.min(9));
        remaining -= &factor * BigUint::from(digit);
        stages.push(Stage { place, digit });
    }
    stages
}

/// Emit the crank sequence for a division whose operands both fit the
/// register. `describe` supplies the note for each stage.
fn crank_stages<F>(program: &mut StepBuilder, dividend: u64, divisor: u64, stages: &[Stage], describe: F)
where
    F: Fn(&Stage) -> String,
{
    let top = stages.first().map_or(0, |stage| stage.place);
    let preshift = input_preshift(top);

    program.set_result(dividend, format!("Set the dividend ({}) in the result register", dividend));
    program.set_shifted_input(divisor, preshift, format!("Set the divisor ({}) on the input wheels", divisor));
    program.note(format!(
        "Align the divisor under the leading digits of the dividend (carriage position {})",
        carriage_for(top, preshift)
    ));

    for stage in stages {
        program.carriage_to(carriage_for(stage.place, preshift));
        program.note(describe(stage));
        program.crank(Turn::Backward, stage.digit, "at this position");
    }
    program.carriage_to(0);
}

/// Integer division `dividend / divisor`.
///
/// The quotient is read from the revolution counter (in red, since every
/// turn is backward) and the remainder is left in the result register.
pub fn division(dividend: i64, divisor: i64) -> Result<Algorithm, AlgorithmError> {
    let dividend = operand(dividend)?;
    if divisor == 0 {
        return Err(AlgorithmError::DivisionByZero);
    }
    let divisor = operand(divisor)?;

    let quotient = dividend / divisor;
    let remainder = dividend % divisor;
    let stages = stages(&BigUint::from(dividend), &BigUint::from(divisor));
    let stage_count = stages.len();

    let mut program = StepBuilder::new();
    crank_stages(&mut program, dividend, divisor, &stages, |stage| {
        let ordinal = stage_count - stage.place as usize;
        if stage.digit == 0 {
            format!("Quotient digit {}: the divisor fits 0 times", ordinal)
        } else {
            format!(
                "Quotient digit {}: subtract {} × {} × 10^{}",
                ordinal, stage.digit, divisor, stage.place
            )
        }
    });

    let steps = program.finish(format!("Result: quotient = {}, remainder = {}", quotient, remainder));
    debug!("generated division with {} steps", steps.len());
    Ok(Algorithm {
        kind: AlgorithmKind::Division,
        steps,
        outcome: Outcome::Division { quotient, remainder },
    })
}

/// Division of decimals to five places.
///
/// Both operands are scaled to integers so the whole computation is exact:
/// `numerator = |dividend digits| × 10^(divisor scale + 5)` and
/// `denominator = |divisor digits| × 10^(dividend scale)`. The quotient's sign
/// is worked out separately, as an operator would note it on paper.
pub fn decimal_division(dividend: &Decimal, divisor: &Decimal) -> Result<Algorithm, AlgorithmError> {
    if divisor.is_zero() {
        return Err(AlgorithmError::DivisionByZero);
    }

    let numerator = dividend.digits() * pow10(divisor.scale() + DECIMAL_PLACES);
    let denominator = divisor.digits() * pow10(dividend.scale());
    let negative = dividend.is_negative() != divisor.is_negative();
    let quotient = Decimal::new(negative, &numerator / &denominator, DECIMAL_PLACES);

    let remainder_scale = dividend.scale().max(divisor.scale() + DECIMAL_PLACES);
    let remainder = {
        let lhs: BigInt = dividend.to_big_int() * BigInt::from(pow10(remainder_scale - dividend.scale()));
        let rhs: BigInt = divisor.to_big_int()
            * quotient.to_big_int()
            * BigInt::from(pow10(remainder_scale - divisor.scale() - DECIMAL_PLACES));
        Decimal::from_big_int(&(lhs - rhs), remainder_scale)
    };
    let remainder_text = remainder.to_fixed(DECIMAL_PLACES);

    let base_difference = dividend.scale() as i64 - divisor.scale() as i64;
    let extra_zeros = (DECIMAL_PLACES as i64 - base_difference.max(0)).max(0);
    let alignment_zeros = (divisor.scale() as i64 - dividend.scale() as i64).max(0);

    let mut program = StepBuilder::new();
    program.note(format!(
        "Dividend {} and divisor {}: line up the divisor's leading digit under the dividend's",
        dividend, divisor
    ));
    if base_difference >= 0 {
        program.note(format!(
            "Decimal point: dividend has {} places, divisor {}, difference {}; append {} zeros to the dividend for {} places in the quotient",
            dividend.scale(),
            divisor.scale(),
            base_difference,
            extra_zeros,
            DECIMAL_PLACES
        ));
    } else {
        program.note(format!(
            "Decimal point: the divisor has {} more places than the dividend; append {} zeros to the dividend first, then extend to {} places in the quotient",
            alignment_zeros, alignment_zeros, DECIMAL_PLACES
        ));
    }

    let stages = stages(&numerator, &denominator);
    let describe = |stage: &Stage| {
        let fraction = if stage.place < DECIMAL_PLACES {
            format!(" (decimal place {})", DECIMAL_PLACES - stage.place)
        } else {
            String::new()
        };
        if stage.digit == 0 {
            format!("Stage 10^{}: the divisor does not fit, quotient digit 0{}", stage.place, fraction)
        } else {
            format!(
                "Stage 10^{}: the divisor fits {} times, {} backward turns{}",
                stage.place, stage.digit, stage.digit, fraction
            )
        }
    };

    let limit = BigUint::from(REGISTER_LIMIT);
    match (numerator.to_u64(), denominator.to_u64()) {
        (Some(scaled_dividend), Some(scaled_divisor)) if numerator < limit && denominator < limit => {
            crank_stages(&mut program, scaled_dividend, scaled_divisor, &stages, describe);
        }
        _ => {
            debug!("scaled operands exceed the register, division is shown as notes only");
            for stage in &stages {
                program.note(describe(stage));
            }
        }
    }

    if quotient.is_negative() {
        program.note("The result is negative: note the sign separately");
    }
    let magnitude = quotient.abs();
    program.set_result_decimal(
        magnitude.clone(),
        DECIMAL_PLACES,
        format!("Set the quotient {} in the result register", magnitude),
    );
    program.note(format!("Remainder after {} decimal places: {}", DECIMAL_PLACES, remainder_text));

    let steps = program.finish(format!(
        "Division complete: quotient = {}, remainder = {}",
        quotient, remainder_text
    ));
    debug!("generated decimal division with {} steps", steps.len());
    Ok(Algorithm {
        kind: AlgorithmKind::DecimalDivision,
        steps,
        outcome: Outcome::DecimalDivision { quotient, remainder },
    })
}

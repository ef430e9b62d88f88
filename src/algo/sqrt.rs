//! Square roots by subtraction of successive odd numbers.
//!
//! The radicand is split into pairs of digits either side of the decimal
//! point. Each pair brings down a new remainder, from which the odd numbers
//! `20r+1, 20r+3, ...` are subtracted while they fit (`r` being the root so
//! far). The count is the next root digit; the first odd number that no
//! longer fits rings the bell.

use log::debug;
use num::{BigInt, BigUint, ToPrimitive, Zero};
use crate::algo::builder::StepBuilder;
use crate::algo::{Action, Algorithm, AlgorithmError, AlgorithmKind, Outcome, DECIMAL_PLACES};
use crate::decimal::{pow10, Decimal};
use crate::machine::{Turn, INPUT_WIDTH, RESULT_WIDTH};

/// Digit pairs of a radicand.
struct Groups {
    integer: Vec<u32>,
    fraction: Vec<u32>,
}

impl Groups {
    fn split(radicand: &Decimal) -> Self {
        let mut integer_digits = radicand.integer_digits();
        if integer_digits.len() % 2 == 1 {
            integer_digits.insert(0, '0');
        }
        let integer = pairs(&integer_digits);

        let mut fraction_digits = radicand.fraction_digits();
        if fraction_digits.len() % 2 == 1 {
            fraction_digits.push('0');
        }
        let mut fraction = pairs(&fraction_digits);
        fraction.resize(DECIMAL_PLACES as usize, 0);

        Self { integer, fraction }
    }

    fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.integer.iter().chain(self.fraction.iter()).copied()
    }
}

impl std::fmt::Display for Groups {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |groups: &[u32]| {
            groups
                .iter()
                .map(|g| format!("{:02}", g))
                .collect::<Vec<_>>()
                .join(" | ")
        };
        write!(f, "{} · {}", join(&self.integer), join(&self.fraction))
    }
}

fn pairs(digits: &str) -> Vec<u32> {
    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| pair.iter().fold(0, |acc, b| acc * 10 + (b - b'0') as u32))
        .collect()
}

/// What happened while one group was worked.
struct Stage {
    group: u32,
    accepted: Vec<BigUint>,
    bell: BigUint,
    digit: u32,
    partial_root: BigUint,
    remainder: BigUint,
}

/// How much of a root is worked on the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mechanism {
    /// Every group, on the radicand scaled to a whole number.
    Full(u64),
    /// The integer groups only.
    Integer(u64),
    Notes,
}

impl Mechanism {
    fn choose(radicand: &Decimal, groups: &Groups) -> Self {
        let all_groups = groups.integer.len() + groups.fraction.len();
        if 2 * all_groups <= RESULT_WIDTH {
            let scaled = groups.iter().fold(0u64, |acc, g| acc * 100 + u64::from(g));
            return Mechanism::Full(scaled);
        }
        radicand
            .rescaled_digits(0)
            .to_u64()
            .filter(|_| radicand.integer_digits().len() <= RESULT_WIDTH)
            .map_or(Mechanism::Notes, Mechanism::Integer)
    }

    /// Number of leading groups cranked out.
    fn worked_groups(self, groups: &Groups) -> usize {
        match self {
            Mechanism::Full(_) => groups.integer.len() + groups.fraction.len(),
            Mechanism::Integer(_) => groups.integer.len(),
            Mechanism::Notes => 0,
        }
    }
}

/// Square root of a non-negative decimal to five places.
///
/// Groups are worked on the machine when they fit the result register: the
/// carriage moves one place per group, each accepted odd number is set and
/// cranked out backward, and the revolution counter reads out the root.
/// Radicands below 100 are scaled by `10^10` and worked in full, so the
/// counter shows every root digit. Larger ones have their integer groups
/// worked when the integer part fits; other groups are shown as notes.
pub fn square_root(radicand: &Decimal) -> Result<Algorithm, AlgorithmError> {
    if radicand.is_negative() {
        return Err(AlgorithmError::NegativeRadicand);
    }

    let groups = Groups::split(radicand);
    let integer_groups = groups.integer.len();

    let mut stages = Vec::new();
    let mut partial_root = BigUint::zero();
    let mut remainder = BigUint::zero();
    let mut integer_root = BigUint::zero();
    let mut integer_remainder = BigUint::zero();

    for (index, group) in groups.iter().enumerate() {
        remainder = remainder * 100u32 + group;
        let mut odd = &partial_root * 20u32 + 1u32;
        let mut accepted = Vec::new();
        while odd <= remainder && accepted.len() < 9 {
            remainder -= &odd;
            accepted.push(odd.clone());
            odd += 2u32;
        }
        let digit = accepted.len() as u32;
        partial_root = partial_root * 10u32 + digit;

        if index + 1 == integer_groups {
            integer_root = partial_root.clone();
            integer_remainder = remainder.clone();
        }
        stages.push(Stage {
            group,
            accepted,
            bell: odd,
            digit,
            partial_root: partial_root.clone(),
            remainder: remainder.clone(),
        });
    }

    let root = Decimal::new(false, partial_root.clone(), DECIMAL_PLACES);
    let square = Decimal::new(false, &partial_root * &partial_root, 2 * DECIMAL_PLACES);
    let residual_scale = radicand.scale().max(2 * DECIMAL_PLACES);
    let residual = Decimal::from_big_int(
        &(radicand.to_big_int() * BigInt::from(pow10(residual_scale - radicand.scale()))
            - square.to_big_int() * BigInt::from(pow10(residual_scale - 2 * DECIMAL_PLACES))),
        residual_scale,
    );

    let mut program = StepBuilder::new();
    program.note(format!(
        "Split the radicand {} into pairs of digits from the decimal point: {}",
        radicand, groups
    ));

    let mechanism = Mechanism::choose(radicand, &groups);
    match mechanism {
        Mechanism::Full(value) => program.set_result(
            value,
            format!(
                "Set the radicand moved {} places left ({}) in the result register",
                2 * DECIMAL_PLACES,
                value
            ),
        ),
        Mechanism::Integer(value) => {
            program.set_result(value, format!("Set the integer part ({}) in the result register", value))
        }
        Mechanism::Notes => {}
    }
    let worked_groups = mechanism.worked_groups(&groups);

    for (index, stage) in stages.iter().enumerate() {
        let fractional = index >= integer_groups;
        let fraction_places = index.saturating_sub(integer_groups - 1) as u32;
        let partial = Decimal::new(false, stage.partial_root.clone(), fraction_places);
        let doubled = Decimal::new(false, &stage.partial_root * 2u32, fraction_places);
        let suffix = if fractional { " (decimal place)" } else { "" };

        if index < worked_groups {
            let place = worked_groups - 1 - index;
            program.carriage_to(-(place as i64));
            let first = stage.accepted.first().unwrap_or(&stage.bell);
            program.note(format!(
                "Group {:02}: subtract odd numbers starting at {}{}",
                stage.group, first, suffix
            ));
            for odd in &stage.accepted {
                if let Some(value) = odd.to_u64() {
                    program.set_input_at(
                        value,
                        INPUT_WIDTH - 1 - place,
                        format!("Set the odd number {} on the input wheels", value),
                    );
                    program.push(
                        Action::Crank(Turn::Backward),
                        format!("Turn the crank backward to subtract {}", value),
                    );
                }
            }
            program.note(format!(
                "Bell at {}: root digit {}, root so far {}, remainder {}",
                stage.bell, stage.digit, partial, stage.remainder
            ));
        } else if stage.digit == 0 {
            program.note(format!(
                "Group {:02}: no odd number fits, root digit 0, remainder {}{}",
                stage.group, stage.remainder, suffix
            ));
        } else {
            let odds = stage
                .accepted
                .iter()
                .map(|odd| odd.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            program.note(format!(
                "Group {:02}: subtract the odd numbers {}, bell at {}, so {} backward turns; root so far {}{}",
                stage.group, odds, stage.bell, stage.digit, partial, suffix
            ));
        }
        program.note(format!("Doubled root for the next group: {}", doubled));
    }

    if worked_groups > 0 {
        program.carriage_to(0);
    }
    program.set_result_decimal(
        root.clone(),
        DECIMAL_PLACES,
        format!("Set the root {} in the result register", root),
    );
    program.note(format!(
        "Square of the root: {}, remainder {}",
        square.to_fixed(DECIMAL_PLACES),
        residual.to_fixed(DECIMAL_PLACES)
    ));

    let steps = program.finish(format!(
        "√{} = {} (remainder {})",
        radicand,
        root,
        residual.to_fixed(DECIMAL_PLACES)
    ));
    debug!("generated square root with {} steps", steps.len());
    Ok(Algorithm {
        kind: AlgorithmKind::SquareRoot,
        steps,
        outcome: Outcome::SquareRoot {
            root,
            remainder: residual,
            integer_root,
            integer_remainder,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::Step;
    use crate::machine::Machine;

    fn run(algorithm: &Algorithm) -> Machine {
        let mut machine = Machine::new();
        for step in &algorithm.steps {
            step.execute(&mut machine);
        }
        machine
    }

    fn dec(text: &str) -> Decimal {
        Decimal::parse(text).unwrap()
    }

    #[test]
    fn test_groups() {
        let groups = Groups::split(&dec("152399025"));
        assert_eq!(groups.integer, vec![1, 52, 39, 90, 25]);
        assert_eq!(groups.fraction, vec![0; 5]);

        let groups = Groups::split(&dec("2.5"));
        assert_eq!(groups.integer, vec![2]);
        assert_eq!(groups.fraction, vec![50, 0, 0, 0, 0]);
        assert_eq!(groups.to_string(), "02 · 50 | 00 | 00 | 00 | 00");
    }

    #[test]
    fn test_fraction_groups_truncated() {
        let groups = Groups::split(&dec("0.123456789012"));
        assert_eq!(groups.fraction, vec![12, 34, 56, 78, 90]);
    }

    #[test]
    fn test_square_root_152399025() {
        let algo = square_root(&dec("152399025")).unwrap();
        match &algo.outcome {
            Outcome::SquareRoot { root, remainder, integer_root, integer_remainder } => {
                assert_eq!(root.to_string(), "12345.00000");
                assert!(remainder.is_zero());
                assert_eq!(integer_root, &BigUint::from(12345u32));
                assert!(integer_remainder.is_zero());
            }
            other => panic!("unexpected outcome {:?}", other),
        }

        let turns = algo
            .steps
            .iter()
            .filter(|s| s.action == Action::Crank(Turn::Backward))
            .count();
        assert_eq!(turns, 1 + 2 + 3 + 4 + 5);
    }

    #[test]
    fn test_counter_reads_integer_root() {
        let algo = square_root(&dec("152399025")).unwrap();
        let machine = crank_out(&algo);
        assert_eq!(machine.counter.value(), -12345);
        assert!(machine.result.is_zero());
        assert_eq!(machine.carriage.position(), 0);
    }

    /// Steps up to the final readout of the root.
    fn crank_out(algorithm: &Algorithm) -> Machine {
        let mut machine = Machine::new();
        for step in algorithm
            .steps
            .iter()
            .take_while(|s| !matches!(s.action, Action::SetResultDecimal { .. }))
        {
            step.execute(&mut machine);
        }
        machine
    }

    #[test]
    fn test_square_root_with_remainder() {
        let algo = square_root(&dec("10")).unwrap();
        match &algo.outcome {
            Outcome::SquareRoot { root, integer_root, integer_remainder, .. } => {
                assert_eq!(root.to_string(), "3.16227");
                assert_eq!(integer_root, &BigUint::from(3u32));
                assert_eq!(integer_remainder, &BigUint::from(1u32));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        let machine = crank_out(&algo);
        assert_eq!(machine.result.value(), 100_000_000_000 - 316_227 * 316_227);
        assert_eq!(machine.counter.value(), -316_227);

        let machine = run(&algo);
        assert_eq!(machine.result.value(), 316_227);
        assert_eq!(machine.decimal_marker, Some(8));
    }

    #[test]
    fn test_square_root_of_two_cranks_every_digit() {
        let algo = square_root(&dec("2")).unwrap();
        let turns = algo
            .steps
            .iter()
            .filter(|s| s.action == Action::Crank(Turn::Backward))
            .count();
        assert_eq!(turns, 1 + 4 + 1 + 4 + 2 + 1);
        assert!(algo.steps.contains(&Step::new(
            Action::SetResultDirect { value: 20_000_000_000 },
            "Set the radicand moved 10 places left (20000000000) in the result register",
        )));

        let machine = crank_out(&algo);
        assert_eq!(machine.counter.value(), -141_421);
        assert_eq!(machine.result.value(), 100_759);
        assert_eq!(machine.carriage.position(), 0);
    }

    #[test]
    fn test_integer_groups_only_above_one_hundred() {
        let algo = square_root(&dec("1000")).unwrap();
        let machine = crank_out(&algo);
        assert_eq!(machine.counter.value(), -31);
        assert_eq!(machine.result.value(), 39);
        assert!(algo
            .steps
            .iter()
            .any(|s| s.description.contains("subtract the odd numbers") && s.description.contains("(decimal place)")));
    }

    #[test]
    fn test_mechanism_choice() {
        let choose = |text: &str| {
            let radicand = dec(text);
            Mechanism::choose(&radicand, &Groups::split(&radicand))
        };
        assert_eq!(choose("0.25"), Mechanism::Full(2_500_000_000));
        assert_eq!(choose("99.99"), Mechanism::Full(999_900_000_000));
        assert_eq!(choose("100"), Mechanism::Integer(100));
        assert_eq!(choose("12345678901234567"), Mechanism::Notes);
    }

    #[test]
    fn test_square_root_of_fraction() {
        let algo = square_root(&dec("0.25")).unwrap();
        match &algo.outcome {
            Outcome::SquareRoot { root, remainder, .. } => {
                assert_eq!(root.to_string(), "0.50000");
                assert!(remainder.is_zero());
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_negative_radicand() {
        assert_eq!(square_root(&dec("-4")), Err(AlgorithmError::NegativeRadicand));
        assert!(square_root(&dec("-0")).is_ok());
    }

    #[test]
    fn test_wide_integer_part_is_notes_only() {
        let algo = square_root(&dec("12345678901234567")).unwrap();
        assert!(!algo.steps.iter().any(|s| matches!(s.action, Action::Crank(_))));
        match &algo.outcome {
            Outcome::SquareRoot { integer_root, .. } => {
                assert_eq!(integer_root, &BigUint::from(111_111_110u32));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}

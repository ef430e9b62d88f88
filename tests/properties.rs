//! Property-based tests for the arithmetic procedures and the sequencer.
//!
//! Every generated procedure is played on a fresh machine and the register
//! contents are checked against plain integer arithmetic.

use brunsviga::algo::{addition, division, multiplication, square_root, subtraction};
use brunsviga::machine::{CARRIAGE_MAX, CARRIAGE_MIN};
use brunsviga::{Algorithm, Calculator, Decimal, Machine, Outcome, Sequencer, Shift};
use num::BigUint;
use proptest::prelude::*;

const LIMIT: i64 = 10_000_000_000_000;

fn play(algorithm: &Algorithm) -> Machine {
    let mut sequencer = Sequencer::default();
    sequencer.load(algorithm.clone());
    sequencer.run_to_end();
    sequencer.machine().clone()
}

fn multiplier() -> impl Strategy<Value = i64> {
    prop_oneof![0i64..10_000_000, 0i64..LIMIT]
}

fn divisor() -> impl Strategy<Value = i64> {
    prop_oneof![1i64..1_000, 1i64..LIMIT]
}

/// One arithmetic procedure with its operands.
#[derive(Debug, Clone)]
enum Procedure {
    Add(i64, i64),
    Sub(i64, i64),
    Mul(i64, i64),
    Div(i64, i64),
    DecimalDiv(String, String),
    Sqrt(String),
}

fn procedure() -> impl Strategy<Value = Procedure> {
    prop_oneof![
        (0i64..LIMIT / 2, 0i64..LIMIT / 2).prop_map(|(a, b)| Procedure::Add(a, b)),
        (0i64..LIMIT)
            .prop_flat_map(|a| (Just(a), 0..=a))
            .prop_map(|(a, b)| Procedure::Sub(a, b)),
        (0i64..1_000_000, multiplier()).prop_map(|(a, b)| Procedure::Mul(a, b)),
        (0i64..LIMIT, divisor()).prop_map(|(a, b)| Procedure::Div(a, b)),
        ("-?[0-9]{1,6}\\.[0-9]{1,4}", "-?[1-9][0-9]{0,3}(\\.[0-9]{1,3})?")
            .prop_map(|(a, b)| Procedure::DecimalDiv(a, b)),
        "[0-9]{1,8}(\\.[0-9]{1,6})?".prop_map(Procedure::Sqrt),
    ]
}

/// Load a procedure and return its step count.
fn load(calc: &mut Calculator, procedure: &Procedure) -> usize {
    let loaded = match procedure {
        Procedure::Add(a, b) => calc.run_addition(&a.to_string(), &b.to_string()),
        Procedure::Sub(a, b) => calc.run_subtraction(&a.to_string(), &b.to_string()),
        Procedure::Mul(a, b) => calc.run_multiplication(&a.to_string(), &b.to_string()),
        Procedure::Div(a, b) => calc.run_division(&a.to_string(), &b.to_string()),
        Procedure::DecimalDiv(a, b) => calc.run_decimal_division(a, b),
        Procedure::Sqrt(a) => calc.run_square_root(a),
    };
    loaded.unwrap().len()
}

proptest! {
    #[test]
    fn test_addition_result(a in 0i64..LIMIT / 2, b in 0i64..LIMIT / 2) {
        let machine = play(&addition(a, b).unwrap());
        prop_assert_eq!(machine.result.value(), (a + b) as u128);
    }

    #[test]
    fn test_subtraction_result(a in 0i64..LIMIT, b_raw in 0i64..LIMIT) {
        let b = b_raw % (a + 1);
        let machine = play(&subtraction(a, b).unwrap());
        prop_assert_eq!(machine.result.value(), (a - b) as u128);
    }

    #[test]
    fn test_multiplication_result(b in multiplier(), a_raw in 0i64..LIMIT) {
        let a = a_raw % (LIMIT / b.max(1));
        let algorithm = multiplication(a, b).unwrap();
        let machine = play(&algorithm);

        prop_assert_eq!(machine.result.value(), a as u128 * b as u128);
        prop_assert_eq!(machine.carriage.position(), 0);
        if b < 10_000_000 {
            prop_assert_eq!(machine.counter.value(), b);
        }
    }

    #[test]
    fn test_division_identity(dividend in 0i64..LIMIT, divisor in divisor()) {
        let algorithm = division(dividend, divisor).unwrap();
        let (quotient, remainder) = match algorithm.outcome {
            Outcome::Division { quotient, remainder } => (quotient, remainder),
            _ => return Err(TestCaseError::fail("wrong outcome kind")),
        };
        prop_assert_eq!(quotient * divisor as u64 + remainder, dividend as u64);
        prop_assert!(remainder < divisor as u64);

        let machine = play(&algorithm);
        prop_assert_eq!(machine.result.value(), remainder as u128);
        prop_assert_eq!(machine.carriage.position(), 0);
    }

    #[test]
    fn test_square_root_identity(n in 0u64..10_000_000_000_000) {
        let algorithm = square_root(&Decimal::from_integer(n)).unwrap();
        let Outcome::SquareRoot { integer_root, integer_remainder, .. } = &algorithm.outcome else {
            return Err(TestCaseError::fail("wrong outcome kind"));
        };
        prop_assert_eq!(integer_root * integer_root + integer_remainder, BigUint::from(n));
        prop_assert!(integer_remainder <= &(integer_root * 2u32));
    }

    #[test]
    fn test_square_root_counter_reads_root(n in 0u64..10_000_000_000_000) {
        let algorithm = square_root(&Decimal::from_integer(n)).unwrap();
        let Outcome::SquareRoot { root, integer_root, integer_remainder, .. } = &algorithm.outcome else {
            return Err(TestCaseError::fail("wrong outcome kind"));
        };

        let mut machine = Machine::new();
        for step in algorithm
            .steps
            .iter()
            .take_while(|s| !matches!(s.action, brunsviga::Action::SetResultDecimal { .. }))
        {
            step.execute(&mut machine);
        }
        let counter = BigUint::from(machine.counter.value().unsigned_abs());
        let result = BigUint::from(machine.result.value());
        if n < 100 {
            let scaled = BigUint::from(n) * BigUint::from(10_000_000_000u64);
            prop_assert_eq!(&counter, root.digits());
            prop_assert_eq!(result, scaled - root.digits() * root.digits());
        } else {
            prop_assert_eq!(result, integer_remainder.clone());
            prop_assert_eq!(counter, integer_root.clone());
        }
    }

    #[test]
    fn test_step_back_restores_snapshot(procedure in procedure(), forward in 0usize..200) {
        let mut calc = Calculator::new();
        let total = load(&mut calc, &procedure);
        for _ in 0..forward % total {
            calc.step_forward();
        }
        let before = calc.snapshot();
        calc.step_forward();
        prop_assert_eq!(calc.step_back(), before);
    }

    #[test]
    fn test_carriage_stays_in_range(moves in proptest::collection::vec(any::<bool>(), 0..100)) {
        let mut calc = Calculator::new();
        for left in moves {
            let shift = if left { Shift::Left } else { Shift::Right };
            let snapshot = calc.move_carriage(shift);
            prop_assert!((CARRIAGE_MIN..=CARRIAGE_MAX).contains(&snapshot.carriage));
        }
    }
}

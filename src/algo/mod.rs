//! Algorithm generators.
//!
//! Each generator turns a request such as "divide 100 by 7" into the ordered
//! list of primitive [`Step`]s an operator of the real machine would carry
//! out. Generators are pure: they never look at machine state, and the same
//! operands always give the same steps.
//!
//! - [`addition`], [`subtraction`], [`multiplication`] - integer basics
//! - [`division`] - greedy trial subtraction, one quotient digit per carriage position
//! - [`decimal_division`] - fixed five-place division in exact scaled integers
//! - [`square_root`] - subtraction of successive odd numbers

mod builder;
pub mod step;
pub mod basic;
pub mod division;
pub mod sqrt;
pub mod listing;

pub use step::{Action, Step};
pub use basic::{addition, subtraction, multiplication};
pub use division::{division, decimal_division};
pub use sqrt::square_root;
pub use listing::{describe_step, listing};

use std::fmt;
use num::BigUint;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::decimal::{Decimal, ParseDecimalError};

/// Fractional digits produced by decimal division and square roots.
pub const DECIMAL_PLACES: u32 = 5;

/// Which algorithm produced a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    DecimalDivision,
    SquareRoot,
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlgorithmKind::Addition => "addition",
            AlgorithmKind::Subtraction => "subtraction",
            AlgorithmKind::Multiplication => "multiplication",
            AlgorithmKind::Division => "division",
            AlgorithmKind::DecimalDivision => "decimal division",
            AlgorithmKind::SquareRoot => "square root",
        };
        write!(f, "{}", name)
    }
}

/// The arithmetic answer a sequence arrives at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Sum, difference or product.
    Integer { value: u128 },
    /// Integer quotient and remainder.
    Division { quotient: u64, remainder: u64 },
    /// Five-place quotient and exact remainder.
    DecimalDivision { quotient: Decimal, remainder: Decimal },
    /// Five-place root, its exact residual, and the integer-part root and
    /// remainder (`integer_root² + integer_remainder = ⌊radicand⌋`).
    SquareRoot {
        root: Decimal,
        remainder: Decimal,
        integer_root: BigUint,
        integer_remainder: BigUint,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Integer { value } => write!(f, "{}", value),
            Outcome::Division { quotient, remainder } => {
                write!(f, "quotient {}, remainder {}", quotient, remainder)
            }
            Outcome::DecimalDivision { quotient, remainder } => write!(
                f,
                "quotient {}, remainder {}",
                quotient,
                remainder.to_fixed(DECIMAL_PLACES)
            ),
            Outcome::SquareRoot { root, remainder, .. } => write!(
                f,
                "root {}, remainder {}",
                root,
                remainder.to_fixed(DECIMAL_PLACES)
            ),
        }
    }
}

/// A generated step sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Algorithm {
    pub kind: AlgorithmKind,
    pub steps: Vec<Step>,
    pub outcome: Outcome,
}

impl Algorithm {
    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if there are no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Operand validation failures. No steps are produced when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgorithmError {
    #[error("'{0}' is not an integer")]
    NotAnInteger(String),

    #[error("invalid number: {0}")]
    InvalidNumber(#[from] ParseDecimalError),

    #[error("operand {0} is negative; the machine only holds non-negative numbers")]
    NegativeOperand(i64),

    #[error("operand {0} does not fit the 13-digit register")]
    OutOfRange(i64),

    #[error("minuend {minuend} is smaller than subtrahend {subtrahend}")]
    MinuendTooSmall { minuend: i64, subtrahend: i64 },

    #[error("division by zero")]
    DivisionByZero,

    #[error("square root of a negative number")]
    NegativeRadicand,
}

/// Parse integer operand text.
pub fn parse_integer(text: &str) -> Result<i64, AlgorithmError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| AlgorithmError::NotAnInteger(text.trim().to_string()))
}

/// Reject negative operands.
pub(crate) fn non_negative(value: i64) -> Result<u64, AlgorithmError> {
    u64::try_from(value).map_err(|_| AlgorithmError::NegativeOperand(value))
}

/// Smallest value that no longer fits the result register.
pub(crate) const REGISTER_LIMIT: u64 = 10_000_000_000_000;

/// Accept an integer operand the machine can hold: non-negative and at
/// most 13 digits.
pub(crate) fn operand(value: i64) -> Result<u64, AlgorithmError> {
    let magnitude = non_negative(value)?;
    if magnitude >= REGISTER_LIMIT {
        return Err(AlgorithmError::OutOfRange(value));
    }
    Ok(magnitude)
}

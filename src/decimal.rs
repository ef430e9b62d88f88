//! Exact decimal numbers.
//!
//! Decimal division and square roots are worked out in scaled integers so no
//! binary floating point ever touches a result. A [`Decimal`] is a sign, an
//! arbitrary-precision digit string and the number of those digits that sit
//! right of the decimal point.

use std::fmt;
use std::str::FromStr;
use num::{BigInt, BigUint, Integer, Zero};
use num::bigint::Sign;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// A signed decimal: `(-1)^negative * digits / 10^scale`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decimal {
    negative: bool,
    digits: BigUint,
    scale: u32,
}

/// `10^exp` as a big integer.
pub fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

impl Decimal {
    /// Build a decimal. Negative zero is normalised to zero.
    pub fn new(negative: bool, digits: BigUint, scale: u32) -> Self {
        let negative = negative && !digits.is_zero();
        Self { negative, digits, scale }
    }

    /// An integer with no fractional digits.
    pub fn from_integer(value: u64) -> Self {
        Self::new(false, BigUint::from(value), 0)
    }

    /// Build from a signed scaled integer.
    pub fn from_big_int(value: &BigInt, scale: u32) -> Self {
        Self::new(value.sign() == Sign::Minus, value.magnitude().clone(), scale)
    }

    /// Parse text such as `"12.5"`, `"-0,75"` or `"+3"`.
    pub fn parse(text: &str) -> Result<Self, ParseDecimalError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseDecimalError::Empty);
        }

        let (negative, body) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let mut integer = String::new();
        let mut fraction = String::new();
        let mut seen_separator = false;
        for c in body.chars() {
            match c {
                '0'..='9' if seen_separator => fraction.push(c),
                '0'..='9' => integer.push(c),
                '.' | ',' if seen_separator => return Err(ParseDecimalError::MultipleSeparators),
                '.' | ',' => seen_separator = true,
                other => return Err(ParseDecimalError::InvalidCharacter(other)),
            }
        }

        if integer.is_empty() && fraction.is_empty() {
            return Err(ParseDecimalError::NoDigits);
        }

        let all_digits = format!("{}{}", integer, fraction);
        let digits = BigUint::parse_bytes(all_digits.as_bytes(), 10)
            .ok_or(ParseDecimalError::NoDigits)?;

        Ok(Self::new(negative, digits, fraction.len() as u32))
    }

    /// True for values below zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// True for zero (of any scale).
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.digits.is_zero()
    }

    /// Magnitude as a scaled integer.
    #[inline]
    pub fn digits(&self) -> &BigUint {
        &self.digits
    }

    /// Number of fractional digits.
    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// The absolute value.
    pub fn abs(&self) -> Self {
        Self::new(false, self.digits.clone(), self.scale)
    }

    /// Signed scaled integer.
    pub fn to_big_int(&self) -> BigInt {
        let sign = if self.negative { Sign::Minus } else { Sign::Plus };
        BigInt::from_biguint(sign, self.digits.clone())
    }

    /// Magnitude rescaled to `places` fractional digits, truncating any
    /// extra digits.
    pub fn rescaled_digits(&self, places: u32) -> BigUint {
        if places >= self.scale {
            &self.digits * pow10(places - self.scale)
        } else {
            &self.digits / pow10(self.scale - places)
        }
    }

    /// Digits left of the decimal point (at least `"0"`).
    pub fn integer_digits(&self) -> String {
        (&self.digits / pow10(self.scale)).to_str_radix(10)
    }

    /// Digits right of the decimal point, exactly `scale` of them.
    pub fn fraction_digits(&self) -> String {
        if self.scale == 0 {
            return String::new();
        }
        let fraction = (&self.digits % pow10(self.scale)).to_str_radix(10);
        format!("{:0>width$}", fraction, width = self.scale as usize)
    }

    /// Format with exactly `places` fractional digits, rounding half away
    /// from zero.
    pub fn to_fixed(&self, places: u32) -> String {
        let digits = if places >= self.scale {
            self.rescaled_digits(places)
        } else {
            let divisor = pow10(self.scale - places);
            let (quotient, remainder) = self.digits.div_rem(&divisor);
            if remainder * 2u32 >= divisor {
                quotient + 1u32
            } else {
                quotient
            }
        };
        Decimal::new(self.negative, digits, places).to_string()
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.integer_digits())?;
        if self.scale > 0 {
            write!(f, ".{}", self.fraction_digits())?;
        }
        Ok(())
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::parse(s)
    }
}

/// Errors that can occur when parsing decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDecimalError {
    #[error("empty number")]
    Empty,

    #[error("no digits in number")]
    NoDigits,

    #[error("invalid character '{0}' in number")]
    InvalidCharacter(char),

    #[error("more than one decimal separator")]
    MultipleSeparators,
}

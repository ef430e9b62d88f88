//! Fixed-width decimal registers.
//!
//! Both the result register (accumulator) and the input register (setting
//! mechanism) of the Brunsviga are 13 decimal wheels wide. Digits are stored
//! most significant first, so index 0 is the leftmost wheel and index
//! `N - 1` holds the units.

use std::fmt;
use num::BigUint;
use serde::{Serialize, Deserialize};

/// A register of `N` decimal digits, most significant first.
///
/// Every digit is always in `0..=9`. Values wider than the register are
/// truncated to their lowest `N` digits, the way the wheels of the machine
/// simply have nowhere to put the rest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigitRegister<const N: usize> {
    #[serde(with = "digit_array")]
    digits: [u8; N],
}

impl<const N: usize> DigitRegister<N> {
    /// Number of digits in the register.
    pub const WIDTH: usize = N;

    /// Create a register with every wheel at zero.
    #[inline]
    pub const fn zero() -> Self {
        Self { digits: [0; N] }
    }

    /// Get the underlying digit array (MSB first).
    #[inline]
    pub const fn digits(&self) -> &[u8; N] {
        &self.digits
    }

    /// Get a single digit by index (0 = most significant).
    #[inline]
    pub const fn get(&self, index: usize) -> u8 {
        self.digits[index]
    }

    /// Set a single digit by index. The digit is reduced mod 10.
    #[inline]
    pub fn set(&mut self, index: usize, digit: u8) {
        self.digits[index] = digit % 10;
    }

    /// Turn every wheel back to zero.
    pub fn clear(&mut self) {
        self.digits = [0; N];
    }

    /// Check if every digit is zero.
    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|&d| d == 0)
    }

    /// Load an unsigned value right-aligned, zero-padded and truncated to
    /// the register width.
    pub fn set_value(&mut self, value: u64) {
        self.place_value(value, N - 1);
    }

    /// Load a value so that its units digit sits at `rightmost` and the
    /// remaining digits extend to the left. Everything else is cleared.
    ///
    /// Digits that would land left of index 0 or right of the last wheel are
    /// dropped.
    pub fn place_value(&mut self, mut value: u64, rightmost: usize) {
        self.clear();
        let mut index = rightmost as isize;
        while value > 0 && index >= 0 {
            if (index as usize) < N {
                self.digits[index as usize] = (value % 10) as u8;
            }
            value /= 10;
            index -= 1;
        }
    }

    /// Load an arbitrary-precision value right-aligned, truncated to the
    /// register width.
    pub fn set_big(&mut self, value: &BigUint) {
        self.clear();
        let text = value.to_str_radix(10);
        let bytes = text.as_bytes();
        let take = bytes.len().min(N);
        for (offset, byte) in bytes[bytes.len() - take..].iter().enumerate() {
            self.digits[N - take + offset] = byte - b'0';
        }
    }

    /// Read the register as an unsigned integer.
    pub fn value(&self) -> u128 {
        self.digits
            .iter()
            .fold(0u128, |acc, &d| acc * 10 + d as u128)
    }

    /// Advance one wheel by one notch (9 wraps to 0).
    pub fn increment(&mut self, index: usize) {
        if index < N {
            self.digits[index] = (self.digits[index] + 1) % 10;
        }
    }

    /// Move one wheel back by one notch (0 wraps to 9).
    pub fn decrement(&mut self, index: usize) {
        if index < N {
            self.digits[index] = (self.digits[index] + 9) % 10;
        }
    }
}

impl<const N: usize> Default for DigitRegister<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> fmt::Debug for DigitRegister<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DigitRegister<{}>({} = {})", N, self, self.value())
    }
}

impl<const N: usize> fmt::Display for DigitRegister<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.digits {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

/// serde support for const-generic digit arrays (serde only derives up to 32
/// for fixed arrays, and not for generic `N`).
mod digit_array {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer, const N: usize>(
        digits: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        digits.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> Result<[u8; N], D::Error> {
        let raw = Vec::<u8>::deserialize(deserializer)?;
        if raw.iter().any(|&d| d > 9) {
            return Err(D::Error::custom("register digit out of range 0-9"));
        }
        raw.try_into()
            .map_err(|v: Vec<u8>| D::Error::invalid_length(v.len(), &"a full register"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Reg13 = DigitRegister<13>;

    #[test]
    fn test_zero() {
        let reg = Reg13::zero();
        assert!(reg.is_zero());
        assert_eq!(reg.value(), 0);
        assert_eq!(reg.to_string(), "0000000000000");
    }

    #[test]
    fn test_set_value_right_aligned() {
        let mut reg = Reg13::zero();
        reg.set_value(579);
        assert_eq!(reg.to_string(), "0000000000579");
        assert_eq!(reg.get(12), 9);
        assert_eq!(reg.get(10), 5);
    }

    #[test]
    fn test_set_value_truncates_to_width() {
        let mut reg = Reg13::zero();
        reg.set_value(12_345_678_901_234_567);
        // Only the lowest 13 digits survive
        assert_eq!(reg.value(), 5_678_901_234_567);
    }

    #[test]
    fn test_place_value() {
        let mut reg = Reg13::zero();
        reg.set_value(999);
        reg.place_value(21, 9);
        assert_eq!(reg.to_string(), "0000000021000");

        // Digits pushed past the left edge are dropped
        reg.place_value(12345, 2);
        assert_eq!(reg.to_string(), "3450000000000");
    }

    #[test]
    fn test_set_big() {
        let mut reg = Reg13::zero();
        reg.set_big(&BigUint::from(250_000u32));
        assert_eq!(reg.value(), 250_000);

        let huge: BigUint = "123456789012345678".parse().unwrap();
        reg.set_big(&huge);
        assert_eq!(reg.to_string(), "6789012345678");
    }

    #[test]
    fn test_increment_decrement_wrap() {
        let mut reg = Reg13::zero();
        reg.decrement(12);
        assert_eq!(reg.get(12), 9);
        reg.increment(12);
        assert_eq!(reg.get(12), 0);

        // Out-of-range wheels are ignored
        reg.increment(13);
        assert!(reg.is_zero());
    }

    #[test]
    fn test_serde_roundtrip_rejects_bad_digits() {
        let mut reg = DigitRegister::<8>::zero();
        reg.set_value(42);
        let json = serde_json::to_string(&reg).unwrap();
        let back: DigitRegister<8> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reg);

        let bad = "{\"digits\":[0,0,0,0,0,0,0,12]}";
        assert!(serde_json::from_str::<DigitRegister<8>>(bad).is_err());
    }
}

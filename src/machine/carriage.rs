//! The movable carriage.
//!
//! The carriage offsets the input register against the result register.
//! Position 0 aligns the units wheels; each step to the left multiplies the
//! contribution of a crank turn by ten.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Leftmost carriage stop.
pub const CARRIAGE_MIN: i8 = -6;

/// Rightmost carriage stop.
pub const CARRIAGE_MAX: i8 = 6;

/// One notch of carriage travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    /// Towards the more significant wheels (-1).
    Left,
    /// Towards the less significant wheels (+1).
    Right,
}

impl Shift {
    /// Signed offset of this shift.
    #[inline]
    pub const fn delta(self) -> i8 {
        match self {
            Shift::Left => -1,
            Shift::Right => 1,
        }
    }

    /// The shift that moves from `from` towards `to`, if they differ.
    pub fn towards(from: i8, to: i8) -> Option<Self> {
        match to.cmp(&from) {
            std::cmp::Ordering::Less => Some(Shift::Left),
            std::cmp::Ordering::Greater => Some(Shift::Right),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shift::Left => write!(f, "left"),
            Shift::Right => write!(f, "right"),
        }
    }
}

/// Carriage position, always within [`CARRIAGE_MIN`, `CARRIAGE_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Carriage {
    position: i8,
}

impl Carriage {
    /// A carriage at the home position.
    pub const fn new() -> Self {
        Self { position: 0 }
    }

    /// Current position.
    #[inline]
    pub const fn position(&self) -> i8 {
        self.position
    }

    /// Move one notch. Returns false when the carriage is already against
    /// the stop in that direction, in which case nothing changes.
    pub fn shift(&mut self, shift: Shift) -> bool {
        let next = self.position + shift.delta();
        if (CARRIAGE_MIN..=CARRIAGE_MAX).contains(&next) {
            self.position = next;
            true
        } else {
            false
        }
    }

    /// Return to position 0.
    pub fn home(&mut self) {
        self.position = 0;
    }
}

/// Clamp a requested carriage target into the mechanical range.
#[inline]
pub fn clamp_position(target: i64) -> i8 {
    target.clamp(CARRIAGE_MIN as i64, CARRIAGE_MAX as i64) as i8
}

//! # Brunsviga Emulator
//!
//! An emulator of the Brunsviga 13 RK mechanical pinwheel calculator.
//!
//! The Brunsviga was a hand-cranked desk calculator: a 13-digit result
//! register, 13 setting wheels on a sliding carriage, and a revolution
//! counter that tallies crank turns. This crate models the mechanism
//! digit by digit and generates the step-by-step operating procedures for
//! the classic arithmetic methods, which can be played forward and back.

pub mod machine;
pub mod decimal;
pub mod algo;
pub mod sequencer;
pub mod calculator;

// Re-export commonly used types
pub use machine::{Machine, Shift, Turn};
pub use decimal::{Decimal, ParseDecimalError};
pub use algo::{Action, Algorithm, AlgorithmError, AlgorithmKind, Outcome, Step};
pub use sequencer::{PlaybackConfig, PlaybackState, Sequencer, Snapshot};
pub use calculator::Calculator;

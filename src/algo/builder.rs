//! Step list builder shared by the generators.
//!
//! Tracks where the carriage will be once the steps emitted so far are
//! replayed, so generators can ask for "carriage to -3" and get the right
//! number of single-notch moves.

use crate::algo::step::{Action, Step};
use crate::decimal::Decimal;
use crate::machine::carriage::clamp_position;
use crate::machine::{Shift, Turn, CARRIAGE_MIN, INPUT_WIDTH};

/// How far an operand has to be pre-shifted in the input register so that
/// every place from `top_place` down to the units is reachable.
///
/// Place `p` is worked at carriage `preshift - p`, so the top place sits at
/// the left stop and the low places move into the positive positions.
pub(crate) fn input_preshift(top_place: u32) -> u32 {
    top_place.saturating_sub(CARRIAGE_MIN.unsigned_abs() as u32)
}

/// Carriage position for place `place` of an operand pre-shifted by
/// `preshift` wheels.
pub(crate) fn carriage_for(place: u32, preshift: u32) -> i64 {
    preshift as i64 - place as i64
}

pub(crate) struct StepBuilder {
    steps: Vec<Step>,
    carriage: i8,
}

impl StepBuilder {
    /// Start a sequence with a full clear.
    pub fn new() -> Self {
        let mut builder = Self {
            steps: Vec::new(),
            carriage: 0,
        };
        builder.push(Action::ClearAll, "Clear all registers");
        builder
    }

    /// Carriage position after the steps emitted so far.
    pub fn carriage(&self) -> i8 {
        self.carriage
    }

    pub fn push(&mut self, action: Action, description: impl Into<String>) {
        self.steps.push(Step::new(action, description));
    }

    pub fn note(&mut self, description: impl Into<String>) {
        self.steps.push(Step::note(description));
    }

    pub fn set_input(&mut self, value: u64, description: impl Into<String>) {
        self.push(Action::SetInput { value }, description);
    }

    pub fn set_input_at(&mut self, value: u64, rightmost: usize, description: impl Into<String>) {
        self.push(Action::SetInputAtPosition { value, rightmost }, description);
    }

    pub fn set_result(&mut self, value: u64, description: impl Into<String>) {
        self.push(Action::SetResultDirect { value }, description);
    }

    pub fn set_result_decimal(&mut self, value: Decimal, decimal_places: u32, description: impl Into<String>) {
        self.push(Action::SetResultDecimal { value, decimal_places }, description);
    }

    /// Set an operand on the input wheels, moved `preshift` wheels to the
    /// left of the usual right-aligned position.
    pub fn set_shifted_input(&mut self, value: u64, preshift: u32, description: impl Into<String>) {
        if preshift == 0 {
            self.set_input(value, description);
        } else {
            self.set_input_at(value, INPUT_WIDTH - 1 - preshift as usize, description);
        }
    }

    /// Emit `count` crank turns, each labelled with its ordinal.
    pub fn crank(&mut self, turn: Turn, count: u32, purpose: &str) {
        for n in 1..=count {
            self.push(
                Action::Crank(turn),
                format!("Turn the crank {} ({}/{}) {}", turn, n, count, purpose),
            );
        }
    }

    /// Walk the carriage one notch at a time to `target`, clamped to the
    /// mechanical stops.
    pub fn carriage_to(&mut self, target: i64) {
        let target = clamp_position(target);
        while let Some(shift) = Shift::towards(self.carriage, target) {
            self.carriage += shift.delta();
            let description = format!(
                "Move the carriage {} to position {}",
                shift, self.carriage
            );
            self.push(Action::MoveCarriage(shift), description);
        }
    }

    /// Close the sequence with the summary step.
    pub fn finish(mut self, summary: impl Into<String>) -> Vec<Step> {
        self.steps.push(Step::complete(summary));
        self.steps
    }
}

//! Primitive machine actions.
//!
//! A generated algorithm is a list of [`Step`]s, each one an [`Action`] the
//! operator performs plus the sentence that explains it.

use serde::{Serialize, Deserialize};
use crate::decimal::Decimal;
use crate::machine::{Machine, Shift, Turn};

/// One thing the operator does to the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Clear every register and bring the carriage home.
    ClearAll,
    /// Clear the input register.
    ClearInput,
    /// Clear the revolution counter.
    ClearRevolution,
    /// Set the input register (right-aligned).
    SetInput { value: u64 },
    /// Set the input register with the units digit on wheel `rightmost`.
    SetInputAtPosition { value: u64, rightmost: usize },
    /// Set the result register directly to an integer.
    SetResultDirect { value: u64 },
    /// Set the result register to a decimal with a marker.
    SetResultDecimal { value: Decimal, decimal_places: u32 },
    /// Turn the crank once.
    Crank(Turn),
    /// Move the carriage one notch.
    MoveCarriage(Shift),
    /// Explanation only.
    Note,
    /// Final summary.
    Complete,
}

impl Action {
    /// True for actions that only carry text.
    pub const fn is_display_only(&self) -> bool {
        matches!(self, Action::Note | Action::Complete)
    }
}

/// An action together with its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub action: Action,
    pub description: String,
}

impl Step {
    /// Create a step.
    pub fn new(action: Action, description: impl Into<String>) -> Self {
        Self {
            action,
            description: description.into(),
        }
    }

    /// A text-only step.
    pub fn note(description: impl Into<String>) -> Self {
        Self::new(Action::Note, description)
    }

    /// The closing summary step.
    pub fn complete(description: impl Into<String>) -> Self {
        Self::new(Action::Complete, description)
    }

    /// Apply this step to the machine.
    pub fn execute(&self, machine: &mut Machine) {
        match &self.action {
            Action::ClearAll => machine.reset(),
            Action::ClearInput => machine.clear_input(),
            Action::ClearRevolution => machine.clear_revolution(),
            Action::SetInput { value } => machine.set_input(*value),
            Action::SetInputAtPosition { value, rightmost } => {
                machine.set_input_at(*value, *rightmost)
            }
            Action::SetResultDirect { value } => machine.set_result(*value),
            Action::SetResultDecimal { value, decimal_places } => {
                machine.set_result_decimal(value, *decimal_places)
            }
            Action::Crank(turn) => machine.crank(*turn),
            Action::MoveCarriage(shift) => machine.move_carriage(*shift),
            Action::Note | Action::Complete => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_crank_sequence() {
        let mut machine = Machine::new();
        let steps = [
            Step::new(Action::ClearAll, "clear"),
            Step::new(Action::SetInput { value: 123 }, "set"),
            Step::new(Action::Crank(Turn::Forward), "turn"),
            Step::new(Action::SetInput { value: 456 }, "set"),
            Step::new(Action::Crank(Turn::Forward), "turn"),
        ];
        for step in &steps {
            step.execute(&mut machine);
        }
        assert_eq!(machine.result.value(), 579);
    }

    #[test]
    fn test_display_only_steps_do_nothing() {
        let mut machine = Machine::new();
        machine.set_input(9);
        let before = machine.clone();
        Step::note("just words").execute(&mut machine);
        Step::complete("done").execute(&mut machine);
        assert_eq!(machine, before);
        assert!(Step::note("x").action.is_display_only());
    }

    #[test]
    fn test_set_input_at_position() {
        let mut machine = Machine::new();
        Step::new(Action::SetInputAtPosition { value: 21, rightmost: 9 }, "set").execute(&mut machine);
        assert_eq!(machine.input.value(), 21_000);
    }

    #[test]
    fn test_step_serializes() {
        let step = Step::new(Action::MoveCarriage(Shift::Left), "move");
        let json = serde_json::to_string(&step).unwrap();
        let back: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(back, step);
    }
}

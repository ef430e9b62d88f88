//! Text listings of step sequences.
//!
//! Renders each step as a short mnemonic followed by its description, the
//! way an operator's crib sheet would read.

use crate::algo::step::{Action, Step};

/// Mnemonic for a single step.
pub fn describe_step(step: &Step) -> String {
    format_action(&step.action)
}

/// Render a whole sequence, one numbered line per step.
pub fn listing(steps: &[Step]) -> String {
    let mut output = String::new();
    output.push_str("; Brunsviga 13 RK step listing\n");
    output.push_str("; ----------------------------\n\n");

    for (index, step) in steps.iter().enumerate() {
        let line = describe_step(step);
        output.push_str(&format!("{:03}: {:<16} ; {}\n", index + 1, line, step.description));
    }

    output
}

fn format_action(action: &Action) -> String {
    match action {
        // Clearing
        Action::ClearAll => "CLR ALL".to_string(),
        Action::ClearInput => "CLR IN".to_string(),
        Action::ClearRevolution => "CLR REV".to_string(),

        // Setting
        Action::SetInput { value } => format!("SET {}", value),
        Action::SetInputAtPosition { value, rightmost } => format!("SET {}@{}", value, rightmost),
        Action::SetResultDirect { value } => format!("RES {}", value),
        Action::SetResultDecimal { value, decimal_places } => {
            format!("RES {}", value.abs().to_fixed(*decimal_places))
        }

        // Mechanism
        Action::Crank(turn) => format!("CRANK {}", if turn.sign() > 0 { '+' } else { '-' }),
        Action::MoveCarriage(shift) => format!("SHIFT {}", if shift.delta() < 0 { '<' } else { '>' }),

        // Text
        Action::Note => "NOTE".to_string(),
        Action::Complete => "DONE".to_string(),
    }
}

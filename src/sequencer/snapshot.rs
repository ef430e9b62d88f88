//! Read-only view of the machine handed to the front end.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::algo::Step;
use crate::machine::{Machine, COUNTER_WIDTH, INPUT_WIDTH, RESULT_WIDTH};
use crate::sequencer::PlaybackState;

/// Everything a display needs after a command or step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Result register, most significant digit first.
    pub result: [u8; RESULT_WIDTH],
    /// Index of the first fractional result digit, if any.
    pub decimal_marker: Option<usize>,
    /// Input register, most significant digit first.
    pub input: [u8; INPUT_WIDTH],
    /// Carriage position.
    pub carriage: i8,
    /// Revolution counter digits.
    pub counter: [u8; COUNTER_WIDTH],
    /// Counter sign (shown in red on the machine).
    pub counter_negative: bool,
    /// Description of the last applied step.
    pub description: Option<String>,
    /// Index of the last applied step.
    pub cursor: Option<usize>,
    /// Number of steps in the loaded sequence.
    pub total: usize,
    pub state: PlaybackState,
}

impl Snapshot {
    /// Capture the machine together with sequence progress.
    pub fn capture(machine: &Machine, steps: &[Step], cursor: Option<usize>, state: PlaybackState) -> Self {
        Self {
            result: *machine.result.digits(),
            decimal_marker: machine.decimal_marker,
            input: *machine.input.digits(),
            carriage: machine.carriage.position(),
            counter: *machine.counter.digits(),
            counter_negative: machine.counter.is_negative(),
            description: cursor
                .and_then(|index| steps.get(index))
                .map(|step| step.description.clone()),
            cursor,
            total: steps.len(),
            state,
        }
    }

    /// Result register as a number string, with the decimal point if set.
    pub fn result_text(&self) -> String {
        let mut text = String::with_capacity(RESULT_WIDTH + 1);
        for (index, digit) in self.result.iter().enumerate() {
            if self.decimal_marker == Some(index) {
                text.push('.');
            }
            text.push(char::from(b'0' + digit));
        }
        text
    }
}

fn digits(values: &[u8]) -> String {
    values.iter().map(|d| char::from(b'0' + d)).collect()
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = match self.cursor {
            Some(index) => format!("{}/{}", index + 1, self.total),
            None => format!("0/{}", self.total),
        };
        writeln!(f, "R {}", self.result_text())?;
        writeln!(f, "E {}", digits(&self.input))?;
        write!(
            f,
            "U {}{}  carriage {:+}  step {} [{}]",
            if self.counter_negative { '-' } else { '+' },
            digits(&self.counter),
            self.carriage,
            progress,
            self.state
        )?;
        if let Some(description) = &self.description {
            write!(f, "\n  {}", description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Decimal;
    use crate::machine::Turn;

    #[test]
    fn test_capture() {
        let mut machine = Machine::new();
        machine.set_input(7);
        machine.crank(Turn::Backward);
        let steps = vec![Step::note("first"), Step::note("second")];

        let snapshot = Snapshot::capture(&machine, &steps, Some(1), PlaybackState::Paused);
        assert_eq!(snapshot.input[12], 7);
        assert_eq!(snapshot.result_text(), "9999999999993");
        assert!(snapshot.counter_negative);
        assert_eq!(snapshot.description.as_deref(), Some("second"));
        assert_eq!(snapshot.total, 2);

        let empty = Snapshot::capture(&machine, &steps, None, PlaybackState::Ready);
        assert_eq!(empty.description, None);
    }

    #[test]
    fn test_result_text_with_marker() {
        let mut machine = Machine::new();
        machine.set_result_decimal(&Decimal::parse("2.5").unwrap(), 5);
        let snapshot = Snapshot::capture(&machine, &[], None, PlaybackState::Idle);
        assert_eq!(snapshot.result_text(), "00000002.50000");
    }

    #[test]
    fn test_display() {
        let snapshot = Snapshot::capture(&Machine::new(), &[], None, PlaybackState::Idle);
        let text = snapshot.to_string();
        assert!(text.contains("R 0000000000000"));
        assert!(text.contains("U +00000000"));
        assert!(text.contains("[idle]"));
    }

    #[test]
    fn test_serializes_to_json() {
        let snapshot = Snapshot::capture(&Machine::new(), &[], None, PlaybackState::Idle);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"carriage\":0"));
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}

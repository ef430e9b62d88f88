//! Step sequencer: owns the machine and walks a loaded algorithm.

use std::time::{Duration, Instant};
use log::{debug, trace};
use crate::algo::{Algorithm, Step};
use crate::machine::Machine;
use crate::sequencer::snapshot::Snapshot;
use crate::sequencer::timer::PlaybackTimer;
use crate::sequencer::{PlaybackConfig, PlaybackState};

/// Plays generated step sequences on the machine.
///
/// The cursor is the index of the last applied step; `None` means nothing
/// has been applied yet. Stepping back rebuilds the machine from zero and
/// replays every step before the cursor, since a crank turn cannot be undone
/// once its carries have merged into the result register.
#[derive(Debug, Clone)]
pub struct Sequencer {
    machine: Machine,
    algorithm: Option<Algorithm>,
    cursor: Option<usize>,
    state: PlaybackState,
    timer: PlaybackTimer,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl Sequencer {
    /// An idle sequencer with a cleared machine.
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            machine: Machine::new(),
            algorithm: None,
            cursor: None,
            state: PlaybackState::Idle,
            timer: PlaybackTimer::new(config.interval),
        }
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Mutable access for the manual commands.
    pub(crate) fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The loaded algorithm, if any.
    pub fn algorithm(&self) -> Option<&Algorithm> {
        self.algorithm.as_ref()
    }

    /// Steps of the loaded algorithm (empty when idle).
    pub fn steps(&self) -> &[Step] {
        self.algorithm.as_ref().map_or(&[], |algorithm| algorithm.steps.as_slice())
    }

    /// Index of the next step to apply, if one remains.
    fn next_index(&self) -> Option<usize> {
        let next = self.cursor.map_or(0, |cursor| cursor + 1);
        (next < self.steps().len()).then_some(next)
    }

    /// True when every step has been applied.
    pub fn is_finished(&self) -> bool {
        self.next_index().is_none()
    }

    /// Current playback interval.
    pub fn interval(&self) -> Duration {
        self.timer.interval()
    }

    /// When the next timed step is due, if playing.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Load a sequence: the machine is cleared and nothing is applied yet.
    pub fn load(&mut self, algorithm: Algorithm) -> &Algorithm {
        debug!("loaded {} ({} steps)", algorithm.kind, algorithm.len());
        self.timer.disarm();
        self.machine.reset();
        self.cursor = None;
        self.set_state(PlaybackState::Ready);
        self.algorithm.insert(algorithm)
    }

    /// Apply the next step. Returns false at the end of the sequence.
    pub fn step_forward(&mut self) -> bool {
        let Some(index) = self.next_index() else {
            return false;
        };
        if let Some(step) = self.algorithm.as_ref().and_then(|a| a.steps.get(index)) {
            trace!("step {}: {:?} {}", index, step.action, step.description);
            step.execute(&mut self.machine);
        }
        self.cursor = Some(index);
        true
    }

    /// Undo the last applied step by replaying everything before it.
    /// Returns false when nothing has been applied.
    pub fn step_back(&mut self) -> bool {
        let Some(cursor) = self.cursor else {
            return false;
        };
        self.machine.reset();
        if let Some(algorithm) = &self.algorithm {
            for step in &algorithm.steps[..cursor] {
                step.execute(&mut self.machine);
            }
        }
        debug!("stepped back, replayed {} steps", cursor);
        self.cursor = cursor.checked_sub(1);
        true
    }

    /// Apply every remaining step. Returns the number applied.
    pub fn run_to_end(&mut self) -> usize {
        let mut applied = 0;
        while self.step_forward() {
            applied += 1;
        }
        applied
    }

    /// Change the playback interval.
    pub fn set_interval(&mut self, interval: Duration) {
        self.timer.set_interval(interval);
    }

    /// Start timed playback from `now`. Does nothing when no step remains.
    pub fn play(&mut self, now: Instant) -> bool {
        if self.is_finished() {
            return false;
        }
        self.timer.arm(now);
        self.set_state(PlaybackState::Playing);
        true
    }

    /// Cancel timed playback.
    pub fn pause(&mut self) {
        self.timer.disarm();
        if self.state != PlaybackState::Idle {
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Drop the sequence and clear the machine.
    pub fn stop(&mut self) {
        self.timer.disarm();
        self.machine.reset();
        self.algorithm = None;
        self.cursor = None;
        self.set_state(PlaybackState::Idle);
    }

    /// Drive timed playback. Applies at most one step when one is due and
    /// pauses after the last. Returns true if a step was applied.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.state != PlaybackState::Playing || !self.timer.poll(now) {
            return false;
        }
        let applied = self.step_forward();
        if self.is_finished() {
            debug!("sequence finished, pausing");
            self.pause();
        }
        applied
    }

    /// Current view of the machine and progress.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.machine, self.steps(), self.cursor, self.state)
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            debug!("playback {} -> {}", self.state, state);
            self.state = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::{addition, division, multiplication};

    const MS: Duration = Duration::from_millis(1);

    fn loaded(algorithm: Algorithm) -> Sequencer {
        let mut sequencer = Sequencer::default();
        sequencer.load(algorithm);
        sequencer
    }

    #[test]
    fn test_load_is_ready() {
        let sequencer = loaded(addition(1, 2).unwrap());
        assert_eq!(sequencer.state(), PlaybackState::Ready);
        assert_eq!(sequencer.cursor(), None);
        assert_eq!(sequencer.steps().len(), 6);
    }

    #[test]
    fn test_step_forward_to_end() {
        let mut sequencer = loaded(addition(123, 456).unwrap());
        assert_eq!(sequencer.run_to_end(), 6);
        assert!(!sequencer.step_forward());
        assert_eq!(sequencer.cursor(), Some(5));
        assert_eq!(sequencer.machine().result.value(), 579);
    }

    #[test]
    fn test_step_back_replays() {
        let mut sequencer = loaded(division(100, 7).unwrap());
        for _ in 0..8 {
            sequencer.step_forward();
        }
        let before = sequencer.snapshot();
        sequencer.step_forward();
        sequencer.step_back();
        assert_eq!(sequencer.snapshot(), before);
    }

    #[test]
    fn test_step_back_to_start() {
        let mut sequencer = loaded(addition(5, 5).unwrap());
        sequencer.step_forward();
        sequencer.step_forward();
        assert!(sequencer.step_back());
        assert!(sequencer.step_back());
        assert_eq!(sequencer.cursor(), None);
        assert!(!sequencer.step_back());
        assert_eq!(sequencer.machine(), &Machine::new());
    }

    #[test]
    fn test_step_back_discards_manual_changes() {
        let mut sequencer = loaded(addition(5, 5).unwrap());
        sequencer.step_forward();
        sequencer.step_forward();
        sequencer.machine_mut().increment_input_digit(0);
        sequencer.step_forward();
        sequencer.step_back();
        assert_eq!(sequencer.machine().input.value(), 5);
    }

    #[test]
    fn test_timed_playback_auto_pauses() {
        let mut sequencer = loaded(addition(2, 3).unwrap());
        sequencer.set_interval(10 * MS);
        let start = Instant::now();
        assert!(sequencer.play(start));
        assert_eq!(sequencer.state(), PlaybackState::Playing);

        assert!(!sequencer.tick(start + 5 * MS));
        let mut now = start;
        let mut applied = 0;
        for _ in 0..20 {
            now += 10 * MS;
            if sequencer.tick(now) {
                applied += 1;
            }
        }
        assert_eq!(applied, 6);
        assert_eq!(sequencer.state(), PlaybackState::Paused);
        assert_eq!(sequencer.next_deadline(), None);
        assert_eq!(sequencer.machine().result.value(), 5);
    }

    #[test]
    fn test_pause_cancels_timer() {
        let mut sequencer = loaded(multiplication(12, 34).unwrap());
        sequencer.set_interval(10 * MS);
        let start = Instant::now();
        sequencer.play(start);
        assert!(sequencer.tick(start + 10 * MS));
        sequencer.pause();
        assert_eq!(sequencer.state(), PlaybackState::Paused);
        assert!(!sequencer.tick(start + 100 * MS));
        assert_eq!(sequencer.cursor(), Some(0));
    }

    #[test]
    fn test_play_when_finished_is_noop() {
        let mut sequencer = loaded(addition(1, 1).unwrap());
        sequencer.run_to_end();
        assert!(!sequencer.play(Instant::now()));
        assert_eq!(sequencer.state(), PlaybackState::Ready);

        let mut idle = Sequencer::default();
        assert!(!idle.play(Instant::now()));
        idle.pause();
        assert_eq!(idle.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_stop_clears_everything() {
        let mut sequencer = loaded(addition(1, 1).unwrap());
        sequencer.play(Instant::now());
        sequencer.step_forward();
        sequencer.step_forward();
        sequencer.stop();
        assert_eq!(sequencer.state(), PlaybackState::Idle);
        assert!(sequencer.steps().is_empty());
        assert_eq!(sequencer.cursor(), None);
        assert_eq!(sequencer.next_deadline(), None);
        assert_eq!(sequencer.machine(), &Machine::new());
    }

    #[test]
    fn test_snapshot_carries_description() {
        let mut sequencer = loaded(addition(1, 1).unwrap());
        sequencer.step_forward();
        let snapshot = sequencer.snapshot();
        assert_eq!(snapshot.description.as_deref(), Some("Clear all registers"));
        assert_eq!(snapshot.cursor, Some(0));
        assert_eq!(snapshot.total, 6);
    }
}

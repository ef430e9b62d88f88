//! Playback of generated step sequences.
//!
//! The [`Sequencer`] exclusively owns the [`Machine`](crate::machine::Machine);
//! front ends only see [`Snapshot`]s. Timed playback is cooperative, driven
//! by [`Sequencer::tick`].

pub mod player;
pub mod snapshot;
pub mod timer;

pub use player::Sequencer;
pub use snapshot::Snapshot;
pub use timer::PlaybackTimer;

use std::fmt;
use std::time::Duration;
use serde::{Serialize, Deserialize};

/// Default time between steps during playback.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// Playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing loaded.
    Idle,
    /// A sequence is loaded and not playing.
    Ready,
    /// Timed playback is running.
    Playing,
    /// Timed playback was paused, by request or at the end of the sequence.
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Ready => "ready",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
        };
        write!(f, "{}", name)
    }
}

/// Playback settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Time between steps.
    pub interval: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl PlaybackConfig {
    /// Settings with the given step interval in milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self {
            interval: Duration::from_millis(millis),
        }
    }
}

//! Media source abstraction
//!
//! `MediaHandle` is the controllable audio source the engine drives.
//! Instructions are fire-and-forget: the engine never assumes they succeeded
//! and re-derives its state from the `MediaEvent`s the source reports back.

use std::fmt;
use std::time::Duration;

/// Identifier of a playable resource (a local path for the rodio backend)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifies one load of one source
///
/// Bumped on every source change. Events tagged with an older generation
/// belong to a superseded source and are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Notifications emitted by a media source
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// The source finished loading and knows its duration
    DurationKnown {
        generation: Generation,
        duration: Duration,
    },
    /// Native progress report
    PositionChanged {
        generation: Generation,
        position: Duration,
    },
    /// Playback reached the end without looping
    Ended { generation: Generation },
    /// The source could not be loaded or stopped working
    LoadFailed {
        generation: Generation,
        reason: String,
    },
}

impl MediaEvent {
    pub fn generation(&self) -> Generation {
        match self {
            Self::DurationKnown { generation, .. }
            | Self::PositionChanged { generation, .. }
            | Self::Ended { generation }
            | Self::LoadFailed { generation, .. } => *generation,
        }
    }
}

/// Controllable audio source
pub trait MediaHandle {
    /// Start loading `source`; results are reported tagged with `generation`
    fn load(&mut self, source: &SourceId, generation: Generation);

    fn play(&mut self);

    fn pause(&mut self);

    /// Release the current source entirely
    fn stop(&mut self);

    fn position(&self) -> Duration;

    fn set_position(&mut self, position: Duration);

    /// `None` until the current source has loaded
    fn duration(&self) -> Option<Duration>;

    fn volume(&self) -> f32;

    fn set_volume(&mut self, volume: f32);

    fn is_looping(&self) -> bool;

    fn set_looping(&mut self, looping: bool);
}

//! Player status and its transition table
//!
//! A single enum replaces independent `playing` / `dragging` / `loading`
//! flags, so combinations such as "playing while loading" cannot be
//! represented. Every change goes through `PlayerStatus::apply`.

use std::fmt;

/// Current status of the player
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlayerStatus {
    /// Source changed, duration not known yet
    #[default]
    Loading,
    /// Loaded, never started
    Ready,
    Playing,
    Paused,
    /// Drag session active; `resume` is the state to return to on release
    Seeking { resume: bool },
    /// Reached the end without repeat
    Ended,
    /// The source failed; only a new source recovers
    LoadFailed { reason: String },
}

/// Inputs of the transition table
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    SourceChanged,
    DurationKnown,
    LoadFailed(String),
    Play,
    Pause,
    BeginSeek,
    EndSeek,
    Finished,
}

/// Rejected transition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot apply {transition} while {from}")]
pub struct TransitionError {
    pub from: &'static str,
    pub transition: &'static str,
}

impl PlayerStatus {
    /// Compute the next status, or reject the transition
    pub fn apply(&self, transition: &Transition) -> Result<PlayerStatus, TransitionError> {
        use PlayerStatus as S;
        use Transition as T;

        let next = match (self, transition) {
            // A new source supersedes everything
            (_, T::SourceChanged) => S::Loading,
            (_, T::LoadFailed(reason)) => S::LoadFailed {
                reason: reason.clone(),
            },

            (S::Loading, T::DurationKnown) => S::Ready,

            (S::Ready | S::Paused | S::Ended, T::Play) => S::Playing,
            (S::Playing, T::Pause) => S::Paused,
            (S::Seeking { .. }, T::Play) => S::Seeking { resume: true },
            (S::Seeking { .. }, T::Pause) => S::Seeking { resume: false },

            (S::Playing, T::BeginSeek) => S::Seeking { resume: true },
            (S::Ready | S::Paused | S::Ended, T::BeginSeek) => S::Seeking { resume: false },
            (S::Seeking { resume: true }, T::EndSeek) => S::Playing,
            (S::Seeking { resume: false }, T::EndSeek) => S::Paused,

            (S::Playing | S::Paused, T::Finished) => S::Ended,

            _ => {
                return Err(TransitionError {
                    from: self.name(),
                    transition: transition.name(),
                });
            }
        };

        Ok(next)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Seeking { .. } => "seeking",
            Self::Ended => "ended",
            Self::LoadFailed { .. } => "load-failed",
        }
    }

    /// Whether audio is (or will resume) playing
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing | Self::Seeking { resume: true })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Seeking { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::LoadFailed { .. })
    }

    /// Whether the source is loaded (duration known, not failed)
    pub fn is_loaded(&self) -> bool {
        !self.is_loading() && !self.is_failed()
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Transition {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SourceChanged => "source-changed",
            Self::DurationKnown => "duration-known",
            Self::LoadFailed(_) => "load-failed",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::BeginSeek => "begin-seek",
            Self::EndSeek => "end-seek",
            Self::Finished => "finished",
        }
    }
}

//! Native position notifications

use std::time::Duration;

use super::media::Generation;
use super::state::PlaybackState;
use super::status::PlayerStatus;

/// What happened to one position notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    /// Stored as the new position
    Accepted,
    /// Stored, and the position reached the end of a non-repeating source
    ReachedEnd,
    /// Dropped because a drag session owns the position
    Suppressed,
    /// Dropped because nothing is loaded (or playback already ended)
    Inactive,
    /// Dropped because it belongs to a superseded source
    Stale,
}

/// Applies `MediaEvent::PositionChanged` to the playback state
pub struct PositionTracker;

impl PositionTracker {
    pub fn apply(
        state: &mut PlaybackState,
        generation: Generation,
        position: Duration,
    ) -> TrackOutcome {
        if generation != state.generation {
            return TrackOutcome::Stale;
        }

        match state.status {
            PlayerStatus::Seeking { .. } => return TrackOutcome::Suppressed,
            PlayerStatus::Ready | PlayerStatus::Playing | PlayerStatus::Paused => {}
            _ => return TrackOutcome::Inactive,
        }

        if position > state.duration {
            tracing::trace!(
                "Clamping reported position {:?} to duration {:?}",
                position,
                state.duration
            );
        }
        state.position = state.clamp_position(position);

        let at_end = !state.duration.is_zero() && state.position == state.duration;
        if at_end && !state.is_repeat && state.status == PlayerStatus::Playing {
            TrackOutcome::ReachedEnd
        } else {
            TrackOutcome::Accepted
        }
    }
}

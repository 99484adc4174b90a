//! Loading -> Ready gating on source changes

use std::time::Duration;

use super::media::{Generation, MediaHandle, SourceId};
use super::state::PlaybackState;
use super::status::Transition;

/// Outcome of a load-related media event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// The current source became ready
    Opened,
    /// The current source already had a duration; it was refreshed
    Updated,
    /// The current source failed
    Failed,
    /// The event belongs to a superseded source
    Stale,
}

pub struct LoadGate;

impl LoadGate {
    /// Build the record for a new source and ask the media to load it
    ///
    /// The returned state is already `Loading` at position zero, so every
    /// notification for the new generation is judged against it.
    pub fn replace(
        previous: &PlaybackState,
        source: SourceId,
        media: &mut impl MediaHandle,
    ) -> PlaybackState {
        let generation = previous.generation.next();
        let mut state = PlaybackState::new(
            source,
            generation,
            previous.volume,
            previous.is_repeat,
        );
        // Go through the table so the change is logged with the others
        state.status = previous.status.clone();
        if let Err(e) = state.transition(Transition::SourceChanged) {
            tracing::warn!("Source change rejected: {}", e);
        }
        state.position = Duration::ZERO;
        state.duration = Duration::ZERO;

        Self::start(&state, media);
        state
    }

    /// Ask the media to load the state's source
    pub fn start(state: &PlaybackState, media: &mut impl MediaHandle) {
        tracing::info!("Loading source {} ({})", state.source, state.generation);
        media.load(&state.source, state.generation);
    }

    /// The media reported a duration
    pub fn resolve(state: &mut PlaybackState, generation: Generation, duration: Duration) -> GateOutcome {
        if generation != state.generation {
            tracing::debug!(
                "Ignoring duration for stale source {} (current {})",
                generation,
                state.generation
            );
            return GateOutcome::Stale;
        }

        state.duration = duration;
        state.position = state.clamp_position(state.position);

        if state.is_loading() {
            if let Err(e) = state.transition(Transition::DurationKnown) {
                tracing::warn!("Cannot open load gate: {}", e);
                return GateOutcome::Updated;
            }
            tracing::info!("Source {} ready, duration {:?}", state.source, duration);
            GateOutcome::Opened
        } else {
            GateOutcome::Updated
        }
    }

    /// The media reported that the source is unusable
    pub fn fail(state: &mut PlaybackState, generation: Generation, reason: String) -> GateOutcome {
        if generation != state.generation {
            return GateOutcome::Stale;
        }

        tracing::warn!("Source {} failed: {}", state.source, reason);
        if let Err(e) = state.transition(Transition::LoadFailed(reason)) {
            tracing::warn!("Cannot record load failure: {}", e);
        }
        GateOutcome::Failed
    }
}

//! Playback, repeat and volume controls
//!
//! Simple state mutators. Each one writes the playback state and mirrors the
//! change onto the media exactly once.

use super::media::MediaHandle;
use super::state::{PlaybackState, clamp_volume};
use super::status::{Transition, TransitionError};

/// Play/pause button
pub struct PlaybackToggle;

impl PlaybackToggle {
    /// Flip between playing and paused
    ///
    /// Inert (returns `Ok(false)`) until the source is loaded. Issues exactly
    /// one `play()` or `pause()` per accepted toggle.
    pub fn toggle(
        state: &mut PlaybackState,
        media: &mut impl MediaHandle,
    ) -> Result<bool, TransitionError> {
        if !state.can_toggle_playback() {
            tracing::debug!("Playback toggle ignored while {}", state.status);
            return Ok(false);
        }

        if state.is_playing() {
            state.transition(Transition::Pause)?;
            media.pause();
        } else {
            state.transition(Transition::Play)?;
            media.play();
        }
        Ok(true)
    }
}

/// Repeat button
pub struct RepeatToggle;

impl RepeatToggle {
    /// Flip repeat and mirror it onto the media's loop flag
    pub fn toggle(state: &mut PlaybackState, media: &mut impl MediaHandle) -> bool {
        state.is_repeat = !state.is_repeat;
        media.set_looping(state.is_repeat);
        tracing::debug!("Repeat {}", if state.is_repeat { "on" } else { "off" });
        state.is_repeat
    }
}

/// Identifies one pointer gesture (press .. release)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GestureId(u64);

/// Volume popover
///
/// Focus loss closes the panel. A pointer press outside the panel blurs it
/// before the click it starts is delivered, so when that click lands on the
/// toggle button the toggle is swallowed instead of reopening the panel.
#[derive(Debug, Default)]
pub struct VolumePanel {
    gesture: GestureId,
    closed_by_blur: Option<GestureId>,
}

impl VolumePanel {
    /// A new pointer gesture started anywhere in the window
    pub fn begin_gesture(&mut self) -> GestureId {
        self.gesture = GestureId(self.gesture.0 + 1);
        self.gesture
    }

    pub fn toggle(&mut self, state: &mut PlaybackState) -> bool {
        if self.closed_by_blur.take() == Some(self.gesture) {
            tracing::debug!("Volume panel toggle swallowed after blur in same gesture");
            return state.show_volume_panel;
        }
        state.show_volume_panel = !state.show_volume_panel;
        state.show_volume_panel
    }

    /// The panel lost focus; `gesture` is the pointer gesture that caused it
    pub fn blur(&mut self, state: &mut PlaybackState, gesture: Option<GestureId>) {
        if !state.show_volume_panel {
            return;
        }
        state.show_volume_panel = false;
        self.closed_by_blur = gesture;
    }

    /// Slider change; written through without debouncing
    pub fn set_volume(state: &mut PlaybackState, media: &mut impl MediaHandle, volume: f32) -> f32 {
        state.volume = clamp_volume(volume);
        media.set_volume(state.volume);
        state.volume
    }
}

/// Icon tier for the volume button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeLevel {
    Muted,
    Low,
    High,
}

impl VolumeLevel {
    pub fn from_volume(volume: f32) -> Self {
        if volume <= 0.0 {
            Self::Muted
        } else if volume < 0.6 {
            Self::Low
        } else {
            Self::High
        }
    }
}

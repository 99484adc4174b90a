//! The playback record owned by the engine

use std::time::Duration;

use super::controls::VolumeLevel;
use super::media::{Generation, SourceId};
use super::status::{PlayerStatus, Transition, TransitionError};
use crate::utils::format_time;

/// Playback state of one loaded source
///
/// Replaced as a whole whenever the source changes (see `LoadGate`).
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub(super) source: SourceId,
    pub(super) generation: Generation,
    /// Always within `0..=duration`
    pub(super) position: Duration,
    /// Zero until the source reports its duration
    pub(super) duration: Duration,
    pub(super) status: PlayerStatus,
    /// Always within `0.0..=1.0`
    pub(super) volume: f32,
    pub(super) is_repeat: bool,
    pub(super) show_volume_panel: bool,
}

impl PlaybackState {
    /// Fresh record for `source`, loading
    pub fn new(source: SourceId, generation: Generation, volume: f32, is_repeat: bool) -> Self {
        Self {
            source,
            generation,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            status: PlayerStatus::Loading,
            volume: clamp_volume(volume),
            is_repeat,
            show_volume_panel: false,
        }
    }

    pub fn source(&self) -> &SourceId {
        &self.source
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn status(&self) -> &PlayerStatus {
        &self.status
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_repeat(&self) -> bool {
        self.is_repeat
    }

    pub fn show_volume_panel(&self) -> bool {
        self.show_volume_panel
    }

    pub fn is_playing(&self) -> bool {
        self.status.is_playing()
    }

    pub fn is_dragging(&self) -> bool {
        self.status.is_dragging()
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// Whether the play button accepts input
    pub fn can_toggle_playback(&self) -> bool {
        self.status.is_loaded()
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.status {
            PlayerStatus::LoadFailed { reason } => Some(reason),
            _ => None,
        }
    }

    /// Played fraction for the progress bar, 0 while the duration is unknown
    pub fn progress_fraction(&self) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        let fraction = self.position.as_secs_f64() / self.duration.as_secs_f64();
        fraction.clamp(0.0, 1.0) as f32
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.position)
    }

    pub fn total_label(&self) -> String {
        format_time(self.duration)
    }

    pub fn volume_level(&self) -> VolumeLevel {
        VolumeLevel::from_volume(self.volume)
    }

    pub(super) fn clamp_position(&self, position: Duration) -> Duration {
        position.min(self.duration)
    }

    /// Apply a status transition, leaving the status untouched on rejection
    pub(super) fn transition(&mut self, transition: Transition) -> Result<(), TransitionError> {
        let next = self.status.apply(&transition)?;
        tracing::debug!(
            "Status {} -> {} ({})",
            self.status,
            next,
            transition.name()
        );
        self.status = next;
        Ok(())
    }
}

/// Clamp a volume write into `0.0..=1.0`; NaN becomes silence
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

//! Audio thread communication types
//!
//! - `AudioCommand` - Commands sent from the UI thread to the audio thread
//! - `MediaEvent` - Notifications sent back (see `crate::player::media`)
//! - `SharedPlaybackState` - Thread-safe snapshot for non-blocking reads
//!
//! ## Architecture
//! ```text
//! UI Thread (AudioHandle) --[AudioCommand]--> Audio Thread (AudioPlayer)
//! UI Thread              <--[MediaEvent]----- Audio Thread
//! UI Thread              <--[SharedState]---- Audio Thread (non-blocking reads)
//! ```

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::player::{Generation, MediaEvent, SourceId};

// ============ Commands (UI -> Audio Thread) ============

/// Commands sent from UI thread to audio thread
///
/// All commands are processed asynchronously - the UI thread sends and returns
/// immediately. Results are reported back as `MediaEvent`s.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    /// Decode a source and leave it paused at the start
    Load {
        source: SourceId,
        generation: Generation,
    },
    Play,
    Pause,
    /// Drop the current source
    Stop,
    Seek { position: Duration },
    /// Set volume (0.0 - 1.0)
    SetVolume { volume: f32 },
    SetLooping { looping: bool },
    /// Periodic tick for position sync and end-of-track detection
    Tick,
    /// Leave the command loop
    Shutdown,
}

// ============ Shared State ============

#[derive(Debug, Clone)]
struct SharedStateInner {
    position: Duration,
    duration: Option<Duration>,
    volume: f32,
    looping: bool,
}

impl Default for SharedStateInner {
    fn default() -> Self {
        Self {
            position: Duration::ZERO,
            duration: None,
            volume: 1.0,
            looping: false,
        }
    }
}

/// Thread-safe shared playback state
///
/// UI thread reads this without blocking.
/// Audio thread updates it after each operation.
#[derive(Clone, Default)]
pub struct SharedPlaybackState {
    inner: Arc<RwLock<SharedStateInner>>,
}

impl std::fmt::Debug for SharedPlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("SharedPlaybackState")
            .field("position", &inner.position)
            .field("duration", &inner.duration)
            .field("volume", &inner.volume)
            .field("looping", &inner.looping)
            .finish()
    }
}

impl SharedPlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Duration {
        self.inner.read().position
    }

    pub fn duration(&self) -> Option<Duration> {
        self.inner.read().duration
    }

    pub fn volume(&self) -> f32 {
        self.inner.read().volume
    }

    pub fn is_looping(&self) -> bool {
        self.inner.read().looping
    }

    // ---- Update methods ----

    pub fn set_position(&self, position: Duration) {
        self.inner.write().position = position;
    }

    pub fn set_duration(&self, duration: Option<Duration>) {
        self.inner.write().duration = duration;
    }

    pub fn set_volume(&self, volume: f32) {
        self.inner.write().volume = volume;
    }

    pub fn set_looping(&self, looping: bool) {
        self.inner.write().looping = looping;
    }

    /// Forget everything about the previous source
    pub fn reset_source(&self) {
        let mut inner = self.inner.write();
        inner.position = Duration::ZERO;
        inner.duration = None;
    }
}

// ============ Channel Types ============

/// Sender for audio commands (held by AudioHandle)
pub type AudioCommandSender = tokio::sync::mpsc::UnboundedSender<AudioCommand>;

/// Receiver for audio commands (held by audio thread)
pub type AudioCommandReceiver = tokio::sync::mpsc::UnboundedReceiver<AudioCommand>;

/// Sender for media events (held by audio thread)
pub type MediaEventSender = tokio::sync::mpsc::UnboundedSender<MediaEvent>;

/// Receiver for media events (held by App)
pub type MediaEventReceiver = tokio::sync::mpsc::UnboundedReceiver<MediaEvent>;

pub fn audio_command_channel() -> (AudioCommandSender, AudioCommandReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

pub fn media_event_channel() -> (MediaEventSender, MediaEventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

//! Application messages

use std::path::PathBuf;

use crate::player::{BarGeometry, MediaEvent};

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    /// No-op message for inert controls
    Noop,

    // ============ Media ============
    /// Notification from the audio thread
    Media(MediaEvent),
    /// Periodic position refresh while playing or dragging
    PlaybackTick,
    /// A file was dropped on the window; replaces the source
    SourceDropped(PathBuf),

    // ============ Pointer ============
    /// Left button pressed anywhere in the window
    PointerDown,
    /// Pointer pressed over the progress bar (x, bar geometry)
    SeekPressed(f32, BarGeometry),
    /// Pointer moved while the progress bar holds the pointer
    SeekMoved(f32),
    /// Pointer released while the progress bar holds the pointer
    SeekReleased,

    // ============ Controls ============
    TogglePlayback,
    ToggleRepeat,
    ToggleVolumePanel,
    /// Pointer entered (true) or left (false) the volume panel
    VolumePanelHovered(bool),
    /// The window lost focus
    WindowUnfocused,
    SetVolume(f32),

    // ============ Window ============
    /// Close button or window close request
    Close,
}

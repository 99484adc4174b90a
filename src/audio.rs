//! Audio playback module
//!
//! The rodio backend behind the player engine:
//! - `AudioPlayer`: One decoded source in one sink (audio thread only)
//! - `AudioHandle`: The engine's `MediaHandle`, non-blocking
//! - `events`: Commands, shared snapshot and channel types
//! - `thread`: The `audio-player` thread and its command loop

pub mod events;
mod handle;
mod player;
mod thread;

pub use handle::AudioHandle;
pub use thread::{AudioThreadHandle, spawn_audio_thread};

//! Playback control and position synchronization engine
//!
//! This module is the headless core of the player bar:
//! - `PlayerEngine`: Widget-owned aggregate driving one `MediaHandle`
//! - `PlaybackState`: The single playback record (status, position, volume...)
//! - `PlayerStatus`: Enumerated status with a restricted transition table
//! - `PositionTracker`: Applies native position notifications
//! - `DragSeekController`: Pointer-driven scrubbing with global capture
//! - `LoadGate`: Loading -> Ready gating on source changes
//! - `controls`: Playback, repeat and volume panel mutators
//!
//! ## Position priority
//! ```text
//! drag session active  -> DragSeekController owns `position`
//! otherwise            -> MediaEvent::PositionChanged owns `position`
//! ```

pub mod capture;
pub mod controls;
mod engine;
pub mod load_gate;
pub mod media;
pub mod seek;
mod state;
pub mod status;
pub mod tracker;

pub use capture::{CaptureGuard, PointerCapture};
pub use controls::{GestureId, VolumeLevel};
pub use engine::{EngineOptions, PlayerEngine};
pub use media::{Generation, MediaEvent, MediaHandle, SourceId};
pub use seek::BarGeometry;
pub use state::{PlaybackState, clamp_volume};
pub use status::{PlayerStatus, Transition, TransitionError};

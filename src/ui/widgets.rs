//! Reusable UI widgets
//!
//! `seek_bar` is a low-level `Widget` implementation with generic callbacks.
//! The button rows build on iced's built-in widgets and emit `crate::app::Message`.

pub mod playback_controls;
pub mod seek_bar;
pub mod volume_control;

pub use playback_controls::PlayButtonState;
pub use seek_bar::SeekBar;

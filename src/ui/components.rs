//! UI components - business-specific composites
//!
//! Components read engine state and map it onto widgets and `crate::app::Message`.

pub mod player_bar;

pub use player_bar::PLAYER_BAR_HEIGHT;

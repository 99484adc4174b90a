//! UI module for the player bar
//!
//! # Architecture
//!
//! - **Widgets** (`widgets`): Buttons, sliders and the custom seek bar
//! - **Components** (`components`): The player bar, built from engine state

pub mod components;
pub mod icons;
pub mod theme;
pub mod widgets;

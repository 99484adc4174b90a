//! Application state definitions

use std::path::PathBuf;

use crate::audio::{AudioHandle, AudioThreadHandle};
use crate::features::Settings;
use crate::player::{PlayerEngine, SourceId};

/// Everything `App::new` needs, resolved from the command line and settings
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub source: SourceId,
    pub settings: Settings,
    /// Explicit settings file; the config dir is used when absent
    pub settings_path: Option<PathBuf>,
}

/// Main application state
pub struct App {
    /// The player bar's engine, driving the audio thread
    pub engine: PlayerEngine<AudioHandle>,
    /// `None` when the audio thread could not be spawned
    pub audio: Option<AudioThreadHandle>,
    pub settings: Settings,
    pub settings_path: Option<PathBuf>,
    /// Whether the pointer is currently over the volume panel
    pub over_volume_panel: bool,
}

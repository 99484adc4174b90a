// src/app/update/window.rs
//! Window close handler

use std::time::Duration;

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;

/// How long to wait for the audio thread on exit
const AUDIO_JOIN_TIMEOUT: Duration = Duration::from_millis(500);

impl App {
    /// Handle window-related messages
    pub fn handle_window(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::Close => {
                self.engine.close();
                self.persist_settings();

                if let Some(audio) = self.audio.take() {
                    if let Err(e) = audio.join(AUDIO_JOIN_TIMEOUT) {
                        tracing::warn!("Audio thread did not stop cleanly: {}", e);
                    }
                }

                Some(iced::exit())
            }

            Message::Noop => Some(Task::none()),

            _ => None,
        }
    }

    /// Write the current volume and repeat preference back to disk
    fn persist_settings(&mut self) {
        let state = self.engine.state();
        self.settings.volume = state.volume();
        self.settings.repeat = state.is_repeat();

        let result = match &self.settings_path {
            Some(path) => self.settings.save_to_file(path),
            None => self.settings.save(),
        };
        if let Err(e) = result {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }
}

// src/app/update/playback.rs
//! Playback control message handlers

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;
use crate::player::SourceId;

impl App {
    /// Handle playback-related messages
    pub fn handle_playback(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::Media(event) => {
                self.engine.handle_media_event(event.clone());
                Some(Task::none())
            }

            Message::PlaybackTick => {
                if let Some(audio) = &self.audio {
                    audio.handle.tick();
                }
                Some(Task::none())
            }

            Message::TogglePlayback => {
                self.engine.toggle_playback();
                Some(Task::none())
            }

            Message::ToggleRepeat => {
                let repeat = self.engine.toggle_repeat();
                tracing::info!("Repeat {}", if repeat { "on" } else { "off" });
                Some(Task::none())
            }

            Message::SourceDropped(path) => {
                tracing::info!("Switching source to {}", path.display());
                self.engine
                    .replace_source(SourceId::new(path.to_string_lossy().into_owned()));
                Some(Task::none())
            }

            _ => None,
        }
    }
}

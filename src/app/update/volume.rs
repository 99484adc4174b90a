// src/app/update/volume.rs
//! Volume button and panel handlers

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;

impl App {
    pub fn handle_volume(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::ToggleVolumePanel => {
                // A hidden panel never reports the pointer leaving it
                if !self.engine.toggle_volume_panel() {
                    self.over_volume_panel = false;
                }
                Some(Task::none())
            }

            Message::VolumePanelHovered(hovered) => {
                self.over_volume_panel = *hovered;
                Some(Task::none())
            }

            Message::WindowUnfocused => {
                self.over_volume_panel = false;
                self.engine.volume_panel_blurred();
                Some(Task::none())
            }

            Message::SetVolume(volume) => {
                self.engine.set_volume(*volume);
                Some(Task::none())
            }

            _ => None,
        }
    }
}

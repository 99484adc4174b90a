// src/app/update/seek.rs
//! Progress bar pointer handlers

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;

impl App {
    pub fn handle_seek(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::PointerDown => {
                self.engine.pointer_down(self.over_volume_panel);
                if !self.engine.state().show_volume_panel() {
                    self.over_volume_panel = false;
                }
                Some(Task::none())
            }

            Message::SeekPressed(x, bar) => {
                self.engine.pointer_pressed(*x, *bar);
                Some(Task::none())
            }

            Message::SeekMoved(x) => {
                self.engine.pointer_moved(*x);
                Some(Task::none())
            }

            Message::SeekReleased => {
                self.engine.pointer_released();
                Some(Task::none())
            }

            _ => None,
        }
    }
}

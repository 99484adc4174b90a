// src/app/view.rs
//! Application view rendering

use iced::widget::container;
use iced::{Element, Fill};

use super::App;
use super::message::Message;
use crate::ui::{components, theme};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let bar = components::player_bar::view(
            self.engine.state(),
            self.engine.is_capturing_pointer(),
        );

        container(bar)
            .width(Fill)
            .height(Fill)
            .center_y(Fill)
            .padding(8)
            .style(theme::window_background)
            .into()
    }
}

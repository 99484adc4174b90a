//! Playback control buttons
//!
//! Back and forward render for layout parity but emit `Message::Noop`.

use iced::widget::{Space, button, container, row, svg};
use iced::{Alignment, Element, Padding};

use crate::app::Message;
use crate::ui::{icons, theme};

const PLAY_BUTTON_SIZE: f32 = 40.0;
const PLAY_ICON_SIZE: f32 = 18.0;
const SKIP_ICON_SIZE: f32 = 20.0;
const SPACING: f32 = 8.0;

/// What the play button shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayButtonState {
    /// Source still loading: spinner, no input
    Loading,
    /// Source failed: play icon, no input
    Disabled,
    Play,
    Pause,
}

impl PlayButtonState {
    pub fn new(is_loading: bool, can_toggle: bool, is_playing: bool) -> Self {
        if is_loading {
            Self::Loading
        } else if !can_toggle {
            Self::Disabled
        } else if is_playing {
            Self::Pause
        } else {
            Self::Play
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Loading => icons::LOADING,
            Self::Disabled | Self::Play => icons::PLAY,
            Self::Pause => icons::PAUSE,
        }
    }

    fn accepts_input(self) -> bool {
        matches!(self, Self::Play | Self::Pause)
    }
}

/// Build the play/pause button
pub fn play_button(state: PlayButtonState) -> Element<'static, Message> {
    let inner_padding = (PLAY_BUTTON_SIZE - PLAY_ICON_SIZE) / 2.0;
    // The play triangle is not symmetric
    let offset = if state == PlayButtonState::Play { 2.0 } else { 0.0 };
    let active = state.accepts_input();

    let btn = button(
        container(
            svg(svg::Handle::from_memory(state.icon().as_bytes()))
                .width(PLAY_ICON_SIZE)
                .height(PLAY_ICON_SIZE)
                .style(move |theme, _status| svg::Style {
                    color: Some(if active {
                        theme::background(theme)
                    } else {
                        theme::text_muted(theme)
                    }),
                }),
        )
        .padding(Padding {
            top: inner_padding,
            bottom: inner_padding,
            left: inner_padding + offset,
            right: inner_padding - offset,
        }),
    )
    .padding(0)
    .width(PLAY_BUTTON_SIZE)
    .height(PLAY_BUTTON_SIZE)
    .style(move |theme, status| {
        let bg = match status {
            button::Status::Disabled => theme::divider(theme),
            button::Status::Hovered => theme::play_button_hover(theme),
            _ => theme::text_primary(theme),
        };
        button::Style {
            background: Some(iced::Background::Color(bg)),
            border: iced::Border {
                radius: (PLAY_BUTTON_SIZE / 2.0).into(),
                ..Default::default()
            },
            ..Default::default()
        }
    });

    if active {
        btn.on_press(Message::TogglePlayback).into()
    } else {
        btn.into()
    }
}

fn skip_button(icon: &'static str) -> Element<'static, Message> {
    button(
        svg(svg::Handle::from_memory(icon.as_bytes()))
            .width(SKIP_ICON_SIZE)
            .height(SKIP_ICON_SIZE)
            .style(|theme, _status| svg::Style {
                color: Some(theme::text_secondary(theme)),
            }),
    )
    .padding(8)
    .style(theme::icon_button)
    .on_press(Message::Noop)
    .into()
}

/// Repeat toggle, tinted with the accent while active
pub fn repeat_button(is_repeat: bool) -> Element<'static, Message> {
    button(
        svg(svg::Handle::from_memory(icons::REPEAT.as_bytes()))
            .width(18)
            .height(18)
            .style(move |theme, _status| svg::Style {
                color: Some(if is_repeat {
                    theme::ACCENT
                } else {
                    theme::text_secondary(theme)
                }),
            }),
    )
    .padding(7)
    .style(theme::icon_button)
    .on_press(Message::ToggleRepeat)
    .into()
}

/// Build the controls row (back, play, forward)
pub fn view(state: PlayButtonState) -> Element<'static, Message> {
    row![
        skip_button(icons::SKIP_PREV),
        Space::new().width(SPACING),
        play_button(state),
        Space::new().width(SPACING),
        skip_button(icons::SKIP_NEXT),
    ]
    .align_y(Alignment::Center)
    .into()
}

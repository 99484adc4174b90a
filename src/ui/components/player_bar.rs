//! The player bar component

use iced::widget::{Space, button, column, container, row, svg, text};
use iced::{Alignment, Element, Length, Padding};

use crate::app::Message;
use crate::player::PlaybackState;
use crate::ui::widgets::{self, PlayButtonState, SeekBar, seek_bar};
use crate::ui::{icons, theme};

/// Player bar height
pub const PLAYER_BAR_HEIGHT: f32 = 64.0;

/// Build the progress bar
fn progress_bar(fraction: f32, dragging: bool) -> Element<'static, Message> {
    SeekBar::new(fraction, Message::SeekPressed, Message::SeekMoved)
        .dragging(dragging)
        .on_release(Message::SeekReleased)
        .width(Length::Fill)
        .height(16)
        .style(move |iced_theme, status| {
            let handle_radius = match status {
                seek_bar::Status::Hovered | seek_bar::Status::Dragged => 6.0,
                seek_bar::Status::Active => 0.0,
            };
            seek_bar::Style {
                rail: seek_bar::Rail {
                    backgrounds: (
                        iced::Background::Color(theme::ACCENT),
                        iced::Background::Color(theme::divider(iced_theme)),
                    ),
                    width: 4.0,
                    border: iced::Border {
                        radius: 2.0.into(),
                        ..Default::default()
                    },
                },
                handle: seek_bar::Handle {
                    radius: handle_radius,
                    background: iced::Background::Color(theme::ACCENT),
                },
            }
        })
        .into()
}

fn close_button() -> Element<'static, Message> {
    button(
        svg(svg::Handle::from_memory(icons::CLOSE.as_bytes()))
            .width(16)
            .height(16)
            .style(|theme, _status| svg::Style {
                color: Some(theme::text_muted(theme)),
            }),
    )
    .padding(8)
    .style(theme::icon_button)
    .on_press(Message::Close)
    .into()
}

/// Build the player bar
///
/// `capturing` is true while a drag session holds the pointer.
pub fn view(state: &PlaybackState, capturing: bool) -> Element<'static, Message> {
    let play_state = PlayButtonState::new(
        state.is_loading(),
        state.can_toggle_playback(),
        state.is_playing(),
    );
    let controls = widgets::playback_controls::view(play_state);

    let time_label = |label: String| {
        text(label)
            .size(12)
            .style(|theme| text::Style {
                color: Some(theme::text_muted(theme)),
            })
    };

    let progress_row = row![
        time_label(state.elapsed_label()),
        Space::new().width(8),
        progress_bar(state.progress_fraction(), capturing || state.is_dragging()),
        Space::new().width(8),
        time_label(state.total_label()),
    ]
    .align_y(Alignment::Center)
    .width(Length::Fill);

    let right = row![
        widgets::playback_controls::repeat_button(state.is_repeat()),
        widgets::volume_control::view(
            state.volume(),
            state.volume_level(),
            state.show_volume_panel()
        ),
        close_button(),
    ]
    .spacing(4)
    .align_y(Alignment::Center);

    let bar = row![controls, Space::new().width(16), progress_row, Space::new().width(16), right]
        .align_y(Alignment::Center)
        .height(PLAYER_BAR_HEIGHT)
        .padding([0, 12]);

    let content: Element<'static, Message> = match state.failure() {
        Some(reason) => {
            let reason = format!("Cannot play: {}", reason);
            column![
                bar,
                text(reason).size(12).style(|theme| text::Style {
                    color: Some(theme::danger(theme)),
                }),
            ]
            .spacing(4)
            .padding(Padding {
                bottom: 8.0,
                ..Padding::ZERO
            })
            .align_x(Alignment::Center)
            .into()
        }
        None => bar.into(),
    };

    container(content)
        .width(Length::Fill)
        .style(theme::player_bar)
        .into()
}

//! Volume button and its slider panel

use iced::widget::{button, container, mouse_area, row, slider, svg};
use iced::{Alignment, Color, Element};

use crate::app::Message;
use crate::player::VolumeLevel;
use crate::ui::{icons, theme};

fn volume_icon(level: VolumeLevel) -> &'static str {
    match level {
        VolumeLevel::Muted => icons::VOLUME_MUTED,
        VolumeLevel::Low => icons::VOLUME_LOW,
        VolumeLevel::High => icons::VOLUME_HIGH,
    }
}

/// Button toggling the panel; the icon follows the volume tier
pub fn volume_button(level: VolumeLevel) -> Element<'static, Message> {
    button(
        svg(svg::Handle::from_memory(volume_icon(level).as_bytes()))
            .width(18)
            .height(18)
            .style(|theme, _status| svg::Style {
                color: Some(theme::text_secondary(theme)),
            }),
    )
    .padding(7)
    .style(theme::icon_button)
    .on_press(Message::ToggleVolumePanel)
    .into()
}

/// Build a volume slider
///
/// # Arguments
/// * `volume` - Current volume (0.0 to 1.0)
pub fn volume_slider(volume: f32) -> Element<'static, Message> {
    slider(0.0..=1.0, volume, Message::SetVolume)
        .width(100)
        .height(4)
        .step(0.01)
        .shift_step(0.05)
        .style(|iced_theme, status| {
            let handle_radius = match status {
                slider::Status::Hovered | slider::Status::Dragged => 6.0,
                _ => 4.0,
            };
            slider::Style {
                rail: slider::Rail {
                    backgrounds: (
                        iced::Background::Color(theme::text_primary(iced_theme)),
                        iced::Background::Color(theme::divider(iced_theme)),
                    ),
                    width: 4.0,
                    border: iced::Border {
                        radius: 2.0.into(),
                        width: 0.0,
                        color: Color::TRANSPARENT,
                    },
                },
                handle: slider::Handle {
                    shape: slider::HandleShape::Circle {
                        radius: handle_radius,
                    },
                    background: iced::Background::Color(theme::text_primary(iced_theme)),
                    border_width: 0.0,
                    border_color: Color::TRANSPARENT,
                },
            }
        })
        .into()
}

/// Volume button, followed by the slider panel while it is open
///
/// The panel reports pointer enter/leave so a press inside it does not
/// count as a press outside.
pub fn view(volume: f32, level: VolumeLevel, show_panel: bool) -> Element<'static, Message> {
    let btn = volume_button(level);
    if !show_panel {
        return btn;
    }

    let panel = mouse_area(
        container(volume_slider(volume))
            .padding([6, 10])
            .style(theme::volume_panel),
    )
    .on_enter(Message::VolumePanelHovered(true))
    .on_exit(Message::VolumePanelHovered(false));

    row![btn, panel].spacing(4).align_y(Alignment::Center).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_follows_volume_tier() {
        assert_eq!(volume_icon(VolumeLevel::from_volume(0.0)), icons::VOLUME_MUTED);
        assert_eq!(volume_icon(VolumeLevel::from_volume(0.3)), icons::VOLUME_LOW);
        assert_eq!(volume_icon(VolumeLevel::from_volume(0.6)), icons::VOLUME_HIGH);
    }
}

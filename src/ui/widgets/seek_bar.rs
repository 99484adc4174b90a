//! Progress bar with drag-to-seek
//!
//! Unlike iced's slider, the bar does not compute values itself: it reports
//! raw pointer x coordinates together with its own geometry and leaves the
//! seek target to `DragSeekController`. Once pressed, the bar keeps reporting
//! movement and release from anywhere in the window until the button goes up.

use iced::advanced::layout;
use iced::advanced::renderer;
use iced::advanced::widget::tree::{self, Tree};
use iced::advanced::{Clipboard, Layout, Shell, Widget};
use iced::border::Border;
use iced::mouse;
use iced::touch;
use iced::window;
use iced::{Background, Color, Element, Event, Length, Pixels, Rectangle, Size, Theme};

use crate::player::BarGeometry;

/// Progress bar widget
pub struct SeekBar<'a, Message> {
    /// Played fraction, `0.0..=1.0`
    fraction: f32,
    /// Whether a drag session is active in the engine
    dragging: bool,
    on_press: Box<dyn Fn(f32, BarGeometry) -> Message + 'a>,
    on_drag: Box<dyn Fn(f32) -> Message + 'a>,
    on_release: Option<Message>,
    width: Length,
    height: f32,
    style: Box<dyn Fn(&Theme, Status) -> Style + 'a>,
    status: Option<Status>,
}

impl<'a, Message> SeekBar<'a, Message>
where
    Message: Clone,
{
    pub const DEFAULT_HEIGHT: f32 = 16.0;

    pub fn new<P, D>(fraction: f32, on_press: P, on_drag: D) -> Self
    where
        P: 'a + Fn(f32, BarGeometry) -> Message,
        D: 'a + Fn(f32) -> Message,
    {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            fraction,
            dragging: false,
            on_press: Box::new(on_press),
            on_drag: Box::new(on_drag),
            on_release: None,
            width: Length::Fill,
            height: Self::DEFAULT_HEIGHT,
            style: Box::new(default_style),
            status: None,
        }
    }

    /// Keep following the pointer while the engine's drag session is live
    pub fn dragging(mut self, dragging: bool) -> Self {
        self.dragging = dragging;
        self
    }

    pub fn on_release(mut self, on_release: Message) -> Self {
        self.on_release = Some(on_release);
        self
    }

    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<Pixels>) -> Self {
        self.height = height.into().0;
        self
    }

    pub fn style(mut self, style: impl Fn(&Theme, Status) -> Style + 'a) -> Self {
        self.style = Box::new(style);
        self
    }
}

impl<Message, Renderer> Widget<Message, Theme, Renderer> for SeekBar<'_, Message>
where
    Message: Clone,
    Renderer: iced::advanced::Renderer,
{
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn size(&self) -> Size<Length> {
        Size {
            width: self.width,
            height: Length::Shrink,
        }
    }

    fn layout(
        &mut self,
        _tree: &mut Tree,
        _renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::atomic(limits, self.width, self.height)
    }

    fn update(
        &mut self,
        tree: &mut Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        _viewport: &Rectangle,
    ) {
        let state = tree.state.downcast_mut::<State>();
        let bounds = layout.bounds();
        let following = state.is_pressed || self.dragging;

        match &event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
            | Event::Touch(touch::Event::FingerPressed { .. }) => {
                if let Some(cursor_position) = cursor.position_over(bounds) {
                    let bar = BarGeometry::new(bounds.x, bounds.width);
                    shell.publish((self.on_press)(cursor_position.x, bar));
                    state.is_pressed = true;
                    shell.capture_event();
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
            | Event::Touch(touch::Event::FingerLifted { .. })
            | Event::Touch(touch::Event::FingerLost { .. }) => {
                if following {
                    if let Some(on_release) = self.on_release.clone() {
                        shell.publish(on_release);
                    }
                    state.is_pressed = false;
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if following {
                    shell.publish((self.on_drag)(position.x));
                    shell.capture_event();
                }
            }
            Event::Touch(touch::Event::FingerMoved { position, .. }) => {
                if following {
                    shell.publish((self.on_drag)(position.x));
                    shell.capture_event();
                }
            }
            _ => {}
        }

        let current_status = if state.is_pressed || self.dragging {
            Status::Dragged
        } else if cursor.is_over(bounds) {
            Status::Hovered
        } else {
            Status::Active
        };

        if let Event::Window(window::Event::RedrawRequested(_now)) = event {
            self.status = Some(current_status);
        } else if self.status.is_some_and(|status| status != current_status) {
            shell.request_redraw();
        }
    }

    fn draw(
        &self,
        _tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        _style: &renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();
        let style = (self.style)(theme, self.status.unwrap_or(Status::Active));

        let played = bounds.width * self.fraction;
        let rail_y = bounds.y + bounds.height / 2.0;

        // Played portion
        renderer.fill_quad(
            renderer::Quad {
                bounds: Rectangle {
                    x: bounds.x,
                    y: rail_y - style.rail.width / 2.0,
                    width: played,
                    height: style.rail.width,
                },
                border: style.rail.border,
                ..renderer::Quad::default()
            },
            style.rail.backgrounds.0,
        );

        // Remaining portion
        renderer.fill_quad(
            renderer::Quad {
                bounds: Rectangle {
                    x: bounds.x + played,
                    y: rail_y - style.rail.width / 2.0,
                    width: bounds.width - played,
                    height: style.rail.width,
                },
                border: style.rail.border,
                ..renderer::Quad::default()
            },
            style.rail.backgrounds.1,
        );

        if style.handle.radius > 0.0 {
            let radius = style.handle.radius;
            renderer.fill_quad(
                renderer::Quad {
                    bounds: Rectangle {
                        x: bounds.x + played - radius,
                        y: rail_y - radius,
                        width: radius * 2.0,
                        height: radius * 2.0,
                    },
                    border: Border {
                        radius: radius.into(),
                        width: 0.0,
                        color: Color::TRANSPARENT,
                    },
                    ..renderer::Quad::default()
                },
                style.handle.background,
            );
        }
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        let state = tree.state.downcast_ref::<State>();

        if state.is_pressed || self.dragging {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(layout.bounds()) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

impl<'a, Message, Renderer> From<SeekBar<'a, Message>> for Element<'a, Message, Theme, Renderer>
where
    Message: Clone + 'a,
    Renderer: iced::advanced::Renderer + 'a,
{
    fn from(bar: SeekBar<'a, Message>) -> Element<'a, Message, Theme, Renderer> {
        Element::new(bar)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct State {
    /// The press that started the gesture landed on this bar
    is_pressed: bool,
}

/// Status of the bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Hovered,
    Dragged,
}

/// Style for the progress bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub rail: Rail,
    pub handle: Handle,
}

/// Rail appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rail {
    /// (played, remaining) backgrounds
    pub backgrounds: (Background, Background),
    pub width: f32,
    pub border: Border,
}

/// Circular handle at the played edge; hidden at radius 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub radius: f32,
    pub background: Background,
}

fn default_style(_theme: &Theme, status: Status) -> Style {
    let accent = Background::Color(Color::from_rgb(0.8, 0.2, 0.5));
    Style {
        rail: Rail {
            backgrounds: (accent, Background::Color(Color::from_rgba(1.0, 1.0, 1.0, 0.1))),
            width: 4.0,
            border: Border {
                radius: 2.0.into(),
                width: 0.0,
                color: Color::TRANSPARENT,
            },
        },
        handle: Handle {
            radius: match status {
                Status::Active => 0.0,
                Status::Hovered | Status::Dragged => 6.0,
            },
            background: accent,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Pressed(f32, BarGeometry),
        Moved(f32),
    }

    #[test]
    fn fraction_is_clamped() {
        let bar = SeekBar::new(1.5, Msg::Pressed, Msg::Moved);
        assert_eq!(bar.fraction, 1.0);
        let bar = SeekBar::new(-0.5, Msg::Pressed, Msg::Moved);
        assert_eq!(bar.fraction, 0.0);
    }

    #[test]
    fn nan_fraction_renders_empty() {
        let bar = SeekBar::new(f32::NAN, Msg::Pressed, Msg::Moved);
        assert_eq!(bar.fraction, 0.0);
    }

    #[test]
    fn handle_shows_on_interaction() {
        let theme = Theme::Dark;
        assert_eq!(default_style(&theme, Status::Active).handle.radius, 0.0);
        assert!(default_style(&theme, Status::Dragged).handle.radius > 0.0);
    }
}

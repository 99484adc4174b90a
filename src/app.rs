//! Main application module

mod message;
mod state;
mod update;
mod view;

use iced::{Subscription, Task, Theme};

use crate::audio::{AudioHandle, spawn_audio_thread};
use crate::player::{EngineOptions, MediaEvent, PlayerEngine};
pub use message::Message;
pub use state::{App, LaunchOptions};

impl App {
    /// Create new application instance
    pub fn new(options: LaunchOptions) -> (Self, Task<Message>) {
        let engine_options = EngineOptions {
            volume: options.settings.volume,
            repeat: options.settings.repeat,
        };

        // 1. Audio thread, or a detached handle if it cannot start
        let (audio, media, event_rx, spawn_error) = match spawn_audio_thread() {
            Ok(mut thread) => {
                let event_rx = thread.take_event_rx();
                let media = thread.handle.clone();
                (Some(thread), media, event_rx, None)
            }
            Err(e) => {
                tracing::error!("Audio unavailable: {}", e);
                (None, AudioHandle::detached(), None, Some(e.to_string()))
            }
        };

        // 2. Mount the engine on the source
        let engine = PlayerEngine::new(media, options.source, engine_options);

        // 3. Forward media events into the update loop
        let mut tasks = Vec::new();
        if let Some(mut rx) = event_rx {
            tasks.push(Task::run(
                async_stream::stream! {
                    while let Some(event) = rx.recv().await {
                        yield event;
                    }
                },
                Message::Media,
            ));
        }
        if let Some(reason) = spawn_error {
            tasks.push(Task::done(Message::Media(MediaEvent::LoadFailed {
                generation: engine.state().generation(),
                reason,
            })));
        }

        let app = Self {
            engine,
            audio,
            settings: options.settings,
            settings_path: options.settings_path,
            over_volume_panel: false,
        };

        (app, Task::batch(tasks))
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Window title: the source's file name
    pub fn title(&self) -> String {
        let source = self.engine.state().source().as_str();
        let name = std::path::Path::new(source)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.to_string());
        format!("{} - Versebar", name)
    }

    /// Subscriptions for playback ticks and window-wide pointer/window events
    pub fn subscription(&self) -> Subscription<Message> {
        let state = self.engine.state();

        // 1. Playback monitoring
        let playback_sub = if subscription_logic::needs_playback_tick(
            state.is_playing(),
            state.is_dragging(),
            self.engine.is_closed(),
        ) {
            iced::time::every(self.settings.tick_interval()).map(|_| Message::PlaybackTick)
        } else {
            Subscription::none()
        };

        // 2. Global pointer and window events
        let event_sub = iced::event::listen_with(global_event);

        Subscription::batch([playback_sub, event_sub])
    }
}

fn global_event(
    event: iced::Event,
    _status: iced::event::Status,
    _window: iced::window::Id,
) -> Option<Message> {
    use iced::{Event, mouse, window};

    match event {
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            Some(Message::PointerDown)
        }
        Event::Window(window::Event::Unfocused) => Some(Message::WindowUnfocused),
        Event::Window(window::Event::FileDropped(path)) => Some(Message::SourceDropped(path)),
        Event::Window(window::Event::CloseRequested) => Some(Message::Close),
        _ => None,
    }
}

/// Subscription decision logic for testability
pub mod subscription_logic {
    /// Ticks run while playing or seeking, never after close
    pub fn needs_playback_tick(is_playing: bool, is_dragging: bool, is_closed: bool) -> bool {
        (is_playing || is_dragging) && !is_closed
    }
}

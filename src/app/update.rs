//! Message update handlers - thin dispatcher delegating to submodules

mod playback;
mod seek;
mod volume;
mod window;

use iced::Task;

use super::{App, Message};

impl App {
    /// Handle messages by delegating to appropriate submodule handlers
    pub fn update(&mut self, message: Message) -> Task<Message> {
        // Try each handler in order until one handles the message
        if let Some(task) = self.handle_playback(&message) {
            return task;
        }
        if let Some(task) = self.handle_seek(&message) {
            return task;
        }
        if let Some(task) = self.handle_volume(&message) {
            return task;
        }
        if let Some(task) = self.handle_window(&message) {
            return task;
        }

        // Default: no task
        Task::none()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::audio::AudioHandle;
    use crate::features::Settings;
    use crate::player::{
        BarGeometry, EngineOptions, Generation, MediaEvent, MediaHandle, PlayerEngine, PlayerStatus,
        SourceId,
    };

    fn test_app() -> App {
        App {
            engine: PlayerEngine::new(
                AudioHandle::detached(),
                SourceId::from("song.ogg"),
                EngineOptions::default(),
            ),
            audio: None,
            settings: Settings::default(),
            settings_path: None,
            over_volume_panel: false,
        }
    }

    fn loaded_app(secs: u64) -> App {
        let mut app = test_app();
        let generation = app.engine.state().generation();
        let _ = app.update(Message::Media(MediaEvent::DurationKnown {
            generation,
            duration: Duration::from_secs(secs),
        }));
        app
    }

    #[test]
    fn duration_event_makes_player_ready() {
        let app = loaded_app(200);
        assert_eq!(app.engine.state().status(), &PlayerStatus::Ready);
        assert_eq!(app.engine.state().total_label(), "3:20");
    }

    #[test]
    fn click_on_bar_seeks_without_playing() {
        let mut app = loaded_app(200);
        let bar = BarGeometry::new(0.0, 400.0);

        let _ = app.update(Message::PointerDown);
        let _ = app.update(Message::SeekPressed(100.0, bar));
        assert!(app.engine.is_capturing_pointer());

        let _ = app.update(Message::SeekReleased);
        assert!(!app.engine.is_capturing_pointer());
        assert_eq!(app.engine.state().position(), Duration::from_secs(50));
        assert_eq!(app.engine.media().position(), Duration::from_secs(50));
        assert!(!app.engine.state().is_playing());
    }

    #[test]
    fn drag_follows_pointer_outside_bar() {
        let mut app = loaded_app(100);
        let bar = BarGeometry::new(10.0, 100.0);

        let _ = app.update(Message::SeekPressed(20.0, bar));
        let _ = app.update(Message::SeekMoved(500.0));
        assert_eq!(app.engine.state().position(), Duration::from_secs(100));
        let _ = app.update(Message::SeekMoved(-50.0));
        assert_eq!(app.engine.state().position(), Duration::ZERO);
        let _ = app.update(Message::SeekReleased);
        assert!(!app.engine.state().is_dragging());
    }

    #[test]
    fn stale_media_events_are_ignored() {
        let mut app = loaded_app(100);
        let _ = app.update(Message::SourceDropped("other.flac".into()));
        assert!(app.engine.state().is_loading());
        assert_eq!(app.engine.state().source().as_str(), "other.flac");

        let _ = app.update(Message::Media(MediaEvent::DurationKnown {
            generation: Generation::default(),
            duration: Duration::from_secs(5),
        }));
        assert!(app.engine.state().is_loading());
    }

    #[test]
    fn toggle_button_closes_open_panel() {
        let mut app = loaded_app(100);

        // Press on the button, then the button's click
        let _ = app.update(Message::PointerDown);
        let _ = app.update(Message::ToggleVolumePanel);
        assert!(app.engine.state().show_volume_panel());

        let _ = app.update(Message::PointerDown);
        let _ = app.update(Message::ToggleVolumePanel);
        assert!(!app.engine.state().show_volume_panel());
    }

    #[test]
    fn press_inside_panel_keeps_it_open() {
        let mut app = loaded_app(100);
        let _ = app.update(Message::ToggleVolumePanel);

        let _ = app.update(Message::VolumePanelHovered(true));
        let _ = app.update(Message::PointerDown);
        let _ = app.update(Message::SetVolume(0.25));
        assert!(app.engine.state().show_volume_panel());
        assert_eq!(app.engine.state().volume(), 0.25);

        let _ = app.update(Message::VolumePanelHovered(false));
        let _ = app.update(Message::PointerDown);
        assert!(!app.engine.state().show_volume_panel());
    }

    #[test]
    fn window_unfocus_closes_panel() {
        let mut app = loaded_app(100);
        let _ = app.update(Message::ToggleVolumePanel);
        let _ = app.update(Message::WindowUnfocused);
        assert!(!app.engine.state().show_volume_panel());
    }

    #[test]
    fn play_is_ignored_while_loading() {
        let mut app = test_app();
        let _ = app.update(Message::TogglePlayback);
        assert!(app.engine.state().is_loading());
    }

    #[test]
    fn close_persists_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut app = loaded_app(100);
        app.settings_path = Some(path.clone());
        let _ = app.update(Message::SetVolume(0.4));
        let _ = app.update(Message::ToggleRepeat);
        let _ = app.update(Message::Close);

        assert!(app.engine.is_closed());
        let saved = Settings::load_from_file(&path).unwrap();
        assert_eq!(saved.volume, 0.4);
        assert!(saved.repeat);
    }

    #[test]
    fn inputs_after_close_are_ignored() {
        let mut app = loaded_app(100);
        let _ = app.update(Message::Close);
        let _ = app.update(Message::TogglePlayback);
        let _ = app.update(Message::SeekPressed(10.0, BarGeometry::new(0.0, 100.0)));
        assert!(!app.engine.state().is_playing());
        assert!(!app.engine.is_capturing_pointer());
    }
}

//! Widget-owned playback engine
//!
//! `PlayerEngine` owns the `PlaybackState` and the `MediaHandle` and is the
//! only entry point for input: media notifications, pointer gestures and
//! button presses. Inputs are processed one at a time, in delivery order.

use std::time::Duration;

use super::capture::PointerCapture;
use super::controls::{PlaybackToggle, RepeatToggle, VolumePanel};
use super::load_gate::{GateOutcome, LoadGate};
use super::media::{Generation, MediaEvent, MediaHandle, SourceId};
use super::seek::{BarGeometry, DragSeekController};
use super::state::PlaybackState;
use super::status::Transition;
use super::tracker::{PositionTracker, TrackOutcome};

/// Preferences applied when the engine mounts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    pub volume: f32,
    pub repeat: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            volume: 1.0,
            repeat: false,
        }
    }
}

pub struct PlayerEngine<M: MediaHandle> {
    media: M,
    state: PlaybackState,
    seek: DragSeekController,
    volume_panel: VolumePanel,
    /// The media reported its end while a drag session held the position
    end_pending: bool,
    closed: bool,
}

impl<M: MediaHandle> PlayerEngine<M> {
    /// Mount the player on `source`
    pub fn new(media: M, source: SourceId, options: EngineOptions) -> Self {
        Self::with_capture(media, source, options, PointerCapture::new())
    }

    /// Mount the player, sharing an existing pointer capture registry
    pub fn with_capture(
        mut media: M,
        source: SourceId,
        options: EngineOptions,
        capture: PointerCapture,
    ) -> Self {
        let state = PlaybackState::new(source, Generation::new(1), options.volume, options.repeat);

        media.set_volume(state.volume());
        media.set_looping(state.is_repeat());
        LoadGate::start(&state, &mut media);
        tracing::info!("Player mounted on {}", state.source());

        Self {
            media,
            state,
            seek: DragSeekController::new(capture),
            volume_panel: VolumePanel::default(),
            end_pending: false,
            closed: false,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn capture(&self) -> &PointerCapture {
        self.seek.capture()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether pointer movement should be routed here regardless of position
    pub fn is_capturing_pointer(&self) -> bool {
        self.seek.is_active()
    }

    /// Replace the source; the previous state is discarded
    pub fn replace_source(&mut self, source: SourceId) {
        if self.ignore_closed("replace source") {
            return;
        }
        self.seek.cancel();
        self.end_pending = false;
        self.state = LoadGate::replace(&self.state, source, &mut self.media);
        self.log_snapshot();
    }

    /// Deliver one notification from the media
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        if self.ignore_closed("media event") {
            return;
        }

        match event {
            MediaEvent::DurationKnown {
                generation,
                duration,
            } => {
                if LoadGate::resolve(&mut self.state, generation, duration) == GateOutcome::Stale {
                    return;
                }
            }
            MediaEvent::PositionChanged {
                generation,
                position,
            } => match PositionTracker::apply(&mut self.state, generation, position) {
                TrackOutcome::ReachedEnd => self.finish(),
                TrackOutcome::Accepted => {}
                outcome => {
                    tracing::trace!("Position {:?} not applied: {:?}", position, outcome);
                }
            },
            MediaEvent::Ended { generation } => {
                if generation != self.state.generation() {
                    tracing::debug!("Ignoring end of stale source {}", generation);
                } else if self.state.is_repeat() {
                    tracing::debug!("End reported while repeating, media loops on its own");
                } else if self.state.is_dragging() {
                    tracing::debug!("End reported mid-drag, settling on release");
                    self.end_pending = true;
                } else {
                    self.finish();
                }
            }
            MediaEvent::LoadFailed { generation, reason } => {
                match LoadGate::fail(&mut self.state, generation, reason) {
                    GateOutcome::Failed => {
                        self.seek.cancel();
                        self.end_pending = false;
                    }
                    _ => return,
                }
            }
        }

        self.log_snapshot();
    }

    /// Pointer pressed over the progress bar
    pub fn pointer_pressed(&mut self, pointer_x: f32, bar: BarGeometry) {
        if self.ignore_closed("pointer press") {
            return;
        }
        if let Err(e) = self.seek.begin(&mut self.state, pointer_x, bar) {
            tracing::debug!("Seek gesture ignored: {}", e);
        }
        self.log_snapshot();
    }

    /// Pointer moved anywhere in the window
    pub fn pointer_moved(&mut self, pointer_x: f32) {
        if self.closed {
            return;
        }
        self.seek.update(&mut self.state, &mut self.media, pointer_x);
    }

    /// Pointer released anywhere in the window
    pub fn pointer_released(&mut self) {
        if self.closed {
            return;
        }
        if self.seek.is_active() {
            self.seek.end(&mut self.state, &mut self.media);
            if std::mem::take(&mut self.end_pending) {
                self.settle_pending_end();
            }
            self.log_snapshot();
        }
    }

    /// The media stopped at its end during the drag just released
    ///
    /// Released at the end: finish as if the end arrived now. Released
    /// elsewhere while playing: the media sits idle at the new position and
    /// has to be started again.
    fn settle_pending_end(&mut self) {
        let duration = self.state.duration();
        let at_end = !duration.is_zero() && self.state.position() == duration;
        if at_end && !self.state.is_repeat() {
            self.finish();
        } else if self.state.is_playing() {
            self.media.play();
        }
    }

    /// Any pointer press in the window; closes the volume panel unless the
    /// press landed inside it
    pub fn pointer_down(&mut self, over_volume_panel: bool) {
        if self.closed {
            return;
        }
        let gesture = self.volume_panel.begin_gesture();
        if !over_volume_panel {
            self.volume_panel.blur(&mut self.state, Some(gesture));
        }
    }

    pub fn toggle_playback(&mut self) -> bool {
        if self.ignore_closed("toggle playback") {
            return false;
        }
        let toggled = match PlaybackToggle::toggle(&mut self.state, &mut self.media) {
            Ok(toggled) => toggled,
            Err(e) => {
                tracing::warn!("Playback toggle rejected: {}", e);
                false
            }
        };
        self.log_snapshot();
        toggled
    }

    pub fn toggle_repeat(&mut self) -> bool {
        if self.ignore_closed("toggle repeat") {
            return self.state.is_repeat();
        }
        let repeat = RepeatToggle::toggle(&mut self.state, &mut self.media);
        self.log_snapshot();
        repeat
    }

    pub fn toggle_volume_panel(&mut self) -> bool {
        if self.ignore_closed("toggle volume panel") {
            return false;
        }
        self.volume_panel.toggle(&mut self.state)
    }

    /// The volume panel lost focus without a pointer press
    pub fn volume_panel_blurred(&mut self) {
        if self.closed {
            return;
        }
        self.volume_panel.blur(&mut self.state, None);
    }

    pub fn set_volume(&mut self, volume: f32) -> f32 {
        if self.ignore_closed("set volume") {
            return self.state.volume();
        }
        VolumePanel::set_volume(&mut self.state, &mut self.media, volume)
    }

    /// The user dismissed the widget
    ///
    /// Ends any drag session, releases the media and ignores all later input.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.seek.cancel();
        self.end_pending = false;
        self.media.stop();
        self.closed = true;
        tracing::info!("Player closed");
    }

    /// End of a non-repeating source: rewind and stop
    fn finish(&mut self) {
        if let Err(e) = self.state.transition(Transition::Finished) {
            tracing::debug!("End of track ignored: {}", e);
            return;
        }
        self.state.position = Duration::ZERO;
        self.media.pause();
        self.media.set_position(Duration::ZERO);
        tracing::info!("Reached end of {}", self.state.source());
    }

    fn ignore_closed(&self, input: &str) -> bool {
        if self.closed {
            tracing::debug!("Ignoring {} after close", input);
        }
        self.closed
    }

    fn log_snapshot(&self) {
        tracing::debug!(
            status = %self.state.status(),
            position = ?self.state.position(),
            duration = ?self.state.duration(),
            volume = self.state.volume(),
            repeat = self.state.is_repeat(),
            volume_panel = self.state.show_volume_panel(),
            "Player state"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::media::testing::{FakeMedia, MediaCall};
    use crate::player::status::PlayerStatus;

    const BAR: BarGeometry = BarGeometry {
        left: 40.0,
        width: 400.0,
    };

    fn mount(source: &str) -> PlayerEngine<FakeMedia> {
        PlayerEngine::new(FakeMedia::new(), SourceId::from(source), EngineOptions::default())
    }

    fn loaded(duration_secs: u64) -> PlayerEngine<FakeMedia> {
        let mut engine = mount("a.mp3");
        engine.handle_media_event(MediaEvent::DurationKnown {
            generation: engine.state().generation(),
            duration: Duration::from_secs(duration_secs),
        });
        engine
    }

    fn position(engine: &mut PlayerEngine<FakeMedia>, secs: u64) {
        let generation = engine.state().generation();
        engine.handle_media_event(MediaEvent::PositionChanged {
            generation,
            position: Duration::from_secs(secs),
        });
    }

    #[test]
    fn test_mount_click_and_play_scenario() {
        let mut engine = mount("A");
        assert!(engine.state().is_loading());
        assert_eq!(
            engine.media().calls,
            vec![
                MediaCall::SetVolume(1.0),
                MediaCall::SetLooping(false),
                MediaCall::Load(SourceId::from("A"), Generation::new(1)),
            ]
        );

        // Inert while loading
        assert!(!engine.toggle_playback());
        assert_eq!(engine.media().plays(), 0);

        engine.handle_media_event(MediaEvent::DurationKnown {
            generation: Generation::new(1),
            duration: Duration::from_secs(120),
        });
        assert!(!engine.state().is_loading());

        // Click at 50% of the bar
        engine.pointer_pressed(240.0, BAR);
        engine.pointer_released();
        assert_eq!(engine.state().position(), Duration::from_secs(60));
        assert_eq!(engine.media().seeks(), vec![Duration::from_secs(60)]);

        assert!(engine.toggle_playback());
        assert_eq!(engine.media().plays(), 1);
        assert_eq!(engine.media().pauses(), 0);
        assert!(engine.state().is_playing());
    }

    #[test]
    fn test_notifications_suppressed_during_drag() {
        let mut engine = loaded(100);
        engine.toggle_playback();
        position(&mut engine, 10);

        engine.pointer_pressed(40.0, BAR);
        engine.pointer_moved(240.0);
        assert_eq!(engine.state().position(), Duration::from_secs(50));

        position(&mut engine, 11);
        position(&mut engine, 12);
        assert_eq!(engine.state().position(), Duration::from_secs(50));

        engine.pointer_released();
        assert_eq!(engine.state().status(), &PlayerStatus::Playing);
        assert_eq!(engine.media().seeks(), vec![Duration::from_secs(50)]);

        position(&mut engine, 51);
        assert_eq!(engine.state().position(), Duration::from_secs(51));
    }

    #[test]
    fn test_drag_tracks_outside_bar() {
        let mut engine = loaded(100);

        engine.pointer_pressed(100.0, BAR);
        engine.pointer_moved(-500.0);
        assert_eq!(engine.state().position(), Duration::ZERO);
        engine.pointer_moved(9000.0);
        assert_eq!(engine.state().position(), Duration::from_secs(100));
        engine.pointer_released();

        // Releasing at the end while paused does not count as finishing
        assert_eq!(engine.state().status(), &PlayerStatus::Paused);
        assert_eq!(engine.state().position(), Duration::from_secs(100));
    }

    #[test]
    fn test_end_reached_during_drag_finishes_on_release() {
        let mut engine = loaded(60);
        engine.toggle_playback();

        engine.pointer_pressed(240.0, BAR);
        engine.pointer_moved(500.0);
        position(&mut engine, 60);
        engine.handle_media_event(MediaEvent::Ended {
            generation: Generation::new(1),
        });
        assert!(engine.state().is_dragging());

        engine.pointer_released();
        assert_eq!(engine.state().status(), &PlayerStatus::Ended);
        assert_eq!(engine.state().position(), Duration::ZERO);
        assert_eq!(engine.media().seeks().last(), Some(&Duration::ZERO));
        assert_eq!(engine.capture().active(), 0);
    }

    #[test]
    fn test_end_during_drag_then_back_restarts_media() {
        let mut engine = loaded(60);
        engine.toggle_playback();

        engine.pointer_pressed(240.0, BAR);
        engine.pointer_moved(9000.0);
        engine.handle_media_event(MediaEvent::Ended {
            generation: Generation::new(1),
        });
        engine.pointer_moved(140.0);
        engine.media.clear();

        engine.pointer_released();
        assert_eq!(engine.state().status(), &PlayerStatus::Playing);
        assert_eq!(engine.state().position(), Duration::from_secs(15));
        assert_eq!(engine.media().plays(), 1);

        // The pending end does not leak into the next gesture
        engine.pointer_pressed(240.0, BAR);
        engine.pointer_released();
        assert_eq!(engine.state().status(), &PlayerStatus::Playing);
        assert_eq!(engine.media().plays(), 1);
    }

    #[test]
    fn test_stale_failure_keeps_drag() {
        let mut engine = loaded(100);
        engine.pointer_pressed(240.0, BAR);

        engine.handle_media_event(MediaEvent::LoadFailed {
            generation: Generation::new(0),
            reason: "old source".to_string(),
        });
        assert!(engine.is_capturing_pointer());
        assert!(engine.state().is_dragging());

        engine.handle_media_event(MediaEvent::LoadFailed {
            generation: Generation::new(1),
            reason: "gone".to_string(),
        });
        assert!(!engine.is_capturing_pointer());
        assert_eq!(engine.state().failure(), Some("gone"));
    }

    #[test]
    fn test_source_change_resets_before_duration() {
        let mut engine = loaded(100);
        engine.toggle_playback();
        position(&mut engine, 70);

        engine.replace_source(SourceId::from("B"));
        assert!(engine.state().is_loading());
        assert!(!engine.state().is_playing());
        assert_eq!(engine.state().position(), Duration::ZERO);
        assert_eq!(engine.state().generation(), Generation::new(2));

        // Late notifications from the previous source are dropped
        engine.handle_media_event(MediaEvent::PositionChanged {
            generation: Generation::new(1),
            position: Duration::from_secs(71),
        });
        engine.handle_media_event(MediaEvent::DurationKnown {
            generation: Generation::new(1),
            duration: Duration::from_secs(100),
        });
        assert!(engine.state().is_loading());
        assert_eq!(engine.state().position(), Duration::ZERO);

        engine.handle_media_event(MediaEvent::DurationKnown {
            generation: Generation::new(2),
            duration: Duration::from_secs(45),
        });
        assert_eq!(engine.state().status(), &PlayerStatus::Ready);
        assert_eq!(engine.state().duration(), Duration::from_secs(45));
    }

    #[test]
    fn test_source_change_mid_drag_releases_capture() {
        let mut engine = loaded(100);
        engine.pointer_pressed(100.0, BAR);
        assert_eq!(engine.capture().active(), 1);
        assert!(engine.is_capturing_pointer());

        engine.replace_source(SourceId::from("B"));
        assert_eq!(engine.capture().active(), 0);
        assert!(!engine.state().is_dragging());

        // A stray release after the swap seeks nothing
        let seeks = engine.media().seeks().len();
        engine.pointer_released();
        assert_eq!(engine.media().seeks().len(), seeks);
    }

    #[test]
    fn test_close_mid_drag_releases_capture() {
        let mut engine = loaded(100);
        engine.pointer_pressed(100.0, BAR);
        engine.close();

        assert!(engine.is_closed());
        assert_eq!(engine.capture().active(), 0);
        assert_eq!(engine.media().count(&MediaCall::Stop), 1);

        let calls = engine.media().calls.len();
        engine.pointer_moved(300.0);
        engine.pointer_released();
        engine.toggle_playback();
        engine.set_volume(0.2);
        position(&mut engine, 5);
        assert_eq!(engine.media().calls.len(), calls);
    }

    #[test]
    fn test_dropping_engine_mid_drag_releases_capture() {
        let capture = PointerCapture::new();
        let mut engine = PlayerEngine::with_capture(
            FakeMedia::new(),
            SourceId::from("a.mp3"),
            EngineOptions::default(),
            capture.clone(),
        );
        engine.handle_media_event(MediaEvent::DurationKnown {
            generation: Generation::new(1),
            duration: Duration::from_secs(30),
        });
        engine.pointer_pressed(60.0, BAR);
        assert_eq!(capture.active(), 1);

        drop(engine);
        assert_eq!(capture.active(), 0);
    }

    #[test]
    fn test_load_failure_and_recovery() {
        let mut engine = mount("missing.mp3");
        engine.handle_media_event(MediaEvent::LoadFailed {
            generation: Generation::new(1),
            reason: "file not found".to_string(),
        });
        assert_eq!(engine.state().failure(), Some("file not found"));
        assert!(!engine.state().is_loading());

        assert!(!engine.toggle_playback());
        engine.pointer_pressed(100.0, BAR);
        assert!(!engine.state().is_dragging());

        engine.replace_source(SourceId::from("present.mp3"));
        engine.handle_media_event(MediaEvent::DurationKnown {
            generation: Generation::new(2),
            duration: Duration::from_secs(10),
        });
        assert!(engine.toggle_playback());
    }

    #[test]
    fn test_end_of_track_rewinds() {
        let mut engine = loaded(60);
        engine.toggle_playback();
        engine.media.clear();

        position(&mut engine, 60);
        assert_eq!(engine.state().status(), &PlayerStatus::Ended);
        assert_eq!(engine.state().position(), Duration::ZERO);
        assert_eq!(
            engine.media().calls,
            vec![MediaCall::Pause, MediaCall::SetPosition(Duration::ZERO)]
        );

        // Late report of the final position does not move the bar
        position(&mut engine, 60);
        assert_eq!(engine.state().position(), Duration::ZERO);

        assert!(engine.toggle_playback());
        assert!(engine.state().is_playing());
    }

    #[test]
    fn test_end_with_repeat_keeps_playing() {
        let mut engine = loaded(60);
        engine.toggle_repeat();
        engine.toggle_playback();

        position(&mut engine, 60);
        engine.handle_media_event(MediaEvent::Ended {
            generation: Generation::new(1),
        });
        assert_eq!(engine.state().status(), &PlayerStatus::Playing);
    }

    #[test]
    fn test_ended_event_finishes() {
        let mut engine = loaded(60);
        engine.toggle_playback();
        engine.handle_media_event(MediaEvent::Ended {
            generation: Generation::new(1),
        });
        assert_eq!(engine.state().status(), &PlayerStatus::Ended);
    }

    #[test]
    fn test_zero_duration_source() {
        let mut engine = loaded(0);
        assert_eq!(engine.state().status(), &PlayerStatus::Ready);

        engine.pointer_pressed(300.0, BAR);
        engine.pointer_released();
        assert_eq!(engine.media().seeks(), vec![Duration::ZERO]);
        assert_eq!(engine.state().progress_fraction(), 0.0);
    }

    #[test]
    fn test_volume_panel_focus_ordering() {
        let mut engine = loaded(10);

        engine.pointer_down(false);
        assert!(engine.toggle_volume_panel());

        engine.pointer_down(true);
        engine.set_volume(0.5);
        assert!(engine.state().show_volume_panel());

        // Clicking the toggle button closes without reopening
        engine.pointer_down(false);
        assert!(!engine.toggle_volume_panel());
        assert!(!engine.state().show_volume_panel());
        assert_eq!(engine.state().volume(), 0.5);

        engine.volume_panel_blurred();
        assert!(!engine.state().show_volume_panel());
    }

    #[test]
    fn test_mount_applies_preferences() {
        let engine = PlayerEngine::new(
            FakeMedia::new(),
            SourceId::from("a.mp3"),
            EngineOptions {
                volume: 4.0,
                repeat: true,
            },
        );
        assert_eq!(engine.state().volume(), 1.0);
        assert!(engine.media().is_looping());
        assert_eq!(engine.media().volume(), 1.0);
    }
}

//! Audio thread implementation
//!
//! This module runs the AudioPlayer in a dedicated thread, processing
//! commands from the UI thread and sending media events back.
//!
//! Without an output device the thread still runs and answers every load
//! with `MediaEvent::LoadFailed`, so the UI never waits on a dead backend.

use std::path::Path;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::events::{
    AudioCommand, AudioCommandReceiver, MediaEventReceiver, MediaEventSender,
    SharedPlaybackState, audio_command_channel, media_event_channel,
};
use super::handle::AudioHandle;
use super::player::{AudioError, AudioPlayer, PlaybackStatus};
use crate::player::{Generation, MediaEvent};

pub struct AudioThreadHandle {
    pub handle: AudioHandle,
    event_rx: Option<MediaEventReceiver>,
    thread_handle: Option<JoinHandle<()>>,
}

impl AudioThreadHandle {
    pub fn take_event_rx(&mut self) -> Option<MediaEventReceiver> {
        self.event_rx.take()
    }

    /// Ask the thread to exit and wait up to `timeout` for it
    pub fn join(mut self, timeout: Duration) -> Result<(), AudioError> {
        let Some(handle) = self.thread_handle.take() else {
            return Ok(());
        };
        self.handle.shutdown();

        let start = std::time::Instant::now();
        while !handle.is_finished() {
            if start.elapsed() > timeout {
                return Err(AudioError::JoinTimeout(timeout));
            }
            thread::sleep(Duration::from_millis(10));
        }

        handle.join().map_err(|_| {
            tracing::error!("Audio thread panicked");
            AudioError::ThreadPanicked
        })
    }
}

impl Drop for AudioThreadHandle {
    fn drop(&mut self) {
        self.handle.shutdown();
    }
}

/// Spawn the audio thread
///
/// Returns the handle the engine drives plus the receiver for the events the
/// thread reports back.
pub fn spawn_audio_thread() -> Result<AudioThreadHandle, AudioError> {
    let (command_tx, command_rx) = audio_command_channel();
    let (event_tx, event_rx) = media_event_channel();

    let state = SharedPlaybackState::new();
    let state_clone = state.clone();
    let handle = AudioHandle::new(command_tx, state);

    let thread_handle = thread::Builder::new()
        .name("audio-player".to_string())
        .spawn(move || {
            let backend = AudioPlayer::new().map_err(|e| {
                tracing::error!("Failed to create audio player: {}", e);
                e.to_string()
            });
            audio_thread_main(backend, command_rx, event_tx, state_clone);
        })
        .map_err(AudioError::Spawn)?;

    Ok(AudioThreadHandle {
        handle,
        event_rx: Some(event_rx),
        thread_handle: Some(thread_handle),
    })
}

/// Per-thread bookkeeping next to the player
struct AudioThread {
    backend: Result<AudioPlayer, String>,
    event_tx: MediaEventSender,
    state: SharedPlaybackState,
    generation: Generation,
    looping: bool,
    volume: f32,
}

/// Main loop for the audio thread
///
/// Blocks on `command_rx.blocking_recv()` and on decoding.
fn audio_thread_main(
    backend: Result<AudioPlayer, String>,
    mut command_rx: AudioCommandReceiver,
    event_tx: MediaEventSender,
    state: SharedPlaybackState,
) {
    tracing::info!("Audio thread started");

    let mut audio = AudioThread {
        backend,
        event_tx,
        state,
        generation: Generation::default(),
        looping: false,
        volume: 1.0,
    };

    while let Some(cmd) = command_rx.blocking_recv() {
        if cmd == AudioCommand::Shutdown {
            break;
        }
        audio.handle(cmd);
    }

    tracing::info!("Audio thread exiting");
}

impl AudioThread {
    fn handle(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Load { source, generation } => {
                self.generation = generation;
                self.state.reset_source();
                self.load(Path::new(source.as_str()));
            }
            AudioCommand::Play => {
                if let Ok(player) = &mut self.backend {
                    player.play();
                }
            }
            AudioCommand::Pause => {
                if let Ok(player) = &mut self.backend {
                    player.pause();
                    self.state.set_position(player.position());
                }
            }
            AudioCommand::Stop => {
                if let Ok(player) = &mut self.backend {
                    player.stop();
                }
                self.state.reset_source();
            }
            AudioCommand::Seek { position } => {
                if let Ok(player) = &mut self.backend {
                    if let Err(e) = player.seek(position) {
                        tracing::warn!("Seek to {:?} failed: {}", position, e);
                    }
                    self.state.set_position(player.position());
                }
            }
            AudioCommand::SetVolume { volume } => {
                self.volume = volume;
                self.state.set_volume(volume);
                if let Ok(player) = &mut self.backend {
                    player.set_volume(volume);
                }
            }
            AudioCommand::SetLooping { looping } => {
                self.looping = looping;
                self.state.set_looping(looping);
            }
            AudioCommand::Tick => self.tick(),
            AudioCommand::Shutdown => {}
        }
    }

    fn load(&mut self, path: &Path) {
        let generation = self.generation;
        let player = match &mut self.backend {
            Ok(player) => player,
            Err(reason) => {
                let reason = reason.clone();
                self.send(MediaEvent::LoadFailed { generation, reason });
                return;
            }
        };

        player.set_volume(self.volume);
        match player.load(path) {
            Ok(duration) => {
                self.state.set_duration(Some(duration));
                self.send(MediaEvent::DurationKnown {
                    generation,
                    duration,
                });
            }
            Err(e) => {
                tracing::warn!("Failed to load {:?}: {}", path, e);
                self.send(MediaEvent::LoadFailed {
                    generation,
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Report position and detect the end of the track
    fn tick(&mut self) {
        let generation = self.generation;
        let looping = self.looping;
        let Ok(player) = &mut self.backend else {
            return;
        };
        if !player.is_loaded() || player.status() == PlaybackStatus::Finished {
            return;
        }

        let finished = player.is_finished();
        let position = if finished {
            player.duration()
        } else {
            player.position()
        };
        self.state.set_position(position);
        let mut events = vec![MediaEvent::PositionChanged {
            generation,
            position,
        }];

        if finished {
            if looping {
                tracing::debug!("Track finished, looping");
                if let Err(e) = player.restart() {
                    tracing::warn!("Failed to restart track: {}", e);
                    events.push(MediaEvent::LoadFailed {
                        generation,
                        reason: e.to_string(),
                    });
                }
            } else {
                tracing::debug!("Track finished");
                player.mark_finished();
                events.push(MediaEvent::Ended { generation });
            }
        }

        for event in events {
            self.send(event);
        }
    }

    fn send(&self, event: MediaEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::debug!("Media event receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::SourceId;

    fn without_output() -> (AudioThread, MediaEventReceiver) {
        let (event_tx, event_rx) = media_event_channel();
        let audio = AudioThread {
            backend: Err("no output device".to_string()),
            event_tx,
            state: SharedPlaybackState::new(),
            generation: Generation::default(),
            looping: false,
            volume: 1.0,
        };
        (audio, event_rx)
    }

    fn handle_for(thread_handle: JoinHandle<()>) -> AudioThreadHandle {
        AudioThreadHandle {
            handle: AudioHandle::detached(),
            event_rx: None,
            thread_handle: Some(thread_handle),
        }
    }

    #[test]
    fn test_join_reports_panicked_thread() {
        let audio = handle_for(thread::spawn(|| panic!("decoder blew up")));
        assert!(matches!(
            audio.join(Duration::from_secs(5)),
            Err(AudioError::ThreadPanicked)
        ));
    }

    #[test]
    fn test_join_times_out_on_stuck_thread() {
        let audio = handle_for(thread::spawn(|| thread::sleep(Duration::from_millis(300))));
        assert!(matches!(
            audio.join(Duration::from_millis(20)),
            Err(AudioError::JoinTimeout(_))
        ));
    }

    #[test]
    fn test_join_after_clean_exit() {
        let audio = handle_for(thread::spawn(|| {}));
        assert!(audio.join(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_load_without_output_fails_with_generation() {
        let (mut audio, mut rx) = without_output();

        audio.handle(AudioCommand::Load {
            source: SourceId::from("song.mp3"),
            generation: Generation::new(7),
        });

        assert_eq!(
            rx.try_recv().ok(),
            Some(MediaEvent::LoadFailed {
                generation: Generation::new(7),
                reason: "no output device".to_string(),
            })
        );
    }

    #[test]
    fn test_preferences_tracked_without_output() {
        let (mut audio, mut rx) = without_output();

        audio.handle(AudioCommand::SetVolume { volume: 0.4 });
        audio.handle(AudioCommand::SetLooping { looping: true });
        audio.handle(AudioCommand::Play);
        audio.handle(AudioCommand::Tick);

        assert_eq!(audio.state.volume(), 0.4);
        assert!(audio.state.is_looping());
        assert!(rx.try_recv().is_err());
    }
}

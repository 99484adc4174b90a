//! Audio handle for non-blocking audio control from UI thread
//!
//! `AudioHandle` is the `MediaHandle` the engine drives in the real app.
//! All methods send commands to the audio thread and return immediately.
//! Getters read `SharedPlaybackState` without blocking.

use std::time::Duration;

use super::events::{AudioCommand, AudioCommandSender, SharedPlaybackState, audio_command_channel};
use crate::player::{Generation, MediaHandle, SourceId, clamp_volume};

/// Handle for controlling audio from UI thread
#[derive(Clone)]
pub struct AudioHandle {
    command_tx: AudioCommandSender,
    state: SharedPlaybackState,
}

impl std::fmt::Debug for AudioHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioHandle")
            .field("state", &self.state)
            .finish()
    }
}

impl AudioHandle {
    pub fn new(command_tx: AudioCommandSender, state: SharedPlaybackState) -> Self {
        Self { command_tx, state }
    }

    /// Handle whose commands go nowhere, for when the audio thread is missing
    pub fn detached() -> Self {
        let (command_tx, _) = audio_command_channel();
        Self::new(command_tx, SharedPlaybackState::new())
    }

    /// Ask the audio thread to report position and check for the end
    pub fn tick(&self) {
        self.send(AudioCommand::Tick);
    }

    /// Stop the audio thread's command loop
    pub fn shutdown(&self) {
        self.send(AudioCommand::Shutdown);
    }

    fn send(&self, command: AudioCommand) {
        if let Err(e) = self.command_tx.send(command) {
            tracing::warn!("Audio thread gone, dropped command {:?}", e.0);
        }
    }
}

impl MediaHandle for AudioHandle {
    fn load(&mut self, source: &SourceId, generation: Generation) {
        self.state.reset_source();
        self.send(AudioCommand::Load {
            source: source.clone(),
            generation,
        });
    }

    fn play(&mut self) {
        self.send(AudioCommand::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCommand::Pause);
    }

    fn stop(&mut self) {
        self.send(AudioCommand::Stop);
    }

    fn position(&self) -> Duration {
        self.state.position()
    }

    /// The shared position is updated immediately so getters do not bounce
    /// back while the audio thread is still seeking.
    fn set_position(&mut self, position: Duration) {
        self.state.set_position(position);
        self.send(AudioCommand::Seek { position });
    }

    fn duration(&self) -> Option<Duration> {
        self.state.duration()
    }

    fn volume(&self) -> f32 {
        self.state.volume()
    }

    fn set_volume(&mut self, volume: f32) {
        let volume = clamp_volume(volume);
        self.state.set_volume(volume);
        self.send(AudioCommand::SetVolume { volume });
    }

    fn is_looping(&self) -> bool {
        self.state.is_looping()
    }

    fn set_looping(&mut self, looping: bool) {
        self.state.set_looping(looping);
        self.send(AudioCommand::SetLooping { looping });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_are_forwarded_in_order() {
        let (tx, mut rx) = audio_command_channel();
        let mut handle = AudioHandle::new(tx, SharedPlaybackState::new());

        handle.load(&SourceId::from("a.mp3"), Generation::new(1));
        handle.play();
        handle.set_position(Duration::from_secs(3));

        assert_eq!(
            rx.try_recv().ok(),
            Some(AudioCommand::Load {
                source: SourceId::from("a.mp3"),
                generation: Generation::new(1),
            })
        );
        assert_eq!(rx.try_recv().ok(), Some(AudioCommand::Play));
        assert_eq!(
            rx.try_recv().ok(),
            Some(AudioCommand::Seek {
                position: Duration::from_secs(3)
            })
        );
    }

    #[test]
    fn test_getters_read_shared_state() {
        let (tx, _rx) = audio_command_channel();
        let mut handle = AudioHandle::new(tx, SharedPlaybackState::new());

        handle.set_volume(2.0);
        handle.set_looping(true);
        handle.set_position(Duration::from_secs(9));

        assert_eq!(handle.volume(), 1.0);
        assert!(handle.is_looping());
        assert_eq!(handle.position(), Duration::from_secs(9));
        assert_eq!(handle.duration(), None);
    }

    #[test]
    fn test_send_after_thread_exit_is_harmless() {
        let (tx, rx) = audio_command_channel();
        drop(rx);
        let mut handle = AudioHandle::new(tx, SharedPlaybackState::new());
        handle.play();
        handle.tick();
    }
}

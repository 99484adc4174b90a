//! Audio player using rodio
//!
//! One decoded source in one `Sink`. Lives on the audio thread; everything
//! here may block on file I/O or decoding.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

/// Errors raised by the rodio backend
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("failed to open audio output: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode audio: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("seek not supported for this format: {0}")]
    Seek(#[from] rodio::source::SeekError),
    #[error("no audio loaded")]
    NothingLoaded,
    #[error("failed to spawn audio thread: {0}")]
    Spawn(std::io::Error),
    #[error("audio thread did not exit within {0:?}")]
    JoinTimeout(Duration),
    #[error("audio thread panicked")]
    ThreadPanicked,
}

/// Playback status of the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
    /// Drained to the end and not yet rewound
    Finished,
}

/// Audio player for a single source
pub struct AudioPlayer {
    stream: OutputStream,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    duration: Duration,
    volume: f32,
    status: PlaybackStatus,
}

impl AudioPlayer {
    /// Create a new audio player on the default output device
    pub fn new() -> Result<Self, AudioError> {
        let stream = OutputStreamBuilder::open_default_stream()?;
        Ok(Self {
            stream,
            sink: None,
            path: None,
            duration: Duration::ZERO,
            volume: 1.0,
            status: PlaybackStatus::Stopped,
        })
    }

    /// Decode `path` into a fresh paused sink and return its duration
    ///
    /// Formats without a known length report zero.
    pub fn load(&mut self, path: &Path) -> Result<Duration, AudioError> {
        self.stop();

        let (sink, duration) = self.open_sink(path)?;
        self.sink = Some(sink);
        self.path = Some(path.to_path_buf());
        self.duration = duration;
        self.status = PlaybackStatus::Paused;

        tracing::info!("Loaded {:?}, duration: {:?}", path, duration);
        Ok(duration)
    }

    fn open_sink(&self, path: &Path) -> Result<(Sink, Duration), AudioError> {
        let file = File::open(path).map_err(|source| AudioError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file))?;
        let duration = source.total_duration().unwrap_or(Duration::ZERO);

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.set_volume(self.volume);
        sink.pause();
        Ok((sink, duration))
    }

    pub fn play(&mut self) {
        if self.status == PlaybackStatus::Finished {
            if let Err(e) = self.seek(Duration::ZERO) {
                tracing::warn!("Failed to rewind finished track: {}", e);
                return;
            }
        }
        if let Some(sink) = &self.sink {
            sink.play();
            self.status = PlaybackStatus::Playing;
        }
    }

    pub fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
            if self.status == PlaybackStatus::Playing {
                self.status = PlaybackStatus::Paused;
            }
        }
    }

    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.path = None;
        self.duration = Duration::ZERO;
        self.status = PlaybackStatus::Stopped;
    }

    /// Set volume (0.0 to 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    /// Seek to position
    ///
    /// Falls back to reloading the file when the sink refuses the seek,
    /// which is always the case once it has drained.
    pub fn seek(&mut self, position: Duration) -> Result<(), AudioError> {
        let Some(sink) = &self.sink else {
            return Err(AudioError::NothingLoaded);
        };
        if self.status != PlaybackStatus::Finished {
            match sink.try_seek(position) {
                Ok(()) => {
                    tracing::debug!("Seek to {:?} successful", position);
                    return Ok(());
                }
                Err(e) => {
                    tracing::debug!("Direct seek failed: {:?}, will try reload", e);
                }
            }
        }

        let path = self.path.clone().ok_or(AudioError::NothingLoaded)?;
        let was_playing = self.status == PlaybackStatus::Playing;

        if let Some(old_sink) = self.sink.take() {
            old_sink.stop();
        }
        let (new_sink, duration) = self.open_sink(&path)?;
        let result = new_sink.try_seek(position).map_err(AudioError::from);
        if was_playing {
            new_sink.play();
        }

        self.sink = Some(new_sink);
        self.duration = duration;
        self.status = if was_playing {
            PlaybackStatus::Playing
        } else {
            PlaybackStatus::Paused
        };
        result
    }

    pub fn position(&self) -> Duration {
        match (&self.sink, self.status) {
            (_, PlaybackStatus::Finished) => self.duration,
            (Some(sink), _) if self.duration.is_zero() => sink.get_pos(),
            (Some(sink), _) => sink.get_pos().min(self.duration),
            (None, _) => Duration::ZERO,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_loaded(&self) -> bool {
        self.sink.is_some()
    }

    /// Check whether the playing sink ran out
    pub fn is_finished(&self) -> bool {
        let Some(sink) = &self.sink else {
            return false;
        };
        if self.status != PlaybackStatus::Playing {
            return false;
        }
        playback_finished(sink.get_pos(), self.duration, sink.empty())
    }

    /// Record that the sink drained
    pub fn mark_finished(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.status = PlaybackStatus::Finished;
    }

    /// Start the current source over from the beginning
    pub fn restart(&mut self) -> Result<(), AudioError> {
        let path = self.path.clone().ok_or(AudioError::NothingLoaded)?;
        if let Some(old_sink) = self.sink.take() {
            old_sink.stop();
        }
        let (sink, duration) = self.open_sink(&path)?;
        sink.play();
        self.sink = Some(sink);
        self.duration = duration;
        self.status = PlaybackStatus::Playing;
        Ok(())
    }
}

/// End-of-track decision for a playing sink
///
/// Only a drained sink or a position at (or past) a known duration counts.
/// Formats without a known length rely on the drained sink alone.
fn playback_finished(position: Duration, duration: Duration, sink_empty: bool) -> bool {
    sink_empty || (!duration.is_zero() && position >= duration)
}

//! Audio output
//!
//! With the `audio` feature, sounds are decoded from `audio.sounds_dir` and
//! played through rodio. Without it, or when no output device opens, every
//! sound is reported through the log instead.

use std::path::{Path, PathBuf};

use starfolio_core::{AudioSink, SoundEvent};

use crate::config::AudioConfig;

/// Extensions tried, in order, for a sound id without one
pub const SOUND_EXTENSIONS: [&str; 4] = ["mp3", "ogg", "wav", "flac"];

/// Locate the file for sound `id` under `dir`
///
/// An id with an extension names the file directly. A bare id is tried with
/// each of [`SOUND_EXTENSIONS`] and the first existing file wins.
pub fn sound_path(dir: &Path, id: &str) -> Option<PathBuf> {
    if Path::new(id).extension().is_some() {
        let path = dir.join(id);
        return path.is_file().then_some(path);
    }
    SOUND_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", id, ext)))
        .find(|path| path.is_file())
}

/// Pick the sink for this run
pub fn open_sink(config: &AudioConfig) -> Box<dyn AudioSink> {
    if !config.enabled {
        log::info!("Audio disabled");
        return Box::new(LogAudioSink::new(false));
    }

    #[cfg(feature = "audio")]
    {
        match RodioAudioSink::open(&config.sounds_dir) {
            Ok(sink) => return Box::new(sink),
            Err(e) => log::warn!("No audio output ({}); sounds will only be logged", e),
        }
    }
    #[cfg(not(feature = "audio"))]
    log::warn!("Built without the `audio` feature; sounds will only be logged");

    Box::new(LogAudioSink::new(true))
}

/// Sink that logs every sound it is asked to play
#[derive(Debug)]
pub struct LogAudioSink {
    enabled: bool,
    played: usize,
}

impl LogAudioSink {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, played: 0 }
    }

    /// Number of sounds played since creation
    pub fn played(&self) -> usize {
        self.played
    }
}

impl AudioSink for LogAudioSink {
    fn play(&mut self, event: &SoundEvent) {
        if !self.enabled || event.effect.volume <= 0.0 {
            return;
        }
        self.played += 1;
        match &event.source {
            Some(source) => log::info!(
                "Sound '{}' at volume {:.2} ({})",
                event.effect.id,
                event.effect.volume,
                source
            ),
            None => log::info!("Sound '{}' at volume {:.2}", event.effect.id, event.effect.volume),
        }
    }
}

#[cfg(feature = "audio")]
pub use device::{AudioError, RodioAudioSink};

#[cfg(feature = "audio")]
mod device {
    use std::fmt;
    use std::fs::File;
    use std::io::{self, BufReader};
    use std::path::{Path, PathBuf};

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use starfolio_core::{AudioSink, SoundEvent};

    use super::sound_path;

    /// Error opening the output device or playing a sound
    #[derive(Debug)]
    pub enum AudioError {
        Device(rodio::StreamError),
        Play(rodio::PlayError),
        Decode(rodio::decoder::DecoderError),
        Io(io::Error),
        /// No file for the sound id in the sounds directory
        Missing(String),
    }

    impl fmt::Display for AudioError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                AudioError::Device(e) => write!(f, "output device: {}", e),
                AudioError::Play(e) => write!(f, "playback: {}", e),
                AudioError::Decode(e) => write!(f, "decode: {}", e),
                AudioError::Io(e) => write!(f, "{}", e),
                AudioError::Missing(id) => write!(f, "no sound file for '{}'", id),
            }
        }
    }

    impl std::error::Error for AudioError {}

    impl From<rodio::StreamError> for AudioError {
        fn from(e: rodio::StreamError) -> Self {
            AudioError::Device(e)
        }
    }

    impl From<rodio::PlayError> for AudioError {
        fn from(e: rodio::PlayError) -> Self {
            AudioError::Play(e)
        }
    }

    impl From<rodio::decoder::DecoderError> for AudioError {
        fn from(e: rodio::decoder::DecoderError) -> Self {
            AudioError::Decode(e)
        }
    }

    impl From<io::Error> for AudioError {
        fn from(e: io::Error) -> Self {
            AudioError::Io(e)
        }
    }

    /// Plays sound files on the default output device
    ///
    /// Each sound gets its own detached sink, so overlapping hovers and
    /// clicks mix instead of queueing.
    pub struct RodioAudioSink {
        // Dropping the stream stops all output
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sounds_dir: PathBuf,
        played: usize,
    }

    impl RodioAudioSink {
        pub fn open(sounds_dir: impl Into<PathBuf>) -> Result<Self, AudioError> {
            let (stream, handle) = OutputStream::try_default()?;
            let sounds_dir = sounds_dir.into();
            log::info!("Audio output ready, sounds from {}", sounds_dir.display());
            Ok(Self {
                _stream: stream,
                handle,
                sounds_dir,
                played: 0,
            })
        }

        pub fn played(&self) -> usize {
            self.played
        }

        fn play_file(&self, path: &Path, volume: f32) -> Result<(), AudioError> {
            let source = Decoder::new(BufReader::new(File::open(path)?))?;
            let sink = Sink::try_new(&self.handle)?;
            sink.set_volume(volume);
            sink.append(source);
            sink.detach();
            Ok(())
        }
    }

    impl AudioSink for RodioAudioSink {
        fn play(&mut self, event: &SoundEvent) {
            if event.effect.volume <= 0.0 {
                return;
            }
            let result = sound_path(&self.sounds_dir, &event.effect.id)
                .ok_or_else(|| AudioError::Missing(event.effect.id.clone()))
                .and_then(|path| self.play_file(&path, event.effect.volume));
            match result {
                Ok(()) => {
                    self.played += 1;
                    log::debug!("Playing '{}' at volume {:.2}", event.effect.id, event.effect.volume);
                }
                Err(e) => log::warn!("Sound '{}' not played: {}", event.effect.id, e),
            }
        }
    }
}

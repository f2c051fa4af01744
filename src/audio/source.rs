//! Audio source for playing individual sounds

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use glam::Vec3;
use rodio::{Decoder, Sink, Source as _, SpatialSink, mixer::Mixer};

/// Playback state of an audio source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Audio is playing
    Playing,
    /// Audio is paused
    Paused,
    /// Audio has stopped
    #[default]
    Stopped,
}

/// Creation options for an audio source
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceOptions {
    /// Repeat forever instead of playing once
    pub looping: bool,
    /// Play through a spatial sink with a positionable emitter
    pub spatial: bool,
}

impl SourceOptions {
    /// Options for a looping music track
    pub fn looping() -> Self {
        Self {
            looping: true,
            spatial: false,
        }
    }

    /// Options for a looping sound placed in the world
    pub fn looping_spatial() -> Self {
        Self {
            looping: true,
            spatial: true,
        }
    }
}

/// Distance from listener center to each ear, in world units
const EAR_OFFSET: Vec3 = Vec3::new(0.1, 0.0, 0.0);

enum SinkKind {
    Flat(Sink),
    Spatial(SpatialSink),
}

impl SinkKind {
    fn connect(mixer: &Mixer, spatial: bool) -> Self {
        if spatial {
            Self::Spatial(SpatialSink::connect_new(
                mixer,
                [0.0; 3],
                (-EAR_OFFSET).to_array(),
                EAR_OFFSET.to_array(),
            ))
        } else {
            Self::Flat(Sink::connect_new(mixer))
        }
    }

    fn play(&self) {
        match self {
            Self::Flat(sink) => sink.play(),
            Self::Spatial(sink) => sink.play(),
        }
    }

    fn pause(&self) {
        match self {
            Self::Flat(sink) => sink.pause(),
            Self::Spatial(sink) => sink.pause(),
        }
    }

    fn stop(&self) {
        match self {
            Self::Flat(sink) => sink.stop(),
            Self::Spatial(sink) => sink.stop(),
        }
    }

    fn empty(&self) -> bool {
        match self {
            Self::Flat(sink) => sink.empty(),
            Self::Spatial(sink) => sink.empty(),
        }
    }

    fn set_volume(&self, volume: f32) {
        match self {
            Self::Flat(sink) => sink.set_volume(volume),
            Self::Spatial(sink) => sink.set_volume(volume),
        }
    }

    fn volume(&self) -> f32 {
        match self {
            Self::Flat(sink) => sink.volume(),
            Self::Spatial(sink) => sink.volume(),
        }
    }
}

/// A decoded sound on its own sink.
///
/// Sources start paused; `play` begins playback. A stopped source has
/// exhausted its queue and cannot be restarted.
pub struct AudioSource {
    sink: SinkKind,
    state: PlaybackState,
    options: SourceOptions,
    name: String,
}

impl AudioSource {
    /// Create an audio source from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded
    pub fn from_file(
        mixer: &Mixer,
        path: impl AsRef<Path>,
        options: SourceOptions,
    ) -> Result<Self, AudioError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let file = File::open(path).map_err(|e| AudioError::IoError(e.to_string()))?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| AudioError::DecodeError(e.to_string()))?;

        Ok(Self::from_decoded(mixer, decoder, options, name))
    }

    /// Create an audio source from in-memory bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be decoded
    pub fn from_bytes(
        mixer: &Mixer,
        bytes: Arc<[u8]>,
        name: impl Into<String>,
        options: SourceOptions,
    ) -> Result<Self, AudioError> {
        let decoder = Decoder::new(std::io::Cursor::new(bytes))
            .map_err(|e| AudioError::DecodeError(e.to_string()))?;
        Ok(Self::from_decoded(mixer, decoder, options, name.into()))
    }

    fn from_decoded(
        mixer: &Mixer,
        decoder: impl rodio::Source + Send + 'static,
        options: SourceOptions,
        name: String,
    ) -> Self {
        let sink = SinkKind::connect(mixer, options.spatial);
        match &sink {
            SinkKind::Flat(flat) => {
                if options.looping {
                    flat.append(decoder.repeat_infinite());
                } else {
                    flat.append(decoder);
                }
            }
            SinkKind::Spatial(spatial) => {
                if options.looping {
                    spatial.append(decoder.repeat_infinite());
                } else {
                    spatial.append(decoder);
                }
            }
        }
        sink.pause(); // Start paused

        Self {
            sink,
            state: PlaybackState::Stopped,
            options,
            name,
        }
    }

    /// Play or resume the audio
    pub fn play(&mut self) {
        self.sink.play();
        self.state = PlaybackState::Playing;
    }

    /// Pause the audio
    pub fn pause(&mut self) {
        self.sink.pause();
        self.state = PlaybackState::Paused;
    }

    /// Stop the audio (cannot be resumed)
    pub fn stop(&mut self) {
        self.sink.stop();
        self.state = PlaybackState::Stopped;
    }

    /// Stop if playing, play otherwise
    pub fn toggle(&mut self) {
        if self.state() == PlaybackState::Playing {
            self.stop();
        } else {
            self.play();
        }
    }

    /// Set the volume (0.0 = silent, 1.0 = normal)
    pub fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume.max(0.0));
    }

    /// The current volume
    pub fn volume(&self) -> f32 {
        self.sink.volume()
    }

    /// Move the emitter; no effect on a non-spatial source
    pub fn set_emitter_position(&mut self, position: Vec3) {
        if let SinkKind::Spatial(sink) = &self.sink {
            sink.set_emitter_position(position.to_array());
        }
    }

    /// Move the listener's ears; no effect on a non-spatial source
    pub fn set_listener_position(&mut self, position: Vec3) {
        if let SinkKind::Spatial(sink) = &self.sink {
            sink.set_left_ear_position((position - EAR_OFFSET).to_array());
            sink.set_right_ear_position((position + EAR_OFFSET).to_array());
        }
    }

    /// Whether the queue has been exhausted
    pub fn is_finished(&self) -> bool {
        self.sink.empty()
    }

    /// The current playback state
    pub fn state(&self) -> PlaybackState {
        if self.sink.empty() && self.state == PlaybackState::Playing {
            PlaybackState::Stopped
        } else {
            self.state
        }
    }

    /// Whether this source plays through a spatial sink
    pub fn is_spatial(&self) -> bool {
        self.options.spatial
    }

    /// Whether this source repeats forever
    pub fn is_looping(&self) -> bool {
        self.options.looping
    }

    /// The source name, usually the file name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for AudioSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioSource")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("looping", &self.options.looping)
            .field("spatial", &self.options.spatial)
            .finish()
    }
}

/// Errors that can occur during audio operations
#[derive(Debug, Clone)]
pub enum AudioError {
    /// IO error reading a file
    IoError(String),
    /// Error decoding audio data
    DecodeError(String),
    /// No audio output device available
    NoDevice,
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::DecodeError(e) => write!(f, "Decode error: {e}"),
            Self::NoDevice => write!(f, "No audio output device available"),
        }
    }
}

impl std::error::Error for AudioError {}

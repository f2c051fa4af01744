//! Audio output device acquisition

use rodio::{OutputStream, OutputStreamBuilder, mixer::Mixer};

use super::source::AudioError;

/// Handle to the host audio device.
///
/// Created once by the application and kept alive for the session; audio
/// sources connect to its mixer. Acquisition is the one fatal audio error:
/// without a device there is nothing to degrade to, so the failure goes back
/// to the caller instead of being logged away.
pub struct AudioOutput {
    /// The output stream (must be kept alive)
    _stream: OutputStream,
    /// The mixer sources connect to
    mixer: Mixer,
}

impl AudioOutput {
    /// Open the default audio device
    ///
    /// # Errors
    ///
    /// Returns an error if no audio output device is available
    pub fn new() -> Result<Self, AudioError> {
        let stream = OutputStreamBuilder::from_default_device()
            .map_err(|_| AudioError::NoDevice)?
            .open_stream()
            .map_err(|_| AudioError::NoDevice)?;
        let mixer = stream.mixer().clone();

        Ok(Self {
            _stream: stream,
            mixer,
        })
    }

    /// The mixer for connecting audio sources
    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }
}

impl std::fmt::Debug for AudioOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioOutput").finish_non_exhaustive()
    }
}

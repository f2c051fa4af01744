//! Audio collaborator boundary
//!
//! Built on top of the rodio audio library. The core owns playback control
//! and per-frame position sync; mixing and spatialization DSP stay inside
//! rodio.

mod component;
mod output;
mod source;

pub use component::AudioComponent;
pub use output::AudioOutput;
pub use source::{AudioError, AudioSource, PlaybackState, SourceOptions};

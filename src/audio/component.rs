//! Audio component for scene-managed sounds

use glam::Vec3;

use super::source::AudioSource;

/// A sound attached to an entity.
///
/// The component may be silent (no source) and still participate in the
/// audio pass — a bare component marked as the microphone is how a scene
/// tracks its listener. Position sync runs once per frame from the scene's
/// audio update.
#[derive(Debug, Default)]
pub struct AudioComponent {
    source: Option<AudioSource>,
    position: Vec3,
    positional: bool,
    microphone: bool,
}

impl AudioComponent {
    /// Create a component playing the given source
    pub fn new(source: AudioSource) -> Self {
        Self {
            source: Some(source),
            ..Default::default()
        }
    }

    /// Create a component with no sound of its own
    pub fn silent() -> Self {
        Self::default()
    }

    /// Per-frame sync. Pushes the emitter position for positional sounds
    /// and, when a listener position is known for this frame, the ear
    /// positions for spatial playback.
    pub fn update(&mut self, listener: Option<Vec3>) {
        if self.positional
            && let Some(source) = self.source.as_mut()
        {
            source.set_emitter_position(self.position);
        }
        if let Some(listener) = listener
            && let Some(source) = self.source.as_mut()
        {
            source.set_listener_position(listener);
        }
    }

    /// Play the sound; silent components ignore this
    pub fn play(&mut self) {
        if let Some(source) = self.source.as_mut() {
            source.play();
        }
    }

    /// Start or stop the sound; silent components ignore this
    pub fn toggle(&mut self) {
        if let Some(source) = self.source.as_mut() {
            source.toggle();
        }
    }

    /// Track this component's position as a spatial emitter
    pub fn enable_positional_audio(&mut self, position: Vec3) {
        self.position = position;
        self.positional = true;
    }

    /// Stop treating this component as a spatial emitter
    pub fn disable_positional_audio(&mut self) {
        self.positional = false;
    }

    /// Mark this component as the scene's listener; its position follows
    /// the scene camera every frame
    pub fn enable_microphone(&mut self) {
        self.microphone = true;
    }

    /// Whether this component is the scene's listener
    pub fn is_microphone(&self) -> bool {
        self.microphone
    }

    /// Whether this component syncs its emitter position
    pub fn is_positional(&self) -> bool {
        self.positional
    }

    /// Current tracked position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move the tracked position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// The underlying source, if any
    pub fn source(&self) -> Option<&AudioSource> {
        self.source.as_ref()
    }

    /// The underlying source, mutably
    pub fn source_mut(&mut self) -> Option<&mut AudioSource> {
        self.source.as_mut()
    }
}

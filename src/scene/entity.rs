//! Entities and their component slots

use slotmap::new_key_type;

use crate::audio::AudioComponent;
use crate::physics::PhysicsComponent;
use crate::render::GraphicsComponent;

new_key_type! {
    /// Stable identity of an entity inside its owning scene
    pub struct EntityKey;
}

/// The closed set of component kinds a scene can manage.
///
/// Tags double as registry keys and as the per-frame update-order key;
/// physics must come before graphics in any scene's tag order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentTag {
    /// Rigid body in the physics world
    Physics,
    /// Render node in the scene graph
    Graphics,
    /// Sound attached to the entity
    Audio,
}

impl ComponentTag {
    /// All tags, in the default update order
    pub const ALL: [ComponentTag; 3] = [Self::Physics, Self::Graphics, Self::Audio];
}

impl std::fmt::Display for ComponentTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Physics => "physics",
            Self::Graphics => "graphics",
            Self::Audio => "audio",
        })
    }
}

/// A component being attached to an entity
#[derive(Debug)]
pub enum Component {
    /// Physical representation
    Physics(PhysicsComponent),
    /// Visual representation
    Graphics(GraphicsComponent),
    /// Audible representation
    Audio(AudioComponent),
}

impl Component {
    /// The tag this component occupies on an entity
    pub fn tag(&self) -> ComponentTag {
        match self {
            Self::Physics(_) => ComponentTag::Physics,
            Self::Graphics(_) => ComponentTag::Graphics,
            Self::Audio(_) => ComponentTag::Audio,
        }
    }
}

/// Identity plus one optional component per tag.
///
/// Entities are built by application code and handed to a scene with
/// `Scene::add`, which assigns the key. `dirty` records that the component
/// set changed since the scene last registered it; the scene clears it.
#[derive(Debug)]
pub struct Entity {
    key: Option<EntityKey>,
    physics: Option<PhysicsComponent>,
    graphics: Option<GraphicsComponent>,
    audio: Option<AudioComponent>,
    dirty: bool,
}

impl Entity {
    /// Create an entity with no components.
    ///
    /// New entities start dirty so a scene registers them on first sight.
    pub fn new() -> Self {
        Self {
            key: None,
            physics: None,
            graphics: None,
            audio: None,
            dirty: true,
        }
    }

    /// Create an entity with a starting set of components
    pub fn with_components(components: impl IntoIterator<Item = Component>) -> Self {
        let mut entity = Self::new();
        for component in components {
            entity.attach(component);
        }
        entity
    }

    /// Attach a component, replacing any existing one of the same tag.
    /// Marks the entity dirty.
    pub fn attach(&mut self, component: Component) {
        match component {
            Component::Physics(physics) => self.physics = Some(physics),
            Component::Graphics(graphics) => self.graphics = Some(graphics),
            Component::Audio(audio) => self.audio = Some(audio),
        }
        self.dirty = true;
    }

    /// Remove the component of a tag, if any. Marks the entity dirty.
    pub fn detach(&mut self, tag: ComponentTag) {
        match tag {
            ComponentTag::Physics => self.physics = None,
            ComponentTag::Graphics => self.graphics = None,
            ComponentTag::Audio => self.audio = None,
        }
        self.dirty = true;
    }

    /// Whether a component of this tag is attached
    pub fn has(&self, tag: ComponentTag) -> bool {
        match tag {
            ComponentTag::Physics => self.physics.is_some(),
            ComponentTag::Graphics => self.graphics.is_some(),
            ComponentTag::Audio => self.audio.is_some(),
        }
    }

    /// Tags currently attached, in default order
    pub fn tags(&self) -> impl Iterator<Item = ComponentTag> + '_ {
        ComponentTag::ALL.into_iter().filter(|&tag| self.has(tag))
    }

    /// Whether the component set changed since the last registration
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The key assigned by the owning scene, if added
    pub fn key(&self) -> Option<EntityKey> {
        self.key
    }

    /// The physics component
    pub fn physics(&self) -> Option<&PhysicsComponent> {
        self.physics.as_ref()
    }

    /// The physics component, mutably
    pub fn physics_mut(&mut self) -> Option<&mut PhysicsComponent> {
        self.physics.as_mut()
    }

    /// The graphics component
    pub fn graphics(&self) -> Option<&GraphicsComponent> {
        self.graphics.as_ref()
    }

    /// The graphics component, mutably
    pub fn graphics_mut(&mut self) -> Option<&mut GraphicsComponent> {
        self.graphics.as_mut()
    }

    /// The audio component
    pub fn audio(&self) -> Option<&AudioComponent> {
        self.audio.as_ref()
    }

    /// The audio component, mutably
    pub fn audio_mut(&mut self) -> Option<&mut AudioComponent> {
        self.audio.as_mut()
    }

    pub(crate) fn assign_key(&mut self, key: EntityKey) {
        self.key = Some(key);
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Split borrow used by the physics→graphics sync pass
    pub(crate) fn physics_graphics_mut(
        &mut self,
    ) -> (Option<&PhysicsComponent>, Option<&mut GraphicsComponent>) {
        (self.physics.as_ref(), self.graphics.as_mut())
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{BodyDesc, PhysicsComponent};
    use crate::render::{GraphicsComponent, RenderNode};
    use glam::Vec3;

    fn physics_component() -> Component {
        Component::Physics(PhysicsComponent::from_desc(BodyDesc::default()))
    }

    fn graphics_component() -> Component {
        Component::Graphics(GraphicsComponent::new(RenderNode::cuboid(Vec3::ONE)))
    }

    #[test]
    fn new_entities_start_dirty_and_empty() {
        let entity = Entity::new();
        assert!(entity.is_dirty());
        assert!(entity.key().is_none());
        assert_eq!(entity.tags().count(), 0);
    }

    #[test]
    fn attach_then_detach_leaves_slot_empty_and_dirty() {
        let mut entity = Entity::new();
        entity.attach(physics_component());
        assert!(entity.has(ComponentTag::Physics));

        entity.clear_dirty();
        entity.detach(ComponentTag::Physics);
        assert!(!entity.has(ComponentTag::Physics));
        assert!(entity.is_dirty());
    }

    #[test]
    fn attach_replaces_the_existing_slot() {
        let mut entity = Entity::with_components([graphics_component()]);
        entity.clear_dirty();

        entity.attach(graphics_component());
        assert!(entity.is_dirty());
        assert_eq!(entity.tags().collect::<Vec<_>>(), vec![ComponentTag::Graphics]);
    }

    #[test]
    fn detach_is_idempotent() {
        let mut entity = Entity::new();
        entity.detach(ComponentTag::Audio);
        entity.detach(ComponentTag::Audio);
        assert!(entity.is_dirty());
        assert!(!entity.has(ComponentTag::Audio));
    }

    #[test]
    fn tags_follow_the_default_order() {
        let entity = Entity::with_components([graphics_component(), physics_component()]);
        assert_eq!(
            entity.tags().collect::<Vec<_>>(),
            vec![ComponentTag::Physics, ComponentTag::Graphics]
        );
    }
}

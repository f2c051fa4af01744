//! Convenience constructors for common entities

use glam::{Quat, Vec3};

use crate::audio::{AudioComponent, AudioSource};
use crate::physics::{ColliderShape, PhysicsComponent};
use crate::render::{GraphicsComponent, RenderNode, Transform};
use crate::scene::entity::{Component, Entity};

/// Builders for the basic entity shapes demos are made of
pub struct EntityFactory;

impl EntityFactory {
    /// A box with a rigid body and a matching render node.
    ///
    /// `size` is the full extent on each axis; a mass of zero makes the box
    /// static.
    pub fn make_box(
        size: Vec3,
        position: Vec3,
        mass: f32,
        rotation: Quat,
        color: Vec3,
    ) -> Entity {
        let physics = PhysicsComponent::new(
            ColliderShape::Cuboid {
                half_extents: size * 0.5,
            },
            position,
            mass,
            rotation,
        );

        let node = RenderNode::cuboid(size)
            .with_color(color)
            .with_transform(Transform::from_position_rotation(position, rotation));
        let graphics = GraphicsComponent::new(node);

        Entity::with_components([Component::Physics(physics), Component::Graphics(graphics)])
    }

    /// A looping music player with no position in the world
    pub fn make_music_player(source: AudioSource) -> AudioComponent {
        AudioComponent::new(source)
    }

    /// A looping music player placed in the world; the sound follows the
    /// given position as a spatial emitter
    pub fn make_music_player_with_position(source: AudioSource, position: Vec3) -> AudioComponent {
        let mut component = AudioComponent::new(source);
        component.enable_positional_audio(position);
        component
    }
}

//! Physics component tying an entity to a rigid body

use glam::{Quat, Vec3};

use crate::physics::world::{BodyDesc, BodyHandle, ColliderShape, PhysicsWorld};
use crate::render::Transform;

/// The physical representation of an entity.
///
/// Holds a body description until the owning scene registers it with the
/// physics world; after that, it reads poses back through its handle.
#[derive(Debug)]
pub struct PhysicsComponent {
    desc: BodyDesc,
    body: Option<BodyHandle>,
}

impl PhysicsComponent {
    /// Create a component from shape, position, mass, and rotation
    pub fn new(shape: ColliderShape, position: Vec3, mass: f32, rotation: Quat) -> Self {
        Self::from_desc(BodyDesc {
            shape,
            position,
            mass,
            rotation,
        })
    }

    /// Create a component from a full body description
    pub fn from_desc(desc: BodyDesc) -> Self {
        Self { desc, body: None }
    }

    /// Create the rigid body in the world.
    ///
    /// Called by `Scene::add`. Registering twice is a no-op; the component
    /// keeps its first body.
    pub fn register(&mut self, world: &mut PhysicsWorld) {
        if self.body.is_some() {
            log::debug!("physics component already registered");
            return;
        }
        self.body = Some(world.add_body(&self.desc));
    }

    /// The body handle, if registered
    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    /// The description this component was built from
    pub fn desc(&self) -> &BodyDesc {
        &self.desc
    }

    /// Read the body's pose into `out`.
    ///
    /// Returns true iff a pose was written, i.e. the component is registered
    /// and its body is still alive. Scale in `out` is left untouched.
    pub fn sync_transform(&self, world: &PhysicsWorld, out: &mut Transform) -> bool {
        let Some(body) = self.body else {
            return false;
        };
        let Some((position, rotation)) = world.body_pose(body) else {
            return false;
        };
        out.position = position;
        out.rotation = rotation;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_reports_nothing_before_registration() {
        let component = PhysicsComponent::from_desc(BodyDesc::default());
        let world = PhysicsWorld::new();
        let mut out = Transform::default();
        assert!(!component.sync_transform(&world, &mut out));
    }

    #[test]
    fn sync_writes_pose_after_registration() {
        let mut world = PhysicsWorld::new();
        let mut component = PhysicsComponent::new(
            ColliderShape::Sphere { radius: 0.5 },
            Vec3::new(1.0, 2.0, 3.0),
            0.0,
            Quat::IDENTITY,
        );
        component.register(&mut world);

        let mut out = Transform {
            scale: Vec3::splat(2.0),
            ..Default::default()
        };
        assert!(component.sync_transform(&world, &mut out));
        assert_eq!(out.position, Vec3::new(1.0, 2.0, 3.0));
        // The out-transform's scale is not physics-owned
        assert_eq!(out.scale, Vec3::splat(2.0));
    }

    #[test]
    fn register_is_idempotent() {
        let mut world = PhysicsWorld::new();
        let mut component = PhysicsComponent::from_desc(BodyDesc::default());

        component.register(&mut world);
        let first = component.body();
        component.register(&mut world);

        assert_eq!(component.body(), first);
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn sync_fails_once_body_is_removed() {
        let mut world = PhysicsWorld::new();
        let mut component = PhysicsComponent::from_desc(BodyDesc {
            mass: 1.0,
            ..Default::default()
        });
        component.register(&mut world);

        world.remove_body(component.body().unwrap());
        let mut out = Transform::default();
        assert!(!component.sync_transform(&world, &mut out));
    }
}

//! Physics collaborator boundary
//!
//! Rigid-body simulation is provided by rapier3d behind a narrow interface:
//! step the world, add and remove bodies, read poses back.

mod component;
mod world;

pub use component::PhysicsComponent;
pub use world::{BodyDesc, BodyHandle, ColliderShape, PhysicsWorld};

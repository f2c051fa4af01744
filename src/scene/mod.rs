//! Scene model
//!
//! Entities carry components; scenes own entities, drive the per-frame
//! update across per-tag registries, and keep graphics in step with physics.
//! The scene manager owns all scenes and the notion of "current".

mod entity;
mod factory;
mod manager;
mod scene;

pub use entity::{Component, ComponentTag, Entity, EntityKey};
pub use factory::EntityFactory;
pub use manager::SceneManager;
pub use scene::Scene;

//! keel — the runtime core of a small real-time interactive engine
//!
//! This crate provides:
//! - An entity/component scene model with per-tag update registries
//! - A per-frame update loop that keeps graphics in sync with physics
//! - Scene lifecycle management and scene switching
//! - Input dispatch for keyboard, mouse, and gamepads with pluggable
//!   camera-control strategies
//!
//! The physics solver (rapier3d), the renderer, and the audio mixer (rodio)
//! sit behind narrow collaborator interfaces; the core owns the data flow
//! between them, not their internals.

pub mod audio;
pub mod core;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;

// Re-exports for convenience
pub use glam;
pub use rapier3d;
pub use winit;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::audio::{AudioComponent, AudioError, AudioOutput, AudioSource, SourceOptions};
    pub use crate::core::{CommandQueue, Engine, EngineCommand, EngineConfig, FrameStats, Time};
    pub use crate::input::{
        CameraControl, ControlBindings, FirstPersonControl, GamepadAxis, GamepadButton,
        GamepadSnapshot, GamepadSource, InputManager, OrbitalControl, TrackballControl,
    };
    pub use crate::physics::{BodyDesc, ColliderShape, PhysicsComponent, PhysicsWorld};
    pub use crate::render::{
        Camera, GraphicsComponent, Light, NodeMesh, NullRenderer, RenderNode, Renderer,
        SceneGraph, Transform,
    };
    pub use crate::scene::{
        Component, ComponentTag, Entity, EntityFactory, EntityKey, Scene, SceneManager,
    };
    pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
    pub use winit::keyboard::KeyCode;
}

//! Input handling module
//!
//! Binds keyboard keys, gamepad buttons/axes, and mouse clicks to callbacks,
//! and owns the pluggable camera-control strategy. Gamepad state is polled
//! once per frame regardless of how the host delivers it.

mod bindings;
mod camera_control;
mod gamepad;
mod manager;
mod pointer;

pub use bindings::{
    AxisCallback, ButtonCallback, ControlBindings, GamepadAxis, GamepadButton, KeyCallback,
    MouseCallback,
};
pub use camera_control::{
    CameraControl, FirstPersonControl, NullControl, OrbitalControl, SharedPosition,
    TrackballControl,
};
pub use gamepad::{GamepadButtonState, GamepadSnapshot, GamepadSource};
pub use manager::InputManager;
pub use pointer::PointerState;

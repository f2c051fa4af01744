//! Pluggable camera-control strategies

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;

use crate::input::pointer::PointerState;
use crate::render::Camera;

/// A world-space position shared between game code and a camera strategy.
///
/// Single-threaded by design; the application updates the cell, the strategy
/// reads it every frame.
pub type SharedPosition = Rc<Cell<Vec3>>;

/// Policy translating pointer input into camera movement.
///
/// Exactly one strategy is installed per input manager at a time; installing
/// a new one disposes the old one first. `prepare` and `dispose` bracket the
/// owning scene's active span.
pub trait CameraControl {
    /// Drive the camera for one frame
    fn update(&mut self, camera: &mut Camera, pointer: &PointerState);

    /// The owning scene became active
    fn prepare(&mut self) {}

    /// The owning scene became inactive; drop any transient state
    fn dispose(&mut self) {}

    /// Strategy name, for logging and diagnostics
    fn name(&self) -> &'static str;
}

/// The do-nothing strategy installed by default
#[derive(Debug, Default)]
pub struct NullControl;

impl CameraControl for NullControl {
    fn update(&mut self, _camera: &mut Camera, _pointer: &PointerState) {}

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Orbit the camera around a fixed target.
///
/// Dragging with the primary button rotates; the scroll wheel zooms. On the
/// first update after installation (or re-activation) the orbit is derived
/// from wherever the camera already is, so switching strategies does not
/// snap the view.
#[derive(Debug)]
pub struct OrbitalControl {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    synced: bool,
}

impl OrbitalControl {
    const MIN_DISTANCE: f32 = 0.5;
    const MAX_PITCH: f32 = 1.54; // just short of straight up/down

    /// Create an orbit around `target`
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            yaw: 0.0,
            pitch: 0.0,
            distance: 10.0,
            rotate_speed: 0.01,
            zoom_speed: 1.0,
            synced: false,
        }
    }

    /// The orbit target
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Move the orbit target
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    fn sync_from(&mut self, camera: &Camera) {
        let offset = camera.position - self.target;
        self.distance = offset.length().max(Self::MIN_DISTANCE);
        self.yaw = offset.z.atan2(offset.x);
        self.pitch = (offset.y / self.distance).clamp(-1.0, 1.0).asin();
        self.synced = true;
    }

    fn apply(&self, camera: &mut Camera) {
        let offset = Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        ) * self.distance;
        camera.set_position(self.target + offset);
        camera.look_at_point(self.target);
    }
}

impl CameraControl for OrbitalControl {
    fn update(&mut self, camera: &mut Camera, pointer: &PointerState) {
        if !self.synced {
            self.sync_from(camera);
        }
        if pointer.primary_down() {
            self.yaw += pointer.delta().x * self.rotate_speed;
            self.pitch = (self.pitch + pointer.delta().y * self.rotate_speed)
                .clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
        }
        self.distance =
            (self.distance - pointer.scroll().y * self.zoom_speed).max(Self::MIN_DISTANCE);
        self.apply(camera);
    }

    fn dispose(&mut self) {
        self.synced = false;
    }

    fn name(&self) -> &'static str {
        "orbital"
    }
}

/// Free tumble around a movable target.
///
/// Like [`OrbitalControl`] but without a pitch clamp, and the secondary
/// button pans the target through the view plane.
#[derive(Debug)]
pub struct TrackballControl {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    synced: bool,
}

impl TrackballControl {
    const MIN_DISTANCE: f32 = 0.5;

    /// Create a trackball around the origin
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: 10.0,
            rotate_speed: 0.01,
            pan_speed: 0.02,
            zoom_speed: 1.0,
            synced: false,
        }
    }
}

impl Default for TrackballControl {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraControl for TrackballControl {
    fn update(&mut self, camera: &mut Camera, pointer: &PointerState) {
        if !self.synced {
            let offset = camera.position - self.target;
            self.distance = offset.length().max(Self::MIN_DISTANCE);
            self.yaw = offset.z.atan2(offset.x);
            self.pitch = (offset.y / self.distance).clamp(-1.0, 1.0).asin();
            self.synced = true;
        }

        if pointer.primary_down() {
            self.yaw += pointer.delta().x * self.rotate_speed;
            self.pitch += pointer.delta().y * self.rotate_speed;
        }
        if pointer.secondary_down() {
            let pan = camera.right() * -pointer.delta().x + camera.up * pointer.delta().y;
            self.target += pan * self.pan_speed;
        }
        self.distance =
            (self.distance - pointer.scroll().y * self.zoom_speed).max(Self::MIN_DISTANCE);

        let offset = Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        ) * self.distance;
        camera.set_position(self.target + offset);
        camera.look_at_point(self.target);
    }

    fn dispose(&mut self) {
        self.synced = false;
    }

    fn name(&self) -> &'static str {
        "trackball"
    }
}

/// Follow a player position, looking with the pointer.
///
/// `move_speed` is the per-frame interpolation factor toward the tracked
/// position; 1.0 snaps exactly onto it.
pub struct FirstPersonControl {
    player: SharedPosition,
    move_speed: f32,
    look_speed: f32,
}

impl FirstPersonControl {
    /// Track `player` with the given follow and look speeds
    pub fn new(player: SharedPosition, move_speed: f32, look_speed: f32) -> Self {
        Self {
            player,
            move_speed: move_speed.clamp(0.0, 1.0),
            look_speed,
        }
    }
}

impl CameraControl for FirstPersonControl {
    fn update(&mut self, camera: &mut Camera, pointer: &PointerState) {
        let target = self.player.get();
        camera.position = camera.position.lerp(target, self.move_speed);
        let delta = pointer.delta();
        if delta != glam::Vec2::ZERO {
            camera.rotate(delta.x, delta.y, self.look_speed);
        }
    }

    fn name(&self) -> &'static str {
        "first_person"
    }
}

impl std::fmt::Debug for FirstPersonControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirstPersonControl")
            .field("player", &self.player.get())
            .field("move_speed", &self.move_speed)
            .field("look_speed", &self.look_speed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbital_frames_its_target() {
        let mut camera = Camera::new();
        camera.position = Vec3::new(10.0, 0.0, 0.0);
        let target = Vec3::ZERO;
        let mut control = OrbitalControl::new(target);

        control.update(&mut camera, &PointerState::new());

        // Derived orbit keeps the camera where it was and looks at the target
        assert!((camera.position - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-3);
        assert!((camera.direction - Vec3::NEG_X).length() < 1e-3);
    }

    #[test]
    fn orbital_zoom_respects_minimum_distance() {
        let mut camera = Camera::new();
        camera.position = Vec3::new(2.0, 0.0, 0.0);
        let mut control = OrbitalControl::new(Vec3::ZERO);
        let mut pointer = PointerState::new();
        pointer.add_scroll(glam::Vec2::new(0.0, 100.0));

        control.update(&mut camera, &pointer);

        assert!(camera.position.length() >= 0.5 - 1e-3);
    }

    #[test]
    fn first_person_follows_the_shared_position() {
        let player: SharedPosition = Rc::new(Cell::new(Vec3::new(1.0, 2.0, 3.0)));
        let mut control = FirstPersonControl::new(player.clone(), 1.0, 0.005);
        let mut camera = Camera::new();

        control.update(&mut camera, &PointerState::new());
        assert_eq!(camera.position, Vec3::new(1.0, 2.0, 3.0));

        player.set(Vec3::new(4.0, 2.0, 3.0));
        control.update(&mut camera, &PointerState::new());
        assert_eq!(camera.position, Vec3::new(4.0, 2.0, 3.0));
    }

    #[test]
    fn orbital_resyncs_after_dispose() {
        let mut camera = Camera::new();
        camera.position = Vec3::new(5.0, 5.0, 0.0);
        let mut control = OrbitalControl::new(Vec3::ZERO);

        control.update(&mut camera, &PointerState::new());
        control.dispose();

        // After re-activation the orbit derives from the camera again
        camera.position = Vec3::new(0.0, 0.0, 8.0);
        control.update(&mut camera, &PointerState::new());
        assert!((camera.position - Vec3::new(0.0, 0.0, 8.0)).length() < 1e-3);
    }
}

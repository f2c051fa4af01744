//! Perspective camera

use glam::{Mat4, Vec3};

/// Perspective camera owned by a scene.
///
/// Camera-control strategies drive position and orientation; the scene
/// manager keeps the aspect ratio in step with the window.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Normalized view direction
    pub direction: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    yaw: f32,
    pitch: f32,
}

impl Camera {
    /// Create a camera with the engine defaults: 60 degree field of view,
    /// near plane at 0.2, far plane at 2000
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: 60.0_f32.to_radians(),
            near: 0.2,
            far: 2000.0,
            aspect: 16.0 / 9.0,
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
        }
    }

    /// Create a camera at a position looking at a target
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut camera = Self::new();
        camera.position = position;
        camera.up = up;
        camera.look_at_point(target);
        camera
    }

    /// Point the camera at a world-space target
    pub fn look_at_point(&mut self, target: Vec3) {
        let offset = target - self.position;
        if offset.length_squared() > f32::EPSILON {
            self.direction = offset.normalize();
            self.yaw = self.direction.z.atan2(self.direction.x);
            self.pitch = self.direction.y.clamp(-1.0, 1.0).asin();
        }
    }

    /// Move the camera, keeping its orientation
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Rotate using a pointer delta; positive `delta_y` looks down
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32, sensitivity: f32) {
        self.yaw += delta_x * sensitivity;
        self.pitch -= delta_y * sensitivity;

        // Keep away from the poles to avoid gimbal lock
        let max_pitch = 89.0_f32.to_radians();
        self.pitch = self.pitch.clamp(-max_pitch, max_pitch);

        self.direction = Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize();
    }

    /// Right vector
    pub fn right(&self) -> Vec3 {
        self.direction.cross(self.up).normalize()
    }

    /// View matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.direction, self.up)
    }

    /// Projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio from a window size
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_normalizes_direction() {
        let camera = Camera::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
        assert!((camera.direction.length() - 1.0).abs() < 1e-5);
        assert!(camera.direction.z < 0.0);
    }

    #[test]
    fn aspect_follows_window_size() {
        let mut camera = Camera::new();
        camera.set_aspect(800, 400);
        assert_eq!(camera.aspect, 2.0);
        // A zero-height window must not divide by zero
        camera.set_aspect(800, 0);
        assert!(camera.aspect.is_finite());
    }

    #[test]
    fn rotate_clamps_pitch() {
        let mut camera = Camera::new();
        camera.rotate(0.0, -10_000.0, 1.0);
        assert!(camera.direction.is_finite());
        assert!(camera.direction.y <= 1.0);
    }

    #[test]
    fn view_projection_is_finite() {
        let camera = Camera::look_at(Vec3::new(-12.0, 7.0, 4.0), Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
        let matrix = camera.view_projection_matrix();
        assert!(matrix.to_cols_array().iter().all(|v| v.is_finite()));
    }
}

//! Pointer state tracked across a frame

use glam::Vec2;
use winit::event::MouseButton;

/// Mouse position, per-frame motion, and button state.
///
/// Deltas accumulate as events arrive and are cleared once per frame after
/// the camera-control strategy has consumed them.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    position: Vec2,
    delta: Vec2,
    scroll: Vec2,
    primary_down: bool,
    secondary_down: bool,
}

impl PointerState {
    /// Create an idle pointer at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer move to an absolute window position
    pub fn move_to(&mut self, position: Vec2) {
        self.delta += position - self.position;
        self.position = position;
    }

    /// Record a button press or release
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.primary_down = pressed,
            MouseButton::Right => self.secondary_down = pressed,
            _ => {}
        }
    }

    /// Accumulate scroll-wheel motion
    pub fn add_scroll(&mut self, delta: Vec2) {
        self.scroll += delta;
    }

    /// Clear per-frame accumulators; call once at the end of each frame
    pub fn end_frame(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = Vec2::ZERO;
    }

    /// Forget everything, including held buttons
    pub fn reset(&mut self) {
        *self = Self {
            position: self.position,
            ..Self::default()
        };
    }

    /// Current window position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Motion accumulated this frame
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Scroll accumulated this frame
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Whether the primary (left) button is held
    pub fn primary_down(&self) -> bool {
        self.primary_down
    }

    /// Whether the secondary (right) button is held
    pub fn secondary_down(&self) -> bool {
        self.secondary_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_accumulate_until_end_of_frame() {
        let mut pointer = PointerState::new();
        pointer.move_to(Vec2::new(10.0, 0.0));
        pointer.move_to(Vec2::new(10.0, 5.0));
        assert_eq!(pointer.delta(), Vec2::new(10.0, 5.0));
        assert_eq!(pointer.position(), Vec2::new(10.0, 5.0));

        pointer.end_frame();
        assert_eq!(pointer.delta(), Vec2::ZERO);
        assert_eq!(pointer.position(), Vec2::new(10.0, 5.0));
    }

    #[test]
    fn buttons_survive_frame_boundaries() {
        let mut pointer = PointerState::new();
        pointer.set_button(MouseButton::Left, true);
        pointer.end_frame();
        assert!(pointer.primary_down());

        pointer.reset();
        assert!(!pointer.primary_down());
    }
}

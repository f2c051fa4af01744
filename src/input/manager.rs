//! Input manager: callback dispatch and per-frame polling

use std::collections::BTreeMap;

use glam::Vec2;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::input::bindings::{
    AxisCallback, BindingEntry, ButtonCallback, ControlBindings, GamepadAxis, GamepadButton,
    KeyCallback, MouseCallback,
};
use crate::input::camera_control::{
    CameraControl, FirstPersonControl, NullControl, OrbitalControl, SharedPosition,
    TrackballControl,
};
use crate::input::gamepad::{GamepadSnapshot, GamepadSource};
use crate::input::pointer::PointerState;
use crate::render::Camera;

/// The key never swallowed by keyboard dispatch, so the host's debug UI
/// stays reachable
const PASSTHROUGH_KEY: KeyCode = KeyCode::F12;

/// Binds keys, gamepad buttons/axes, and mouse clicks to callbacks, and owns
/// the camera-control strategy.
///
/// Each scene has its own manager; `prepare` and `dispose` bracket the span
/// during which it reacts to events, and the scene manager guarantees at
/// most one manager is prepared at a time. Gamepad state arrives by polling
/// a [`GamepadSource`] on every `update`, whether or not the host also
/// delivers connect/disconnect events.
pub struct InputManager {
    key_callbacks: FxHashMap<KeyCode, SmallVec<[KeyCallback; 2]>>,
    button_callbacks: FxHashMap<usize, FxHashMap<usize, ButtonCallback>>,
    axis_callbacks: FxHashMap<usize, FxHashMap<usize, AxisCallback>>,
    mouse_callback: Option<MouseCallback>,
    controllers: BTreeMap<usize, GamepadSnapshot>,
    prev_buttons: FxHashMap<usize, Vec<bool>>,
    source: Option<Box<dyn GamepadSource>>,
    scratch: Vec<GamepadSnapshot>,
    pointer: PointerState,
    camera_control: Box<dyn CameraControl>,
    active: bool,
}

impl InputManager {
    /// Create an inactive manager with no bindings
    pub fn new() -> Self {
        Self {
            key_callbacks: FxHashMap::default(),
            button_callbacks: FxHashMap::default(),
            axis_callbacks: FxHashMap::default(),
            mouse_callback: None,
            controllers: BTreeMap::new(),
            prev_buttons: FxHashMap::default(),
            source: None,
            scratch: Vec::new(),
            pointer: PointerState::new(),
            camera_control: Box::new(NullControl),
            active: false,
        }
    }

    /// Start reacting to events; forwards to the camera-control strategy
    pub fn prepare(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.camera_control.prepare();
    }

    /// Stop reacting to events; forwards to the camera-control strategy
    pub fn dispose(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.pointer.reset();
        self.camera_control.dispose();
    }

    /// Whether this manager is currently live
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Per-frame update: drive the camera strategy, poll gamepads, and
    /// dispatch button/axis callbacks. Called from `Scene::update`.
    pub fn update(&mut self, camera: &mut Camera) {
        if !self.active {
            return;
        }

        self.camera_control.update(camera, &self.pointer);

        // Gamepad state only arrives by polling on some hosts
        self.scan_gamepads();
        self.dispatch_gamepads();

        self.pointer.end_frame();
    }

    /// Install the host gamepad source polled every frame
    pub fn set_gamepad_source(&mut self, source: Box<dyn GamepadSource>) {
        self.source = Some(source);
    }

    /// Poll the source and upsert the controllers table
    fn scan_gamepads(&mut self) {
        let Some(source) = self.source.as_mut() else {
            return;
        };
        self.scratch.clear();
        source.poll(&mut self.scratch);
        for pad in self.scratch.drain(..) {
            self.prev_buttons.entry(pad.index).or_default();
            self.controllers.insert(pad.index, pad);
        }
    }

    fn dispatch_gamepads(&mut self) {
        for (&index, pad) in &self.controllers {
            let prev = self.prev_buttons.entry(index).or_default();
            prev.resize(pad.buttons.len(), false);

            for (i, button) in pad.buttons.iter().enumerate() {
                if button.pressed
                    && let Some(callback) = self
                        .button_callbacks
                        .get_mut(&index)
                        .and_then(|callbacks| callbacks.get_mut(&i))
                {
                    callback(button.value, prev[i]);
                }
                prev[i] = button.pressed;
            }

            if let Some(callbacks) = self.axis_callbacks.get_mut(&index) {
                for (i, &value) in pad.axes.iter().enumerate() {
                    if let Some(callback) = callbacks.get_mut(&i) {
                        callback(value);
                    }
                }
            }
        }
    }

    /// A pad appeared through a host connect event
    pub fn handle_gamepad_connected(&mut self, pad: GamepadSnapshot) {
        if !self.active {
            return;
        }
        self.prev_buttons.entry(pad.index).or_default();
        self.controllers.insert(pad.index, pad);
    }

    /// A pad disappeared. Its state is forgotten; callbacks bound to the
    /// player index stay and re-apply if a pad reconnects on it.
    pub fn handle_gamepad_disconnected(&mut self, index: usize) {
        self.controllers.remove(&index);
        self.prev_buttons.remove(&index);
    }

    /// Pads currently known to the manager
    pub fn connected_gamepads(&self) -> usize {
        self.controllers.len()
    }

    /// Bind a batch of controls, routing each entry by kind and alias
    pub fn bind_controls(&mut self, bindings: ControlBindings) {
        for entry in bindings.into_entries() {
            match entry {
                BindingEntry::Key { key, callback } => {
                    self.key_callbacks.entry(key).or_default().push(callback);
                }
                BindingEntry::Button {
                    alias,
                    player,
                    callback,
                } => match GamepadButton::from_alias(&alias) {
                    Some(button) => {
                        self.button_callbacks
                            .entry(player)
                            .or_default()
                            .insert(button.index(), callback);
                    }
                    None => log::warn!("invalid gamepad button binding `{alias}`"),
                },
                BindingEntry::Axis {
                    alias,
                    player,
                    callback,
                } => match GamepadAxis::from_alias(&alias) {
                    Some(axis) => {
                        self.axis_callbacks
                            .entry(player)
                            .or_default()
                            .insert(axis.index(), callback);
                    }
                    None => log::warn!("invalid gamepad axis binding `{alias}`"),
                },
            }
        }
    }

    /// Append a callback for a key; all callbacks for a key fire in binding
    /// order
    pub fn bind_key(&mut self, key: KeyCode, callback: impl FnMut(KeyCode) + 'static) {
        self.key_callbacks
            .entry(key)
            .or_default()
            .push(Box::new(callback));
    }

    /// Bind a gamepad button for a player; replaces any previous binding
    pub fn bind_gamepad_button(
        &mut self,
        button: GamepadButton,
        player: usize,
        callback: impl FnMut(f32, bool) + 'static,
    ) {
        self.button_callbacks
            .entry(player)
            .or_default()
            .insert(button.index(), Box::new(callback));
    }

    /// Bind a gamepad axis for a player; replaces any previous binding
    pub fn bind_gamepad_axis(
        &mut self,
        axis: GamepadAxis,
        player: usize,
        callback: impl FnMut(f32) + 'static,
    ) {
        self.axis_callbacks
            .entry(player)
            .or_default()
            .insert(axis.index(), Box::new(callback));
    }

    /// Set the mouse-click callback; replaces any previous binding
    pub fn bind_mouse(&mut self, callback: impl FnMut(f32, f32) + 'static) {
        self.mouse_callback = Some(Box::new(callback));
    }

    /// Dispatch a key-down event.
    ///
    /// All callbacks bound to the key fire synchronously in binding order.
    /// Returns whether the host should treat the event as consumed — true
    /// for every key except F12, which stays live for the host's own use.
    pub fn handle_key_down(&mut self, key: KeyCode) -> bool {
        if !self.active {
            return false;
        }
        if let Some(callbacks) = self.key_callbacks.get_mut(&key) {
            for callback in callbacks.iter_mut() {
                callback(key);
            }
        }
        key != PASSTHROUGH_KEY
    }

    /// Dispatch a mouse click at window coordinates
    pub fn handle_mouse_click(&mut self, x: f32, y: f32) {
        if !self.active {
            return;
        }
        if let Some(callback) = self.mouse_callback.as_mut() {
            callback(x, y);
        }
    }

    /// Track pointer motion
    pub fn handle_mouse_moved(&mut self, position: Vec2) {
        if !self.active {
            return;
        }
        self.pointer.move_to(position);
    }

    /// Track a mouse button change
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if !self.active {
            return;
        }
        self.pointer.set_button(button, pressed);
    }

    /// Track scroll-wheel motion
    pub fn handle_scroll(&mut self, delta: Vec2) {
        if !self.active {
            return;
        }
        self.pointer.add_scroll(delta);
    }

    /// Install a camera-control strategy, disposing the previous one
    pub fn set_camera_control(&mut self, control: Box<dyn CameraControl>) {
        self.camera_control.dispose();
        self.camera_control = control;
        if self.active {
            self.camera_control.prepare();
        }
    }

    /// Orbit the camera around `target`
    pub fn enable_orbital_control(&mut self, target: glam::Vec3) {
        self.set_camera_control(Box::new(OrbitalControl::new(target)));
    }

    /// Free-tumble trackball camera
    pub fn enable_trackball_control(&mut self) {
        self.set_camera_control(Box::new(TrackballControl::new()));
    }

    /// First-person camera following a shared player position
    pub fn enable_first_person_control(
        &mut self,
        player: SharedPosition,
        move_speed: f32,
        look_speed: f32,
    ) {
        self.set_camera_control(Box::new(FirstPersonControl::new(
            player, move_speed, look_speed,
        )));
    }

    /// Name of the installed camera-control strategy
    pub fn camera_control_name(&self) -> &'static str {
        self.camera_control.name()
    }

    /// The pointer state tracked this frame
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InputManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputManager")
            .field("active", &self.active)
            .field("bound_keys", &self.key_callbacks.len())
            .field("controllers", &self.controllers.len())
            .field("camera_control", &self.camera_control.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::gamepad::GamepadButtonState;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Source that replays a fixed sequence of per-frame pad states
    struct ScriptedGamepads {
        frames: Vec<Vec<GamepadSnapshot>>,
        cursor: usize,
    }

    impl ScriptedGamepads {
        fn new(frames: Vec<Vec<GamepadSnapshot>>) -> Self {
            Self { frames, cursor: 0 }
        }
    }

    impl GamepadSource for ScriptedGamepads {
        fn poll(&mut self, out: &mut Vec<GamepadSnapshot>) {
            if let Some(frame) = self.frames.get(self.cursor) {
                out.extend(frame.iter().cloned());
            }
            self.cursor += 1;
        }
    }

    fn pad_with_button(button: GamepadButton, pressed: bool) -> GamepadSnapshot {
        let mut pad = GamepadSnapshot::idle(0, 17, 4);
        pad.buttons[button.index()] = GamepadButtonState::digital(pressed);
        pad
    }

    fn prepared_manager() -> InputManager {
        let mut input = InputManager::new();
        input.prepare();
        input
    }

    #[test]
    fn button_edge_detection_over_four_frames() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut input = prepared_manager();
        let sink = log.clone();
        input.bind_gamepad_button(GamepadButton::X, 0, move |value, was_down| {
            sink.borrow_mut().push((value, was_down));
        });
        input.set_gamepad_source(Box::new(ScriptedGamepads::new(vec![
            vec![pad_with_button(GamepadButton::X, false)],
            vec![pad_with_button(GamepadButton::X, true)],
            vec![pad_with_button(GamepadButton::X, true)],
            vec![pad_with_button(GamepadButton::X, false)],
        ])));

        let mut camera = Camera::new();
        for _ in 0..4 {
            input.update(&mut camera);
        }

        // Fires only on down frames; was_down reflects the previous frame
        assert_eq!(*log.borrow(), vec![(1.0, false), (1.0, true)]);
    }

    #[test]
    fn axis_callbacks_fire_every_frame_unthresholded() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut input = prepared_manager();
        let sink = log.clone();
        input.bind_gamepad_axis(GamepadAxis::LeftX, 0, move |value| {
            sink.borrow_mut().push(value);
        });

        let mut pad = GamepadSnapshot::idle(0, 17, 4);
        pad.axes[GamepadAxis::LeftX.index()] = 0.25;
        input.set_gamepad_source(Box::new(ScriptedGamepads::new(vec![
            vec![pad.clone()],
            vec![pad],
        ])));

        let mut camera = Camera::new();
        input.update(&mut camera);
        input.update(&mut camera);

        assert_eq!(*log.borrow(), vec![0.25, 0.25]);
    }

    #[test]
    fn key_callbacks_fire_in_binding_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut input = prepared_manager();
        let first = log.clone();
        let second = log.clone();
        input.bind_key(KeyCode::KeyW, move |_| first.borrow_mut().push(1));
        input.bind_key(KeyCode::KeyW, move |_| second.borrow_mut().push(2));

        assert!(input.handle_key_down(KeyCode::KeyW));
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn f12_is_never_consumed() {
        let fired = Rc::new(RefCell::new(false));
        let mut input = prepared_manager();
        let flag = fired.clone();
        input.bind_key(KeyCode::F12, move |_| *flag.borrow_mut() = true);

        assert!(!input.handle_key_down(KeyCode::F12));
        assert!(*fired.borrow(), "callbacks still fire on the passthrough key");
    }

    #[test]
    fn disposed_manager_ignores_events() {
        let fired = Rc::new(RefCell::new(false));
        let mut input = InputManager::new();
        let flag = fired.clone();
        input.bind_key(KeyCode::KeyA, move |_| *flag.borrow_mut() = true);

        assert!(!input.handle_key_down(KeyCode::KeyA));
        assert!(!*fired.borrow());

        input.prepare();
        assert!(input.handle_key_down(KeyCode::KeyA));
        assert!(*fired.borrow());
    }

    #[test]
    fn disconnect_forgets_state_but_keeps_bindings() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut input = prepared_manager();
        let sink = log.clone();
        input.bind_gamepad_button(GamepadButton::A, 0, move |_, was_down| {
            sink.borrow_mut().push(was_down);
        });

        input.handle_gamepad_connected(pad_with_button(GamepadButton::A, true));
        let mut camera = Camera::new();
        input.update(&mut camera);
        assert_eq!(*log.borrow(), vec![false]);

        input.handle_gamepad_disconnected(0);
        assert_eq!(input.connected_gamepads(), 0);

        // A pad reconnecting on the same index picks up the old binding,
        // with edge state starting over
        input.handle_gamepad_connected(pad_with_button(GamepadButton::A, true));
        input.update(&mut camera);
        assert_eq!(*log.borrow(), vec![false, false]);
    }

    #[test]
    fn bind_controls_routes_by_alias() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut input = prepared_manager();
        let key_sink = log.clone();
        let button_sink = log.clone();
        let axis_sink = log.clone();
        input.bind_controls(
            ControlBindings::new()
                .key(KeyCode::KeyP, move |_| key_sink.borrow_mut().push("key"))
                .button("GP_X", move |_, _| button_sink.borrow_mut().push("button"))
                .axis("GP_AXIS_LEFT_X", move |_| axis_sink.borrow_mut().push("axis"))
                .button("GP_BOGUS", |_, _| panic!("must not bind")),
        );

        let mut pad = pad_with_button(GamepadButton::X, true);
        pad.axes[GamepadAxis::LeftX.index()] = -0.5;
        input.set_gamepad_source(Box::new(ScriptedGamepads::new(vec![vec![pad]])));

        let mut camera = Camera::new();
        input.update(&mut camera);
        input.handle_key_down(KeyCode::KeyP);

        assert_eq!(*log.borrow(), vec!["button", "axis", "key"]);
    }

    #[test]
    fn strategy_swap_keeps_one_strategy_live() {
        let mut input = prepared_manager();
        assert_eq!(input.camera_control_name(), "none");

        input.enable_orbital_control(glam::Vec3::ZERO);
        assert_eq!(input.camera_control_name(), "orbital");

        input.enable_trackball_control();
        assert_eq!(input.camera_control_name(), "trackball");
    }

    #[test]
    fn prepare_and_dispose_are_idempotent() {
        let mut input = InputManager::new();
        input.prepare();
        input.prepare();
        assert!(input.is_active());
        input.dispose();
        input.dispose();
        assert!(!input.is_active());
    }
}

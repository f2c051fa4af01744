//! Control bindings and gamepad aliases

use winit::keyboard::KeyCode;

/// Callback fired when a bound key goes down
pub type KeyCallback = Box<dyn FnMut(KeyCode)>;
/// Callback fired while a bound gamepad button is down: `(value, was_down)`
pub type ButtonCallback = Box<dyn FnMut(f32, bool)>;
/// Callback fired every frame with a bound axis value in [-1, 1]
pub type AxisCallback = Box<dyn FnMut(f32)>;
/// Callback fired on mouse click with window coordinates
pub type MouseCallback = Box<dyn FnMut(f32, f32)>;

/// Gamepad buttons in standard-mapping order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum GamepadButton {
    A = 0,
    B,
    X,
    Y,
    LeftBumper,
    RightBumper,
    LeftTrigger,
    RightTrigger,
    Back,
    Start,
    LeftStick,
    RightStick,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    Guide,
}

impl GamepadButton {
    /// All buttons, in index order
    pub const ALL: [GamepadButton; 17] = [
        Self::A,
        Self::B,
        Self::X,
        Self::Y,
        Self::LeftBumper,
        Self::RightBumper,
        Self::LeftTrigger,
        Self::RightTrigger,
        Self::Back,
        Self::Start,
        Self::LeftStick,
        Self::RightStick,
        Self::DpadUp,
        Self::DpadDown,
        Self::DpadLeft,
        Self::DpadRight,
        Self::Guide,
    ];

    /// Index into a pad's button array
    pub fn index(self) -> usize {
        self as usize
    }

    /// The binding alias for this button
    pub fn alias(self) -> &'static str {
        match self {
            Self::A => "GP_A",
            Self::B => "GP_B",
            Self::X => "GP_X",
            Self::Y => "GP_Y",
            Self::LeftBumper => "GP_LB",
            Self::RightBumper => "GP_RB",
            Self::LeftTrigger => "GP_LT",
            Self::RightTrigger => "GP_RT",
            Self::Back => "GP_BACK",
            Self::Start => "GP_START",
            Self::LeftStick => "GP_LEFT_STICK",
            Self::RightStick => "GP_RIGHT_STICK",
            Self::DpadUp => "GP_DPAD_UP",
            Self::DpadDown => "GP_DPAD_DOWN",
            Self::DpadLeft => "GP_DPAD_LEFT",
            Self::DpadRight => "GP_DPAD_RIGHT",
            Self::Guide => "GP_GUIDE",
        }
    }

    /// Resolve a binding alias
    pub fn from_alias(alias: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.alias() == alias)
    }
}

/// Gamepad axes in standard-mapping order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum GamepadAxis {
    LeftX = 0,
    LeftY,
    RightX,
    RightY,
}

impl GamepadAxis {
    /// All axes, in index order
    pub const ALL: [GamepadAxis; 4] = [Self::LeftX, Self::LeftY, Self::RightX, Self::RightY];

    /// Index into a pad's axis array
    pub fn index(self) -> usize {
        self as usize
    }

    /// The binding alias for this axis
    pub fn alias(self) -> &'static str {
        match self {
            Self::LeftX => "GP_AXIS_LEFT_X",
            Self::LeftY => "GP_AXIS_LEFT_Y",
            Self::RightX => "GP_AXIS_RIGHT_X",
            Self::RightY => "GP_AXIS_RIGHT_Y",
        }
    }

    /// Resolve a binding alias
    pub fn from_alias(alias: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.alias() == alias)
    }
}

pub(crate) enum BindingEntry {
    Key {
        key: KeyCode,
        callback: KeyCallback,
    },
    Button {
        alias: String,
        player: usize,
        callback: ButtonCallback,
    },
    Axis {
        alias: String,
        player: usize,
        callback: AxisCallback,
    },
}

/// A batch of control bindings built by the application and handed to
/// `InputManager::bind_controls` in one call.
///
/// Keys accumulate: binding two callbacks to the same key fires both, in
/// binding order. Gamepad buttons and axes hold one callback per player and
/// index, the last binding winning. Player index defaults to 0.
#[derive(Default)]
pub struct ControlBindings {
    entries: Vec<BindingEntry>,
}

impl ControlBindings {
    /// Start an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a keyboard key
    pub fn key(mut self, key: KeyCode, callback: impl FnMut(KeyCode) + 'static) -> Self {
        self.entries.push(BindingEntry::Key {
            key,
            callback: Box::new(callback),
        });
        self
    }

    /// Bind a gamepad button by alias for player 0
    pub fn button(self, alias: &str, callback: impl FnMut(f32, bool) + 'static) -> Self {
        self.button_for(alias, 0, callback)
    }

    /// Bind a gamepad button by alias for a specific player
    pub fn button_for(
        mut self,
        alias: &str,
        player: usize,
        callback: impl FnMut(f32, bool) + 'static,
    ) -> Self {
        self.entries.push(BindingEntry::Button {
            alias: alias.to_string(),
            player,
            callback: Box::new(callback),
        });
        self
    }

    /// Bind a gamepad axis by alias for player 0
    pub fn axis(self, alias: &str, callback: impl FnMut(f32) + 'static) -> Self {
        self.axis_for(alias, 0, callback)
    }

    /// Bind a gamepad axis by alias for a specific player
    pub fn axis_for(
        mut self,
        alias: &str,
        player: usize,
        callback: impl FnMut(f32) + 'static,
    ) -> Self {
        self.entries.push(BindingEntry::Axis {
            alias: alias.to_string(),
            player,
            callback: Box::new(callback),
        });
        self
    }

    /// Number of entries in the batch
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the batch is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<BindingEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_aliases_round_trip() {
        for button in GamepadButton::ALL {
            assert_eq!(GamepadButton::from_alias(button.alias()), Some(button));
        }
        assert_eq!(GamepadButton::X.index(), 2);
        assert_eq!(GamepadButton::Guide.index(), 16);
    }

    #[test]
    fn axis_aliases_round_trip() {
        for axis in GamepadAxis::ALL {
            assert_eq!(GamepadAxis::from_alias(axis.alias()), Some(axis));
        }
        assert_eq!(GamepadAxis::RightY.index(), 3);
    }

    #[test]
    fn unknown_aliases_resolve_to_none() {
        assert_eq!(GamepadButton::from_alias("GP_NOPE"), None);
        assert_eq!(GamepadAxis::from_alias("GP_AXIS_NOPE"), None);
        // Button aliases are not axis aliases and vice versa
        assert_eq!(GamepadButton::from_alias("GP_AXIS_LEFT_X"), None);
        assert_eq!(GamepadAxis::from_alias("GP_A"), None);
    }

    #[test]
    fn batch_collects_entries_in_order() {
        let bindings = ControlBindings::new()
            .key(KeyCode::KeyW, |_| {})
            .button("GP_X", |_, _| {})
            .axis_for("GP_AXIS_LEFT_X", 1, |_| {});
        assert_eq!(bindings.len(), 3);
    }
}

//! Gamepad state snapshots and the host polling source

/// State of one button at poll time.
///
/// Hosts with digital buttons report a value of 0.0 or 1.0; pressure
/// sensitive buttons report the analog value alongside the pressed flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamepadButtonState {
    /// Whether the button counts as pressed
    pub pressed: bool,
    /// Analog value in [0, 1]
    pub value: f32,
}

impl GamepadButtonState {
    /// A digital button state: value 1.0 when pressed, 0.0 otherwise
    pub fn digital(pressed: bool) -> Self {
        Self {
            pressed,
            value: if pressed { 1.0 } else { 0.0 },
        }
    }
}

/// One connected gamepad as seen at poll time
#[derive(Debug, Clone, PartialEq)]
pub struct GamepadSnapshot {
    /// Zero-based player index
    pub index: usize,
    /// Button states in standard-mapping order
    pub buttons: Vec<GamepadButtonState>,
    /// Axis values in [-1, 1], standard-mapping order
    pub axes: Vec<f32>,
}

impl GamepadSnapshot {
    /// An idle pad with the given button and axis counts
    pub fn idle(index: usize, buttons: usize, axes: usize) -> Self {
        Self {
            index,
            buttons: vec![GamepadButtonState::digital(false); buttons],
            axes: vec![0.0; axes],
        }
    }
}

/// Host-side gamepad enumeration.
///
/// The input manager polls this every frame; hosts that only get gamepad
/// state by polling and hosts with connect/disconnect events both fit behind
/// it — event-driven hosts simply return their cached pads.
pub trait GamepadSource {
    /// Append a snapshot for every currently connected pad
    fn poll(&mut self, out: &mut Vec<GamepadSnapshot>);
}

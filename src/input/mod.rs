// Input module - Controller state and host event routing
//
// This module provides:
// - The tagged host event model (which surface, what happened)
// - Keyboard bindings for controller inputs and frontend actions
// - Gamepad support through gilrs
// - The router that turns host events into emulator commands

pub mod config;
pub mod event;
pub mod gamepad;
pub mod keyboard;
pub mod router;

pub use config::{GamepadMappingConfig, KeyBindingsConfig};
pub use event::{EventKind, HostEvent, SurfaceId};
pub use gamepad::{GamepadHandler, GamepadMapping};
pub use keyboard::{Action, KeyBindings};
pub use router::{Routed, Router};

use crate::machine::{Control, AXIS_CENTER, AXIS_MAX, AXIS_MIN};

/// One controller input as seen from the host side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadInput {
    Button1,
    Button2,
    Button3,
    Button4,
    Up,
    Down,
    Left,
    Right,
}

/// Position of a three-state joystick axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisPosition {
    Min,
    #[default]
    Center,
    Max,
}

impl AxisPosition {
    /// Value driven onto the axis input line
    pub fn value(self) -> u8 {
        match self {
            AxisPosition::Min => AXIS_MIN,
            AxisPosition::Center => AXIS_CENTER,
            AxisPosition::Max => AXIS_MAX,
        }
    }
}

/// Controller state as last pushed to the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerState {
    /// Buttons 1-4
    pub buttons: [bool; 4],
    /// Horizontal axis
    pub x: AxisPosition,
    /// Vertical axis
    pub y: AxisPosition,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press or release one input
    ///
    /// Releasing any direction centers its axis, even if the opposite
    /// direction is still held.
    ///
    /// # Returns
    /// The input line and value that must be pushed to the machine
    pub fn apply(&mut self, input: PadInput, active: bool) -> (Control, u8) {
        let button = |state: &mut Self, index: usize, control: Control| {
            state.buttons[index] = active;
            (control, active as u8)
        };

        match input {
            PadInput::Button1 => button(self, 0, Control::Button1),
            PadInput::Button2 => button(self, 1, Control::Button2),
            PadInput::Button3 => button(self, 2, Control::Button3),
            PadInput::Button4 => button(self, 3, Control::Button4),
            PadInput::Left | PadInput::Right => {
                self.x = match (active, input) {
                    (false, _) => AxisPosition::Center,
                    (true, PadInput::Left) => AxisPosition::Min,
                    _ => AxisPosition::Max,
                };
                (Control::AxisX, self.x.value())
            }
            PadInput::Up | PadInput::Down => {
                self.y = match (active, input) {
                    (false, _) => AxisPosition::Center,
                    (true, PadInput::Up) => AxisPosition::Max,
                    _ => AxisPosition::Min,
                };
                (Control::AxisY, self.y.value())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_initialization() {
        let state = ControllerState::new();
        assert_eq!(state.buttons, [false; 4]);
        assert_eq!(state.x, AxisPosition::Center);
        assert_eq!(state.y, AxisPosition::Center);
    }

    #[test]
    fn test_buttons_push_one_and_zero() {
        let mut state = ControllerState::new();
        assert_eq!(state.apply(PadInput::Button3, true), (Control::Button3, 1));
        assert!(state.buttons[2]);
        assert_eq!(state.apply(PadInput::Button3, false), (Control::Button3, 0));
        assert!(!state.buttons[2]);
    }

    #[test]
    fn test_axis_directions() {
        let mut state = ControllerState::new();
        assert_eq!(state.apply(PadInput::Left, true), (Control::AxisX, 0x00));
        assert_eq!(state.apply(PadInput::Right, true), (Control::AxisX, 0xFF));
        assert_eq!(state.apply(PadInput::Up, true), (Control::AxisY, 0xFF));
        assert_eq!(state.apply(PadInput::Down, true), (Control::AxisY, 0x00));
    }

    #[test]
    fn test_release_centers_axis() {
        let mut state = ControllerState::new();
        state.apply(PadInput::Up, true);
        assert_eq!(state.apply(PadInput::Up, false), (Control::AxisY, 0x80));
        assert_eq!(state.y, AxisPosition::Center);

        // Opposite direction still held, axis is centered anyway
        state.apply(PadInput::Left, true);
        state.apply(PadInput::Right, true);
        assert_eq!(state.apply(PadInput::Left, false), (Control::AxisX, 0x80));
    }

    #[test]
    fn test_press_release_round_trip() {
        let inputs = [
            PadInput::Button1,
            PadInput::Button2,
            PadInput::Button3,
            PadInput::Button4,
            PadInput::Up,
            PadInput::Down,
            PadInput::Left,
            PadInput::Right,
        ];
        for input in inputs {
            let mut state = ControllerState::new();
            state.apply(input, true);
            assert_ne!(state, ControllerState::new());
            state.apply(input, false);
            assert_eq!(state, ControllerState::new());
        }
    }
}

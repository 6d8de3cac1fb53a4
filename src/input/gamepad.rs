// Gamepad input
//
// Gamepads drive the same controller inputs as the keyboard. Face buttons
// map to buttons 1-4; the D-pad and the left stick drive the axes. Only
// transitions are reported, so a held stick does not flood the machine.

use super::{AxisPosition, PadInput};
use gilrs::{Axis, Button as GilrsButton, Event, EventType, Gilrs};
use log::{info, warn};

/// Stick deflection needed to leave the center zone
pub const STICK_DEAD_ZONE: f32 = 0.5;

/// Gamepad face button mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamepadMapping {
    pub button1: GilrsButton,
    pub button2: GilrsButton,
    pub button3: GilrsButton,
    pub button4: GilrsButton,
}

impl Default for GamepadMapping {
    /// South/East/West/North (A/B/X/Y on Xbox layouts)
    fn default() -> Self {
        Self {
            button1: GilrsButton::South,
            button2: GilrsButton::East,
            button3: GilrsButton::West,
            button4: GilrsButton::North,
        }
    }
}

impl GamepadMapping {
    /// Controller input for a gamepad button, if mapped
    pub fn pad_input(&self, button: GilrsButton) -> Option<PadInput> {
        match button {
            GilrsButton::DPadUp => Some(PadInput::Up),
            GilrsButton::DPadDown => Some(PadInput::Down),
            GilrsButton::DPadLeft => Some(PadInput::Left),
            GilrsButton::DPadRight => Some(PadInput::Right),
            b if b == self.button1 => Some(PadInput::Button1),
            b if b == self.button2 => Some(PadInput::Button2),
            b if b == self.button3 => Some(PadInput::Button3),
            b if b == self.button4 => Some(PadInput::Button4),
            _ => None,
        }
    }
}

/// Zone of a stick axis value in -1.0..=1.0
pub fn stick_zone(value: f32) -> AxisPosition {
    if value <= -STICK_DEAD_ZONE {
        AxisPosition::Min
    } else if value >= STICK_DEAD_ZONE {
        AxisPosition::Max
    } else {
        AxisPosition::Center
    }
}

/// Tracks stick zones and turns axis motion into press/release transitions
#[derive(Debug, Clone, Copy, Default)]
pub struct StickTracker {
    x: AxisPosition,
    y: AxisPosition,
}

impl StickTracker {
    /// Feed one axis value
    ///
    /// # Returns
    /// Transitions to apply, releases first
    pub fn update(&mut self, axis: Axis, value: f32) -> Vec<(PadInput, bool)> {
        let zone = stick_zone(value);
        // Positive Y is up on gilrs sticks
        let (current, min, max) = match axis {
            Axis::LeftStickX => (&mut self.x, PadInput::Left, PadInput::Right),
            Axis::LeftStickY => (&mut self.y, PadInput::Down, PadInput::Up),
            _ => return Vec::new(),
        };

        if zone == *current {
            return Vec::new();
        }

        let mut transitions = Vec::with_capacity(2);
        match *current {
            AxisPosition::Min => transitions.push((min, false)),
            AxisPosition::Max => transitions.push((max, false)),
            AxisPosition::Center => {}
        }
        match zone {
            AxisPosition::Min => transitions.push((min, true)),
            AxisPosition::Max => transitions.push((max, true)),
            AxisPosition::Center => {}
        }
        *current = zone;
        transitions
    }
}

/// Gamepad input handler
///
/// Gamepad support is optional: if gilrs cannot start, the handler stays
/// silent and the keyboard keeps working.
pub struct GamepadHandler {
    gilrs: Option<Gilrs>,
    mapping: GamepadMapping,
    stick: StickTracker,
}

impl GamepadHandler {
    /// Create a gamepad handler with the given mapping
    pub fn new(mapping: GamepadMapping) -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => {
                for (id, gamepad) in gilrs.gamepads() {
                    if gamepad.is_connected() {
                        info!("Gamepad '{}' (ID: {}) detected", gamepad.name(), id);
                    }
                }
                Some(gilrs)
            }
            Err(e) => {
                warn!("Gamepad support unavailable: {}", e);
                None
            }
        };

        Self {
            gilrs,
            mapping,
            stick: StickTracker::default(),
        }
    }

    /// Whether gilrs started
    pub fn is_available(&self) -> bool {
        self.gilrs.is_some()
    }

    /// Drain pending gamepad events into controller transitions
    pub fn poll(&mut self) -> Vec<(PadInput, bool)> {
        let mut transitions = Vec::new();
        let Some(gilrs) = self.gilrs.as_mut() else {
            return transitions;
        };

        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            match event {
                EventType::ButtonPressed(button, _) => {
                    if let Some(input) = self.mapping.pad_input(button) {
                        transitions.push((input, true));
                    }
                }
                EventType::ButtonReleased(button, _) => {
                    if let Some(input) = self.mapping.pad_input(button) {
                        transitions.push((input, false));
                    }
                }
                EventType::AxisChanged(axis, value, _) => {
                    transitions.extend(self.stick.update(axis, value));
                }
                EventType::Connected => info!("Gamepad {} connected", id),
                EventType::Disconnected => info!("Gamepad {} disconnected", id),
                _ => {}
            }
        }

        transitions
    }
}

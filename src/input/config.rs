// Input configuration
//
// Serializable forms of the key bindings and gamepad mapping. Keys and
// buttons are stored by name (e.g. "KeyA", "South") so the configuration
// file stays readable.

use super::gamepad::GamepadMapping;
use super::keyboard::KeyBindings;
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

/// Serializable key bindings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindingsConfig {
    pub button1: String,
    pub button2: String,
    pub button3: String,
    pub button4: String,
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub quit: String,
    pub pause: String,
    pub step_small: String,
    pub step_large: String,
    pub load_snapshot: String,
    pub save_snapshot: String,
    pub reload: String,
    pub screenshot: String,
}

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self::from_bindings(&KeyBindings::default())
    }
}

impl KeyBindingsConfig {
    /// Convert to runtime KeyBindings
    ///
    /// # Returns
    /// Result containing KeyBindings or error message naming the bad key
    pub fn to_bindings(&self) -> Result<KeyBindings, String> {
        Ok(KeyBindings {
            button1: string_to_keycode(&self.button1)?,
            button2: string_to_keycode(&self.button2)?,
            button3: string_to_keycode(&self.button3)?,
            button4: string_to_keycode(&self.button4)?,
            up: string_to_keycode(&self.up)?,
            down: string_to_keycode(&self.down)?,
            left: string_to_keycode(&self.left)?,
            right: string_to_keycode(&self.right)?,
            quit: string_to_keycode(&self.quit)?,
            pause: string_to_keycode(&self.pause)?,
            step_small: string_to_keycode(&self.step_small)?,
            step_large: string_to_keycode(&self.step_large)?,
            load_snapshot: string_to_keycode(&self.load_snapshot)?,
            save_snapshot: string_to_keycode(&self.save_snapshot)?,
            reload: string_to_keycode(&self.reload)?,
            screenshot: string_to_keycode(&self.screenshot)?,
        })
    }

    /// Create from runtime KeyBindings
    pub fn from_bindings(bindings: &KeyBindings) -> Self {
        Self {
            button1: keycode_to_string(bindings.button1),
            button2: keycode_to_string(bindings.button2),
            button3: keycode_to_string(bindings.button3),
            button4: keycode_to_string(bindings.button4),
            up: keycode_to_string(bindings.up),
            down: keycode_to_string(bindings.down),
            left: keycode_to_string(bindings.left),
            right: keycode_to_string(bindings.right),
            quit: keycode_to_string(bindings.quit),
            pause: keycode_to_string(bindings.pause),
            step_small: keycode_to_string(bindings.step_small),
            step_large: keycode_to_string(bindings.step_large),
            load_snapshot: keycode_to_string(bindings.load_snapshot),
            save_snapshot: keycode_to_string(bindings.save_snapshot),
            reload: keycode_to_string(bindings.reload),
            screenshot: keycode_to_string(bindings.screenshot),
        }
    }
}

/// Serializable gamepad button mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadMappingConfig {
    pub button1: String,
    pub button2: String,
    pub button3: String,
    pub button4: String,
}

impl Default for GamepadMappingConfig {
    fn default() -> Self {
        Self::from_gamepad_mapping(&GamepadMapping::default())
    }
}

impl GamepadMappingConfig {
    /// Convert to runtime GamepadMapping
    pub fn to_gamepad_mapping(&self) -> Result<GamepadMapping, String> {
        Ok(GamepadMapping {
            button1: string_to_gilrs_button(&self.button1)?,
            button2: string_to_gilrs_button(&self.button2)?,
            button3: string_to_gilrs_button(&self.button3)?,
            button4: string_to_gilrs_button(&self.button4)?,
        })
    }

    /// Create from runtime GamepadMapping
    pub fn from_gamepad_mapping(mapping: &GamepadMapping) -> Self {
        Self {
            button1: gilrs_button_to_string(mapping.button1),
            button2: gilrs_button_to_string(mapping.button2),
            button3: gilrs_button_to_string(mapping.button3),
            button4: gilrs_button_to_string(mapping.button4),
        }
    }
}

/// Convert KeyCode to string representation
fn keycode_to_string(key: KeyCode) -> String {
    format!("{:?}", key)
}

/// Convert string to KeyCode
fn string_to_keycode(s: &str) -> Result<KeyCode, String> {
    match s {
        "KeyA" => Ok(KeyCode::KeyA),
        "KeyB" => Ok(KeyCode::KeyB),
        "KeyC" => Ok(KeyCode::KeyC),
        "KeyD" => Ok(KeyCode::KeyD),
        "KeyE" => Ok(KeyCode::KeyE),
        "KeyF" => Ok(KeyCode::KeyF),
        "KeyG" => Ok(KeyCode::KeyG),
        "KeyH" => Ok(KeyCode::KeyH),
        "KeyI" => Ok(KeyCode::KeyI),
        "KeyJ" => Ok(KeyCode::KeyJ),
        "KeyK" => Ok(KeyCode::KeyK),
        "KeyL" => Ok(KeyCode::KeyL),
        "KeyM" => Ok(KeyCode::KeyM),
        "KeyN" => Ok(KeyCode::KeyN),
        "KeyO" => Ok(KeyCode::KeyO),
        "KeyP" => Ok(KeyCode::KeyP),
        "KeyQ" => Ok(KeyCode::KeyQ),
        "KeyR" => Ok(KeyCode::KeyR),
        "KeyS" => Ok(KeyCode::KeyS),
        "KeyT" => Ok(KeyCode::KeyT),
        "KeyU" => Ok(KeyCode::KeyU),
        "KeyV" => Ok(KeyCode::KeyV),
        "KeyW" => Ok(KeyCode::KeyW),
        "KeyX" => Ok(KeyCode::KeyX),
        "KeyY" => Ok(KeyCode::KeyY),
        "KeyZ" => Ok(KeyCode::KeyZ),
        "Digit0" => Ok(KeyCode::Digit0),
        "Digit1" => Ok(KeyCode::Digit1),
        "Digit2" => Ok(KeyCode::Digit2),
        "Digit3" => Ok(KeyCode::Digit3),
        "Digit4" => Ok(KeyCode::Digit4),
        "Digit5" => Ok(KeyCode::Digit5),
        "Digit6" => Ok(KeyCode::Digit6),
        "Digit7" => Ok(KeyCode::Digit7),
        "Digit8" => Ok(KeyCode::Digit8),
        "Digit9" => Ok(KeyCode::Digit9),
        "F1" => Ok(KeyCode::F1),
        "F2" => Ok(KeyCode::F2),
        "F3" => Ok(KeyCode::F3),
        "F4" => Ok(KeyCode::F4),
        "F5" => Ok(KeyCode::F5),
        "F6" => Ok(KeyCode::F6),
        "F7" => Ok(KeyCode::F7),
        "F8" => Ok(KeyCode::F8),
        "F9" => Ok(KeyCode::F9),
        "F10" => Ok(KeyCode::F10),
        "F11" => Ok(KeyCode::F11),
        "F12" => Ok(KeyCode::F12),
        "ArrowUp" => Ok(KeyCode::ArrowUp),
        "ArrowDown" => Ok(KeyCode::ArrowDown),
        "ArrowLeft" => Ok(KeyCode::ArrowLeft),
        "ArrowRight" => Ok(KeyCode::ArrowRight),
        "BracketLeft" => Ok(KeyCode::BracketLeft),
        "BracketRight" => Ok(KeyCode::BracketRight),
        "Minus" => Ok(KeyCode::Minus),
        "Equal" => Ok(KeyCode::Equal),
        "Comma" => Ok(KeyCode::Comma),
        "Period" => Ok(KeyCode::Period),
        "Semicolon" => Ok(KeyCode::Semicolon),
        "Slash" => Ok(KeyCode::Slash),
        "Tab" => Ok(KeyCode::Tab),
        "Enter" => Ok(KeyCode::Enter),
        "Space" => Ok(KeyCode::Space),
        "Escape" => Ok(KeyCode::Escape),
        "Backspace" => Ok(KeyCode::Backspace),
        "ShiftLeft" => Ok(KeyCode::ShiftLeft),
        "ShiftRight" => Ok(KeyCode::ShiftRight),
        "ControlLeft" => Ok(KeyCode::ControlLeft),
        "ControlRight" => Ok(KeyCode::ControlRight),
        "AltLeft" => Ok(KeyCode::AltLeft),
        "AltRight" => Ok(KeyCode::AltRight),
        _ => Err(format!("Unknown key code: {}", s)),
    }
}

/// Convert gilrs::Button to string representation
fn gilrs_button_to_string(button: gilrs::Button) -> String {
    format!("{:?}", button)
}

/// Convert string to gilrs::Button
fn string_to_gilrs_button(s: &str) -> Result<gilrs::Button, String> {
    use gilrs::Button;

    match s {
        "South" => Ok(Button::South),
        "East" => Ok(Button::East),
        "North" => Ok(Button::North),
        "West" => Ok(Button::West),
        "C" => Ok(Button::C),
        "Z" => Ok(Button::Z),
        "LeftTrigger" => Ok(Button::LeftTrigger),
        "LeftTrigger2" => Ok(Button::LeftTrigger2),
        "RightTrigger" => Ok(Button::RightTrigger),
        "RightTrigger2" => Ok(Button::RightTrigger2),
        "Select" => Ok(Button::Select),
        "Start" => Ok(Button::Start),
        "LeftThumb" => Ok(Button::LeftThumb),
        "RightThumb" => Ok(Button::RightThumb),
        _ => Err(format!("Unknown gamepad button: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings_config_defaults() {
        let config = KeyBindingsConfig::default();
        assert_eq!(config.button1, "KeyA");
        assert_eq!(config.step_small, "BracketLeft");
        assert_eq!(config.load_snapshot, "F1");
        assert_eq!(config.screenshot, "F9");
    }

    #[test]
    fn test_key_bindings_round_trip() {
        let config = KeyBindingsConfig::default();
        let bindings = config.to_bindings().unwrap();
        assert_eq!(bindings, KeyBindings::default());
        assert_eq!(KeyBindingsConfig::from_bindings(&bindings), config);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let config = KeyBindingsConfig {
            pause: "Pause Key".to_string(),
            ..KeyBindingsConfig::default()
        };
        let err = config.to_bindings().unwrap_err();
        assert!(err.contains("Pause Key"));
    }

    #[test]
    fn test_keycode_conversion() {
        assert_eq!(keycode_to_string(KeyCode::BracketRight), "BracketRight");
        assert_eq!(string_to_keycode("F2").unwrap(), KeyCode::F2);
        assert!(string_to_keycode("InvalidKey").is_err());
    }

    #[test]
    fn test_gamepad_mapping_round_trip() {
        let config = GamepadMappingConfig::default();
        assert_eq!(config.button1, "South");
        let mapping = config.to_gamepad_mapping().unwrap();
        assert_eq!(mapping.button1, gilrs::Button::South);
        assert_eq!(GamepadMappingConfig::from_gamepad_mapping(&mapping), config);
    }

    #[test]
    fn test_partial_keys_section_uses_defaults() {
        let config: KeyBindingsConfig = toml::from_str("button1 = \"KeyQ\"").unwrap();
        assert_eq!(config.button1, "KeyQ");
        assert_eq!(config.button2, "KeyS");
    }
}

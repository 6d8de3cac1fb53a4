// Keyboard bindings
//
// Maps physical keys to controller inputs and to frontend actions. The
// defaults use key positions, so on an AZERTY keyboard the buttons sit under
// Q S D F and the step keys under ^ and $.

use super::PadInput;
use winit::keyboard::KeyCode;

/// Frontend action bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the emulator
    Quit,
    /// Toggle between running and paused
    TogglePause,
    /// Run one cycle while paused
    StepSmall,
    /// Run ten cycles while paused
    StepLarge,
    /// Restore the machine snapshot
    LoadSnapshot,
    /// Write the machine snapshot
    SaveSnapshot,
    /// Reload the cartridge and reset
    Reload,
    /// Save the current display as PNG
    Screenshot,
}

impl Action {
    /// Run-control actions are honoured on key release from any window
    pub fn is_run_control(self) -> bool {
        matches!(
            self,
            Action::Quit | Action::TogglePause | Action::StepSmall | Action::StepLarge
        )
    }
}

/// Complete key binding table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub button1: KeyCode,
    pub button2: KeyCode,
    pub button3: KeyCode,
    pub button4: KeyCode,
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub quit: KeyCode,
    pub pause: KeyCode,
    pub step_small: KeyCode,
    pub step_large: KeyCode,
    pub load_snapshot: KeyCode,
    pub save_snapshot: KeyCode,
    pub reload: KeyCode,
    pub screenshot: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            button1: KeyCode::KeyA,
            button2: KeyCode::KeyS,
            button3: KeyCode::KeyD,
            button4: KeyCode::KeyF,
            up: KeyCode::ArrowUp,
            down: KeyCode::ArrowDown,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
            quit: KeyCode::Escape,
            pause: KeyCode::KeyP,
            step_small: KeyCode::BracketLeft,
            step_large: KeyCode::BracketRight,
            load_snapshot: KeyCode::F1,
            save_snapshot: KeyCode::F2,
            reload: KeyCode::KeyR,
            screenshot: KeyCode::F9,
        }
    }
}

impl KeyBindings {
    /// Controller input bound to `key`, if any
    pub fn pad_input(&self, key: KeyCode) -> Option<PadInput> {
        if key == self.button1 {
            Some(PadInput::Button1)
        } else if key == self.button2 {
            Some(PadInput::Button2)
        } else if key == self.button3 {
            Some(PadInput::Button3)
        } else if key == self.button4 {
            Some(PadInput::Button4)
        } else if key == self.up {
            Some(PadInput::Up)
        } else if key == self.down {
            Some(PadInput::Down)
        } else if key == self.left {
            Some(PadInput::Left)
        } else if key == self.right {
            Some(PadInput::Right)
        } else {
            None
        }
    }

    /// Frontend action bound to `key`, if any
    pub fn action(&self, key: KeyCode) -> Option<Action> {
        if key == self.quit {
            Some(Action::Quit)
        } else if key == self.pause {
            Some(Action::TogglePause)
        } else if key == self.step_small {
            Some(Action::StepSmall)
        } else if key == self.step_large {
            Some(Action::StepLarge)
        } else if key == self.load_snapshot {
            Some(Action::LoadSnapshot)
        } else if key == self.save_snapshot {
            Some(Action::SaveSnapshot)
        } else if key == self.reload {
            Some(Action::Reload)
        } else if key == self.screenshot {
            Some(Action::Screenshot)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pad_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.pad_input(KeyCode::KeyA), Some(PadInput::Button1));
        assert_eq!(bindings.pad_input(KeyCode::KeyF), Some(PadInput::Button4));
        assert_eq!(bindings.pad_input(KeyCode::ArrowUp), Some(PadInput::Up));
        assert_eq!(bindings.pad_input(KeyCode::ArrowRight), Some(PadInput::Right));
        assert_eq!(bindings.pad_input(KeyCode::KeyZ), None);
    }

    #[test]
    fn test_default_actions() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.action(KeyCode::Escape), Some(Action::Quit));
        assert_eq!(bindings.action(KeyCode::KeyP), Some(Action::TogglePause));
        assert_eq!(bindings.action(KeyCode::BracketLeft), Some(Action::StepSmall));
        assert_eq!(bindings.action(KeyCode::BracketRight), Some(Action::StepLarge));
        assert_eq!(bindings.action(KeyCode::F1), Some(Action::LoadSnapshot));
        assert_eq!(bindings.action(KeyCode::F2), Some(Action::SaveSnapshot));
        assert_eq!(bindings.action(KeyCode::KeyR), Some(Action::Reload));
        assert_eq!(bindings.action(KeyCode::F9), Some(Action::Screenshot));
        assert_eq!(bindings.action(KeyCode::KeyA), None);
    }

    #[test]
    fn test_run_control_actions() {
        assert!(Action::Quit.is_run_control());
        assert!(Action::StepLarge.is_run_control());
        assert!(!Action::Reload.is_run_control());
        assert!(!Action::SaveSnapshot.is_run_control());
    }
}

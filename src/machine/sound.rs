// Sound chip contract
//
// Audio generation and mixing belong to the sound chip emulation. The
// frontend only brings it up, mutes it on request and shuts it down.

use log::info;

/// Lifecycle surface of the sound chip
pub trait SoundChip {
    /// Open the audio device and start playback
    fn init(&mut self);

    /// Mute or unmute output
    fn set_muted(&mut self, muted: bool);

    /// Stop playback and release the audio device
    fn shutdown(&mut self);
}

/// Sound chip stand-in that produces no audio
///
/// Tracks the lifecycle so that the rest of the frontend behaves the same
/// with or without an audio backend.
#[derive(Debug, Default)]
pub struct SilentSoundChip {
    running: bool,
    muted: bool,
}

impl SilentSoundChip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl SoundChip for SilentSoundChip {
    fn init(&mut self) {
        self.running = true;
        info!("Sound: no audio backend, running silent");
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn shutdown(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_sound_chip_lifecycle() {
        let mut chip = SilentSoundChip::new();
        assert!(!chip.is_running());

        chip.init();
        chip.set_muted(true);
        assert!(chip.is_running());
        assert!(chip.is_muted());

        chip.shutdown();
        assert!(!chip.is_running());
    }
}

// Vectrex frontend library
// Display emulation, pacing and input routing around a vector console core

// Public modules
pub mod debug;
pub mod display;
pub mod emulator;
pub mod input;
pub mod machine;
pub mod rom;

// Re-export main types for convenience
pub use debug::{DebugInspector, DebugWindow};
pub use display::{
    load_overlay, rasterize, RenderConfig, ScaleState, Surface, VectorDisplay, WindowSettings,
    WinitHost,
};
pub use emulator::{
    Clock, Emulator, FrontendConfig, Host, HostError, RunMode, Scheduler, SystemClock,
};
pub use input::{ControllerState, HostEvent, KeyBindings, PadInput, Router};
pub use machine::{DemoMachine, Machine, MemoryRegion, SoundChip, Vector};
pub use rom::{load_bios, load_cartridge, RomError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_components() {
        // Test that the frontend pieces can be assembled without a window
        let machine = DemoMachine::new(&[0; machine::BIOS_SIZE], &[]);
        let display = VectorDisplay::new(495, 615);
        let emu = Emulator::new(machine, display, RenderConfig::default());
        let _router = Router::new(KeyBindings::default());
        let _controller = ControllerState::new();
        let _inspector = DebugInspector::new();

        assert_eq!(emu.display().scale(), ScaleState::compute(495, 615));
    }
}

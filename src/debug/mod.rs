// Debug module - Optional inspector for the running machine
//
// This module provides:
// - Pause and render controls (sharp, remanence, emulation speed)
// - Register view with unsigned/signed tooltips
// - Hex + ASCII dumps of RAM, BIOS ROM and cartridge
// - A separate window hosting the inspector
//
// The inspector never writes machine state; it only changes the run mode
// and the render settings.

pub mod ui;
pub mod window;

pub use ui::{format_hex_row, register_tooltip, DebugInspector, BYTES_PER_ROW};
pub use window::DebugWindow;

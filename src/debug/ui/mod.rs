// Debug UI - egui inspector panels
//
// This module provides the inspector shown in the debug window: render and
// speed controls, the CPU register file and hex dumps of the three memory
// regions. Only the run mode and render settings are ever written.

mod controls_panel;
mod memory_panel;
mod registers_panel;

pub use memory_panel::{format_hex_row, BYTES_PER_ROW};
pub use registers_panel::register_tooltip;

use crate::emulator::Emulator;
use crate::machine::{Machine, MemoryRegion};

/// Debug inspector state
///
/// Holds only view state; everything shown is read from the emulator each
/// frame.
///
/// # Example
///
/// ```no_run
/// use vecx_rs::debug::DebugInspector;
///
/// let mut inspector = DebugInspector::new();
///
/// // In your egui frame:
/// // inspector.show(ctx, &mut emulator);
/// ```
pub struct DebugInspector {
    /// Whether the inspector is drawn
    visible: bool,

    /// Memory region shown in the dump
    pub(super) region: MemoryRegion,
}

impl DebugInspector {
    /// Create a new inspector showing RAM
    pub fn new() -> Self {
        Self {
            visible: true,
            region: MemoryRegion::Ram,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Memory region currently selected
    pub fn region(&self) -> MemoryRegion {
        self.region
    }

    pub fn select_region(&mut self, region: MemoryRegion) {
        self.region = region;
    }

    /// Render the inspector
    ///
    /// # Arguments
    ///
    /// * `ctx` - egui context
    /// * `emu` - Emulator context; only run mode and render settings are changed
    pub fn show<M: Machine>(&mut self, ctx: &egui::Context, emu: &mut Emulator<M>) {
        if !self.visible {
            return;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            controls_panel::show(ui, emu);
            ui.separator();
            registers_panel::show(ui, &emu.machine().registers());
            ui.separator();
            memory_panel::show(ui, self, emu.machine());
        });
    }
}

impl Default for DebugInspector {
    fn default() -> Self {
        Self::new()
    }
}

// Emulator module - Frontend context and main loop
//
// This module provides the context the scheduler owns: the machine, the run
// mode, the controller state pushed to the machine, render settings and the
// persistent display. Everything the router or the debug inspector changes
// goes through the methods here.

mod config;
mod host;
mod scheduler;
mod screenshot;

pub use config::{ConfigError, FrontendConfig, PathsConfig, VideoConfig, CONFIG_FILE};
pub use host::{Host, HostError};
pub use scheduler::{
    cycle_budget, Clock, Pacer, RunMode, Scheduler, SystemClock, TickOutcome, CYCLES_PER_TICK,
    LARGE_STEP, SMALL_STEP, TICK,
};
pub use screenshot::{save_screenshot, ScreenshotError};

use crate::display::{RenderConfig, Surface, VectorDisplay};
use crate::input::{ControllerState, PadInput};
use crate::machine::Machine;
use crate::rom;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Default snapshot file
pub const DEFAULT_SNAPSHOT_FILE: &str = "q.save";

/// Frontend context
///
/// Owns all mutable frontend state. There is exactly one per process and it
/// is only ever touched from the scheduler's thread.
pub struct Emulator<M: Machine> {
    machine: M,
    run_mode: RunMode,
    controller: ControllerState,
    render: RenderConfig,
    display: VectorDisplay,
    cartridge_path: Option<PathBuf>,
    snapshot_path: PathBuf,
    screenshot_dir: PathBuf,
}

impl<M: Machine> Emulator<M> {
    /// Create a context around a machine and a display
    ///
    /// The machine is expected to have been reset already.
    pub fn new(machine: M, display: VectorDisplay, render: RenderConfig) -> Self {
        Self {
            machine,
            run_mode: RunMode::Running,
            controller: ControllerState::new(),
            render,
            display,
            cartridge_path: None,
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            screenshot_dir: PathBuf::from("screenshots"),
        }
    }

    /// Remember where the current cartridge was loaded from
    pub fn with_cartridge_path(mut self, path: Option<PathBuf>) -> Self {
        self.cartridge_path = path;
        self
    }

    /// Set the snapshot file used by the load/save keys
    pub fn with_snapshot_path(mut self, path: PathBuf) -> Self {
        self.snapshot_path = path;
        self
    }

    /// Set the base directory for screenshots
    pub fn with_screenshot_dir(mut self, dir: PathBuf) -> Self {
        self.screenshot_dir = dir;
        self
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut M {
        &mut self.machine
    }

    pub fn run_mode(&self) -> RunMode {
        self.run_mode
    }

    pub fn set_run_mode(&mut self, mode: RunMode) {
        self.run_mode = mode;
    }

    pub fn is_paused(&self) -> bool {
        self.run_mode.is_paused()
    }

    /// Toggle between running and paused
    ///
    /// A pending step counts as paused.
    pub fn toggle_pause(&mut self) {
        self.run_mode = if self.run_mode.is_paused() {
            RunMode::Running
        } else {
            RunMode::Paused
        };
        info!("Emulation {}", if self.is_paused() { "paused" } else { "resumed" });
    }

    /// Queue a single step of `cycles` cycles
    ///
    /// Ignored unless paused.
    pub fn request_step(&mut self, cycles: u32) {
        if self.run_mode == RunMode::Paused {
            self.run_mode = RunMode::SteppingBy(cycles);
        }
    }

    pub fn controller(&self) -> &ControllerState {
        &self.controller
    }

    /// Update the controller and push the changed line to the machine
    pub fn apply_pad(&mut self, input: PadInput, active: bool) {
        let (control, value) = self.controller.apply(input, active);
        self.machine.set_input(control, value);
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    pub fn render_config_mut(&mut self) -> &mut RenderConfig {
        &mut self.render
    }

    pub fn display(&self) -> &VectorDisplay {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut VectorDisplay {
        &mut self.display
    }

    pub fn cartridge_path(&self) -> Option<&Path> {
        self.cartridge_path.as_deref()
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Run `cycles` machine cycles
    pub fn run_cycles(&mut self, cycles: u64) {
        if cycles > 0 {
            self.machine.run_cycles(cycles);
        }
    }

    /// Draw the machine's latest vectors and composite a frame
    pub fn render_frame(&mut self) -> &Surface {
        self.display.render(self.machine.vectors(), &self.render)
    }

    /// Adapt the display to a new window size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.display.resize(width, height);
    }

    /// Restore the machine from the snapshot file
    ///
    /// Failures are logged and leave the machine untouched.
    pub fn load_snapshot(&mut self) {
        match self.machine.load_snapshot(&self.snapshot_path) {
            Ok(()) => info!("Snapshot loaded from '{}'", self.snapshot_path.display()),
            Err(e) => warn!(
                "Failed to load snapshot '{}': {}",
                self.snapshot_path.display(),
                e
            ),
        }
    }

    /// Write the machine to the snapshot file
    ///
    /// Failures are logged.
    pub fn save_snapshot(&self) {
        match self.machine.save_snapshot(&self.snapshot_path) {
            Ok(()) => info!("Snapshot saved to '{}'", self.snapshot_path.display()),
            Err(e) => warn!(
                "Failed to save snapshot '{}': {}",
                self.snapshot_path.display(),
                e
            ),
        }
    }

    /// Reload the current cartridge from disk and reset
    pub fn reload_cartridge(&mut self) {
        let image = rom::load_cartridge_or_blank(self.cartridge_path.as_deref());
        self.machine.insert_cartridge(&image);
        self.machine.reset();
        info!("Machine reset");
    }

    /// Switch to another cartridge file and reset
    pub fn insert_cartridge_from(&mut self, path: &Path) {
        self.cartridge_path = Some(path.to_path_buf());
        self.reload_cartridge();
    }

    /// Save the last composited frame as PNG
    ///
    /// Failures are logged.
    pub fn take_screenshot(&self) {
        match save_screenshot(
            self.display.frame(),
            &self.screenshot_dir,
            self.cartridge_path.as_deref(),
        ) {
            Ok(path) => info!("Screenshot saved to '{}'", path.display()),
            Err(e) => warn!("Failed to save screenshot: {}", e),
        }
    }
}

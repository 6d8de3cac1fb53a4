// Host backend contract
//
// The windowing and graphics backend as seen by the scheduler. Keeping it
// behind a trait lets the main loop run against a scripted host in tests.

use super::Emulator;
use crate::display::Surface;
use crate::input::{HostEvent, PadInput};
use crate::machine::Machine;

/// Errors reported by a host backend
#[derive(Debug)]
pub enum HostError {
    /// Event loop could not be created or pumped
    EventLoop(winit::error::EventLoopError),

    /// Window creation failed
    Window(winit::error::OsError),

    /// Pixel buffer creation, resize or present failed
    Pixels(pixels::Error),

    /// GPU setup or frame acquisition failed
    Gpu(String),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            HostError::Window(e) => write!(f, "Window error: {}", e),
            HostError::Pixels(e) => write!(f, "Pixels error: {}", e),
            HostError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for HostError {}

impl From<winit::error::EventLoopError> for HostError {
    fn from(e: winit::error::EventLoopError) -> Self {
        HostError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for HostError {
    fn from(e: winit::error::OsError) -> Self {
        HostError::Window(e)
    }
}

impl From<pixels::Error> for HostError {
    fn from(e: pixels::Error) -> Self {
        HostError::Pixels(e)
    }
}

/// Windowing and graphics backend
pub trait Host {
    /// Backend event type handed to the debug UI unchanged
    type RawEvent;

    /// Current size of the display window in physical pixels
    fn window_size(&self) -> (u32, u32);

    /// Drain all pending events, in arrival order
    fn poll_events(&mut self) -> Vec<HostEvent<Self::RawEvent>>;

    /// Drain pending gamepad transitions
    fn poll_pad(&mut self) -> Vec<(PadInput, bool)> {
        Vec::new()
    }

    /// Show a composited frame on the display window
    fn present(&mut self, frame: &Surface) -> Result<(), HostError>;

    /// Hand a debug window event to the debug UI
    fn forward_debug_event(&mut self, event: Self::RawEvent);

    /// Draw the debug inspector, if there is one
    fn show_debug<M: Machine>(&mut self, emu: &mut Emulator<M>) -> Result<(), HostError>;
}

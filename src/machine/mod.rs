// Machine module - Contract between the frontend and the emulation core
//
// The CPU, timer, sound chip and vector generator are emulated elsewhere.
// The frontend only ever talks to them through the `Machine` and `SoundChip`
// traits defined here:
// - run N cycles, reset, inject controller input
// - load/save a full machine snapshot
// - read the current vector list and a CPU register snapshot
// - read the three inspectable memory regions

pub mod demo;
mod snapshot;
mod sound;

pub use demo::DemoMachine;
pub use snapshot::SnapshotError;
pub use sound::{SilentSoundChip, SoundChip};

use std::path::Path;

/// Width of the analog drawing plane the vector generator reports in
pub const ANALOG_MAX_X: u32 = 33000;

/// Height of the analog drawing plane the vector generator reports in
pub const ANALOG_MAX_Y: u32 = 41000;

/// Number of distinct beam intensities (0..INTENSITY_LEVELS)
pub const INTENSITY_LEVELS: u32 = 128;

/// CPU clock in Hz (1.5 MHz)
pub const CPU_CLOCK_HZ: u32 = 1_500_000;

/// Emulated cycles per millisecond of wall-clock time
pub const CYCLES_PER_MILLISECOND: u32 = CPU_CLOCK_HZ / 1000;

/// Size of the console's working RAM in bytes
pub const RAM_SIZE: usize = 1024;

/// Size of the BIOS image in bytes
pub const BIOS_SIZE: usize = 8192;

/// Size of the cartridge address window in bytes
pub const CARTRIDGE_SIZE: usize = 32768;

/// Axis value sent for a stick pushed to its minimum
pub const AXIS_MIN: u8 = 0x00;

/// Axis value sent for a centered stick
pub const AXIS_CENTER: u8 = 0x80;

/// Axis value sent for a stick pushed to its maximum
pub const AXIS_MAX: u8 = 0xFF;

/// One beam stroke emitted by the vector generator during a frame
///
/// Endpoints are in analog coordinates (0..ANALOG_MAX_X, 0..ANALOG_MAX_Y).
/// A vector with identical endpoints is a dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Vector {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
    /// Beam intensity (0..INTENSITY_LEVELS)
    pub intensity: u8,
}

impl Vector {
    /// Create a line from (x0, y0) to (x1, y1)
    pub fn line(x0: i32, y0: i32, x1: i32, y1: i32, intensity: u8) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            intensity,
        }
    }

    /// Create a dot at (x, y)
    pub fn dot(x: i32, y: i32, intensity: u8) -> Self {
        Self::line(x, y, x, y, intensity)
    }

    /// Check whether both endpoints are the same analog point
    pub fn is_dot(&self) -> bool {
        self.x0 == self.x1 && self.y0 == self.y1
    }
}

/// Input lines of the first controller port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Button1,
    Button2,
    Button3,
    Button4,
    /// Horizontal axis (AXIS_MIN = left, AXIS_MAX = right)
    AxisX,
    /// Vertical axis (AXIS_MIN = down, AXIS_MAX = up)
    AxisY,
}

/// Snapshot of the 6809 register file, for inspection only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuRegisters {
    /// Index register X
    pub x: u16,
    /// Index register Y
    pub y: u16,
    /// User stack pointer
    pub u: u16,
    /// Hardware stack pointer
    pub s: u16,
    /// Program counter
    pub pc: u16,
    /// Accumulator A
    pub a: u8,
    /// Accumulator B
    pub b: u8,
    /// Direct page register
    pub dp: u8,
    /// Condition codes
    pub cc: u8,
    /// Interrupt wait state (SYNC / CWAI)
    pub irq_status: u8,
    /// Registers selected by indexed-mode postbyte values 0..=3 (X, Y, U, S)
    pub indexed: [u16; 4],
}

/// Memory regions exposed for inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryRegion {
    /// Working RAM
    Ram,
    /// BIOS image
    Bios,
    /// Cartridge image
    Cartridge,
}

impl MemoryRegion {
    /// All regions, in the order they are presented
    pub const ALL: [MemoryRegion; 3] = [
        MemoryRegion::Ram,
        MemoryRegion::Bios,
        MemoryRegion::Cartridge,
    ];

    /// Short display name
    pub fn name(self) -> &'static str {
        match self {
            MemoryRegion::Ram => "RAM",
            MemoryRegion::Bios => "ROM",
            MemoryRegion::Cartridge => "Cart",
        }
    }

    /// Size of the region in bytes
    pub fn size(self) -> usize {
        match self {
            MemoryRegion::Ram => RAM_SIZE,
            MemoryRegion::Bios => BIOS_SIZE,
            MemoryRegion::Cartridge => CARTRIDGE_SIZE,
        }
    }
}

/// The emulation core as seen by the frontend
///
/// Implementations are expected to be infallible once constructed with a
/// valid BIOS; only snapshot I/O can fail, and callers treat those failures
/// as log-only.
pub trait Machine {
    /// Reset the console, as if the reset button was pressed
    fn reset(&mut self);

    /// Run the given number of CPU cycles
    ///
    /// The vector list returned by `vectors` reflects the last frame the
    /// vector generator completed during (or before) this call.
    fn run_cycles(&mut self, cycles: u64);

    /// Drive one controller input line
    fn set_input(&mut self, control: Control, value: u8);

    /// Replace the cartridge image (does not reset)
    fn insert_cartridge(&mut self, image: &[u8]);

    /// Restore the full machine state from a snapshot file
    fn load_snapshot(&mut self, path: &Path) -> Result<(), SnapshotError>;

    /// Write the full machine state to a snapshot file
    fn save_snapshot(&self, path: &Path) -> Result<(), SnapshotError>;

    /// Vectors of the most recently completed frame
    fn vectors(&self) -> &[Vector];

    /// Current CPU registers
    fn registers(&self) -> CpuRegisters;

    /// Raw contents of one memory region
    fn memory(&self, region: MemoryRegion) -> &[u8];
}

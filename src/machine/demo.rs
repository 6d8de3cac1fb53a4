// Demo machine - Built-in test pattern generator
//
// Stands in for the CPU/vector generator emulation so the frontend can be run
// end to end. It owns real BIOS/cartridge/RAM buffers and honours the full
// `Machine` contract, but instead of executing code it emits an animated
// vector test pattern once per emulated frame:
// - a frame border around the analog plane
// - two counter-rotating squares
// - a cursor dot driven by the controller axes
// - one indicator box per controller button

use super::snapshot::{MachineSnapshot, SNAPSHOT_VERSION};
use super::{
    Control, CpuRegisters, Machine, MemoryRegion, SnapshotError, Vector, ANALOG_MAX_X,
    ANALOG_MAX_Y, AXIS_CENTER, BIOS_SIZE, CARTRIDGE_SIZE, CYCLES_PER_MILLISECOND, RAM_SIZE,
};
use std::f32::consts::TAU;
use std::path::Path;

/// Cycles per emulated video frame (20 ms at 1.5 MHz)
pub const CYCLES_PER_FRAME: u64 = CYCLES_PER_MILLISECOND as u64 * 20;

/// Frames per full turn of the rotating squares
const ROTATION_PERIOD: u64 = 150;

const CENTER_X: i32 = (ANALOG_MAX_X / 2) as i32;
const CENTER_Y: i32 = (ANALOG_MAX_Y / 2) as i32;
const BORDER_MARGIN: i32 = 1000;
const CURSOR_TRAVEL: i32 = 100;

const DIM: u8 = 32;
const MEDIUM: u8 = 80;
const BRIGHT: u8 = 127;

/// Test pattern machine
pub struct DemoMachine {
    bios: Vec<u8>,
    cartridge: Vec<u8>,
    ram: Vec<u8>,
    cycles: u64,
    frame: u64,
    /// Input lines indexed like `input_index`
    inputs: [u8; 6],
    vectors: Vec<Vector>,
}

impl DemoMachine {
    /// Create a machine from BIOS and cartridge images
    ///
    /// Both images are zero-padded or truncated to their address window.
    pub fn new(bios: &[u8], cartridge: &[u8]) -> Self {
        let mut machine = Self {
            bios: fit_to(bios, BIOS_SIZE),
            cartridge: fit_to(cartridge, CARTRIDGE_SIZE),
            ram: vec![0; RAM_SIZE],
            cycles: 0,
            frame: 0,
            inputs: [0, 0, 0, 0, AXIS_CENTER, AXIS_CENTER],
            vectors: Vec::new(),
        };
        machine.reset();
        machine
    }

    /// Total cycles executed since the last reset
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Completed frames since the last reset
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Current value of one input line
    pub fn input(&self, control: Control) -> u8 {
        self.inputs[input_index(control)]
    }

    /// Reset vector stored big-endian in the last two BIOS bytes
    fn reset_vector(&self) -> u16 {
        u16::from_be_bytes([self.bios[BIOS_SIZE - 2], self.bios[BIOS_SIZE - 1]])
    }

    /// Regenerate the vector list for the current frame
    fn build_frame(&mut self) {
        self.vectors.clear();

        // Border
        let (left, top) = (BORDER_MARGIN, BORDER_MARGIN);
        let right = ANALOG_MAX_X as i32 - BORDER_MARGIN;
        let bottom = ANALOG_MAX_Y as i32 - BORDER_MARGIN;
        self.push_polygon(&[(left, top), (right, top), (right, bottom), (left, bottom)], DIM);

        // Counter-rotating squares
        let angle = (self.frame % ROTATION_PERIOD) as f32 / ROTATION_PERIOD as f32 * TAU;
        let outer = square_corners(CENTER_X, CENTER_Y, 9000.0, angle);
        let inner = square_corners(CENTER_X, CENTER_Y, 4500.0, -angle * 2.0);
        self.push_polygon(&outer, BRIGHT);
        self.push_polygon(&inner, MEDIUM);

        // Cursor (Y axis grows upwards, rows grow downwards)
        let dx = self.input(Control::AxisX) as i32 - AXIS_CENTER as i32;
        let dy = self.input(Control::AxisY) as i32 - AXIS_CENTER as i32;
        self.vectors.push(Vector::dot(
            CENTER_X + dx * CURSOR_TRAVEL,
            CENTER_Y - dy * CURSOR_TRAVEL,
            BRIGHT,
        ));

        // Button indicators
        let buttons = [
            Control::Button1,
            Control::Button2,
            Control::Button3,
            Control::Button4,
        ];
        for (i, button) in buttons.iter().enumerate() {
            let x = CENTER_X - 6000 + i as i32 * 4000;
            let y = ANALOG_MAX_Y as i32 - 4000;
            let pressed = self.input(*button) != 0;
            let intensity = if pressed { BRIGHT } else { DIM };
            self.push_polygon(&[(x, y), (x + 2000, y), (x + 2000, y + 2000), (x, y + 2000)], intensity);
            if pressed {
                self.vectors.push(Vector::line(x, y, x + 2000, y + 2000, intensity));
            }
        }
    }

    /// Push a closed outline through the given points
    fn push_polygon(&mut self, points: &[(i32, i32)], intensity: u8) {
        for (i, &(x0, y0)) in points.iter().enumerate() {
            let (x1, y1) = points[(i + 1) % points.len()];
            self.vectors.push(Vector::line(x0, y0, x1, y1, intensity));
        }
    }
}

impl Machine for DemoMachine {
    fn reset(&mut self) {
        self.cycles = 0;
        self.frame = 0;
        self.ram.fill(0);
        self.build_frame();
    }

    fn run_cycles(&mut self, cycles: u64) {
        let before = self.cycles / CYCLES_PER_FRAME;
        self.cycles += cycles;
        let after = self.cycles / CYCLES_PER_FRAME;

        if after != before {
            self.frame = after;
            // Frame counter lives at the bottom of RAM, like a BIOS would keep it
            self.ram[..8].copy_from_slice(&self.frame.to_le_bytes());
            self.build_frame();
        }
    }

    fn set_input(&mut self, control: Control, value: u8) {
        self.inputs[input_index(control)] = value;
    }

    fn insert_cartridge(&mut self, image: &[u8]) {
        self.cartridge = fit_to(image, CARTRIDGE_SIZE);
    }

    fn load_snapshot(&mut self, path: &Path) -> Result<(), SnapshotError> {
        let snapshot = MachineSnapshot::load_from_file(path)?;

        if snapshot.ram.len() != RAM_SIZE {
            return Err(SnapshotError::Invalid(format!(
                "expected {} bytes of RAM, found {}",
                RAM_SIZE,
                snapshot.ram.len()
            )));
        }

        self.cycles = snapshot.cycles;
        self.frame = snapshot.frame;
        self.inputs = snapshot.inputs;
        self.ram.copy_from_slice(&snapshot.ram);
        self.build_frame();
        Ok(())
    }

    fn save_snapshot(&self, path: &Path) -> Result<(), SnapshotError> {
        let snapshot = MachineSnapshot {
            version: SNAPSHOT_VERSION,
            timestamp: chrono::Local::now().to_rfc3339(),
            cycles: self.cycles,
            frame: self.frame,
            inputs: self.inputs,
            ram: self.ram.clone(),
        };
        snapshot.save_to_file(path)
    }

    fn vectors(&self) -> &[Vector] {
        &self.vectors
    }

    /// Registers are synthesized from the pattern state; there is no CPU
    fn registers(&self) -> CpuRegisters {
        let buttons = self.inputs[..4]
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &v)| acc | (((v != 0) as u8) << i));

        let x = self.frame as u16;
        let y = (self.cycles % CYCLES_PER_FRAME) as u16;
        let (u, s) = (0xC880, 0xCBEA);

        CpuRegisters {
            x,
            y,
            u,
            s,
            pc: self.reset_vector().wrapping_add((self.cycles % 0x40) as u16),
            a: buttons,
            b: self.input(Control::AxisX),
            dp: 0xD0,
            cc: 0x50,
            irq_status: 0,
            indexed: [x, y, u, s],
        }
    }

    fn memory(&self, region: MemoryRegion) -> &[u8] {
        match region {
            MemoryRegion::Ram => &self.ram,
            MemoryRegion::Bios => &self.bios,
            MemoryRegion::Cartridge => &self.cartridge,
        }
    }
}

fn input_index(control: Control) -> usize {
    match control {
        Control::Button1 => 0,
        Control::Button2 => 1,
        Control::Button3 => 2,
        Control::Button4 => 3,
        Control::AxisX => 4,
        Control::AxisY => 5,
    }
}

/// Copy `data` into a zeroed buffer of exactly `size` bytes
fn fit_to(data: &[u8], size: usize) -> Vec<u8> {
    let mut buffer = vec![0; size];
    let len = data.len().min(size);
    buffer[..len].copy_from_slice(&data[..len]);
    buffer
}

fn square_corners(cx: i32, cy: i32, radius: f32, angle: f32) -> [(i32, i32); 4] {
    let mut corners = [(0, 0); 4];
    for (i, corner) in corners.iter_mut().enumerate() {
        let a = angle + i as f32 * TAU / 4.0;
        *corner = (
            cx + (radius * a.cos()) as i32,
            cy + (radius * a.sin()) as i32,
        );
    }
    corners
}

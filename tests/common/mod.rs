// Common test utilities for frontend integration tests
//
// This module provides a scripted host, a manual clock and a machine that
// records everything the frontend asks of it, so the scheduler can be run
// tick by tick without a window.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::path::Path;
use std::time::{Duration, Instant};
use vecx_rs::display::{RenderConfig, Surface, VectorDisplay};
use vecx_rs::emulator::{Clock, Emulator, Host, HostError};
use vecx_rs::input::{EventKind, HostEvent, PadInput, SurfaceId};
use vecx_rs::machine::{
    Control, CpuRegisters, Machine, MemoryRegion, SnapshotError, Vector, BIOS_SIZE,
    CARTRIDGE_SIZE, RAM_SIZE,
};

/// Small window: factor 500, logical 66x82
pub const TEST_WINDOW: (u32, u32) = (66, 82);

/// Machine that records calls instead of emulating anything
#[derive(Debug)]
pub struct RecordingMachine {
    pub runs: Vec<u64>,
    pub inputs: Vec<(Control, u8)>,
    pub resets: usize,
    pub vectors: Vec<Vector>,
    ram: Vec<u8>,
    bios: Vec<u8>,
    cartridge: Vec<u8>,
}

impl RecordingMachine {
    pub fn new() -> Self {
        Self {
            runs: Vec::new(),
            inputs: Vec::new(),
            resets: 0,
            vectors: vec![Vector::dot(16500, 20500, 127)],
            ram: vec![0; RAM_SIZE],
            bios: vec![0; BIOS_SIZE],
            cartridge: vec![0; CARTRIDGE_SIZE],
        }
    }

    pub fn total_cycles(&self) -> u64 {
        self.runs.iter().sum()
    }

    /// Last value driven onto a control line
    pub fn last_input(&self, control: Control) -> Option<u8> {
        self.inputs
            .iter()
            .rev()
            .find(|(c, _)| *c == control)
            .map(|(_, v)| *v)
    }
}

impl Machine for RecordingMachine {
    fn reset(&mut self) {
        self.resets += 1;
    }

    fn run_cycles(&mut self, cycles: u64) {
        self.runs.push(cycles);
    }

    fn set_input(&mut self, control: Control, value: u8) {
        self.inputs.push((control, value));
    }

    fn insert_cartridge(&mut self, image: &[u8]) {
        self.cartridge = image.to_vec();
    }

    fn load_snapshot(&mut self, _path: &Path) -> Result<(), SnapshotError> {
        Ok(())
    }

    fn save_snapshot(&self, _path: &Path) -> Result<(), SnapshotError> {
        Ok(())
    }

    fn vectors(&self) -> &[Vector] {
        &self.vectors
    }

    fn registers(&self) -> CpuRegisters {
        CpuRegisters::default()
    }

    fn memory(&self, region: MemoryRegion) -> &[u8] {
        match region {
            MemoryRegion::Ram => &self.ram,
            MemoryRegion::Bios => &self.bios,
            MemoryRegion::Cartridge => &self.cartridge,
        }
    }
}

/// Host that replays one batch of events per tick
#[derive(Debug, Default)]
pub struct ScriptedHost {
    pub events: VecDeque<Vec<HostEvent<u32>>>,
    pub pads: VecDeque<Vec<(PadInput, bool)>>,
    pub presented: Vec<(u32, u32)>,
    pub forwarded: Vec<u32>,
    pub debug_frames: usize,
    pub fail_present: bool,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the events delivered on the next unscripted tick
    pub fn then(mut self, batch: Vec<HostEvent<u32>>) -> Self {
        self.events.push_back(batch);
        self
    }

    /// Queue a tick with no events
    pub fn idle(self) -> Self {
        self.then(Vec::new())
    }
}

impl Host for ScriptedHost {
    type RawEvent = u32;

    fn window_size(&self) -> (u32, u32) {
        TEST_WINDOW
    }

    fn poll_events(&mut self) -> Vec<HostEvent<u32>> {
        self.events.pop_front().unwrap_or_default()
    }

    fn poll_pad(&mut self) -> Vec<(PadInput, bool)> {
        self.pads.pop_front().unwrap_or_default()
    }

    fn present(&mut self, frame: &Surface) -> Result<(), HostError> {
        self.presented.push((frame.width(), frame.height()));
        if self.fail_present {
            return Err(HostError::Gpu(String::from("scripted failure")));
        }
        Ok(())
    }

    fn forward_debug_event(&mut self, event: u32) {
        self.forwarded.push(event);
    }

    fn show_debug<M: Machine>(&mut self, _emu: &mut Emulator<M>) -> Result<(), HostError> {
        self.debug_frames += 1;
        Ok(())
    }
}

/// Clock that advances by a fixed amount of "work" every time it is read
/// and by the requested duration every time it sleeps
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
    work: Duration,
    pub sleeps: Vec<Duration>,
}

impl ManualClock {
    pub fn new(work: Duration) -> Self {
        Self {
            now: Cell::new(Instant::now()),
            work,
            sleeps: Vec::new(),
        }
    }

    /// Jump the clock forward once, as if the process had been stalled
    pub fn stall(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let now = self.now.get() + self.work;
        self.now.set(now);
        now
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
        self.now.set(self.now.get() + duration);
    }
}

pub fn emulator() -> Emulator<RecordingMachine> {
    Emulator::new(
        RecordingMachine::new(),
        VectorDisplay::new(TEST_WINDOW.0, TEST_WINDOW.1),
        RenderConfig::default(),
    )
}

pub fn display(kind: EventKind) -> HostEvent<u32> {
    HostEvent::new(SurfaceId::Display, kind)
}

pub fn debug(kind: EventKind, raw: u32) -> HostEvent<u32> {
    HostEvent::with_raw(SurfaceId::Debug, kind, raw)
}

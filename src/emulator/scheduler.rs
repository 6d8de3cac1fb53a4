// Real-time scheduler
//
// One tick every 20 ms of wall-clock time:
// 1. run the cycle budget for the current run mode
// 2. render the machine's vectors and present the frame
// 3. poll and route every pending host event (quit ends the loop here)
// 4. apply gamepad transitions
// 5. draw the debug inspector
// 6. sleep until the next deadline
//
// Deadlines advance by one tick per iteration. An overrun skips the sleep and
// restarts the schedule from the moment it was noticed, so a slow tick is
// absorbed and emulated time falls behind wall-clock instead of bursting.

use super::host::Host;
use super::Emulator;
use crate::display::RenderConfig;
use crate::input::{Routed, Router};
use crate::machine::{Machine, CYCLES_PER_MILLISECOND};
use log::{error, info, trace};
use std::time::{Duration, Instant};

/// Length of one scheduler tick
pub const TICK: Duration = Duration::from_millis(20);

/// Machine cycles in one tick at normal speed
pub const CYCLES_PER_TICK: u64 = CYCLES_PER_MILLISECOND as u64 * 20;

/// Cycles run by the small step key
pub const SMALL_STEP: u32 = 1;

/// Cycles run by the large step key
pub const LARGE_STEP: u32 = 10;

/// What the scheduler does with the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Run a full tick worth of cycles
    Running,
    /// Run nothing, keep rendering and polling
    Paused,
    /// Run exactly this many cycles once, then pause
    SteppingBy(u32),
}

impl RunMode {
    /// Paused or about to step
    pub fn is_paused(self) -> bool {
        !matches!(self, RunMode::Running)
    }

    /// Mode for the tick after this one
    pub fn after_tick(self) -> RunMode {
        match self {
            RunMode::SteppingBy(_) => RunMode::Paused,
            mode => mode,
        }
    }
}

/// Cycles to run this tick
pub fn cycle_budget(mode: RunMode, config: &RenderConfig) -> u64 {
    match mode {
        RunMode::Running => CYCLES_PER_TICK * config.effective_speed() as u64,
        RunMode::Paused => 0,
        RunMode::SteppingBy(n) => n as u64,
    }
}

/// Wall-clock source and sleeper
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// The real clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Fixed-rate deadline tracker
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    next_deadline: Instant,
    tick: Duration,
}

impl Pacer {
    /// First deadline is one tick after `start`
    pub fn new(start: Instant, tick: Duration) -> Self {
        Self {
            next_deadline: start + tick,
            tick,
        }
    }

    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    /// End the current tick at `now`
    ///
    /// # Returns
    /// How long to sleep, or None if the deadline has already passed
    pub fn pace(&mut self, now: Instant) -> Option<Duration> {
        let wait = self
            .next_deadline
            .checked_duration_since(now)
            .filter(|d| !d.is_zero());
        if wait.is_none() {
            self.next_deadline = now;
        }
        self.next_deadline += self.tick;
        wait
    }
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Main loop driver
pub struct Scheduler<H: Host, C: Clock> {
    host: H,
    clock: C,
    router: Router,
    pacer: Pacer,
    ticks: u64,
}

impl<H: Host, C: Clock> Scheduler<H, C> {
    pub fn new(host: H, clock: C, router: Router) -> Self {
        let pacer = Pacer::new(clock.now(), TICK);
        Self {
            host,
            clock,
            router,
            pacer,
            ticks: 0,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Ticks completed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run until a quit request is routed
    ///
    /// # Returns
    /// The number of ticks executed
    pub fn run<M: Machine>(&mut self, emu: &mut Emulator<M>) -> u64 {
        info!("Scheduler started ({} ms tick)", TICK.as_millis());
        self.pacer = Pacer::new(self.clock.now(), TICK);

        while self.tick(emu) == TickOutcome::Continue {}

        info!("Scheduler stopped after {} ticks", self.ticks);
        self.ticks
    }

    /// Execute one tick
    pub fn tick<M: Machine>(&mut self, emu: &mut Emulator<M>) -> TickOutcome {
        let mode = emu.run_mode();
        let budget = cycle_budget(mode, emu.render_config());
        emu.run_cycles(budget);
        emu.set_run_mode(mode.after_tick());
        trace!("Tick {}: {:?}, {} cycles", self.ticks, mode, budget);

        let frame = emu.render_frame();
        if let Err(e) = self.host.present(frame) {
            error!("Present failed: {}", e);
        }

        for event in self.host.poll_events() {
            match self.router.route(event, emu) {
                Routed::Continue => {}
                Routed::Forward(raw) => self.host.forward_debug_event(raw),
                Routed::Quit => {
                    self.ticks += 1;
                    return TickOutcome::Quit;
                }
            }
        }

        for (input, active) in self.host.poll_pad() {
            emu.apply_pad(input, active);
        }

        if let Err(e) = self.host.show_debug(emu) {
            error!("Debug inspector failed: {}", e);
        }

        if let Some(wait) = self.pacer.pace(self.clock.now()) {
            self.clock.sleep(wait);
        }

        self.ticks += 1;
        TickOutcome::Continue
    }
}

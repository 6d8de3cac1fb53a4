// Scheduler integration tests
// Drive the main loop tick by tick against a scripted host and clock

mod common;

use common::*;
use std::path::PathBuf;
use std::time::Duration;
use vecx_rs::emulator::{RunMode, Scheduler, TickOutcome, CYCLES_PER_TICK};
use vecx_rs::input::{EventKind, PadInput, Router};
use vecx_rs::machine::Control;
use winit::keyboard::KeyCode;

fn scheduler(host: ScriptedHost) -> Scheduler<ScriptedHost, ManualClock> {
    Scheduler::new(host, ManualClock::new(Duration::ZERO), Router::default())
}

fn key_up(key: KeyCode) -> Vec<vecx_rs::input::HostEvent<u32>> {
    vec![display(EventKind::KeyUp(key))]
}

#[test]
fn test_running_tick_budget() {
    let mut emu = emulator();
    let mut sched = scheduler(ScriptedHost::new());

    for _ in 0..3 {
        assert_eq!(sched.tick(&mut emu), TickOutcome::Continue);
    }

    assert_eq!(emu.machine().runs, vec![CYCLES_PER_TICK; 3]);
    assert_eq!(sched.ticks(), 3);
}

#[test]
fn test_speed_multiplies_budget() {
    let mut emu = emulator();
    emu.render_config_mut().speed = 4;
    let mut sched = scheduler(ScriptedHost::new());

    sched.tick(&mut emu);
    assert_eq!(emu.machine().runs, vec![120_000]);
}

#[test]
fn test_paused_runs_no_cycles_but_keeps_presenting() {
    let mut emu = emulator();
    emu.set_run_mode(RunMode::Paused);
    let mut sched = scheduler(ScriptedHost::new());

    for _ in 0..5 {
        sched.tick(&mut emu);
    }

    assert_eq!(emu.machine().total_cycles(), 0);
    assert_eq!(sched.host().presented, vec![(66, 82); 5]);
    assert_eq!(sched.host().debug_frames, 5);
}

#[test]
fn test_small_step_runs_one_cycle_once() {
    let mut emu = emulator();
    let host = ScriptedHost::new()
        .then(key_up(KeyCode::KeyP))
        .then(key_up(KeyCode::BracketLeft));
    let mut sched = scheduler(host);

    // Tick 1 runs and pauses, tick 2 queues the step
    sched.tick(&mut emu);
    sched.tick(&mut emu);
    assert_eq!(emu.run_mode(), RunMode::SteppingBy(1));

    sched.tick(&mut emu);
    assert_eq!(emu.run_mode(), RunMode::Paused);
    sched.tick(&mut emu);
    sched.tick(&mut emu);

    assert_eq!(emu.machine().runs, vec![CYCLES_PER_TICK, 1]);
}

#[test]
fn test_large_step_runs_ten_cycles_once() {
    let mut emu = emulator();
    emu.set_run_mode(RunMode::Paused);
    let host = ScriptedHost::new().then(key_up(KeyCode::BracketRight));
    let mut sched = scheduler(host);

    for _ in 0..4 {
        sched.tick(&mut emu);
    }

    assert_eq!(emu.machine().runs, vec![10]);
    assert_eq!(emu.run_mode(), RunMode::Paused);
}

#[test]
fn test_step_while_running_is_ignored() {
    let mut emu = emulator();
    let host = ScriptedHost::new().then(key_up(KeyCode::BracketRight));
    let mut sched = scheduler(host);

    sched.tick(&mut emu);
    sched.tick(&mut emu);

    assert_eq!(emu.machine().runs, vec![CYCLES_PER_TICK; 2]);
}

#[test]
fn test_quit_drops_remaining_events() {
    let mut emu = emulator();
    let host = ScriptedHost::new().then(vec![
        display(EventKind::KeyDown(KeyCode::KeyA)),
        display(EventKind::Quit),
        display(EventKind::KeyDown(KeyCode::KeyS)),
    ]);
    let mut sched = scheduler(host);

    assert_eq!(sched.tick(&mut emu), TickOutcome::Quit);

    assert_eq!(emu.machine().last_input(Control::Button1), Some(1));
    assert_eq!(emu.machine().last_input(Control::Button2), None);
    // Quit leaves before the debug inspector and the pacing sleep
    assert_eq!(sched.host().debug_frames, 0);
    assert!(sched.clock().sleeps.is_empty());
}

#[test]
fn test_run_returns_tick_count() {
    let mut emu = emulator();
    let host = ScriptedHost::new()
        .idle()
        .idle()
        .then(key_up(KeyCode::Escape));
    let mut sched = scheduler(host);

    assert_eq!(sched.run(&mut emu), 3);
    assert_eq!(emu.machine().runs.len(), 3);
}

#[test]
fn test_debug_events_are_forwarded_in_order() {
    let mut emu = emulator();
    let host = ScriptedHost::new().then(vec![
        debug(EventKind::Other, 1),
        display(EventKind::KeyDown(KeyCode::KeyD)),
        debug(EventKind::KeyDown(KeyCode::KeyA), 2),
        debug(EventKind::Quit, 3),
    ]);
    let mut sched = scheduler(host);

    assert_eq!(sched.tick(&mut emu), TickOutcome::Continue);
    assert_eq!(sched.host().forwarded, vec![1, 2, 3]);
    assert_eq!(emu.machine().last_input(Control::Button3), Some(1));
    assert_eq!(emu.machine().last_input(Control::Button1), None);
}

#[test]
fn test_pause_from_debug_window() {
    let mut emu = emulator();
    let host = ScriptedHost::new().then(vec![debug(EventKind::KeyUp(KeyCode::KeyP), 9)]);
    let mut sched = scheduler(host);

    sched.tick(&mut emu);
    assert!(emu.is_paused());
    assert!(sched.host().forwarded.is_empty());
}

#[test]
fn test_gamepad_transitions_reach_machine() {
    let mut emu = emulator();
    let mut host = ScriptedHost::new();
    host.pads.push_back(vec![(PadInput::Up, true), (PadInput::Button4, true)]);
    host.pads.push_back(vec![(PadInput::Up, false)]);
    let mut sched = scheduler(host);

    sched.tick(&mut emu);
    assert_eq!(emu.machine().last_input(Control::AxisY), Some(0xFF));
    assert_eq!(emu.machine().last_input(Control::Button4), Some(1));

    sched.tick(&mut emu);
    assert_eq!(emu.machine().last_input(Control::AxisY), Some(0x80));
    assert!(emu.controller().buttons[3]);
}

#[test]
fn test_resize_changes_presented_frame_size() {
    let mut emu = emulator();
    let host = ScriptedHost::new().then(vec![display(EventKind::Resize {
        width: 132,
        height: 164,
    })]);
    let mut sched = scheduler(host);

    sched.tick(&mut emu);
    sched.tick(&mut emu);

    assert_eq!(sched.host().presented, vec![(66, 82), (132, 164)]);
}

#[test]
fn test_present_failure_keeps_running() {
    let mut emu = emulator();
    let mut host = ScriptedHost::new();
    host.fail_present = true;
    let mut sched = scheduler(host);

    assert_eq!(sched.tick(&mut emu), TickOutcome::Continue);
    assert_eq!(sched.tick(&mut emu), TickOutcome::Continue);
    assert_eq!(emu.machine().runs.len(), 2);
}

#[test]
fn test_pacing_sleeps_remaining_time() {
    let mut emu = emulator();
    let clock = ManualClock::new(Duration::from_millis(5));
    let mut sched = Scheduler::new(ScriptedHost::new(), clock, Router::default());

    for _ in 0..3 {
        sched.tick(&mut emu);
    }

    assert_eq!(sched.clock().sleeps, vec![Duration::from_millis(15); 3]);
}

#[test]
fn test_overrun_skips_sleep() {
    let mut emu = emulator();
    let clock = ManualClock::new(Duration::from_millis(30));
    let mut sched = Scheduler::new(ScriptedHost::new(), clock, Router::default());

    for _ in 0..3 {
        sched.tick(&mut emu);
    }

    assert!(sched.clock().sleeps.is_empty());
    assert_eq!(sched.ticks(), 3);
}

#[test]
fn test_single_stall_is_absorbed_without_burst() {
    let mut emu = emulator();
    let clock = ManualClock::new(Duration::from_millis(1));
    let mut sched = Scheduler::new(ScriptedHost::new(), clock, Router::default());

    sched.clock().stall(Duration::from_millis(100));
    sched.tick(&mut emu);
    assert!(sched.clock().sleeps.is_empty());

    // Fast ticks after the stall each wait out almost a whole tick
    for _ in 0..3 {
        sched.tick(&mut emu);
    }
    assert_eq!(sched.clock().sleeps, vec![Duration::from_millis(19); 3]);
}

#[test]
fn test_dropped_file_reloads_cartridge() {
    let mut emu = emulator();
    let path = PathBuf::from("/nonexistent/vecx/scramble.bin");
    let host = ScriptedHost::new().then(vec![display(EventKind::Drop(path.clone()))]);
    let mut sched = scheduler(host);

    sched.tick(&mut emu);

    assert_eq!(emu.cartridge_path(), Some(path.as_path()));
    assert_eq!(emu.machine().resets, 1);
}

// Event router
//
// Routes one tagged host event at a time, in arrival order. Each event is
// handled by at most one of these paths:
// 1. run-control key releases (quit, pause, step), from any window
// 2. display window events: close, resize, file drop, controller keys and
//    the snapshot/reload/screenshot hotkeys
// 3. debug window events, passed through untouched to the debug UI
// Anything else is dropped.

use super::event::{EventKind, HostEvent, SurfaceId};
use super::keyboard::{Action, KeyBindings};
use crate::emulator::{Emulator, LARGE_STEP, SMALL_STEP};
use crate::machine::Machine;
use log::debug;

/// What the caller must do after routing an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed<R> {
    /// Nothing more to do
    Continue,
    /// Leave the main loop
    Quit,
    /// Hand this raw event to the debug UI
    Forward(R),
}

/// Host event router
#[derive(Debug, Clone, Default)]
pub struct Router {
    bindings: KeyBindings,
}

impl Router {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Route one event into the emulator context
    pub fn route<M: Machine, R>(&self, event: HostEvent<R>, emu: &mut Emulator<M>) -> Routed<R> {
        if let EventKind::KeyUp(key) = event.kind {
            if let Some(action) = self.bindings.action(key).filter(|a| a.is_run_control()) {
                return run_control(action, emu);
            }
        }

        match event.target {
            SurfaceId::Display => self.route_display(event.kind, emu),
            SurfaceId::Debug => match event.raw {
                Some(raw) => Routed::Forward(raw),
                None => Routed::Continue,
            },
            SurfaceId::Unknown => Routed::Continue,
        }
    }

    fn route_display<M: Machine, R>(&self, kind: EventKind, emu: &mut Emulator<M>) -> Routed<R> {
        match kind {
            EventKind::Quit => return Routed::Quit,
            EventKind::Resize { width, height } => emu.resize(width, height),
            EventKind::Drop(path) => {
                debug!("File dropped: '{}'", path.display());
                emu.insert_cartridge_from(&path);
            }
            EventKind::KeyDown(key) => {
                if key == self.bindings.quit {
                    return Routed::Quit;
                }
                if let Some(input) = self.bindings.pad_input(key) {
                    emu.apply_pad(input, true);
                }
            }
            EventKind::KeyUp(key) => {
                if let Some(input) = self.bindings.pad_input(key) {
                    emu.apply_pad(input, false);
                } else {
                    match self.bindings.action(key) {
                        Some(Action::LoadSnapshot) => emu.load_snapshot(),
                        Some(Action::SaveSnapshot) => emu.save_snapshot(),
                        Some(Action::Reload) => emu.reload_cartridge(),
                        Some(Action::Screenshot) => emu.take_screenshot(),
                        _ => {}
                    }
                }
            }
            EventKind::Other => {}
        }
        Routed::Continue
    }
}

fn run_control<M: Machine, R>(action: Action, emu: &mut Emulator<M>) -> Routed<R> {
    match action {
        Action::Quit => return Routed::Quit,
        Action::TogglePause => emu.toggle_pause(),
        Action::StepSmall => emu.request_step(SMALL_STEP),
        Action::StepLarge => emu.request_step(LARGE_STEP),
        _ => {}
    }
    Routed::Continue
}

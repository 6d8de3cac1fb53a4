// Host event model
//
// Every event the windowing backend produces is tagged with the surface it
// belongs to. Display and debug consumers then filter a single ordered
// stream by that tag.

use std::path::PathBuf;
use winit::keyboard::KeyCode;

/// Which surface an event targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceId {
    /// Main display window
    Display,
    /// Debug inspector window
    Debug,
    /// Anything else (stale or foreign windows)
    Unknown,
}

/// What happened, in backend-independent terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Window closed or application asked to quit
    Quit,
    /// Window resized (physical pixels)
    Resize { width: u32, height: u32 },
    /// File dropped onto the window
    Drop(PathBuf),
    /// Key pressed (repeats are not reported)
    KeyDown(KeyCode),
    /// Key released
    KeyUp(KeyCode),
    /// Anything the router does not interpret
    Other,
}

/// A tagged host event
///
/// `raw` keeps the backend's own event so that it can be handed unchanged
/// to the debug UI.
#[derive(Debug, Clone)]
pub struct HostEvent<R> {
    pub target: SurfaceId,
    pub kind: EventKind,
    pub raw: Option<R>,
}

impl<R> HostEvent<R> {
    /// Event without a raw backend payload
    pub fn new(target: SurfaceId, kind: EventKind) -> Self {
        Self {
            target,
            kind,
            raw: None,
        }
    }

    /// Event carrying its raw backend payload
    pub fn with_raw(target: SurfaceId, kind: EventKind, raw: R) -> Self {
        Self {
            target,
            kind,
            raw: Some(raw),
        }
    }
}

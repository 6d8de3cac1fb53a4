// Window module - winit + pixels host backend
//
// The display window shows the composited frame through a pixels buffer
// sized to the logical resolution; pixels scales it to the window. The
// event loop is pumped once per scheduler tick instead of owning the main
// loop, and every window event is queued as a tagged host event.

use super::Surface;
use crate::debug::DebugWindow;
use crate::emulator::{Emulator, Host, HostError};
use crate::input::{EventKind, GamepadHandler, HostEvent, PadInput, SurfaceId};
use crate::machine::Machine;
use log::{debug, error, info, warn};
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowId};

/// Pumps allowed for the platform to deliver the first `resumed`
const STARTUP_PUMPS: usize = 100;

/// Window settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSettings {
    /// Window title
    pub title: String,
    /// Initial inner width in physical pixels
    pub width: u32,
    /// Initial inner height in physical pixels
    pub height: u32,
    /// Start borderless fullscreen
    pub fullscreen: bool,
    /// Open the debug inspector window
    pub debug: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: String::from("Vectrex"),
            width: 495,
            height: 615,
            fullscreen: false,
            debug: false,
        }
    }
}

/// Main window with its pixel buffer
struct DisplayWindow {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    buffer_size: (u32, u32),
}

impl DisplayWindow {
    fn new(event_loop: &ActiveEventLoop, settings: &WindowSettings) -> Result<Self, HostError> {
        let mut attributes = Window::default_attributes()
            .with_title(settings.title.clone())
            .with_inner_size(PhysicalSize::new(settings.width, settings.height))
            .with_resizable(true);
        if settings.fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(event_loop.create_window(attributes)?);
        let size = window.inner_size();

        let surface_texture = SurfaceTexture::new(size.width, size.height, window.clone());
        let pixels = Pixels::new(size.width.max(1), size.height.max(1), surface_texture)?;

        Ok(Self {
            window,
            pixels,
            buffer_size: (size.width.max(1), size.height.max(1)),
        })
    }

    fn present(&mut self, frame: &Surface) -> Result<(), HostError> {
        let size = (frame.width(), frame.height());
        if size != self.buffer_size {
            debug!("Display buffer resized to {}x{}", size.0, size.1);
            self.pixels
                .resize_buffer(size.0, size.1)
                .map_err(pixels::Error::from)?;
            self.buffer_size = size;
        }

        frame.copy_to_rgba(self.pixels.frame_mut());
        self.pixels.render()?;
        Ok(())
    }

    fn resize_surface(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Err(e) = self.pixels.resize_surface(width, height) {
            error!("Failed to resize display surface: {}", e);
        }
    }
}

/// Event loop callbacks: window creation and event translation
struct HostApp {
    settings: WindowSettings,
    display: Option<DisplayWindow>,
    debug: Option<DebugWindow>,
    queue: Vec<HostEvent<WindowEvent>>,
    startup_error: Option<HostError>,
}

impl HostApp {
    fn new(settings: WindowSettings) -> Self {
        Self {
            settings,
            display: None,
            debug: None,
            queue: Vec::new(),
            startup_error: None,
        }
    }

    fn surface_of(&self, window_id: WindowId) -> SurfaceId {
        if self
            .display
            .as_ref()
            .is_some_and(|d| d.window.id() == window_id)
        {
            SurfaceId::Display
        } else if self
            .debug
            .as_ref()
            .is_some_and(|d| d.window_id() == window_id)
        {
            SurfaceId::Debug
        } else {
            SurfaceId::Unknown
        }
    }
}

/// Backend-independent view of a window event
fn translate(event: &WindowEvent) -> EventKind {
    match event {
        WindowEvent::CloseRequested => EventKind::Quit,
        WindowEvent::Resized(size) => EventKind::Resize {
            width: size.width,
            height: size.height,
        },
        WindowEvent::DroppedFile(path) => EventKind::Drop(path.clone()),
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state,
                    repeat: false,
                    ..
                },
            ..
        } => match state {
            ElementState::Pressed => EventKind::KeyDown(*code),
            ElementState::Released => EventKind::KeyUp(*code),
        },
        _ => EventKind::Other,
    }
}

impl ApplicationHandler for HostApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.display.is_some() {
            return;
        }

        match DisplayWindow::new(event_loop, &self.settings) {
            Ok(display) => {
                let size = display.window.inner_size();
                info!("Display window created ({}x{})", size.width, size.height);
                self.display = Some(display);
            }
            Err(e) => {
                self.startup_error = Some(e);
                event_loop.exit();
                return;
            }
        }

        if self.settings.debug {
            match DebugWindow::new(event_loop) {
                Ok(debug) => self.debug = Some(debug),
                Err(e) => warn!("Debug inspector unavailable: {}", e),
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let target = self.surface_of(window_id);
        let kind = translate(&event);

        if let (SurfaceId::Display, EventKind::Resize { width, height }) = (target, &kind) {
            if let Some(display) = &mut self.display {
                display.resize_surface(*width, *height);
            }
        }

        let host_event = match target {
            SurfaceId::Debug => HostEvent::with_raw(target, kind, event),
            _ => HostEvent::new(target, kind),
        };
        self.queue.push(host_event);
    }
}

/// Host backend built on winit, pixels and gilrs
pub struct WinitHost {
    event_loop: EventLoop<()>,
    app: HostApp,
    gamepad: Option<GamepadHandler>,
}

impl WinitHost {
    /// Create the event loop and open the windows
    ///
    /// # Arguments
    /// * `settings` - Window settings
    /// * `gamepad` - Gamepad handler, if gamepads should be polled
    pub fn new(settings: WindowSettings, gamepad: Option<GamepadHandler>) -> Result<Self, HostError> {
        let mut event_loop = EventLoop::new()?;
        let mut app = HostApp::new(settings);

        for _ in 0..STARTUP_PUMPS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::ZERO), &mut app)
            {
                debug!("Event loop exited during startup ({})", code);
                break;
            }
            if app.display.is_some() || app.startup_error.is_some() {
                break;
            }
        }

        if let Some(e) = app.startup_error.take() {
            return Err(e);
        }
        if app.display.is_none() {
            return Err(HostError::Gpu(String::from("display window was never created")));
        }

        // Startup noise (initial resize, focus) is not routed
        app.queue.clear();

        Ok(Self {
            event_loop,
            app,
            gamepad,
        })
    }

    pub fn has_debug_window(&self) -> bool {
        self.app.debug.is_some()
    }
}

impl Host for WinitHost {
    type RawEvent = WindowEvent;

    fn window_size(&self) -> (u32, u32) {
        match &self.app.display {
            Some(display) => {
                let size = display.window.inner_size();
                (size.width, size.height)
            }
            None => (self.app.settings.width, self.app.settings.height),
        }
    }

    fn poll_events(&mut self) -> Vec<HostEvent<WindowEvent>> {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app);

        let mut events = std::mem::take(&mut self.app.queue);
        if let PumpStatus::Exit(code) = status {
            debug!("Event loop exited ({})", code);
            events.push(HostEvent::new(SurfaceId::Display, EventKind::Quit));
        }
        events
    }

    fn poll_pad(&mut self) -> Vec<(PadInput, bool)> {
        match &mut self.gamepad {
            Some(gamepad) => gamepad.poll(),
            None => Vec::new(),
        }
    }

    fn present(&mut self, frame: &Surface) -> Result<(), HostError> {
        match &mut self.app.display {
            Some(display) => display.present(frame),
            None => Ok(()),
        }
    }

    fn forward_debug_event(&mut self, event: WindowEvent) {
        if let Some(debug) = &mut self.app.debug {
            debug.handle_event(&event);
        }
    }

    fn show_debug<M: Machine>(&mut self, emu: &mut Emulator<M>) -> Result<(), HostError> {
        match &mut self.app.debug {
            Some(debug) => debug.show(emu),
            None => Ok(()),
        }
    }
}

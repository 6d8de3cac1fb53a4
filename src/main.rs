// Vectrex Emulator - Main Entry Point
//
// Loads the configuration and ROM images, opens the windows and hands
// control to the real-time scheduler until a quit request arrives.

use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use vecx_rs::display::{load_overlay, VectorDisplay, WindowSettings, WinitHost};
use vecx_rs::emulator::{Emulator, FrontendConfig, Host, Scheduler, SystemClock, CONFIG_FILE};
use vecx_rs::input::{GamepadHandler, GamepadMapping, KeyBindings, Router};
use vecx_rs::machine::{DemoMachine, SilentSoundChip, SoundChip};
use vecx_rs::rom;

#[derive(Parser)]
#[command(name = "vecx-rs")]
#[command(about = "Vectrex emulator frontend", version)]
struct Cli {
    /// BIOS image (overrides the configuration file)
    #[arg(short, long)]
    bios: Option<PathBuf>,

    /// Overlay image laid over the display
    #[arg(short, long)]
    overlay: Option<PathBuf>,

    /// Start in fullscreen
    #[arg(short, long)]
    fullscreen: bool,

    /// Open the debug inspector window
    #[arg(short, long)]
    debug: bool,

    /// Start with sound muted
    #[arg(short, long)]
    mute: bool,

    /// Configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Cartridge image
    cartridge: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    info!("vecx-rs v{}", env!("CARGO_PKG_VERSION"));

    let mut config = FrontendConfig::load_or_default(&cli.config);
    if let Some(bios) = cli.bios {
        config.paths.bios = bios;
    }
    if let Some(overlay) = cli.overlay {
        config.paths.overlay = Some(overlay);
    }
    config.video.fullscreen |= cli.fullscreen;

    let bios = rom::load_bios(&config.paths.bios).map_err(|e| {
        error!("Cannot load BIOS '{}': {}", config.paths.bios.display(), e);
        e
    })?;
    let cartridge = rom::load_cartridge_or_blank(cli.cartridge.as_deref());
    let machine = DemoMachine::new(&bios, &cartridge);

    let bindings = config.keys.to_bindings().unwrap_or_else(|e| {
        warn!("Invalid key bindings ({}), using defaults", e);
        KeyBindings::default()
    });
    let mapping = config.gamepad.to_gamepad_mapping().unwrap_or_else(|e| {
        warn!("Invalid gamepad mapping ({}), using defaults", e);
        GamepadMapping::default()
    });

    let title = match cli.cartridge.as_deref().and_then(|p| p.file_stem()) {
        Some(name) => format!("Vectrex - {}", name.to_string_lossy()),
        None => String::from("Vectrex"),
    };
    let settings = WindowSettings {
        title,
        width: config.video.width,
        height: config.video.height,
        fullscreen: config.video.fullscreen,
        debug: cli.debug,
    };

    let host = WinitHost::new(settings, Some(GamepadHandler::new(mapping))).map_err(|e| {
        error!("Failed to initialize graphics: {}", e);
        e
    })?;

    let (width, height) = host.window_size();
    let mut display = VectorDisplay::new(width, height);
    if let Some(path) = &config.paths.overlay {
        match load_overlay(path) {
            Ok(overlay) => {
                info!("Overlay loaded from '{}'", path.display());
                display.set_overlay(Some(overlay));
            }
            Err(e) => warn!("Failed to load overlay '{}': {}", path.display(), e),
        }
    }

    let scale = display.scale();
    info!(
        "Display: {}x{} window, factor {}, logical {}x{}",
        width, height, scale.factor, scale.logical_width, scale.logical_height
    );

    let mut emu = Emulator::new(machine, display, config.render)
        .with_cartridge_path(cli.cartridge)
        .with_snapshot_path(config.paths.snapshot.clone())
        .with_screenshot_dir(config.paths.screenshot_directory.clone());

    let mut sound = SilentSoundChip::new();
    sound.init();
    sound.set_muted(cli.mute);

    let mut scheduler = Scheduler::new(host, SystemClock, Router::new(bindings));
    scheduler.run(&mut emu);

    sound.shutdown();
    info!("Exiting");
    Ok(())
}

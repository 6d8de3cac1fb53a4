// Configuration management
//
// Frontend settings persisted as TOML: window, render defaults, file paths
// and input bindings. Command-line flags override what is loaded here.

use crate::display::RenderConfig;
use crate::input::{GamepadMappingConfig, KeyBindingsConfig};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default configuration file path
pub const CONFIG_FILE: &str = "vecx_config.toml";

/// Errors that can occur while loading or saving the configuration
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error
    Io(io::Error),

    /// TOML parse error
    Parse(toml::de::Error),

    /// TOML serialization error
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Frontend configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Window settings
    pub video: VideoConfig,

    /// Initial render settings
    pub render: RenderConfig,

    /// Files and directories
    pub paths: PathsConfig,

    /// Keyboard bindings
    pub keys: KeyBindingsConfig,

    /// Gamepad face buttons
    pub gamepad: GamepadMappingConfig,
}

/// Video configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Initial window width
    pub width: u32,

    /// Initial window height
    pub height: u32,

    /// Start in fullscreen
    pub fullscreen: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 495,
            height: 615,
            fullscreen: false,
        }
    }
}

/// File path configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// BIOS image
    pub bios: PathBuf,

    /// Overlay image laid over the display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<PathBuf>,

    /// Snapshot file for the load/save keys
    pub snapshot: PathBuf,

    /// Screenshot root directory
    pub screenshot_directory: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            bios: PathBuf::from("bios.bin"),
            overlay: None,
            snapshot: PathBuf::from(super::DEFAULT_SNAPSHOT_FILE),
            screenshot_directory: PathBuf::from("screenshots"),
        }
    }
}

impl FrontendConfig {
    /// Load configuration from file or create default
    ///
    /// If the file is missing it is created with the defaults. A file that
    /// exists but cannot be parsed is left alone and the defaults are used.
    ///
    /// # Arguments
    ///
    /// * `path` - Configuration file
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!("Configuration loaded from '{}'", path.display());
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                match config.save(path) {
                    Ok(()) => info!("Created default configuration '{}'", path.display()),
                    Err(e) => warn!("Could not save default configuration: {}", e),
                }
                config
            }
            Err(e) => {
                warn!(
                    "Could not load configuration '{}' ({}), using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("vecx_config_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_default_config() {
        let config = FrontendConfig::default();
        assert_eq!(config.video.width, 495);
        assert_eq!(config.video.height, 615);
        assert_eq!(config.render, RenderConfig::default());
        assert_eq!(config.paths.bios, PathBuf::from("bios.bin"));
        assert_eq!(config.paths.snapshot, PathBuf::from("q.save"));
        assert!(config.paths.overlay.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = FrontendConfig::default();
        config.paths.overlay = Some(PathBuf::from("overlays/minestorm.png"));
        config.render.remanence = 200;

        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        let deserialized: FrontendConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize");

        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml_str = r#"
            [render]
            sharp = true

            [paths]
            bios = "roms/system.img"
        "#;

        let config: FrontendConfig = toml::from_str(toml_str).expect("Failed to parse");
        assert!(config.render.sharp);
        assert_eq!(config.render.remanence, 128);
        assert_eq!(config.paths.bios, PathBuf::from("roms/system.img"));
        assert_eq!(config.video, VideoConfig::default());
    }

    #[test]
    fn test_load_or_default_creates_file() {
        let path = temp_path("created.toml");
        let _ = fs::remove_file(&path);

        let config = FrontendConfig::load_or_default(&path);
        let reloaded = FrontendConfig::load(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(config, FrontendConfig::default());
        assert_eq!(reloaded.expect("default file should load"), config);
    }

    #[test]
    fn test_load_or_default_keeps_broken_file() {
        let path = temp_path("broken.toml");
        fs::write(&path, "video = [").expect("write failed");

        let config = FrontendConfig::load_or_default(&path);
        let contents = fs::read_to_string(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(config, FrontendConfig::default());
        assert_eq!(contents.expect("file should remain"), "video = [");
    }
}

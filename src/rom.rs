// ROM loading - BIOS and cartridge images
//
// The BIOS is mandatory and must fill its whole 8 KiB window. Cartridges are
// optional: anything that cannot be read leaves an empty (zeroed) slot.

use crate::machine::{BIOS_SIZE, CARTRIDGE_SIZE};
use log::{info, warn};
use std::fs;
use std::io;
use std::path::Path;

/// Errors that can occur while loading ROM images
#[derive(Debug)]
pub enum RomError {
    /// I/O error
    Io(io::Error),

    /// BIOS image shorter than the BIOS window
    BiosTooSmall { expected: usize, found: usize },
}

impl std::fmt::Display for RomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RomError::Io(e) => write!(f, "I/O error: {}", e),
            RomError::BiosTooSmall { expected, found } => {
                write!(
                    f,
                    "BIOS too small: expected {} bytes, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for RomError {}

impl From<io::Error> for RomError {
    fn from(e: io::Error) -> Self {
        RomError::Io(e)
    }
}

/// Load the BIOS image
///
/// # Arguments
///
/// * `path` - Path to the BIOS file
///
/// # Returns
///
/// Exactly `BIOS_SIZE` bytes. Larger files are truncated with a warning.
pub fn load_bios(path: &Path) -> Result<Vec<u8>, RomError> {
    let mut data = fs::read(path)?;

    if data.len() < BIOS_SIZE {
        return Err(RomError::BiosTooSmall {
            expected: BIOS_SIZE,
            found: data.len(),
        });
    }

    if data.len() > BIOS_SIZE {
        warn!(
            "BIOS '{}' is {} bytes, only the first {} are used",
            path.display(),
            data.len(),
            BIOS_SIZE
        );
        data.truncate(BIOS_SIZE);
    }

    info!("Loaded BIOS from '{}'", path.display());
    Ok(data)
}

/// Load a cartridge image, zero-padded to the cartridge window
///
/// Bytes beyond `CARTRIDGE_SIZE` are dropped with a warning.
pub fn load_cartridge(path: &Path) -> Result<Vec<u8>, RomError> {
    let data = fs::read(path)?;

    if data.len() > CARTRIDGE_SIZE {
        warn!(
            "Cartridge '{}' is {} bytes, only the first {} are used",
            path.display(),
            data.len(),
            CARTRIDGE_SIZE
        );
    }

    let mut image = vec![0; CARTRIDGE_SIZE];
    let len = data.len().min(CARTRIDGE_SIZE);
    image[..len].copy_from_slice(&data[..len]);

    info!("Loaded cartridge '{}' ({} bytes)", path.display(), len);
    Ok(image)
}

/// Load a cartridge if one is given, or an empty slot otherwise
///
/// Read failures are logged and fall back to the empty slot.
pub fn load_cartridge_or_blank(path: Option<&Path>) -> Vec<u8> {
    match path {
        Some(path) => load_cartridge(path).unwrap_or_else(|e| {
            warn!("Failed to load cartridge '{}': {}", path.display(), e);
            vec![0; CARTRIDGE_SIZE]
        }),
        None => vec![0; CARTRIDGE_SIZE],
    }
}

// Screenshot functionality
//
// Saves the last composited display frame as a PNG file.

use crate::display::Surface;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save a screenshot of a frame
///
/// # Arguments
///
/// * `frame` - Composited display frame
/// * `base_dir` - Screenshot root directory
/// * `cartridge_path` - Current cartridge, used to pick a subdirectory
///
/// # Returns
///
/// Result containing the path to the saved screenshot or an error
pub fn save_screenshot(
    frame: &Surface,
    base_dir: &Path,
    cartridge_path: Option<&Path>,
) -> Result<PathBuf, ScreenshotError> {
    let dir = screenshot_directory(base_dir, cartridge_path);
    fs::create_dir_all(&dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%3f");
    let file_path = dir.join(format!("screenshot_{}.png", timestamp));

    save_png(&file_path, frame)?;

    Ok(file_path)
}

/// Directory for the current cartridge: <base>/<cartridge name>/
fn screenshot_directory(base_dir: &Path, cartridge_path: Option<&Path>) -> PathBuf {
    match cartridge_path.and_then(Path::file_stem) {
        Some(name) => base_dir.join(name),
        None => base_dir.join("default"),
    }
}

/// Write a surface as an RGBA PNG
fn save_png(path: &Path, frame: &Surface) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, frame.width(), frame.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(frame.as_bytes())?;

    Ok(())
}

// Overlay loading
//
// Screen overlays are PNG images laid over the display at half opacity.
// Any PNG layout is accepted; everything is converted to 8-bit RGBA.

use super::surface::Surface;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Errors that can occur while loading an overlay image
#[derive(Debug)]
pub enum OverlayError {
    /// I/O error
    Io(io::Error),

    /// PNG decoding error
    PngDecoding(png::DecodingError),

    /// Decoded layout cannot be converted to RGBA
    UnsupportedFormat(String),
}

impl std::fmt::Display for OverlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlayError::Io(e) => write!(f, "I/O error: {}", e),
            OverlayError::PngDecoding(e) => write!(f, "PNG decoding error: {}", e),
            OverlayError::UnsupportedFormat(s) => write!(f, "Unsupported image format: {}", s),
        }
    }
}

impl std::error::Error for OverlayError {}

impl From<io::Error> for OverlayError {
    fn from(e: io::Error) -> Self {
        OverlayError::Io(e)
    }
}

impl From<png::DecodingError> for OverlayError {
    fn from(e: png::DecodingError) -> Self {
        OverlayError::PngDecoding(e)
    }
}

/// Load a PNG file into an RGBA surface
pub fn load_overlay(path: &Path) -> Result<Surface, OverlayError> {
    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::normalize_to_color8());

    let mut reader = decoder.read_info()?;
    let size = reader
        .output_buffer_size()
        .ok_or_else(|| OverlayError::UnsupportedFormat("image too large".to_string()))?;
    let mut buf = vec![0; size];
    let info = reader.next_frame(&mut buf)?;

    if info.bit_depth != png::BitDepth::Eight {
        return Err(OverlayError::UnsupportedFormat(format!(
            "bit depth {:?}",
            info.bit_depth
        )));
    }

    let rgba = to_rgba(&buf[..info.buffer_size()], info.color_type)?;

    Surface::from_rgba(info.width, info.height, rgba).ok_or_else(|| {
        OverlayError::UnsupportedFormat(format!("empty image {}x{}", info.width, info.height))
    })
}

/// Expand decoded 8-bit samples to RGBA
fn to_rgba(data: &[u8], color_type: png::ColorType) -> Result<Vec<u8>, OverlayError> {
    let rgba = match color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(OverlayError::UnsupportedFormat(
                "indexed color was not expanded".to_string(),
            ))
        }
    };
    Ok(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_png(name: &str, width: u32, height: u32, color: png::ColorType, data: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("vecx_overlay_{}_{}", std::process::id(), name));
        let file = File::create(&path).expect("create failed");
        let mut encoder = png::Encoder::new(io::BufWriter::new(file), width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("header failed");
        writer.write_image_data(data).expect("write failed");
        writer.finish().expect("finish failed");
        path
    }

    #[test]
    fn test_load_rgba_overlay() {
        let data = [255, 0, 0, 255, 0, 255, 0, 64];
        let path = write_png("rgba.png", 2, 1, png::ColorType::Rgba, &data);
        let surface = load_overlay(&path);
        let _ = fs::remove_file(&path);

        let surface = surface.expect("overlay should load");
        assert_eq!((surface.width(), surface.height()), (2, 1));
        assert_eq!(surface.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(surface.pixel(1, 0), [0, 255, 0, 64]);
    }

    #[test]
    fn test_load_rgb_overlay_is_opaque() {
        let data = [10, 20, 30, 40, 50, 60];
        let path = write_png("rgb.png", 1, 2, png::ColorType::Rgb, &data);
        let surface = load_overlay(&path);
        let _ = fs::remove_file(&path);

        let surface = surface.expect("overlay should load");
        assert_eq!(surface.pixel(0, 1), [40, 50, 60, 255]);
    }

    #[test]
    fn test_load_missing_overlay() {
        let result = load_overlay(Path::new("/nonexistent/vecx/overlay.png"));
        assert!(matches!(result, Err(OverlayError::Io(_))));
    }

    #[test]
    fn test_load_invalid_overlay() {
        let path = std::env::temp_dir().join(format!("vecx_overlay_{}_bad.png", std::process::id()));
        fs::write(&path, b"not a png").expect("write failed");
        let result = load_overlay(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(OverlayError::PngDecoding(_))));
    }
}

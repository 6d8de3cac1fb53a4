// Vector rasterizer - Draws one frame of beam strokes
//
// Each vector is drawn in white with an alpha proportional to its intensity.
// Vectors whose scaled endpoints coincide become a 2x2 block; lines are
// drawn twice, the second copy shifted by one pixel right and down, to give
// strokes some body at small sizes.

use super::scaler::ScaleState;
use super::surface::{Rgba, Surface};
use crate::machine::{Vector, INTENSITY_LEVELS};

/// Alpha for a beam intensity (0..INTENSITY_LEVELS)
#[inline]
pub fn intensity_alpha(intensity: u8) -> u8 {
    (intensity as u32 * 256 / INTENSITY_LEVELS).min(255) as u8
}

/// Draw every vector onto `target`
///
/// # Arguments
/// * `target` - Primary surface, allocated at the logical resolution
/// * `vectors` - Vectors of the last completed frame, analog coordinates
/// * `scale` - Current analog to logical mapping
pub fn rasterize(target: &mut Surface, vectors: &[Vector], scale: &ScaleState) {
    for vector in vectors {
        let color: Rgba = [255, 255, 255, intensity_alpha(vector.intensity)];
        let (x0, y0) = scale.to_logical(vector.x0, vector.y0);
        let (x1, y1) = scale.to_logical(vector.x1, vector.y1);

        if (x0, y0) == (x1, y1) {
            target.fill_rect(x0, y0, 2, 2, color);
        } else {
            target.draw_line(x0, y0, x1, y1, color);
            target.draw_line(x0 + 1, y0 + 1, x1 + 1, y1 + 1, color);
        }
    }
}

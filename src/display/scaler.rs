// Coordinate scaler - Maps the analog plane onto the window
//
// The vector generator reports coordinates in a fixed 33000 x 41000 analog
// plane. Those are divided by a single integer factor, chosen so that the
// whole plane fits the window along its tighter axis, giving the logical
// resolution the surfaces are allocated at.

use crate::machine::{ANALOG_MAX_X, ANALOG_MAX_Y};

/// Integer downscale factor and the logical resolution it yields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleState {
    /// Analog units per logical pixel (always >= 1)
    pub factor: u32,
    /// Logical width in pixels
    pub logical_width: u32,
    /// Logical height in pixels
    pub logical_height: u32,
}

impl ScaleState {
    /// Compute the scale for a window of `width` x `height` pixels
    ///
    /// Zero dimensions are treated as 1, and windows larger than the
    /// analog plane clamp the factor to 1.
    pub fn compute(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);

        let factor = (ANALOG_MAX_X / width).max(ANALOG_MAX_Y / height).max(1);

        Self {
            factor,
            logical_width: ANALOG_MAX_X / factor,
            logical_height: ANALOG_MAX_Y / factor,
        }
    }

    /// Size of the afterglow surface (half the logical size, at least 1)
    pub fn afterglow_size(&self) -> (u32, u32) {
        (
            (self.logical_width / 2).max(1),
            (self.logical_height / 2).max(1),
        )
    }

    /// Map an analog point to logical pixel coordinates
    #[inline]
    pub fn to_logical(&self, x: i32, y: i32) -> (i32, i32) {
        let factor = self.factor as i32;
        (x / factor, y / factor)
    }
}

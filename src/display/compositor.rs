// Phosphor persistence compositor
//
// Three surfaces make up the picture:
// - primary: logical resolution, never fully cleared, so strokes fade over
//   several frames depending on the remanence setting
// - afterglow: half resolution copy of primary, stretched back up with
//   linear filtering to give strokes a soft halo
// - frame: the final composite, what gets presented
//
// An optional overlay image is laid over the result at half opacity.

use super::rasterizer::rasterize;
use super::scaler::ScaleState;
use super::surface::{Filter, Rgba, Surface};
use crate::machine::Vector;
use log::debug;
use serde::{Deserialize, Serialize};

/// Background color behind the vectors
pub const BACKGROUND: Rgba = [25, 25, 25, 255];

/// Opacity applied to the afterglow and overlay layers
pub const LAYER_ALPHA: u8 = 128;

/// User-adjustable render and speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Disable persistence and afterglow
    pub sharp: bool,

    /// How much of the previous frame survives (0 = none, 255 = all)
    pub remanence: u8,

    /// Emulation speed multiplier (>= 1)
    pub speed: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sharp: false,
            remanence: 128,
            speed: 1,
        }
    }
}

impl RenderConfig {
    /// Alpha of the black fill that starts each primary frame
    pub fn clear_alpha(&self) -> u8 {
        if self.sharp {
            255
        } else {
            255 - self.remanence
        }
    }

    /// Opacity of the afterglow layer in the composite
    pub fn afterglow_alpha(&self) -> u8 {
        if self.sharp {
            0
        } else {
            LAYER_ALPHA
        }
    }

    /// Speed clamped to its valid range
    pub fn effective_speed(&self) -> u32 {
        self.speed.max(1)
    }
}

/// Persistent vector display
pub struct VectorDisplay {
    scale: ScaleState,
    primary: Surface,
    afterglow: Surface,
    frame: Surface,
    overlay: Option<Surface>,
}

impl VectorDisplay {
    /// Create a display sized for a window of `width` x `height`
    pub fn new(width: u32, height: u32) -> Self {
        let scale = ScaleState::compute(width, height);
        let (glow_w, glow_h) = scale.afterglow_size();

        Self {
            scale,
            primary: Surface::new(scale.logical_width, scale.logical_height),
            afterglow: Surface::new(glow_w, glow_h),
            frame: Surface::new(scale.logical_width, scale.logical_height),
            overlay: None,
        }
    }

    /// Current scale
    pub fn scale(&self) -> ScaleState {
        self.scale
    }

    /// Size of the composited frame
    pub fn frame_size(&self) -> (u32, u32) {
        (self.frame.width(), self.frame.height())
    }

    /// Recompute the scale for a new window size
    ///
    /// Surfaces are only reallocated (and their persistence lost) when the
    /// scale actually changes.
    ///
    /// # Returns
    /// true if the logical resolution changed
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let scale = ScaleState::compute(width, height);
        if scale == self.scale {
            return false;
        }

        debug!(
            "Display: window {}x{} -> factor {}, logical {}x{}",
            width, height, scale.factor, scale.logical_width, scale.logical_height
        );

        *self = Self {
            overlay: self.overlay.take(),
            ..Self::new(width, height)
        };
        true
    }

    /// Set or remove the overlay image
    pub fn set_overlay(&mut self, overlay: Option<Surface>) {
        self.overlay = overlay;
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Draw a frame of vectors and composite the result
    ///
    /// # Returns
    /// The composited frame, ready to present
    pub fn render(&mut self, vectors: &[Vector], config: &RenderConfig) -> &Surface {
        self.primary.fill([0, 0, 0, config.clear_alpha()]);
        rasterize(&mut self.primary, vectors, &self.scale);

        self.afterglow.blit(&self.primary, 255, Filter::Linear);

        self.frame.clear(BACKGROUND);
        self.frame.blit(&self.primary, 255, Filter::Nearest);
        self.frame.blit(&self.afterglow, config.afterglow_alpha(), Filter::Linear);
        if let Some(overlay) = &self.overlay {
            self.frame.blit(overlay, LAYER_ALPHA, Filter::Linear);
        }

        &self.frame
    }

    /// The last composited frame
    pub fn frame(&self) -> &Surface {
        &self.frame
    }

    /// The persistence surface, before compositing
    pub fn primary(&self) -> &Surface {
        &self.primary
    }
}

// Display module - Vector display emulation and presentation
//
// This module provides:
// - RGBA surfaces with alpha blending and scaled blits
// - Analog to logical coordinate scaling
// - Vector rasterization
// - Phosphor persistence compositing with an optional overlay image
// - The winit + pixels window backend

pub mod compositor;
pub mod overlay;
pub mod rasterizer;
pub mod scaler;
pub mod surface;
pub mod window;

pub use compositor::{RenderConfig, VectorDisplay, BACKGROUND, LAYER_ALPHA};
pub use overlay::{load_overlay, OverlayError};
pub use rasterizer::{intensity_alpha, rasterize};
pub use scaler::ScaleState;
pub use surface::{Filter, Rgba, Surface};
pub use window::{WindowSettings, WinitHost};

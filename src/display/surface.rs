// Surface - Software RGBA drawing target
//
// Pixels are stored as straight (non-premultiplied) RGBA8, row-major.
// All drawing operations blend the source over the destination:
//
//   dst.rgb = src.rgb * a + dst.rgb * (1 - a)
//   dst.a   = a + dst.a * (1 - a)
//
// where `a` is the source alpha, optionally scaled by an alpha modulation.
// Anything drawn outside the surface is clipped.

/// RGBA color
pub type Rgba = [u8; 4];

/// Sampling used when a blit stretches its source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Nearest source pixel
    Nearest,
    /// Bilinear interpolation between the four closest source pixels
    Linear,
}

/// RGBA8 pixel surface
#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// Create a fully transparent surface
    ///
    /// Zero dimensions are raised to 1 so the surface is never empty.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![0; byte_len(width, height)],
        }
    }

    /// Wrap existing RGBA data
    ///
    /// Returns None if a dimension is zero or `pixels` does not hold
    /// exactly `width * height` pixels.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != byte_len(width, height) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Read one pixel
    ///
    /// # Panics
    /// Panics if the coordinates are outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds",
            x,
            y
        );
        let offset = self.offset(x, y);
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ]
    }

    /// Overwrite every pixel with `color` (no blending)
    pub fn clear(&mut self, color: Rgba) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    /// Blend `color` over every pixel
    pub fn fill(&mut self, color: Rgba) {
        let alpha = color[3];
        if alpha == 255 {
            self.clear(color);
            return;
        }
        for px in self.pixels.chunks_exact_mut(4) {
            blend(px, color, alpha);
        }
    }

    /// Blend `color` over one pixel, ignoring coordinates outside the surface
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let offset = self.offset(x as u32, y as u32);
        blend(&mut self.pixels[offset..offset + 4], color, color[3]);
    }

    /// Blend a filled rectangle with its top-left corner at (x, y)
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                self.blend_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Blend a line including both endpoints (Bresenham)
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.blend_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Stretch `src` over the whole surface and blend it in
    ///
    /// # Arguments
    /// * `src` - Source surface, any size
    /// * `alpha_mod` - Multiplier applied to every source alpha (255 = unchanged)
    /// * `filter` - Sampling used when the sizes differ
    pub fn blit(&mut self, src: &Surface, alpha_mod: u8, filter: Filter) {
        if alpha_mod == 0 {
            return;
        }

        let same_size = src.width == self.width && src.height == self.height;
        let filter = if same_size { Filter::Nearest } else { filter };

        let x_ratio = src.width as f32 / self.width as f32;
        let y_ratio = src.height as f32 / self.height as f32;

        for y in 0..self.height {
            for x in 0..self.width {
                let color = match filter {
                    Filter::Nearest => {
                        let sx = (x as u64 * src.width as u64 / self.width as u64) as u32;
                        let sy = (y as u64 * src.height as u64 / self.height as u64) as u32;
                        src.pixel(sx, sy)
                    }
                    Filter::Linear => src.sample_linear(
                        (x as f32 + 0.5) * x_ratio - 0.5,
                        (y as f32 + 0.5) * y_ratio - 0.5,
                    ),
                };

                let alpha = mul_div255(color[3], alpha_mod);
                if alpha == 0 {
                    continue;
                }
                let offset = self.offset(x, y);
                blend(&mut self.pixels[offset..offset + 4], color, alpha);
            }
        }
    }

    /// Copy the surface into an RGBA frame of the same size
    ///
    /// # Panics
    /// Panics if `frame` is smaller than the surface
    pub fn copy_to_rgba(&self, frame: &mut [u8]) {
        assert!(
            frame.len() >= self.pixels.len(),
            "Output buffer too small for RGBA copy"
        );
        frame[..self.pixels.len()].copy_from_slice(&self.pixels);
    }

    /// Bilinear sample at a fractional source position, clamped to the edges
    fn sample_linear(&self, fx: f32, fy: f32) -> Rgba {
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        let fx = fx.clamp(0.0, max_x);
        let fy = fy.clamp(0.0, max_y);

        let x0 = fx.floor() as u32;
        let y0 = fy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let p00 = self.pixel(x0, y0);
        let p10 = self.pixel(x1, y0);
        let p01 = self.pixel(x0, y1);
        let p11 = self.pixel(x1, y1);

        let mut out = [0u8; 4];
        for c in 0..4 {
            let top = p00[c] as f32 * (1.0 - tx) + p10[c] as f32 * tx;
            let bottom = p01[c] as f32 * (1.0 - tx) + p11[c] as f32 * tx;
            out[c] = (top * (1.0 - ty) + bottom * ty).round() as u8;
        }
        out
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        pixel_offset(self.width, x, y)
    }
}

/// Bytes needed for a `width` x `height` RGBA surface
#[inline]
fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

#[inline]
fn pixel_offset(width: u32, x: u32, y: u32) -> usize {
    (y as usize * width as usize + x as usize) * 4
}

/// (a * b) / 255, rounded
#[inline]
fn mul_div255(a: u8, b: u8) -> u8 {
    ((a as u32 * b as u32 + 127) / 255) as u8
}

#[inline]
fn blend(dst: &mut [u8], src: Rgba, alpha: u8) {
    let a = alpha as u32;
    let inv = 255 - a;
    for c in 0..3 {
        dst[c] = ((src[c] as u32 * a + dst[c] as u32 * inv + 127) / 255) as u8;
    }
    dst[3] = (a + (dst[3] as u32 * inv + 127) / 255) as u8;
}

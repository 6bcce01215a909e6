//! Owned RGBA8 pixel buffers and their drawing primitives.

mod draw;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{LucentError, LucentResult};

/// Maximum surface edge length, in pixels.
pub const MAX_DIM: u32 = 16_384;

/// An addressable 2D pixel buffer, straight-alpha RGBA8, row-major.
///
/// The buffer is owned exclusively by the surface and mutated only through
/// its own methods. Coordinates outside the bounds are clipped, never an
/// error. `clone()` yields an independently-owned copy.
///
/// Shape primitives honor the per-surface anti-aliasing flag (on by
/// default); see [`Surface::set_anti_alias`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
    anti_alias: bool,
}

impl Surface {
    /// Allocate a transparent surface.
    ///
    /// Errors if either dimension is zero or exceeds [`MAX_DIM`].
    pub fn new(width: u32, height: u32) -> LucentResult<Self> {
        if width == 0 || height == 0 {
            return Err(LucentError::surface("surface dimensions must be positive"));
        }
        if width > MAX_DIM || height > MAX_DIM {
            return Err(LucentError::surface(format!(
                "surface {width}x{height} exceeds maximum edge {MAX_DIM}"
            )));
        }
        let len = width as usize * height as usize * 4;
        Ok(Self { width, height, data: vec![0; len], anti_alias: true })
    }

    /// Wrap an existing RGBA8 buffer.
    ///
    /// `data.len()` must equal `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> LucentResult<Self> {
        let mut s = Self::new(width, height)?;
        if data.len() != s.data.len() {
            return Err(LucentError::surface(format!(
                "buffer length {} does not match {width}x{height} RGBA8",
                data.len()
            )));
        }
        s.data = data;
        Ok(s)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA8 bytes, row-major.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Whether shape primitives draw with anti-aliased edges.
    pub fn anti_alias(&self) -> bool {
        self.anti_alias
    }

    /// Toggle anti-aliased edges for subsequent shape primitives.
    pub fn set_anti_alias(&mut self, enabled: bool) {
        self.anti_alias = enabled;
    }

    pub(crate) fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn offset(&self, x: i32, y: i32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Read a pixel; out-of-bounds reads return transparent black.
    pub fn get_pixel(&self, x: i32, y: i32) -> Rgba8 {
        if !self.in_bounds(x, y) {
            return Rgba8::TRANSPARENT;
        }
        let o = self.offset(x, y);
        Rgba8::new(self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3])
    }

    /// Overwrite a pixel; out-of-bounds writes are dropped.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba8) {
        if !self.in_bounds(x, y) {
            return;
        }
        let o = self.offset(x, y);
        self.data[o] = color.r;
        self.data[o + 1] = color.g;
        self.data[o + 2] = color.b;
        self.data[o + 3] = color.a;
    }

    /// Source-over blend a straight-alpha pixel onto the surface.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba8) {
        if !self.in_bounds(x, y) || color.a == 0 {
            return;
        }
        if color.a == 255 {
            self.set_pixel(x, y, color);
            return;
        }
        let dst = self.get_pixel(x, y);
        let alpha = f32::from(color.a) / 255.0;
        let inv = 1.0 - alpha;
        let mix = |s: u8, d: u8| (f32::from(s) * alpha + f32::from(d) * inv) as u8;
        let a = (f32::from(color.a) + f32::from(dst.a) * inv).min(255.0) as u8;
        self.set_pixel(x, y, Rgba8::new(mix(color.r, dst.r), mix(color.g, dst.g), mix(color.b, dst.b), a));
    }

    /// Blend a pixel with its alpha scaled by `coverage` in `[0, 1]`.
    pub(crate) fn plot_coverage(&mut self, x: i32, y: i32, color: Rgba8, coverage: f32) {
        if coverage <= 0.0 {
            return;
        }
        let c = coverage.min(1.0);
        self.blend_pixel(x, y, color.with_alpha((f32::from(color.a) * c) as u8));
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Rgba8) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Overwrite a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba8) {
        let x1 = x.max(0);
        let y1 = y.max(0);
        let x2 = (x.saturating_add(w)).min(self.width as i32);
        let y2 = (y.saturating_add(h)).min(self.height as i32);
        for py in y1..y2 {
            for px in x1..x2 {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// Copy a rectangle out into a new surface.
    ///
    /// Pixels read from outside the source bounds come back transparent.
    /// Errors if `w` or `h` is not a valid surface dimension.
    pub fn sub_region(&self, x: i32, y: i32, w: u32, h: u32) -> LucentResult<Surface> {
        let mut out = Surface::new(w, h)?;
        for py in 0..h as i32 {
            for px in 0..w as i32 {
                let c = self.get_pixel(x + px, y + py);
                out.set_pixel(px, py, c);
            }
        }
        Ok(out)
    }

    /// Source-over blit of `source` with its top-left at `(dest_x, dest_y)`.
    pub fn blit(&mut self, source: &Surface, dest_x: i32, dest_y: i32) {
        for sy in 0..source.height as i32 {
            for sx in 0..source.width as i32 {
                let c = source.get_pixel(sx, sy);
                if c.a == 255 {
                    self.set_pixel(dest_x + sx, dest_y + sy, c);
                } else if c.a > 0 {
                    self.blend_pixel(dest_x + sx, dest_y + sy, c);
                }
            }
        }
    }

    /// Blit `source` stretched to `dest_w x dest_h` (nearest-neighbor).
    pub fn blit_scaled(&mut self, source: &Surface, dest_x: i32, dest_y: i32, dest_w: u32, dest_h: u32) {
        if dest_w == 0 || dest_h == 0 {
            return;
        }
        let scale_x = source.width as f32 / dest_w as f32;
        let scale_y = source.height as f32 / dest_h as f32;
        for dy in 0..dest_h as i32 {
            for dx in 0..dest_w as i32 {
                let px = dest_x + dx;
                let py = dest_y + dy;
                if !self.in_bounds(px, py) {
                    continue;
                }
                let sx = (dx as f32 * scale_x) as i32;
                let sy = (dy as f32 * scale_y) as i32;
                let c = source.get_pixel(sx, sy);
                if c.a == 255 {
                    self.set_pixel(px, py, c);
                } else if c.a > 0 {
                    self.blend_pixel(px, py, c);
                }
            }
        }
    }

    /// Blit with the source alpha scaled by `alpha` (clamped to `[0, 1]`).
    pub fn blit_alpha(&mut self, source: &Surface, dest_x: i32, dest_y: i32, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        for sy in 0..source.height as i32 {
            for sx in 0..source.width as i32 {
                let c = source.get_pixel(sx, sy);
                let a = (f32::from(c.a) * alpha) as u8;
                self.blend_pixel(dest_x + sx, dest_y + sy, c.with_alpha(a));
            }
        }
    }

    /// Bilinear sample at fractional coordinates, clamped to the edges.
    pub(crate) fn sample_bilinear(&self, x: f32, y: f32) -> Rgba8 {
        let max_x = self.width as i32 - 1;
        let max_y = self.height as i32 - 1;
        let fx = x.floor();
        let fy = y.floor();
        let tx = x - fx;
        let ty = y - fy;
        let x0 = (fx as i32).clamp(0, max_x);
        let y0 = (fy as i32).clamp(0, max_y);
        let x1 = (x0 + 1).min(max_x);
        let y1 = (y0 + 1).min(max_y);
        let c00 = self.get_pixel(x0, y0).to_f32();
        let c10 = self.get_pixel(x1, y0).to_f32();
        let c01 = self.get_pixel(x0, y1).to_f32();
        let c11 = self.get_pixel(x1, y1).to_f32();
        let mut out = [0.0f32; 4];
        for i in 0..4 {
            let top = c00[i] + (c10[i] - c00[i]) * tx;
            let bot = c01[i] + (c11[i] - c01[i]) * tx;
            out[i] = top + (bot - top) * ty;
        }
        Rgba8::from_f32(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/surface.rs"]
mod tests;

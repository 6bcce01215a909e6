//! Gradients, noise, ripple distortion and color adjustments.
//!
//! All functions mutate the surface in place and clamp their numeric
//! parameters instead of failing.

use crate::effects::blur::blur;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::math::Fnv1a64;
use crate::surface::Surface;

/// Fill with a two-color gradient along the `start -> end` axis.
///
/// Pixels project onto the axis; the projection parameter is clamped to
/// `[0, 1]` and the colors interpolate per channel in linear RGBA space.
pub fn linear_gradient(surface: &mut Surface, start: Point, end: Point, from: Rgba8, to: Rgba8) {
    let dx = (end.x - start.x) as f32;
    let dy = (end.y - start.y) as f32;
    let len_sq = dx * dx + dy * dy;
    for y in 0..surface.height() as i32 {
        for x in 0..surface.width() as i32 {
            let t = if len_sq <= f32::EPSILON {
                0.0
            } else {
                let px = x as f32 + 0.5 - start.x as f32;
                let py = y as f32 + 0.5 - start.y as f32;
                ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
            };
            surface.set_pixel(x, y, Rgba8::lerp(from, to, t));
        }
    }
}

/// Fill with a radial gradient from `inner` at the center to `outer` at
/// `radius` pixels and beyond.
pub fn radial_gradient(surface: &mut Surface, cx: f32, cy: f32, radius: f32, inner: Rgba8, outer: Rgba8) {
    let radius = radius.max(f32::EPSILON);
    for y in 0..surface.height() as i32 {
        for x in 0..surface.width() as i32 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let t = ((dx * dx + dy * dy).sqrt() / radius).clamp(0.0, 1.0);
            surface.set_pixel(x, y, Rgba8::lerp(inner, outer, t));
        }
    }
}

/// Additive per-pixel jitter on the color channels.
///
/// `intensity` in `[0, 1]` scales the maximum excursion (±127 at full
/// intensity). The jitter is deterministic for a given `seed`.
pub fn noise(surface: &mut Surface, intensity: f32, seed: u64) {
    let intensity = intensity.clamp(0.0, 1.0);
    if intensity == 0.0 {
        return;
    }
    for y in 0..surface.height() as i32 {
        for x in 0..surface.width() as i32 {
            let mut h = Fnv1a64::new(seed);
            h.write_u32(x as u32);
            h.write_u32(y as u32);
            // Map the hash to [-1, 1).
            let unit = (h.finish() >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0;
            let delta = (unit as f32 * intensity * 127.0) as i32;
            let c = surface.get_pixel(x, y);
            let jit = |v: u8| (i32::from(v) + delta).clamp(0, 255) as u8;
            surface.set_pixel(x, y, Rgba8::new(jit(c.r), jit(c.g), jit(c.b), c.a));
        }
    }
}

/// Radial sinusoidal displacement centered at `(cx, cy)`.
///
/// Each pixel samples from its own position pushed along the radial
/// direction by `amplitude * sin(dist * 2pi / wavelength + phase)`,
/// bilinearly with clamp-to-edge. The caller owns time integration and
/// drives `amplitude`/`phase` per frame.
pub fn ripple(surface: &mut Surface, cx: f32, cy: f32, amplitude: f32, wavelength: f32, phase: f32) {
    if amplitude == 0.0 {
        return;
    }
    let wavelength = wavelength.max(1.0);
    let src = surface.clone();
    let two_pi = std::f32::consts::TAU;
    for y in 0..surface.height() as i32 {
        for x in 0..surface.width() as i32 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < f32::EPSILON {
                continue;
            }
            let factor = amplitude * (dist * two_pi / wavelength + phase).sin();
            let sx = x as f32 + dx / dist * factor;
            let sy = y as f32 + dy / dist * factor;
            surface.set_pixel(x, y, src.sample_bilinear(sx, sy));
        }
    }
}

/// Scale the color channels by `factor` (clamped at 0), alpha untouched.
pub fn brightness(surface: &mut Surface, factor: f32) {
    let factor = factor.max(0.0);
    for y in 0..surface.height() as i32 {
        for x in 0..surface.width() as i32 {
            let c = surface.get_pixel(x, y);
            let adj = |v: u8| (f32::from(v) * factor).clamp(0.0, 255.0) as u8;
            surface.set_pixel(x, y, Rgba8::new(adj(c.r), adj(c.g), adj(c.b), c.a));
        }
    }
}

/// Interpolate between luminance gray (`factor = 0`) and the original
/// color (`factor = 1`); values above 1 oversaturate, clamped per channel.
pub fn saturation(surface: &mut Surface, factor: f32) {
    let factor = factor.max(0.0);
    for y in 0..surface.height() as i32 {
        for x in 0..surface.width() as i32 {
            let c = surface.get_pixel(x, y);
            let luma = 0.299 * f32::from(c.r) + 0.587 * f32::from(c.g) + 0.114 * f32::from(c.b);
            let adj = |v: u8| (luma + (f32::from(v) - luma) * factor).clamp(0.0, 255.0) as u8;
            surface.set_pixel(x, y, Rgba8::new(adj(c.r), adj(c.g), adj(c.b), c.a));
        }
    }
}

/// Reduce to luminance gray.
pub fn grayscale(surface: &mut Surface) {
    saturation(surface, 0.0);
}

/// Invert the color channels, alpha untouched.
pub fn invert(surface: &mut Surface) {
    for y in 0..surface.height() as i32 {
        for x in 0..surface.width() as i32 {
            let c = surface.get_pixel(x, y);
            surface.set_pixel(x, y, Rgba8::new(255 - c.r, 255 - c.g, 255 - c.b, c.a));
        }
    }
}

/// The frosted-glass treatment: blur, a whisper of noise, and a slight
/// desaturation. A convenience for styling arbitrary surfaces; layer
/// compositing applies [`Material::FrostedGlass`](crate::Material) through
/// the backend instead.
pub fn frosted_glass(surface: &mut Surface, radius: f32, noise_intensity: f32, seed: u64) {
    blur(surface, radius);
    noise(surface, noise_intensity.clamp(0.0, 0.1), seed);
    saturation(surface, 0.92);
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fx.rs"]
mod tests;

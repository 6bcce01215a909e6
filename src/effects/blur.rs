//! Separable Gaussian blur over straight-alpha RGBA8.
//!
//! Kernel weights are fixed-point Q16, normalized so a constant image is a
//! fixed point of the filter. Taps outside the blurred region clamp to the
//! edge pixel. The two passes parallelize over output rows.

use rayon::prelude::*;

use crate::surface::Surface;

/// Largest accepted blur radius, in pixels. Larger requests are clamped.
pub const MAX_BLUR_RADIUS: f32 = 64.0;

/// Blur the whole surface in place. `radius <= 0` is the identity.
///
/// The kernel radius is `round(radius)` taps each side with `sigma =
/// radius / 3`, so the kernel covers about three standard deviations.
pub fn blur(surface: &mut Surface, radius: f32) {
    let (w, h) = (surface.width(), surface.height());
    blur_region(surface, 0, 0, w, h, radius);
}

/// Blur a rectangle of the surface in place.
///
/// The rectangle is clipped to the surface; kernel taps clamp to the
/// rectangle's own edges, so pixels outside it are neither read nor
/// written.
pub fn blur_region(surface: &mut Surface, x: i32, y: i32, w: u32, h: u32, radius: f32) {
    let Some(kernel) = kernel_q16(radius) else {
        return;
    };
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = x.saturating_add(w.min(i32::MAX as u32) as i32).min(surface.width() as i32);
    let y1 = y.saturating_add(h.min(i32::MAX as u32) as i32).min(surface.height() as i32);
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    let rw = (x1 - x0) as usize;
    let rh = (y1 - y0) as usize;
    let row_bytes = rw * 4;
    let stride = surface.width() as usize * 4;

    let mut src = vec![0u8; rw * rh * 4];
    for (ry, row) in src.chunks_exact_mut(row_bytes).enumerate() {
        let o = (y0 as usize + ry) * stride + x0 as usize * 4;
        row.copy_from_slice(&surface.data()[o..o + row_bytes]);
    }

    let mut tmp = vec![0u8; src.len()];
    horizontal_pass(&src, &mut tmp, rw, &kernel);
    let mut out = vec![0u8; src.len()];
    vertical_pass(&tmp, &mut out, rw, rh, &kernel);

    let data = surface.data_mut();
    for (ry, row) in out.chunks_exact(row_bytes).enumerate() {
        let o = (y0 as usize + ry) * stride + x0 as usize * 4;
        data[o..o + row_bytes].copy_from_slice(row);
    }
}

/// Q16 Gaussian weights for the derived kernel radius, or `None` when the
/// blur is the identity.
fn kernel_q16(radius: f32) -> Option<Vec<u32>> {
    if !radius.is_finite() || radius <= 0.0 {
        return None;
    }
    let radius = radius.min(MAX_BLUR_RADIUS);
    let taps = radius.round() as i32;
    if taps == 0 {
        return None;
    }
    let sigma = f64::from(radius) / 3.0;
    let denom = 2.0 * sigma * sigma;

    let mut weights_f = Vec::<f64>::with_capacity((2 * taps + 1) as usize);
    let mut sum = 0.0f64;
    for i in -taps..=taps {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Put the rounding remainder on the center tap so the weights sum to
    // exactly 1.0 in Q16.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Some(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: usize, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let row_bytes = width * 4;
    dst.par_chunks_exact_mut(row_bytes).enumerate().for_each(|(y, dst_row)| {
        let src_row = &src[y * row_bytes..(y + 1) * row_bytes];
        for x in 0..width as i32 {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, width as i32 - 1) as usize;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src_row[sx * 4 + c]);
                }
            }
            for c in 0..4 {
                dst_row[x as usize * 4 + c] = q16_to_u8(acc[c]);
            }
        }
    });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: usize, height: usize, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let row_bytes = width * 4;
    dst.par_chunks_exact_mut(row_bytes).enumerate().for_each(|(y, dst_row)| {
        for x in 0..width {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y as i32 + ki as i32 - radius).clamp(0, height as i32 - 1) as usize;
                let idx = sy * row_bytes + x * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            for c in 0..4 {
                dst_row[x * 4 + c] = q16_to_u8(acc[c]);
            }
        }
    });
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;

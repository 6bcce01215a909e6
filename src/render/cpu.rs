//! In-process compositing backend.
//!
//! Paints bottom to top: clear to the background, then for each visible
//! layer resolve the frosted-glass backdrop (sample, blur, write back
//! through the layer's alpha ramp) and blend the layer's own pixels with
//! its blend mode and opacity. Scaled layers sample bilinearly about
//! their center.

use crate::effects::blur::blur;
use crate::effects::composite::blend_px;
use crate::foundation::core::Rgba8;
use crate::foundation::error::LucentResult;
use crate::render::backend::{BackendKind, RenderBackend, RenderSettings, SceneRef};
use crate::scene::layer::Layer;
use crate::surface::Surface;

/// Alpha at or below this contributes no backdrop blur.
pub(crate) const GLASS_ALPHA_LO: f32 = 10.0;
/// Alpha at or above this takes the fully blurred backdrop.
pub(crate) const GLASS_ALPHA_HI: f32 = 35.0;

/// The always-available software compositor.
#[derive(Debug)]
pub(crate) struct CpuBackend {
    #[allow(dead_code)]
    settings: RenderSettings,
}

impl CpuBackend {
    pub(crate) fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }
}

impl RenderBackend for CpuBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Cpu
    }

    #[tracing::instrument(skip(self, scene), fields(layers = scene.layers.len()))]
    fn composite(&mut self, scene: &SceneRef<'_>) -> LucentResult<Surface> {
        let mut out = Surface::new(scene.width, scene.height)?;
        out.fill(scene.background);
        for layer in scene.layers {
            if !layer.visible || layer.opacity() <= 0.0 {
                continue;
            }
            let (lx, ly, lw, lh) = layer.scaled_bounds();
            if lw == 0 || lh == 0 {
                continue;
            }
            let radius = layer.material.blur_radius();
            if radius > 0.0 {
                apply_frosted_backdrop(&mut out, layer, lx, ly, lw, lh, radius)?;
            }
            blend_layer_content(&mut out, layer, lx, ly, lw, lh);
        }
        Ok(out)
    }
}

/// Blur the composited-so-far content under the layer box and write it
/// back through the layer's alpha ramp. Only pixels inside the box
/// change; the blur reads a margin of one kernel radius around it.
fn apply_frosted_backdrop(
    out: &mut Surface,
    layer: &Layer,
    lx: i32,
    ly: i32,
    lw: u32,
    lh: u32,
    radius: f32,
) -> LucentResult<()> {
    let pad = radius.ceil() as i32;
    let px = lx - pad;
    let py = ly - pad;
    let pw = lw + 2 * pad as u32;
    let ph = lh + 2 * pad as u32;

    let mut patch = out.sub_region(px, py, pw, ph)?;
    blur(&mut patch, radius);

    for dy in 0..lh as i32 {
        let oy = ly + dy;
        for dx in 0..lw as i32 {
            let ox = lx + dx;
            if !out.in_bounds(ox, oy) {
                continue;
            }
            let mask = f32::from(sample_layer(layer, dx, dy, lw, lh).a);
            let f = if mask <= GLASS_ALPHA_LO {
                0.0
            } else if mask >= GLASS_ALPHA_HI {
                1.0
            } else {
                (mask - GLASS_ALPHA_LO) / (GLASS_ALPHA_HI - GLASS_ALPHA_LO)
            };
            if f <= 0.0 {
                continue;
            }
            let blurred = patch.get_pixel(dx + pad, dy + pad);
            let base = out.get_pixel(ox, oy);
            out.set_pixel(ox, oy, Rgba8::lerp(base, blurred, f));
        }
    }
    Ok(())
}

/// Blend the layer's pixels over the output with its mode and opacity.
fn blend_layer_content(out: &mut Surface, layer: &Layer, lx: i32, ly: i32, lw: u32, lh: u32) {
    let opacity = layer.opacity();
    let unscaled = layer.scale() == 1.0;
    for dy in 0..lh as i32 {
        let oy = ly + dy;
        for dx in 0..lw as i32 {
            let ox = lx + dx;
            if !out.in_bounds(ox, oy) {
                continue;
            }
            let src = if unscaled {
                layer.surface().get_pixel(dx, dy)
            } else {
                sample_layer(layer, dx, dy, lw, lh)
            };
            if src.a == 0 {
                continue;
            }
            let dst = out.get_pixel(ox, oy);
            out.set_pixel(ox, oy, blend_px(dst, src, layer.blend, opacity));
        }
    }
}

/// Sample the layer surface at box-local coordinates of the scaled box.
fn sample_layer(layer: &Layer, dx: i32, dy: i32, lw: u32, lh: u32) -> Rgba8 {
    let sw = layer.surface().width() as f32;
    let sh = layer.surface().height() as f32;
    if layer.scale() == 1.0 {
        return layer.surface().get_pixel(dx, dy);
    }
    let u = (dx as f32 + 0.5) / lw as f32 * sw - 0.5;
    let v = (dy as f32 + 0.5) / lh as f32 * sh - 0.5;
    layer.surface().sample_bilinear(u, v)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

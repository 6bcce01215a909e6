//! A positioned, styled surface participating in compositing.

use serde::{Deserialize, Serialize};

use crate::effects::composite::BlendMode;
use crate::scene::material::Material;
use crate::surface::Surface;

/// Stable handle for a layer within its [`LayerStack`](crate::LayerStack).
///
/// Ids are never reused by a stack; a stale id simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub(crate) u64);

/// A layer: an owned surface plus its compositing state.
///
/// Layers are created by [`LayerStack`](crate::LayerStack) factory methods
/// and owned by the stack; removing one returns it so the caller can take
/// the surface back.
#[derive(Debug, Clone)]
pub struct Layer {
    pub(crate) id: LayerId,
    surface: Surface,
    /// Left edge in stack coordinates.
    pub x: i32,
    /// Top edge in stack coordinates.
    pub y: i32,
    opacity: f32,
    scale: f32,
    /// Blend mode against the composited content beneath.
    pub blend: BlendMode,
    /// Backdrop treatment.
    pub material: Material,
    /// Invisible layers are skipped entirely during compositing.
    pub visible: bool,
    /// Opaque application data carried by the layer (for example an index
    /// into an application-owned table). Not interpreted by the crate.
    pub user_data: Option<u64>,
}

impl Layer {
    pub(crate) fn new(id: LayerId, surface: Surface) -> Self {
        Self {
            id,
            surface,
            x: 0,
            y: 0,
            opacity: 1.0,
            scale: 1.0,
            blend: BlendMode::Normal,
            material: Material::Solid,
            visible: true,
            user_data: None,
        }
    }

    /// This layer's id.
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// The layer's surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Mutable access for redrawing the layer's content.
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Take the surface out of a removed layer.
    pub fn into_surface(self) -> Surface {
        self.surface
    }

    /// Move the layer's top-left corner.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Layer opacity in `[0, 1]`; out-of-range values are clamped.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set the layer opacity, clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Transient scale factor applied about the layer's center.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set the scale factor (clamped at 0). Widget press/hover styles
    /// drive this per frame.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.max(0.0);
    }

    /// Axis-aligned bounds after scaling about the center, as
    /// `(x, y, w, h)` in stack coordinates.
    pub(crate) fn scaled_bounds(&self) -> (i32, i32, u32, u32) {
        let w = self.surface.width() as f32;
        let h = self.surface.height() as f32;
        let sw = (w * self.scale).round().max(0.0);
        let sh = (h * self.scale).round().max(0.0);
        let x = self.x as f32 + (w - sw) * 0.5;
        let y = self.y as f32 + (h - sh) * 0.5;
        (x.round() as i32, y.round() as i32, sw as u32, sh as u32)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layer.rs"]
mod tests;

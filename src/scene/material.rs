//! Visual treatment applied when a layer is composited.

use serde::{Deserialize, Serialize};

use crate::effects::blur::MAX_BLUR_RADIUS;

/// How a layer's backdrop is treated during compositing.
///
/// `FrostedGlass` blurs the already-composited content beneath the layer's
/// bounding box before the layer's own pixels go on top. Mutations take
/// effect on the next composite.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// No backdrop treatment.
    #[default]
    Solid,
    /// Gaussian-blurred backdrop.
    FrostedGlass {
        /// Blur radius in pixels, clamped to [`MAX_BLUR_RADIUS`].
        blur_radius: f32,
    },
}

impl Material {
    /// A solid material.
    pub const fn solid() -> Self {
        Material::Solid
    }

    /// A frosted-glass material; `blur_radius` is clamped to
    /// `[0, MAX_BLUR_RADIUS]`.
    pub fn frosted_glass(blur_radius: f32) -> Self {
        Material::FrostedGlass { blur_radius: blur_radius.clamp(0.0, MAX_BLUR_RADIUS) }
    }

    /// The effective backdrop blur radius (0 for solid).
    pub fn blur_radius(&self) -> f32 {
        match *self {
            Material::Solid => 0.0,
            Material::FrostedGlass { blur_radius } => blur_radius.clamp(0.0, MAX_BLUR_RADIUS),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/material.rs"]
mod tests;

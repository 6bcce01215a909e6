//! Per-pixel blend arithmetic used by layer compositing.
//!
//! Blend math runs in normalized `[0, 1]` space on straight-alpha channels
//! and quantizes once on the way out.

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;

/// How a layer's color combines with the composited content beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source-over.
    #[default]
    Normal,
    /// Sum, clamped at white.
    Add,
    /// Difference, clamped at black.
    Subtract,
    /// Channel product (darkens).
    Multiply,
    /// Inverted product (lightens).
    Screen,
    /// Multiply in shadows, screen in highlights, keyed on the backdrop.
    Overlay,
    /// Absolute channel difference.
    Difference,
    /// Brightens the backdrop toward the source.
    ColorDodge,
    /// Darkens the backdrop away from the source.
    ColorBurn,
}

impl BlendMode {
    /// All modes, in declaration order.
    pub const ALL: [BlendMode; 9] = [
        BlendMode::Normal,
        BlendMode::Add,
        BlendMode::Subtract,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Difference,
        BlendMode::ColorDodge,
        BlendMode::ColorBurn,
    ];

    fn apply(self, d: f32, s: f32) -> f32 {
        match self {
            BlendMode::Normal => s,
            BlendMode::Add => (d + s).min(1.0),
            BlendMode::Subtract => (d - s).max(0.0),
            BlendMode::Multiply => d * s,
            BlendMode::Screen => 1.0 - (1.0 - d) * (1.0 - s),
            BlendMode::Overlay => {
                if d < 0.5 {
                    2.0 * d * s
                } else {
                    1.0 - 2.0 * (1.0 - d) * (1.0 - s)
                }
            }
            BlendMode::Difference => (d - s).abs(),
            BlendMode::ColorDodge => {
                if s >= 1.0 {
                    1.0
                } else {
                    (d / (1.0 - s)).min(1.0)
                }
            }
            BlendMode::ColorBurn => {
                if s <= 0.0 {
                    0.0
                } else {
                    1.0 - ((1.0 - d) / s).min(1.0)
                }
            }
        }
    }
}

/// Blend `src` onto `dst` with the given mode and extra `opacity` in `[0, 1]`.
///
/// The mode shapes the color contribution; coverage follows source-over
/// (`out_a = sa + da * (1 - sa)` with `sa` scaled by `opacity`).
pub(crate) fn blend_px(dst: Rgba8, src: Rgba8, mode: BlendMode, opacity: f32) -> Rgba8 {
    let sa = f32::from(src.a) / 255.0 * opacity.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return dst;
    }
    let d = dst.to_f32();
    let s = src.to_f32();
    let da = d[3];
    let mut out = [0.0f32; 4];
    for i in 0..3 {
        let blended = mode.apply(d[i], s[i]);
        // Where the backdrop is transparent the mode has nothing to bite
        // on; fade toward plain source placement.
        let shaped = blended * da + s[i] * (1.0 - da);
        out[i] = d[i] * (1.0 - sa) + shaped * sa;
    }
    out[3] = sa + da * (1.0 - sa);
    Rgba8::from_f32(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;

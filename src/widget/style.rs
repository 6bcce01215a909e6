//! Per-state widget styling and the interruptible style interpolation.

use serde::{Deserialize, Serialize};

use crate::animation::{Ease, Tween};
use crate::foundation::core::Rgba8;
use crate::foundation::math::lerp_f32;

/// The interaction states a widget can resolve styles for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionState {
    /// At rest.
    #[default]
    Normal,
    /// Pointer inside the widget.
    Hover,
    /// Pointer button held after pressing inside.
    Pressed,
    /// Holding keyboard focus (text-input widgets).
    Focused,
}

/// A fully resolved visual style for one interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateStyle {
    /// Base fill color.
    pub color: Rgba8,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f32,
    /// Layer scale about the widget center.
    pub scale: f32,
    /// Frosted-glass backdrop blur radius; 0 keeps the material solid.
    pub blur_radius: f32,
}

impl Default for StateStyle {
    fn default() -> Self {
        Self { color: Rgba8::opaque(200, 200, 200), opacity: 1.0, scale: 1.0, blur_radius: 0.0 }
    }
}

impl StateStyle {
    /// Component-wise interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(a: StateStyle, b: StateStyle, t: f32) -> StateStyle {
        let t = t.clamp(0.0, 1.0);
        StateStyle {
            color: Rgba8::lerp(a.color, b.color, t),
            opacity: lerp_f32(a.opacity, b.opacity, t),
            scale: lerp_f32(a.scale, b.scale, t),
            blur_radius: lerp_f32(a.blur_radius, b.blur_radius, t),
        }
    }
}

/// Partial style for a non-normal state; unset fields inherit from the
/// normal style.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleOverride {
    /// Replacement fill color.
    pub color: Option<Rgba8>,
    /// Replacement opacity.
    pub opacity: Option<f32>,
    /// Replacement scale.
    pub scale: Option<f32>,
    /// Replacement blur radius.
    pub blur_radius: Option<f32>,
}

impl StyleOverride {
    fn resolve(self, base: StateStyle) -> StateStyle {
        StateStyle {
            color: self.color.unwrap_or(base.color),
            opacity: self.opacity.unwrap_or(base.opacity).clamp(0.0, 1.0),
            scale: self.scale.unwrap_or(base.scale).max(0.0),
            blur_radius: self.blur_radius.unwrap_or(base.blur_radius).max(0.0),
        }
    }

    /// Override with only a color change.
    pub fn color(color: Rgba8) -> Self {
        Self { color: Some(color), ..Self::default() }
    }
}

/// The full per-state style table of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleSet {
    /// Fully specified resting style.
    pub normal: StateStyle,
    /// Hover differences.
    pub hover: StyleOverride,
    /// Pressed differences.
    pub pressed: StyleOverride,
    /// Focused differences (text-input widgets).
    pub focused: StyleOverride,
}

impl StyleSet {
    /// Resolve the effective style for a state, inheriting unset fields
    /// from `normal`.
    pub fn resolve(&self, state: InteractionState) -> StateStyle {
        match state {
            InteractionState::Normal => self.normal,
            InteractionState::Hover => self.hover.resolve(self.normal),
            InteractionState::Pressed => self.pressed.resolve(self.normal),
            InteractionState::Focused => self.focused.resolve(self.normal),
        }
    }
}

/// Eased interpolation between resolved styles that never snaps.
///
/// Retargeting mid-flight captures the current interpolated style as the
/// new starting point, so an interrupted transition continues from what
/// is on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTransition {
    from: StateStyle,
    to: StateStyle,
    tween: Tween,
}

impl StyleTransition {
    /// A settled transition resting on `style`.
    pub fn new(style: StateStyle, duration: f32, ease: Ease) -> Self {
        let mut tween = Tween::new(0.0, 1.0, duration, ease);
        tween.update(duration);
        Self { from: style, to: style, tween }
    }

    /// Begin interpolating from the current style toward `target`.
    pub fn retarget(&mut self, target: StateStyle) {
        self.from = self.current();
        self.to = target;
        self.tween.restart();
    }

    /// Jump to `target` with no interpolation.
    pub fn snap(&mut self, target: StateStyle) {
        self.from = target;
        self.to = target;
        self.tween.update(self.tween.duration());
    }

    /// Replace the duration and easing used by future retargets.
    pub fn configure(&mut self, duration: f32, ease: Ease) {
        let current = self.current();
        let mut tween = Tween::new(0.0, 1.0, duration, ease);
        tween.update(duration);
        self.tween = tween;
        self.from = current;
        // `to` is kept; a settled transition stays settled.
    }

    /// Advance by `dt` seconds and return the style to draw.
    pub fn update(&mut self, dt: f32) -> StateStyle {
        self.tween.update(dt);
        self.current()
    }

    /// The style at the current interpolation progress.
    pub fn current(&self) -> StateStyle {
        StateStyle::lerp(self.from, self.to, self.tween.value())
    }

    /// The style being interpolated toward.
    pub fn target(&self) -> StateStyle {
        self.to
    }

    /// Whether the interpolation has reached its target.
    pub fn is_settled(&self) -> bool {
        self.tween.is_finished()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widget/style.rs"]
mod tests;

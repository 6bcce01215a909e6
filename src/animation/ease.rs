//! Easing curves.

use serde::{Deserialize, Serialize};

const BACK_OVERSHOOT: f32 = 1.70158;

/// A deterministic progress-shaping curve.
///
/// Input is clamped to `[0, 1]`; output is *not* clamped. The elastic and
/// back families overshoot transiently and callers must expect that.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Identity.
    #[default]
    Linear,
    /// Quadratic accelerate-in.
    InQuad,
    /// Quadratic decelerate-out.
    OutQuad,
    /// Quadratic in then out.
    InOutQuad,
    /// Cubic accelerate-in.
    InCubic,
    /// Cubic decelerate-out.
    OutCubic,
    /// Cubic in then out.
    InOutCubic,
    /// Exponential accelerate-in.
    InExpo,
    /// Exponential decelerate-out.
    OutExpo,
    /// Exponential in then out.
    InOutExpo,
    /// Elastic spring-in (overshoots below 0).
    InElastic,
    /// Elastic spring-out (overshoots above 1).
    OutElastic,
    /// Elastic in then out.
    InOutElastic,
    /// Pulls back before accelerating.
    InBack,
    /// Overshoots past 1 before settling.
    OutBack,
    /// Back in then out.
    InOutBack,
    /// Bouncing approach from 0.
    InBounce,
    /// Bouncing settle at 1.
    OutBounce,
    /// Bounce in then out.
    InOutBounce,
}

impl Ease {
    /// Evaluate the curve at progress `t` (clamped to `[0, 1]`).
    pub fn apply(self, t: f32) -> f32 {
        use std::f32::consts::PI;
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    (2.0f32).powf(10.0 * t - 10.0)
                }
            }
            Self::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - (2.0f32).powf(-10.0 * t)
                }
            }
            Self::InOutExpo => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    (2.0f32).powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - (2.0f32).powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Self::InElastic => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    -(2.0f32).powf(10.0 * t - 10.0) * ((t * 10.0 - 10.75) * (2.0 * PI) / 3.0).sin()
                }
            }
            Self::OutElastic => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    (2.0f32).powf(-10.0 * t) * ((t * 10.0 - 0.75) * (2.0 * PI) / 3.0).sin() + 1.0
                }
            }
            Self::InOutElastic => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    -((2.0f32).powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * (2.0 * PI) / 4.5).sin()) / 2.0
                } else {
                    ((2.0f32).powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * (2.0 * PI) / 4.5).sin()) / 2.0 + 1.0
                }
            }
            Self::InBack => {
                let c3 = BACK_OVERSHOOT + 1.0;
                c3 * t * t * t - BACK_OVERSHOOT * t * t
            }
            Self::OutBack => {
                let c3 = BACK_OVERSHOOT + 1.0;
                1.0 + c3 * (t - 1.0).powi(3) + BACK_OVERSHOOT * (t - 1.0).powi(2)
            }
            Self::InOutBack => {
                let c2 = BACK_OVERSHOOT * 1.525;
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((c2 + 1.0) * 2.0 * t - c2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((c2 + 1.0) * (t * 2.0 - 2.0) + c2) + 2.0) / 2.0
                }
            }
            Self::InBounce => 1.0 - Self::OutBounce.apply(1.0 - t),
            Self::OutBounce => out_bounce(t),
            Self::InOutBounce => {
                if t < 0.5 {
                    (1.0 - out_bounce(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + out_bounce(2.0 * t - 1.0)) / 2.0
                }
            }
        }
    }

    /// Whether the curve is monotonic on `[0, 1]`.
    pub fn is_monotonic(self) -> bool {
        !matches!(
            self,
            Self::InElastic
                | Self::OutElastic
                | Self::InOutElastic
                | Self::InBack
                | Self::OutBack
                | Self::InOutBack
                | Self::InBounce
                | Self::OutBounce
                | Self::InOutBounce
        )
    }
}

fn out_bounce(mut t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        t -= 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        t -= 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        t -= 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;

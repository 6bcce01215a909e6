//! Damped-oscillator animation chasing a mutable target.

use serde::{Deserialize, Serialize};

/// Rest detection thresholds: displacement and speed.
const REST_THRESHOLD: f32 = 0.001;
const VELOCITY_THRESHOLD: f32 = 0.001;

/// A mass-spring-damper value that asymptotically approaches its target.
///
/// Integration is semi-implicit Euler, stable for all presets at frame
/// deltas up to ~33 ms. There is no terminal state; callers poll
/// [`Spring::value`] and may use [`Spring::is_at_rest`] to stop drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    stiffness: f32,
    damping: f32,
    mass: f32,
}

impl Spring {
    /// A spring at rest on `target` with explicit coefficients.
    ///
    /// Non-positive stiffness/damping/mass are clamped to small positive
    /// values.
    pub fn new(target: f32, stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            value: target,
            velocity: 0.0,
            target,
            stiffness: stiffness.max(f32::EPSILON),
            damping: damping.max(0.0),
            mass: mass.max(f32::EPSILON),
        }
    }

    /// Soft, slightly bouncy (stiffness 120, damping 14).
    pub fn gentle(target: f32) -> Self {
        Self::new(target, 120.0, 14.0, 1.0)
    }

    /// Pronounced overshoot (stiffness 180, damping 12).
    pub fn wobbly(target: f32) -> Self {
        Self::new(target, 180.0, 12.0, 1.0)
    }

    /// Quick settle (stiffness 210, damping 20).
    pub fn stiff(target: f32) -> Self {
        Self::new(target, 210.0, 20.0, 1.0)
    }

    /// Heavily damped crawl (stiffness 280, damping 60).
    pub fn slow(target: f32) -> Self {
        Self::new(target, 280.0, 60.0, 1.0)
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current velocity.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Current attractor.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Teleport: jump to `value` and zero the velocity.
    pub fn set_value(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
    }

    /// Move the attractor. The value keeps its momentum and starts
    /// chasing the new target.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Advance the oscillator by `dt` seconds (negative deltas are
    /// ignored) and return the new value.
    pub fn update(&mut self, dt: f32) -> f32 {
        let dt = dt.max(0.0);
        let displacement = self.value - self.target;
        let accel = (-self.stiffness * displacement - self.damping * self.velocity) / self.mass;
        self.velocity += accel * dt;
        self.value += self.velocity * dt;
        self.value
    }

    /// Whether the spring has effectively settled on its target.
    pub fn is_at_rest(&self) -> bool {
        (self.value - self.target).abs() < REST_THRESHOLD && self.velocity.abs() < VELOCITY_THRESHOLD
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;

//! Eased start-to-end animation over a fixed duration.

use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;

/// What happens when a tween's elapsed time reaches its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    /// Stop at the end value; `update` becomes a no-op until `restart`.
    #[default]
    Once,
    /// Jump back to the start and run again.
    Loop,
    /// Reverse direction each time an end is reached.
    PingPong,
}

/// An eased scalar animation: `start -> end` over `duration` seconds.
///
/// `value(t) = start + (end - start) * ease(clamp(elapsed / duration))`.
/// Time advances only through [`Tween::update`]; a finished `Once` tween
/// keeps returning `end` until [`Tween::restart`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    start: f32,
    end: f32,
    duration: f32,
    ease: Ease,
    repeat: Repeat,
    reverse: bool,
    elapsed: f32,
    forward: bool,
}

impl Tween {
    /// Create a tween. `duration` is clamped to a small positive minimum.
    pub fn new(start: f32, end: f32, duration: f32, ease: Ease) -> Self {
        Self {
            start,
            end,
            duration: duration.max(f32::EPSILON),
            ease,
            repeat: Repeat::Once,
            reverse: false,
            elapsed: 0.0,
            forward: true,
        }
    }

    /// Builder-style repeat mode.
    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Play the curve backwards (end to start).
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Start value.
    pub fn start(&self) -> f32 {
        self.start
    }

    /// End value.
    pub fn end(&self) -> f32 {
        self.end
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Replace the duration, keeping elapsed time.
    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration.max(f32::EPSILON);
    }

    /// Replace both endpoints without touching elapsed time.
    pub fn set_range(&mut self, start: f32, end: f32) {
        self.start = start;
        self.end = end;
    }

    /// Elapsed seconds, saturating at the duration for `Once`.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Whether a `Once` tween has reached its duration. Looping tweens
    /// are never finished.
    pub fn is_finished(&self) -> bool {
        self.repeat == Repeat::Once && self.elapsed >= self.duration
    }

    /// Advance by `dt` seconds (negative deltas are ignored) and return
    /// the current value. Updating a finished tween keeps returning the
    /// end value.
    pub fn update(&mut self, dt: f32) -> f32 {
        if self.is_finished() {
            return self.value();
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            match self.repeat {
                Repeat::Once => self.elapsed = self.duration,
                Repeat::Loop => self.elapsed %= self.duration,
                Repeat::PingPong => {
                    self.forward = !self.forward;
                    self.elapsed %= self.duration;
                }
            }
        }
        self.value()
    }

    /// The current value without advancing time.
    pub fn value(&self) -> f32 {
        let mut eased = self.ease.apply(self.progress());
        if self.reverse || (!self.forward && self.repeat == Repeat::PingPong) {
            eased = 1.0 - eased;
        }
        self.start + (self.end - self.start) * eased
    }

    /// Rewind to the beginning and clear the finished state.
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.forward = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;

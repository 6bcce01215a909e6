//! Time-driven value producers: easing curves, tweens and springs.
//!
//! Everything here advances only through externally supplied delta time;
//! nothing samples a wall clock.

mod ease;
mod spring;
mod tween;

pub use ease::Ease;
pub use spring::Spring;
pub use tween::{Repeat, Tween};

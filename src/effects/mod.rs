//! Stateless surface transforms: blur, blend arithmetic, gradients, noise,
//! distortion and color adjustments.

pub mod blur;
pub mod composite;
pub mod fx;

//! The compositing scene model: materials, layers and the layer stack.

pub mod layer;
pub mod material;
pub mod stack;

//! Lucent is a low-level 2D compositing substrate for interactive surfaces.
//!
//! The building blocks are deliberately small and explicit:
//!
//! - Draw into a [`Surface`] (an owned RGBA8 pixel buffer with shape primitives)
//! - Arrange surfaces as layers in a [`LayerStack`] with opacity, blend mode and
//!   [`Material`] (solid or frosted glass)
//! - Composite the stack through a [`render::RenderBackend`] (CPU by default,
//!   wgpu behind the `gpu` feature) and hand the result to your presenter
//! - Drive visual state with [`animation::Tween`] and [`animation::Spring`]
//! - Route input through [`input::InputDispatcher`] into the stateful widgets
//!   ([`widget::Button`], [`widget::Slider`], [`widget::TextField`])
//!
//! Windowing, event polling and text shaping stay outside: the frame loop feeds
//! this crate delta time and [`input::InputEvent`]s, and text-bearing widgets
//! measure through the [`widget::TextMeasure`] oracle.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod foundation;

/// Stateless surface transforms: blur, blends, gradients, noise, ripple.
pub mod effects;
/// Animation primitives: easing curves, tweens, springs.
pub mod animation;
/// Input events, key state and hotkey matching.
pub mod input;
/// Rendering backends and their settings.
pub mod render;
/// Layers, materials and the compositing stack.
pub mod scene;
/// The pixel-buffer type and its drawing primitives.
pub mod surface;
/// Stateful interactive widgets built on the substrate.
pub mod widget;

pub use crate::foundation::core::{Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{LucentError, LucentResult};

pub use crate::effects::blur::{blur, blur_region};
pub use crate::effects::composite::BlendMode;
pub use crate::render::backend::{BackendKind, RenderSettings, create_backend};
pub use crate::scene::layer::{Layer, LayerId};
pub use crate::scene::material::Material;
pub use crate::scene::stack::LayerStack;
pub use crate::surface::Surface;

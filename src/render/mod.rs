//! Compositing backends.
//!
//! [`backend::RenderBackend`] is the seam between the scene model and the
//! pixels: the CPU backend rasterizes everything in process, the optional
//! wgpu backend (feature `gpu`) runs the same compositing algorithm on a
//! device queue with an explicit synchronization point before returning.

pub mod backend;
pub(crate) mod cpu;
#[cfg(feature = "gpu")]
#[cfg_attr(docsrs, doc(cfg(feature = "gpu")))]
pub(crate) mod gpu;

pub use backend::{BackendKind, RenderBackend, RenderSettings, SceneRef, create_backend};

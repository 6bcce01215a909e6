//! The backend seam: trait, kinds, settings and the factory.

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::LucentResult;
use crate::scene::layer::Layer;
use crate::surface::Surface;

/// Everything a backend needs to composite one frame, borrowed from the
/// owning [`LayerStack`](crate::LayerStack).
#[derive(Debug)]
pub struct SceneRef<'a> {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Clear color painted before any layer.
    pub background: Rgba8,
    /// Layers in paint order (bottom first).
    pub layers: &'a [Layer],
}

/// A compositing backend.
///
/// Backends are driven strictly sequentially within a frame and must
/// return a fully resolved surface: any internal asynchrony (device
/// queues) is synchronized before `composite` returns.
pub trait RenderBackend: Send + std::fmt::Debug {
    /// Which kind of backend this is.
    fn kind(&self) -> BackendKind;

    /// Composite the scene into a fresh output surface.
    fn composite(&mut self, scene: &SceneRef<'_>) -> LucentResult<Surface>;
}

/// Backend selector. `Cpu` is always available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// In-process rasterizer.
    #[default]
    Cpu,
    /// wgpu-accelerated compositor (requires the `gpu` feature and a
    /// usable adapter).
    Gpu,
}

/// Backend construction settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Prefer a low-power adapter when creating the GPU backend. Ignored
    /// by the CPU backend.
    pub low_power_gpu: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { low_power_gpu: false }
    }
}

/// Create a backend of the requested kind.
///
/// Errors surface at selection time: requesting [`BackendKind::Gpu`]
/// without the `gpu` feature, or without a usable adapter/device, returns
/// [`LucentError::Backend`](crate::LucentError::Backend). Callers are
/// expected to retry with [`BackendKind::Cpu`]; nothing falls back
/// implicitly.
pub fn create_backend(kind: BackendKind, settings: RenderSettings) -> LucentResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(settings))),
        #[cfg(feature = "gpu")]
        BackendKind::Gpu => Ok(Box::new(crate::render::gpu::GpuBackend::new(settings)?)),
        #[cfg(not(feature = "gpu"))]
        BackendKind::Gpu => Err(crate::foundation::error::LucentError::backend(
            "gpu backend requires the `gpu` feature",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;

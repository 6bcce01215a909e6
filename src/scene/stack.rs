//! Ordered collection of layers composited into one output surface.

use crate::foundation::core::Rgba8;
use crate::foundation::error::LucentResult;
use crate::render::backend::{BackendKind, RenderBackend, RenderSettings, SceneRef, create_backend};
use crate::scene::layer::{Layer, LayerId};
use crate::surface::Surface;

/// An ordered stack of layers plus the backend that composites them.
///
/// Vec order is paint order: index 0 is the bottom, new layers append at
/// the top. Reordering is explicit; nothing else affects paint order.
/// The backend is chosen at construction (a constructor parameter, not
/// ambient state) and owns any device resources.
pub struct LayerStack {
    width: u32,
    height: u32,
    background: Rgba8,
    layers: Vec<Layer>,
    next_id: u64,
    backend: Box<dyn RenderBackend>,
}

impl LayerStack {
    /// Create an empty stack composited on the CPU.
    pub fn new(width: u32, height: u32) -> LucentResult<Self> {
        Self::with_backend(width, height, BackendKind::Cpu, RenderSettings::default())
    }

    /// Create an empty stack with an explicit backend choice.
    ///
    /// Errors if the backend cannot be created (for example `Gpu` without
    /// a usable device); callers fall back to [`BackendKind::Cpu`]
    /// explicitly.
    pub fn with_backend(
        width: u32,
        height: u32,
        kind: BackendKind,
        settings: RenderSettings,
    ) -> LucentResult<Self> {
        // Validate dimensions the same way a surface would.
        Surface::new(width, height)?;
        Ok(Self {
            width,
            height,
            background: Rgba8::TRANSPARENT,
            layers: Vec::new(),
            next_id: 0,
            backend: create_backend(kind, settings)?,
        })
    }

    /// Output width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The color the output is cleared to before layers paint.
    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Set the background color.
    pub fn set_background(&mut self, color: Rgba8) {
        self.background = color;
    }

    /// Number of layers in the stack.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Layers in paint order (bottom first).
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn alloc_id(&mut self) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create a layer with a fresh transparent surface, appended at the top.
    pub fn add_layer(&mut self, width: u32, height: u32) -> LucentResult<LayerId> {
        let surface = Surface::new(width, height)?;
        Ok(self.add_surface(surface))
    }

    /// Wrap an externally built surface in a new top layer.
    ///
    /// The stack takes ownership; [`LayerStack::remove_layer`] gives the
    /// surface back.
    pub fn add_surface(&mut self, surface: Surface) -> LayerId {
        let id = self.alloc_id();
        self.layers.push(Layer::new(id, surface));
        id
    }

    /// Remove a layer, returning it (and its surface) to the caller.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        let idx = self.index_of(id)?;
        Some(self.layers.remove(idx))
    }

    /// Paint-order index of a layer.
    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    /// Borrow a layer by id.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Mutably borrow a layer by id.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// Move a layer to the top of the paint order.
    pub fn move_layer_to_top(&mut self, id: LayerId) {
        if let Some(idx) = self.index_of(id) {
            let layer = self.layers.remove(idx);
            self.layers.push(layer);
        }
    }

    /// Move a layer to the bottom of the paint order.
    pub fn move_layer_to_bottom(&mut self, id: LayerId) {
        if let Some(idx) = self.index_of(id) {
            let layer = self.layers.remove(idx);
            self.layers.insert(0, layer);
        }
    }

    /// Swap a layer one step toward the top.
    pub fn move_layer_up(&mut self, id: LayerId) {
        if let Some(idx) = self.index_of(id)
            && idx + 1 < self.layers.len()
        {
            self.layers.swap(idx, idx + 1);
        }
    }

    /// Swap a layer one step toward the bottom.
    pub fn move_layer_down(&mut self, id: LayerId) {
        if let Some(idx) = self.index_of(id)
            && idx > 0
        {
            self.layers.swap(idx, idx - 1);
        }
    }

    /// Reinsert a layer at an arbitrary paint-order index (clamped).
    pub fn set_layer_index(&mut self, id: LayerId, index: usize) {
        if let Some(idx) = self.index_of(id) {
            let layer = self.layers.remove(idx);
            let index = index.min(self.layers.len());
            self.layers.insert(index, layer);
        }
    }

    /// Topmost visible layer whose content at stack point `(x, y)` is
    /// opaque enough to count as a hit (alpha > 10).
    pub fn layer_at(&self, x: i32, y: i32) -> Option<LayerId> {
        for layer in self.layers.iter().rev() {
            if !layer.visible || layer.opacity() <= 0.0 {
                continue;
            }
            let (lx, ly, lw, lh) = layer.scaled_bounds();
            if lw == 0 || lh == 0 || x < lx || y < ly || x >= lx + lw as i32 || y >= ly + lh as i32 {
                continue;
            }
            let u = (x - lx) as f32 / lw as f32 * layer.surface().width() as f32;
            let v = (y - ly) as f32 / lh as f32 * layer.surface().height() as f32;
            if layer.surface().get_pixel(u as i32, v as i32).a > 10 {
                return Some(layer.id);
            }
        }
        None
    }

    /// Composite the stack into a fresh output surface.
    ///
    /// Deterministic in the layers' order, position, opacity, blend mode
    /// and material; layers themselves are never mutated. Repeated calls
    /// with unchanged inputs produce identical output.
    pub fn composite(&mut self) -> LucentResult<Surface> {
        let scene = SceneRef {
            width: self.width,
            height: self.height,
            background: self.background,
            layers: &self.layers,
        };
        self.backend.composite(&scene)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stack.rs"]
mod tests;

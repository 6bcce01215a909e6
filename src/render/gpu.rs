//! wgpu compositing backend (feature `gpu`).
//!
//! Layers are rasterized on the CPU into their surfaces as usual; this
//! backend uploads them as textures and runs the per-layer blend and the
//! frosted-glass blur on the device, ping-ponging between two
//! canvas-sized targets. `composite` blocks on readback, so the result is
//! fully resolved when it returns, exactly like the software path.

use crate::foundation::error::{LucentError, LucentResult};
use crate::render::backend::{BackendKind, RenderBackend, RenderSettings, SceneRef};
use crate::render::cpu::{GLASS_ALPHA_HI, GLASS_ALPHA_LO};
use crate::scene::layer::Layer;
use crate::surface::Surface;

const COMPOSITE_PARAMS_SIZE: u64 = 48;
const BLUR_PARAMS_SIZE: u64 = 16;

struct Target {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

struct FrameTargets {
    width: u32,
    height: u32,
    // Ping-pong accumulation pair plus the blur scratch pair.
    accum: [Target; 2],
    scratch: [Target; 2],
    readback: wgpu::Buffer,
    bytes_per_row: u32,
}

/// Device-accelerated compositor.
#[derive(Debug)]
pub(crate) struct GpuBackend {
    #[allow(dead_code)]
    settings: RenderSettings,
    device: wgpu::Device,
    queue: wgpu::Queue,
    sampler: wgpu::Sampler,
    composite_pipeline: wgpu::RenderPipeline,
    composite_bgl: wgpu::BindGroupLayout,
    composite_params: wgpu::Buffer,
    blur_pipeline: wgpu::RenderPipeline,
    blur_bgl: wgpu::BindGroupLayout,
    blur_params: wgpu::Buffer,
    targets: Option<FrameTargets>,
}

impl GpuBackend {
    /// Acquire an adapter and device; fails if none is usable.
    pub(crate) fn new(settings: RenderSettings) -> LucentResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let power_preference = if settings.low_power_gpu {
            wgpu::PowerPreference::LowPower
        } else {
            wgpu::PowerPreference::HighPerformance
        };
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .map_err(|e| match e {
            wgpu::RequestAdapterError::NotFound { .. } => {
                LucentError::backend("no gpu adapter available")
            }
            other => LucentError::backend(format!("wgpu request_adapter failed: {other:?}")),
        })?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            experimental_features: wgpu::ExperimentalFeatures::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }))
        .map_err(|e| LucentError::backend(format!("wgpu request_device failed: {e:?}")))?;

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("lucent_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let composite_params = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lucent_composite_params"),
            size: COMPOSITE_PARAMS_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let blur_params = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lucent_blur_params"),
            size: BLUR_PARAMS_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let composite_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lucent_composite_bgl"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                texture_entry(2),
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                uniform_entry(4, COMPOSITE_PARAMS_SIZE),
            ],
        });
        let blur_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lucent_blur_bgl"),
            entries: &[
                texture_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                uniform_entry(2, BLUR_PARAMS_SIZE),
            ],
        });

        let composite_pipeline = build_pipeline(
            &device,
            "lucent_composite",
            include_str!("shaders/composite.wgsl"),
            &composite_bgl,
        );
        let blur_pipeline = build_pipeline(
            &device,
            "lucent_blur",
            include_str!("shaders/blur.wgsl"),
            &blur_bgl,
        );

        Ok(Self {
            settings,
            device,
            queue,
            sampler,
            composite_pipeline,
            composite_bgl,
            composite_params,
            blur_pipeline,
            blur_bgl,
            blur_params,
            targets: None,
        })
    }

    fn ensure_targets(&mut self, width: u32, height: u32) -> LucentResult<()> {
        if let Some(t) = &self.targets
            && t.width == width
            && t.height == height
        {
            return Ok(());
        }

        let make = |label: &str| {
            let texture = self.device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING
                    | wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::COPY_SRC,
                view_formats: &[],
            });
            let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
            Target { texture, view }
        };

        let bytes_per_row_unpadded = width
            .checked_mul(4)
            .ok_or_else(|| LucentError::backend("render target width overflow"))?;
        let bytes_per_row = align_to(bytes_per_row_unpadded, wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);
        let buffer_size = (bytes_per_row as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| LucentError::backend("readback buffer size overflow"))?;
        let readback = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lucent_readback"),
            size: buffer_size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        self.targets = Some(FrameTargets {
            width,
            height,
            accum: [make("lucent_accum_a"), make("lucent_accum_b")],
            scratch: [make("lucent_scratch_a"), make("lucent_scratch_b")],
            readback,
            bytes_per_row,
        });
        Ok(())
    }

    fn upload_layer(&self, layer: &Layer) -> wgpu::Texture {
        let surface = layer.surface();
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("lucent_layer"),
            size: wgpu::Extent3d {
                width: surface.width(),
                height: surface.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            surface.data(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(surface.width() * 4),
                rows_per_image: Some(surface.height()),
            },
            wgpu::Extent3d {
                width: surface.width(),
                height: surface.height(),
                depth_or_array_layers: 1,
            },
        );
        texture
    }

    /// One fullscreen pass into `target`; `bind` is prepared by the
    /// caller against the pipeline's layout.
    fn run_pass(&self, pipeline: &wgpu::RenderPipeline, bind: &wgpu::BindGroup, target: &wgpu::TextureView) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("lucent_pass") });
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("lucent_rp"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rp.set_pipeline(pipeline);
            rp.set_bind_group(0, bind, &[]);
            rp.draw(0..3, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
    }

    /// Two-pass Gaussian blur of `src` into `scratch[1]`.
    fn blur_into_scratch(&self, src: &wgpu::TextureView, targets: &FrameTargets, radius: f32) {
        for (i, (view, dir)) in [(src, [1.0f32, 0.0]), (&targets.scratch[0].view, [0.0, 1.0])]
            .into_iter()
            .enumerate()
        {
            let mut params = [0u8; BLUR_PARAMS_SIZE as usize];
            params[0..4].copy_from_slice(&dir[0].to_le_bytes());
            params[4..8].copy_from_slice(&dir[1].to_le_bytes());
            params[8..12].copy_from_slice(&radius.to_le_bytes());
            self.queue.write_buffer(&self.blur_params, 0, &params);

            let bind = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("lucent_blur_bg"),
                layout: &self.blur_bgl,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&self.sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: self.blur_params.as_entire_binding(),
                    },
                ],
            });
            self.run_pass(&self.blur_pipeline, &bind, &targets.scratch[i].view);
        }
    }

    fn clear_target(&self, view: &wgpu::TextureView, color: wgpu::Color) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("lucent_clear") });
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lucent_clear_rp"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        self.queue.submit(Some(encoder.finish()));
    }

    fn read_back(&self, targets: &FrameTargets, src: &wgpu::Texture) -> LucentResult<Surface> {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("lucent_readback") });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: src,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &targets.readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(targets.bytes_per_row),
                    rows_per_image: Some(targets.height),
                },
            },
            wgpu::Extent3d {
                width: targets.width,
                height: targets.height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(Some(encoder.finish()));

        let buffer_slice = targets.readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |res| {
            let _ = tx.send(res);
        });
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| LucentError::backend(format!("wgpu poll failed: {e:?}")))?;
        rx.recv()
            .map_err(|_| LucentError::backend("readback channel closed"))?
            .map_err(|e| LucentError::backend(format!("readback map failed: {e:?}")))?;

        let mapped = buffer_slice.get_mapped_range();
        let row_bytes = targets.width as usize * 4;
        let padded = targets.bytes_per_row as usize;
        let mut out = Vec::with_capacity(row_bytes * targets.height as usize);
        for row in 0..targets.height as usize {
            let start = row * padded;
            out.extend_from_slice(&mapped[start..start + row_bytes]);
        }
        drop(mapped);
        targets.readback.unmap();

        Surface::from_rgba8(targets.width, targets.height, out)
    }
}

impl RenderBackend for GpuBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Gpu
    }

    #[tracing::instrument(skip(self, scene), fields(layers = scene.layers.len()))]
    fn composite(&mut self, scene: &SceneRef<'_>) -> LucentResult<Surface> {
        // Validates dimensions the same way the output surface will.
        Surface::new(scene.width, scene.height)?;
        self.ensure_targets(scene.width, scene.height)?;
        let targets = self
            .targets
            .take()
            .ok_or_else(|| LucentError::backend("gpu targets not initialized"))?;

        let bg = scene.background;
        self.clear_target(
            &targets.accum[0].view,
            wgpu::Color {
                r: f64::from(bg.r) / 255.0,
                g: f64::from(bg.g) / 255.0,
                b: f64::from(bg.b) / 255.0,
                a: f64::from(bg.a) / 255.0,
            },
        );

        let mut cur = 0usize;
        for layer in scene.layers {
            if !layer.visible || layer.opacity() <= 0.0 {
                continue;
            }
            let (lx, ly, lw, lh) = layer.scaled_bounds();
            if lw == 0 || lh == 0 {
                continue;
            }

            let radius = layer.material.blur_radius();
            let frosted = radius > 0.0;
            if frosted {
                self.blur_into_scratch(&targets.accum[cur].view, &targets, radius);
            }

            let layer_tex = self.upload_layer(layer);
            let layer_view = layer_tex.create_view(&wgpu::TextureViewDescriptor::default());

            let params = composite_params(scene, layer, lx, ly, lw, lh, frosted);
            self.queue.write_buffer(&self.composite_params, 0, &params);

            let blur_view = if frosted { &targets.scratch[1].view } else { &targets.accum[cur].view };
            let bind = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("lucent_composite_bg"),
                layout: &self.composite_bgl,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&targets.accum[cur].view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(blur_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(&layer_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: wgpu::BindingResource::Sampler(&self.sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 4,
                        resource: self.composite_params.as_entire_binding(),
                    },
                ],
            });
            self.run_pass(&self.composite_pipeline, &bind, &targets.accum[1 - cur].view);
            cur = 1 - cur;
        }

        let result = self.read_back(&targets, &targets.accum[cur].texture);
        self.targets = Some(targets);
        result
    }
}

fn composite_params(
    scene: &SceneRef<'_>,
    layer: &Layer,
    lx: i32,
    ly: i32,
    lw: u32,
    lh: u32,
    frosted: bool,
) -> [u8; COMPOSITE_PARAMS_SIZE as usize] {
    let fields: [f32; 6] = [
        scene.width as f32,
        scene.height as f32,
        lx as f32,
        ly as f32,
        lw as f32,
        lh as f32,
    ];
    let mut params = [0u8; COMPOSITE_PARAMS_SIZE as usize];
    for (i, v) in fields.iter().enumerate() {
        params[i * 4..i * 4 + 4].copy_from_slice(&v.to_le_bytes());
    }
    params[24..28].copy_from_slice(&blend_mode_index(layer).to_le_bytes());
    params[28..32].copy_from_slice(&u32::from(frosted).to_le_bytes());
    params[32..36].copy_from_slice(&layer.opacity().to_le_bytes());
    params[36..40].copy_from_slice(&GLASS_ALPHA_LO.to_le_bytes());
    params[40..44].copy_from_slice(&GLASS_ALPHA_HI.to_le_bytes());
    params
}

fn blend_mode_index(layer: &Layer) -> u32 {
    use crate::effects::composite::BlendMode;
    match layer.blend {
        BlendMode::Normal => 0,
        BlendMode::Add => 1,
        BlendMode::Subtract => 2,
        BlendMode::Multiply => 3,
        BlendMode::Screen => 4,
        BlendMode::Overlay => 5,
        BlendMode::Difference => 6,
        BlendMode::ColorDodge => 7,
        BlendMode::ColorBurn => 8,
    }
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn uniform_entry(binding: u32, size: u64) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: std::num::NonZeroU64::new(size),
        },
        count: None,
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    label: &str,
    source: &str,
    bgl: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[bgl],
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            buffers: &[],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: wgpu::TextureFormat::Rgba8Unorm,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn align_to(value: u32, alignment: u32) -> u32 {
    let mask = alignment - 1;
    (value + mask) & !mask
}

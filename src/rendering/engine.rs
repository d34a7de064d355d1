use std::sync::Arc;

use bytemuck::Zeroable;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::rendering::shaders::{FLOOR_FRAGMENT_ENTRY, SPRITE_FRAGMENT_ENTRY, SPRITE_SHADER, VERTEX_ENTRY};
use crate::rendering::uniforms::{LayoutUniforms, SpriteUniforms};
use crate::utils::logging::{handle_wgpu_result, log_adapter_info};

/// Startup failures of the GPU path. Nothing is drawn when any of these occur.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create window surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no graphics adapter compatible with the window surface")]
    NoAdapter,
    #[error("failed to open graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    SurfaceFormat,
}

/// Owns the wgpu objects for one window: the floor backdrop pass and the
/// alpha-blended raymarched sprite on top of it.
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    floor_pipeline: wgpu::RenderPipeline,
    sprite_pipeline: wgpu::RenderPipeline,
    sprite_buffer: wgpu::Buffer,
    layout_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl RenderEngine {
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        info!("Initializing WGPU render engine");

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = handle_wgpu_result(instance.create_surface(window.clone()), "create_surface")?;
        info!("WGPU surface created successfully");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;
        log_adapter_info(&adapter);

        let (device, queue) = handle_wgpu_result(
            adapter
                .request_device(
                    &wgpu::DeviceDescriptor {
                        label: Some("Sprite Device"),
                        required_features: wgpu::Features::empty(),
                        required_limits: wgpu::Limits::default(),
                        memory_hints: wgpu::MemoryHints::default(),
                    },
                    None,
                )
                .await,
            "request_device",
        )?;
        info!("WGPU device and queue created successfully");

        // Colors are authored for a plain 8-bit target, so prefer a non-sRGB format.
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(RenderError::SurfaceFormat)?;

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        info!("Configuring WGPU surface with format: {:?}", config.format);
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(SPRITE_SHADER.into()),
        });

        let sprite_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Uniform Buffer"),
            contents: bytemuck::bytes_of(&SpriteUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let layout_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Layout Uniform Buffer"),
            contents: bytemuck::bytes_of(&LayoutUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_entry(0), uniform_entry(1)],
            label: Some("sprite_bind_group_layout"),
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: sprite_buffer.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: layout_buffer.as_entire_binding() },
            ],
            label: Some("sprite_bind_group"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let floor_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            FLOOR_FRAGMENT_ENTRY,
            wgpu::BlendState::REPLACE,
        );
        let sprite_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            SPRITE_FRAGMENT_ENTRY,
            wgpu::BlendState::ALPHA_BLENDING,
        );
        info!("Render pipelines created successfully");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            floor_pipeline,
            sprite_pipeline,
            sprite_buffer,
            layout_buffer,
            bind_group,
        })
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            debug!("Resizing surface to {}x{}", new_size.width, new_size.height);
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload this frame's uniforms, draw the floor then blend the sprite over it.
    pub fn render_frame(&mut self, sprite: &SpriteUniforms, layout: &LayoutUniforms) {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring and skipping frame");
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Surface out of memory, skipping frame");
                return;
            }
            Err(e) => {
                error!("Surface error: {:?}, skipping frame", e);
                return;
            }
        };

        self.queue.write_buffer(&self.sprite_buffer, 0, bytemuck::bytes_of(sprite));
        self.queue.write_buffer(&self.layout_buffer, 0, bytemuck::bytes_of(layout));

        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Sprite Encoder"),
        });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_bind_group(0, &self.bind_group, &[]);

            render_pass.set_pipeline(&self.floor_pipeline);
            render_pass.draw(0..3, 0..1);

            render_pass.set_pipeline(&self.sprite_pipeline);
            render_pass.draw(0..3, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    fragment_entry: &str,
    blend: wgpu::BlendState,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(fragment_entry),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(VERTEX_ENTRY),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fragment_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

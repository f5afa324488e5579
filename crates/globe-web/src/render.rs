//! wgpu renderer for the globe body and marker quads.

mod helpers;

use crate::atlas::GlyphAtlas;
use globe_core::{
    FrameView, GlobeError, MarkerInstance, Renderer, SphereMesh, Viewport, GLOBE_WGSL, MARKER_WGSL,
};
use helpers::*;
use web_sys as web;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    eye: [f32; 4],
    light: [f32; 4],
    params: [f32; 4],
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    view_format: wgpu::TextureFormat,
    canvas: web::HtmlCanvasElement,

    globe_pipeline: wgpu::RenderPipeline,
    globe_vertices: wgpu::Buffer,
    globe_indices: wgpu::Buffer,
    globe_index_count: u32,

    marker_pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    atlas_bind_group: wgpu::BindGroup,
    atlas_grid: [f32; 2],

    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
    released: bool,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        mesh: &SphereMesh,
        atlas: &GlyphAtlas,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // shaders output linear color; render through an sRGB view when the
        // canvas format itself is not sRGB
        let view_format = format.add_srgb_suffix();
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: if view_format != format {
                vec![view_format]
            } else {
                vec![]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?} (view {:?})", width, height, format, view_format);

        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let atlas_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("atlas_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let (_atlas_tex, atlas_view) = create_atlas_texture(
            &device,
            &queue,
            atlas.layout.width(),
            atlas.layout.height(),
            &atlas.rgba,
        );
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let atlas_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("atlas_bg"),
            layout: &atlas_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&linear_sampler),
                },
            ],
        });

        let globe_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("globe_shader"),
            source: wgpu::ShaderSource::Wgsl(GLOBE_WGSL.into()),
        });
        let globe_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("globe_pl"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });
        let globe_pipeline = make_pipeline(
            &device,
            "globe_pipeline",
            &globe_pl,
            &globe_shader,
            &[sphere_vertex_layout()],
            view_format,
            None,
            true,
            Some(wgpu::Face::Back),
        );

        let marker_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("marker_shader"),
            source: wgpu::ShaderSource::Wgsl(MARKER_WGSL.into()),
        });
        let marker_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("marker_pl"),
            bind_group_layouts: &[&globals_bgl, &atlas_bgl],
            push_constant_ranges: &[],
        });
        let marker_pipeline = make_pipeline(
            &device,
            "marker_pipeline",
            &marker_pl,
            &marker_shader,
            &[marker_instance_layout()],
            view_format,
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
            None,
        );

        let globe_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globe_vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let globe_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globe_indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_capacity = atlas.layout.columns as usize * atlas.layout.rows as usize;
        let instance_buffer = create_instance_buffer(&device, instance_capacity);
        let (_depth_tex, depth_view) = create_depth_texture(&device, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            canvas: canvas.clone(),
            globe_pipeline,
            globe_vertices,
            globe_indices,
            globe_index_count: mesh.indices.len() as u32,
            marker_pipeline,
            instance_buffer,
            instance_capacity,
            globals_buffer,
            globals_bind_group,
            atlas_bind_group,
            atlas_grid: [atlas.layout.columns as f32, atlas.layout.rows as f32],
            depth_view,
            width,
            height,
            released: false,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            let (_depth_tex, depth_view) = create_depth_texture(&self.device, width, height);
            self.depth_view = depth_view;
            log::debug!("[gpu] resized to {}x{}", width, height);
        }
    }

    fn upload_instances(&mut self, markers: &[MarkerInstance]) {
        if markers.len() > self.instance_capacity {
            self.instance_capacity = markers.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(&self.device, self.instance_capacity);
        }
        if !markers.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(markers));
        }
    }

    fn draw(&mut self, frame: &FrameView<'_>) -> Result<(), wgpu::SurfaceError> {
        let lights = frame.lights;
        let globals = Globals {
            view_proj: frame.view_proj.to_cols_array_2d(),
            model: frame.globe_model.to_cols_array_2d(),
            eye: frame.eye.extend(1.0).to_array(),
            light: [
                lights.point_position[0],
                lights.point_position[1],
                lights.point_position[2],
                lights.point_intensity,
            ],
            params: [
                lights.ambient_intensity,
                self.atlas_grid[0],
                self.atlas_grid[1],
                0.0,
            ],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        self.upload_instances(frame.markers);

        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("globe_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            rpass.set_pipeline(&self.globe_pipeline);
            rpass.set_vertex_buffer(0, self.globe_vertices.slice(..));
            rpass.set_index_buffer(self.globe_indices.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.globe_index_count, 0, 0..1);

            if !frame.markers.is_empty() {
                rpass.set_pipeline(&self.marker_pipeline);
                rpass.set_bind_group(1, &self.atlas_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
                rpass.draw(0..6, 0..frame.markers.len() as u32);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("marker_instances"),
        size: (capacity.max(1) * std::mem::size_of::<MarkerInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl Renderer for GpuState {
    fn resize(&mut self, viewport: &Viewport) {
        let (w, h) = viewport.physical_size();
        self.resize_if_needed(w, h);
    }

    fn render(&mut self, frame: &FrameView<'_>) -> globe_core::Result<()> {
        if self.released {
            return Ok(());
        }
        match self.draw(frame) {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // reconfigure and try again next frame
                self.surface.configure(&self.device, &self.config);
                Ok(())
            }
            Err(e) => Err(GlobeError::Render(e.to_string())),
        }
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.instance_buffer.destroy();
        self.globe_vertices.destroy();
        self.globe_indices.destroy();
        self.device.destroy();
        log::info!("[gpu] released");
    }
}

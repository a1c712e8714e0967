//! wgpu point-sprite renderer shared by the web and native frontends.
//!
//! Two layers go through the same pipeline: the static starfield, drawn
//! first with an identity model matrix, and the particle cloud with the
//! frame's rotation. The caller owns the device and surface.

use crate::color::Rgb;
use crate::constants::*;
use crate::engine::{FrameReport, ParticleEngine};
use crate::gpu::{model_matrix, ParticleInstance, SceneUniforms, QUAD_CORNERS};
use crate::state::OrbitCamera;
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

struct PointLayer {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
}

impl PointLayer {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        capacity: usize,
    ) -> Self {
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label}_uniforms")),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label}_bg")),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let capacity = capacity.max(1);
        Self {
            uniform_buffer,
            bind_group,
            instance_buffer: instance_buffer(device, label, capacity),
            capacity,
            len: 0,
        }
    }

    fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        instances: &[ParticleInstance],
    ) {
        if instances.len() > self.capacity {
            self.capacity = instances.len().next_power_of_two();
            self.instance_buffer = instance_buffer(device, label, self.capacity);
            log::debug!("[render] grew {} buffer to {} instances", label, self.capacity);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        }
        self.len = instances.len() as u32;
    }
}

fn instance_buffer(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("{label}_instances")),
        size: (std::mem::size_of::<ParticleInstance>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub struct PointRenderer {
    pipeline: wgpu::RenderPipeline,
    quad_vb: wgpu::Buffer,
    stars: PointLayer,
    cloud: PointLayer,
    instances: Vec<ParticleInstance>,
    srgb_target: bool,
}

impl PointRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        stars: &[Vec3],
        particle_capacity: usize,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles"),
            source: wgpu::ShaderSource::Wgsl(crate::PARTICLES_WGSL.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particles_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let vertex_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: sprite centres
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 1,
                }],
            },
        ];

        let additive = wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        };
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("particles_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState {
                        color: additive,
                        alpha: additive,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let mut star_layer = PointLayer::new(device, &bind_group_layout, "stars", stars.len());
        let star_instances: Vec<ParticleInstance> =
            stars.iter().copied().map(ParticleInstance::from).collect();
        star_layer.upload(device, queue, "stars", &star_instances);

        Self {
            pipeline,
            quad_vb,
            stars: star_layer,
            cloud: PointLayer::new(device, &bind_group_layout, "cloud", particle_capacity),
            instances: vec![ParticleInstance::default(); particle_capacity],
            srgb_target: format.is_srgb(),
        }
    }

    /// Keep the CPU buffer exactly `count` long so no stale instances are drawn.
    pub fn set_particle_count(&mut self, count: usize) {
        self.instances.resize(count, ParticleInstance::default());
    }

    /// Run one engine frame straight into the instance buffer, draw it to the
    /// surface's next texture and present.
    pub fn render_frame(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface: &wgpu::Surface<'_>,
        engine: &mut ParticleEngine,
        camera: &OrbitCamera,
        time: f32,
    ) -> Result<FrameReport, wgpu::SurfaceError> {
        self.set_particle_count(engine.particle_count());
        let report = engine.frame(time, &mut self.instances);
        let frame = surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.prepare(device, queue, camera, &report, engine.color());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });
        self.draw(&mut encoder, &view);
        queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(report)
    }

    /// Upload this frame's positions and uniforms.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        camera: &OrbitCamera,
        report: &FrameReport,
        color: Rgb,
    ) {
        self.cloud.upload(device, queue, "cloud", &self.instances);
        let rgb = self.encode(color);
        let cloud = SceneUniforms::new(
            camera,
            model_matrix(report.rotation),
            rgb,
            POINT_OPACITY,
            POINT_SIZE,
        );
        queue.write_buffer(&self.cloud.uniform_buffer, 0, bytemuck::bytes_of(&cloud));
        let stars = SceneUniforms::new(camera, Mat4::IDENTITY, [1.0; 3], STAR_OPACITY, STAR_SIZE);
        queue.write_buffer(&self.stars.uniform_buffer, 0, bytemuck::bytes_of(&stars));
    }

    /// Clear `target` to the scene background and draw stars then cloud.
    pub fn draw(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("particles_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color()),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
        for layer in [&self.stars, &self.cloud] {
            if layer.len == 0 {
                continue;
            }
            rpass.set_bind_group(0, &layer.bind_group, &[]);
            rpass.set_vertex_buffer(1, layer.instance_buffer.slice(..));
            rpass.draw(0..QUAD_CORNERS.len() as u32, 0..layer.len);
        }
    }

    fn encode(&self, color: Rgb) -> [f32; 3] {
        if self.srgb_target {
            color.to_linear()
        } else {
            color.to_srgb_f32()
        }
    }

    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b] = if self.srgb_target {
            let byte = |c: f32| (c * 255.0).round() as u8;
            Rgb::new(
                byte(BACKGROUND_RGB[0]),
                byte(BACKGROUND_RGB[1]),
                byte(BACKGROUND_RGB[2]),
            )
            .to_linear()
        } else {
            BACKGROUND_RGB
        };
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        }
    }
}

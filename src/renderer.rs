//! The forward renderer: one colour pass drawing scene items, skybox and HUD.
//!
//! Frame uniforms (camera, lights, fog) are written once per frame before the
//! pass. Every item is one indexed draw in insertion order, addressed as a
//! single-instance slice of a shared instance buffer that holds the per-item
//! model-view matrices.

use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use crate::camera::{Camera, CameraUniform};
use crate::context::Context;
use crate::data_structures::fog::FogUniform;
use crate::data_structures::light::LightsUniform;
use crate::data_structures::texture;
use crate::hud::Hud;
use crate::pipelines::{
    mk_frame_layout, mk_hud_pipeline, mk_material_layout, mk_scene_pipeline, mk_skybox_layout,
    mk_skybox_pipeline, HudVertex, ItemInstance,
};
use crate::scene::Scene;
use crate::settings::SamplingUniform;
use crate::skybox::SkyUniform;
use crate::transform;

const INITIAL_INSTANCE_CAPACITY: usize = 64;
const INITIAL_HUD_CAPACITY: usize = 64;

/// Owned handles to the layouts shared between renderer and scene setup.
#[derive(Clone, Debug)]
pub struct SceneLayouts {
    pub material: wgpu::BindGroupLayout,
    pub skybox: wgpu::BindGroupLayout,
}

pub struct Renderer {
    scene_pipeline: wgpu::RenderPipeline,
    skybox_pipeline: wgpu::RenderPipeline,
    hud_pipeline: wgpu::RenderPipeline,
    material_layout: wgpu::BindGroupLayout,
    skybox_layout: wgpu::BindGroupLayout,
    frame_layout: wgpu::BindGroupLayout,
    frame_bind_group: wgpu::BindGroup,
    sampler_key: (bool, bool),
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    fog_buffer: wgpu::Buffer,
    sampling_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    hud_buffer: wgpu::Buffer,
    hud_capacity: usize,
}

impl Renderer {
    pub fn new(ctx: &Context) -> Self {
        let device = &ctx.device;

        let frame_layout = mk_frame_layout(device);
        let material_layout = mk_material_layout(device);
        let skybox_layout = mk_skybox_layout(device);

        let scene_pipeline = mk_scene_pipeline(device, &ctx.config, &frame_layout, &material_layout);
        let skybox_pipeline = mk_skybox_pipeline(device, &ctx.config, &skybox_layout);
        let hud_pipeline = mk_hud_pipeline(device, &ctx.config);

        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lights_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Lights Buffer"),
            size: std::mem::size_of::<LightsUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let fog_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Fog Buffer"),
            size: std::mem::size_of::<FogUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let sampling_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sampling Buffer"),
            size: std::mem::size_of::<SamplingUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let sampler = texture::create_scene_sampler(device, &ctx.settings);
        let frame_bind_group = mk_frame_bind_group(
            device,
            &frame_layout,
            &camera_buffer,
            &lights_buffer,
            &fog_buffer,
            &sampling_buffer,
            &sampler,
        );

        let instance_buffer = mk_instance_buffer(device, INITIAL_INSTANCE_CAPACITY);
        let hud_buffer = mk_hud_buffer(device, INITIAL_HUD_CAPACITY);

        Self {
            scene_pipeline,
            skybox_pipeline,
            hud_pipeline,
            material_layout,
            skybox_layout,
            frame_layout,
            frame_bind_group,
            sampler_key: ctx.settings.sampler_key(),
            camera_uniform,
            camera_buffer,
            lights_buffer,
            fog_buffer,
            sampling_buffer,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            hud_buffer,
            hud_capacity: INITIAL_HUD_CAPACITY,
        }
    }

    /// The bind group layouts scene constructors build materials and the
    /// skybox against. Layouts are reference counted, so this hands out
    /// owned clones.
    pub fn layouts(&self) -> SceneLayouts {
        SceneLayouts {
            material: self.material_layout.clone(),
            skybox: self.skybox_layout.clone(),
        }
    }

    /// Draw one frame: scene items in insertion order, then the skybox, then
    /// the HUD overlay.
    pub fn render(
        &mut self,
        ctx: &Context,
        scene: &Scene,
        camera: &Camera,
        hud: Option<&Hud>,
    ) -> Result<(), wgpu::SurfaceError> {
        self.refresh_sampler(ctx);

        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view_matrix = transform::view_matrix(camera);
        self.camera_uniform
            .update(camera, ctx.config.width, ctx.config.height);
        ctx.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );

        let lights = LightsUniform::from_scene_light(&scene.light, &view_matrix);
        ctx.queue
            .write_buffer(&self.lights_buffer, 0, bytemuck::cast_slice(&[lights]));

        let fog = FogUniform::from_fog(&scene.fog, ctx.settings.fog);
        ctx.queue
            .write_buffer(&self.fog_buffer, 0, bytemuck::cast_slice(&[fog]));

        let sampling = SamplingUniform::from_settings(&ctx.settings);
        ctx.queue
            .write_buffer(&self.sampling_buffer, 0, bytemuck::cast_slice(&[sampling]));

        let instances = self.write_instances(ctx, scene, &view_matrix);
        let hud_vertex_count = self.write_hud(ctx, hud);

        if let Some(skybox) = &scene.skybox {
            let proj: Matrix4<f32> = transform::projection_matrix(
                transform::FOV,
                ctx.config.width as f32,
                ctx.config.height as f32,
                transform::Z_NEAR,
                transform::Z_FAR,
            );
            let tint = scene.light.skybox_light;
            let sky = SkyUniform::new(
                &proj,
                &view_matrix,
                skybox.scale,
                [tint.x, tint.y, tint.z],
            );
            ctx.queue
                .write_buffer(&skybox.uniform_buffer, 0, bytemuck::cast_slice(&[sky]));
        }

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(ctx.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.scene_pipeline);
            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            let mut slot = 0u32;
            for item in &scene.items {
                let (Some(mesh), Some(material)) = (&item.mesh, &item.material) else {
                    continue;
                };
                render_pass.set_bind_group(1, &material.bind_group, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.num_elements, 0, slot..slot + 1);
                slot += 1;
            }
            debug_assert_eq!(slot as usize, instances);

            if let Some(skybox) = &scene.skybox {
                render_pass.set_pipeline(&self.skybox_pipeline);
                render_pass.set_bind_group(0, &skybox.bind_group, &[]);
                render_pass.set_vertex_buffer(0, skybox.mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(
                    skybox.mesh.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                render_pass.draw_indexed(0..skybox.mesh.num_elements, 0, 0..1);
            }

            if hud_vertex_count > 0 {
                render_pass.set_pipeline(&self.hud_pipeline);
                render_pass.set_vertex_buffer(0, self.hud_buffer.slice(..));
                render_pass.draw(0..hud_vertex_count, 0..1);
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Rebuild the scene sampler and frame bind group when the filter
    /// settings changed since the last frame.
    fn refresh_sampler(&mut self, ctx: &Context) {
        let key = ctx.settings.sampler_key();
        if key == self.sampler_key {
            return;
        }
        log::info!("rebuilding scene sampler: {:?}", key);
        let sampler = texture::create_scene_sampler(&ctx.device, &ctx.settings);
        self.frame_bind_group = mk_frame_bind_group(
            &ctx.device,
            &self.frame_layout,
            &self.camera_buffer,
            &self.lights_buffer,
            &self.fog_buffer,
            &self.sampling_buffer,
            &sampler,
        );
        self.sampler_key = key;
    }

    /// Upload one model-view matrix per drawable item, growing the instance
    /// buffer if the scene outgrew it. Returns the number of instances.
    fn write_instances(&mut self, ctx: &Context, scene: &Scene, view: &Matrix4<f32>) -> usize {
        let instances: Vec<ItemInstance> = scene
            .items
            .iter()
            .filter(|item| item.mesh.is_some() && item.material.is_some())
            .map(|item| ItemInstance {
                model_view: transform::model_view_matrix(item, view).into(),
            })
            .collect();

        if instances.len() > self.instance_capacity {
            self.instance_capacity = instances.len().next_power_of_two();
            self.instance_buffer = mk_instance_buffer(&ctx.device, self.instance_capacity);
        }
        if !instances.is_empty() {
            ctx.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
        instances.len()
    }

    /// Upload the HUD overlay quads. Returns the vertex count, zero when the
    /// HUD is hidden.
    fn write_hud(&mut self, ctx: &Context, hud: Option<&Hud>) -> u32 {
        if !ctx.settings.hud {
            return 0;
        }
        let Some(hud) = hud else {
            return 0;
        };
        let vertices = hud.vertices(&ctx.settings);
        if vertices.len() > self.hud_capacity {
            self.hud_capacity = vertices.len().next_power_of_two();
            self.hud_buffer = mk_hud_buffer(&ctx.device, self.hud_capacity);
        }
        if !vertices.is_empty() {
            ctx.queue
                .write_buffer(&self.hud_buffer, 0, bytemuck::cast_slice(&vertices));
        }
        vertices.len() as u32
    }
}

fn mk_frame_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    camera_buffer: &wgpu::Buffer,
    lights_buffer: &wgpu::Buffer,
    fog_buffer: &wgpu::Buffer,
    sampling_buffer: &wgpu::Buffer,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: lights_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: fog_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 4,
                resource: sampling_buffer.as_entire_binding(),
            },
        ],
        label: Some("frame_bind_group"),
    })
}

fn mk_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Instance Buffer"),
        size: (capacity * std::mem::size_of::<ItemInstance>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn mk_hud_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Hud Vertex Buffer"),
        size: (capacity * std::mem::size_of::<HudVertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

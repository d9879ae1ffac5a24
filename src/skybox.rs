//! Skybox: an inward-facing textured cube that follows the camera.

use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use crate::data_structures::model::Mesh;
use crate::data_structures::texture::{self, Texture};
use crate::geometry;
use crate::transform;

/// Uniform data for the skybox shader: the combined projection and
/// rotation-only view matrix, and a day-cycle tint.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyUniform {
    proj_view: [[f32; 4]; 4],
    tint: [f32; 4],
}

impl SkyUniform {
    pub fn new(proj: &Matrix4<f32>, view: &Matrix4<f32>, scale: f32, tint: [f32; 3]) -> Self {
        let proj_view = *proj * transform::rotation_only(view) * Matrix4::from_scale(scale);
        Self {
            proj_view: proj_view.into(),
            tint: [tint[0], tint[1], tint[2], 1.0],
        }
    }
}

/// The skybox owns its cube mesh, texture and uniform buffer. The renderer
/// writes a fresh [`SkyUniform`] before the skybox pass each frame.
pub struct SkyBox {
    pub mesh: Mesh,
    pub scale: f32,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    #[allow(unused)]
    texture: Texture,
    #[allow(unused)]
    sampler: wgpu::Sampler,
}

impl SkyBox {
    pub fn new(
        device: &wgpu::Device,
        texture: Texture,
        scale: f32,
        layout: &wgpu::BindGroupLayout,
    ) -> anyhow::Result<Self> {
        let data = geometry::cube()?;
        let mesh = Mesh::new(device, &data, "skybox");
        let sampler = texture::create_default_sampler(device);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Skybox Buffer"),
            contents: bytemuck::cast_slice(&[SkyUniform {
                proj_view: cgmath::Matrix4::from_scale(1.0f32).into(),
                tint: [1.0, 1.0, 1.0, 1.0],
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
            label: Some("skybox_bind_group"),
        });

        Ok(Self {
            mesh,
            scale,
            uniform_buffer,
            bind_group,
            texture,
            sampler,
        })
    }
}

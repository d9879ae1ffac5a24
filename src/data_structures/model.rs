//! Meshes and materials.
//!
//! One vertex layout serves every mesh in the crate: position, texture
//! coordinates and normal. Geometry starts life as a [`MeshData`] value of
//! flat numeric arrays, validated at construction, and is uploaded once into
//! a GPU-resident [`Mesh`]. Colour-only and textured surfaces are the two
//! [`Material`] variants; texture presence gates colour use in the shader.

use anyhow::{bail, Result};
use wgpu::util::DeviceExt;

use crate::data_structures::texture::Texture;

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// CPU-side geometry as flat arrays, the way loaders and tessellators
/// produce it.
///
/// Invariants checked at construction: every index is below the vertex
/// count, and the attribute arrays are rectangular
/// (`positions.len()/3 == normals.len()/3 == tex_coords.len()/2`).
#[derive(Clone, Debug)]
pub struct MeshData {
    pub positions: Vec<f32>,
    pub tex_coords: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(
        positions: Vec<f32>,
        tex_coords: Vec<f32>,
        normals: Vec<f32>,
        indices: Vec<u32>,
    ) -> Result<Self> {
        let data = Self {
            positions,
            tex_coords,
            normals,
            indices,
        };
        data.validate()?;
        Ok(data)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    fn validate(&self) -> Result<()> {
        if self.positions.len() % 3 != 0 {
            bail!(
                "position array length {} is not a multiple of 3",
                self.positions.len()
            );
        }
        let vertex_count = self.vertex_count();
        if self.normals.len() / 3 != vertex_count || self.normals.len() % 3 != 0 {
            bail!(
                "normal array holds {} floats, expected {} for {} vertices",
                self.normals.len(),
                vertex_count * 3,
                vertex_count
            );
        }
        if self.tex_coords.len() / 2 != vertex_count || self.tex_coords.len() % 2 != 0 {
            bail!(
                "tex coord array holds {} floats, expected {} for {} vertices",
                self.tex_coords.len(),
                vertex_count * 2,
                vertex_count
            );
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            bail!("index {} out of bounds for {} vertices", bad, vertex_count);
        }
        Ok(())
    }

    /// Interleave the flat arrays into the GPU vertex layout.
    pub fn vertices(&self) -> Vec<ModelVertex> {
        (0..self.vertex_count())
            .map(|i| ModelVertex {
                position: [
                    self.positions[i * 3],
                    self.positions[i * 3 + 1],
                    self.positions[i * 3 + 2],
                ],
                tex_coords: [self.tex_coords[i * 2], self.tex_coords[i * 2 + 1]],
                normal: [
                    self.normals[i * 3],
                    self.normals[i * 3 + 1],
                    self.normals[i * 3 + 2],
                ],
            })
            .collect()
    }
}

/// A GPU-resident mesh: vertex and index buffer, uploaded once.
///
/// Buffers are released when the `Mesh` is dropped; sharing between scene
/// items goes through `Arc<Mesh>`.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl Mesh {
    pub fn new(device: &wgpu::Device, data: &MeshData, name: &str) -> Self {
        let vertices = data.vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: data.indices.len() as u32,
        }
    }
}

/// Material data as laid out in the scene shader.
///
/// `params` packs reflectance (x) and the textured flag (y); the remaining
/// lanes pad the struct to 16-byte alignment.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub color: [f32; 4],
    pub params: [f32; 4],
}

/// A surface description: either a constant colour or a diffuse texture,
/// both with a specular reflectance. Owns its bind group.
#[derive(Debug)]
pub struct Material {
    pub name: String,
    pub uniform: MaterialUniform,
    pub bind_group: wgpu::BindGroup,
    // Kept alive for the views referenced by the bind group.
    #[allow(unused)]
    texture: Texture,
}

impl Material {
    /// A constant-colour material. Uses a 1x1 white texture so the bind
    /// group layout stays the same as for textured surfaces.
    pub fn colored(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        name: &str,
        color: [f32; 4],
        reflectance: f32,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let texture = Texture::create_solid(device, queue, [255, 255, 255, 255], name);
        Self::build(device, name, color, reflectance, 0.0, texture, layout)
    }

    /// A textured material. The colour uniform is ignored by the shader when
    /// a texture is present.
    pub fn textured(
        device: &wgpu::Device,
        name: &str,
        texture: Texture,
        reflectance: f32,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        Self::build(
            device,
            name,
            [1.0, 1.0, 1.0, 1.0],
            reflectance,
            1.0,
            texture,
            layout,
        )
    }

    fn build(
        device: &wgpu::Device,
        name: &str,
        color: [f32; 4],
        reflectance: f32,
        textured: f32,
        texture: Texture,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let uniform = MaterialUniform {
            color,
            params: [reflectance, textured, 0.0, 0.0],
        };
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Material Buffer", name)),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: buffer.as_entire_binding(),
                },
            ],
            label: Some(&format!("{:?} material_bind_group", name)),
        });
        Self {
            name: name.to_string(),
            uniform,
            bind_group,
            texture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_arrays() -> (Vec<f32>, Vec<f32>, Vec<f32>, Vec<u32>) {
        (
            vec![
                -0.5, 0.5, 0.0, //
                -0.5, -0.5, 0.0, //
                0.5, -0.5, 0.0, //
                0.5, 0.5, 0.0,
            ],
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0],
            vec![
                0.0, 0.0, 1.0, //
                0.0, 0.0, 1.0, //
                0.0, 0.0, 1.0, //
                0.0, 0.0, 1.0,
            ],
            vec![0, 1, 3, 3, 1, 2],
        )
    }

    #[test]
    fn valid_quad_passes_validation() {
        let (p, t, n, i) = quad_arrays();
        let data = MeshData::new(p, t, n, i).unwrap();
        assert_eq!(data.vertex_count(), 4);
        assert_eq!(data.vertices().len(), 4);
    }

    #[test]
    fn out_of_bounds_index_is_rejected() {
        let (p, t, n, mut i) = quad_arrays();
        i.push(4);
        assert!(MeshData::new(p, t, n, i).is_err());
    }

    #[test]
    fn ragged_attribute_arrays_are_rejected() {
        let (p, t, mut n, i) = quad_arrays();
        n.truncate(9);
        assert!(MeshData::new(p, t, n, i).is_err());

        let (p, mut t, n, i) = quad_arrays();
        t.push(0.5);
        assert!(MeshData::new(p, t, n, i).is_err());
    }

    #[test]
    fn interleaving_preserves_attribute_order() {
        let (p, t, n, i) = quad_arrays();
        let data = MeshData::new(p, t, n, i).unwrap();
        let vertices = data.vertices();
        assert_eq!(vertices[2].position, [0.5, -0.5, 0.0]);
        assert_eq!(vertices[2].tex_coords, [1.0, 1.0]);
        assert_eq!(vertices[2].normal, [0.0, 0.0, 1.0]);
    }
}

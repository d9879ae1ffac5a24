//! Procedural geometry.
//!
//! Tessellators produce validated [`MeshData`](crate::data_structures::model::MeshData)
//! ready for GPU upload: a latitude/longitude sphere, a unit quad and the
//! inward-facing skybox cube.

mod plane;
mod sphere;

pub use plane::plane;
pub use sphere::{sphere, uv_sphere};

use anyhow::Result;

use crate::data_structures::model::MeshData;

/// Inward-facing unit cube for the skybox. Each face carries full 0..1
/// texture coordinates; winding is reversed so the inside is visible.
pub fn cube() -> Result<MeshData> {
    // Per-face vertices so texture coordinates don't wrap across edges.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        // (origin, u edge, v edge) per face, unit cube centered at origin
        ([-0.5, -0.5, 0.5], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), // front
        ([0.5, -0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), // back
        ([-0.5, -0.5, -0.5], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]), // left
        ([0.5, -0.5, 0.5], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]), // right
        ([-0.5, 0.5, 0.5], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]), // top
        ([-0.5, -0.5, -0.5], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]), // bottom
    ];

    let mut positions = Vec::with_capacity(6 * 4 * 3);
    let mut tex_coords = Vec::with_capacity(6 * 4 * 2);
    let mut normals = Vec::with_capacity(6 * 4 * 3);
    let mut indices = Vec::with_capacity(6 * 6);

    for (face, (origin, u, v)) in faces.iter().enumerate() {
        let base = (face * 4) as u32;
        for (du, dv) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            positions.extend_from_slice(&[
                origin[0] + u[0] * du + v[0] * dv,
                origin[1] + u[1] * du + v[1] * dv,
                origin[2] + u[2] * du + v[2] * dv,
            ]);
            tex_coords.extend_from_slice(&[du, 1.0 - dv]);
            // Normals point inward; the skybox shader ignores them anyway.
            let n = [
                u[1] * v[2] - u[2] * v[1],
                u[2] * v[0] - u[0] * v[2],
                u[0] * v[1] - u[1] * v[0],
            ];
            normals.extend_from_slice(&[-n[0], -n[1], -n[2]]);
        }
        // Reversed winding relative to an outward cube.
        indices.extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
    }

    MeshData::new(positions, tex_coords, normals, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_four_vertices_per_face() {
        let data = cube().unwrap();
        assert_eq!(data.vertex_count(), 24);
        assert_eq!(data.indices.len(), 36);
    }
}

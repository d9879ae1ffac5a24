//! Latitude/longitude sphere tessellation.

use std::f32::consts::PI;

use anyhow::Result;

use crate::data_structures::model::MeshData;

/// A full sphere with the segment counts and theta range the island scene
/// uses: 32x32 segments starting at the equator and sweeping a half turn,
/// leaving the top row open.
pub fn sphere(radius: f32) -> Result<MeshData> {
    uv_sphere(radius, 32, 32, 0.0, PI * 2.0, PI / 2.0, PI)
}

/// Latitude/longitude grid tessellation.
///
/// Produces `(width_segments + 1) * (height_segments + 1)` vertices. Each
/// grid cell yields two triangles, except along a row that touches a closed
/// pole (theta start at 0 or theta end at pi), where the degenerate triangle
/// is skipped. Normals are the normalized positions; texture coordinates are
/// the grid parameters.
pub fn uv_sphere(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
    phi_start: f32,
    phi_length: f32,
    theta_start: f32,
    theta_length: f32,
) -> Result<MeshData> {
    let theta_end = theta_start + theta_length;
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut tex_coords = Vec::new();
    let mut indices = Vec::new();

    for y in 0..=height_segments {
        let v = y as f32 / height_segments as f32;
        for x in 0..=width_segments {
            let u = x as f32 / width_segments as f32;
            let phi = phi_start + u * phi_length;
            let theta = theta_start + v * theta_length;

            let px = -radius * phi.cos() * theta.sin();
            let py = radius * theta.cos();
            let pz = radius * phi.sin() * theta.sin();
            positions.extend_from_slice(&[px, py, pz]);
            tex_coords.extend_from_slice(&[u, v]);

            let len = (px * px + py * py + pz * pz).sqrt();
            if len > 0.0 {
                normals.extend_from_slice(&[px / len, py / len, pz / len]);
            } else {
                normals.extend_from_slice(&[0.0, 1.0, 0.0]);
            }
        }
    }

    let row = width_segments + 1;
    for y in 0..height_segments {
        for x in 0..width_segments {
            let v1 = y * row + x + 1;
            let v2 = y * row + x;
            let v3 = (y + 1) * row + x;
            let v4 = (y + 1) * row + x + 1;

            if y != 0 || theta_start > 0.0 {
                indices.extend_from_slice(&[v1, v2, v4]);
            }
            if y != height_segments - 1 || theta_end < PI {
                indices.extend_from_slice(&[v2, v3, v4]);
            }
        }
    }

    MeshData::new(positions, tex_coords, normals, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_index_count(
        width_segments: u32,
        height_segments: u32,
        theta_start: f32,
        theta_end: f32,
    ) -> usize {
        let mut triangles = 0;
        for y in 0..height_segments {
            if y != 0 || theta_start > 0.0 {
                triangles += width_segments;
            }
            if y != height_segments - 1 || theta_end < PI {
                triangles += width_segments;
            }
        }
        (triangles * 3) as usize
    }

    #[test]
    fn vertex_count_matches_grid() {
        let data = uv_sphere(1.0, 8, 6, 0.0, PI * 2.0, 0.0, PI).unwrap();
        assert_eq!(data.vertex_count(), (8 + 1) * (6 + 1));
    }

    #[test]
    fn closed_sphere_skips_pole_triangles() {
        // Full sphere: both poles closed, so the first and last rows each
        // lose one triangle per column.
        let data = uv_sphere(1.0, 8, 6, 0.0, PI * 2.0, 0.0, PI).unwrap();
        assert_eq!(data.indices.len(), expected_index_count(8, 6, 0.0, PI));
        assert_eq!(data.indices.len(), ((6 * 8 * 2 - 2 * 8) * 3) as usize);
    }

    #[test]
    fn open_theta_range_keeps_all_triangles() {
        // Band away from both poles: full two triangles per cell.
        let data = uv_sphere(1.0, 8, 6, 0.0, PI * 2.0, 0.3, 0.9).unwrap();
        assert_eq!(data.indices.len(), (6 * 8 * 2 * 3) as usize);
    }

    #[test]
    fn island_sphere_counts() {
        // The island dome sweeps theta from pi/2 to 3*pi/2: the start row
        // keeps both triangles, the end row drops one per column.
        let data = sphere(1.0).unwrap();
        assert_eq!(data.vertex_count(), (32 + 1) * (32 + 1));
        assert_eq!(
            data.indices.len(),
            expected_index_count(32, 32, PI / 2.0, PI / 2.0 + PI)
        );
    }

    #[test]
    fn all_indices_are_in_bounds() {
        let data = sphere(2.0).unwrap();
        let count = data.vertex_count() as u32;
        assert!(data.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn normals_are_unit_radial() {
        let data = uv_sphere(3.0, 4, 4, 0.0, PI * 2.0, 0.0, PI).unwrap();
        for i in 0..data.vertex_count() {
            let n = [
                data.normals[i * 3],
                data.normals[i * 3 + 1],
                data.normals[i * 3 + 2],
            ];
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }
}

//! Unit quad.

use anyhow::Result;

use crate::data_structures::model::MeshData;

/// A unit quad in the XY plane, facing +Z, made of two triangles. The sea in
/// the island scene is one of these, rotated flat and scaled up.
pub fn plane() -> Result<MeshData> {
    let positions = vec![
        -0.5, 0.5, 0.0, //
        -0.5, -0.5, 0.0, //
        0.5, -0.5, 0.0, //
        0.5, 0.5, 0.0,
    ];
    let tex_coords = vec![
        0.0, 0.0, //
        0.0, 1.0, //
        1.0, 1.0, //
        1.0, 0.0,
    ];
    let normals = vec![
        0.0, 0.0, 1.0, //
        0.0, 0.0, 1.0, //
        0.0, 0.0, 1.0, //
        0.0, 0.0, 1.0,
    ];
    let indices = vec![0, 1, 3, 3, 1, 2];
    MeshData::new(positions, tex_coords, normals, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_is_two_triangles_over_four_vertices() {
        let data = plane().unwrap();
        assert_eq!(data.vertex_count(), 4);
        assert_eq!(data.indices.len(), 6);
        assert!(data.indices.iter().all(|&i| i < 4));
    }
}

use std::io::{BufReader, Cursor};

use crate::data_structures::model::{Mesh, MeshData};
use crate::resources::texture::load_string;

/// Parse OBJ text into validated mesh data. Faces are triangulated and
/// re-indexed to a single index stream; all models in the file are merged
/// into one mesh. Materials in the file are ignored, surfaces get theirs
/// from [`crate::data_structures::model::Material`].
pub fn mesh_data_from_obj(obj_text: &str) -> anyhow::Result<MeshData> {
    let obj_cursor = Cursor::new(obj_text);
    let mut obj_reader = BufReader::new(obj_cursor);

    let (models, _materials) = tobj::load_obj_buf(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_| Ok(Default::default()),
    )?;

    let mut positions = Vec::new();
    let mut tex_coords = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for m in &models {
        let base = (positions.len() / 3) as u32;
        let vertex_count = m.mesh.positions.len() / 3;
        positions.extend_from_slice(&m.mesh.positions);
        for i in 0..vertex_count {
            // OBJ texture coordinates are bottom-up.
            tex_coords.push(m.mesh.texcoords.get(i * 2).map_or(0.0, |f| *f));
            tex_coords.push(1.0 - m.mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f));
            normals.push(m.mesh.normals.get(i * 3).map_or(0.0, |f| *f));
            normals.push(m.mesh.normals.get(i * 3 + 1).map_or(0.0, |f| *f));
            normals.push(m.mesh.normals.get(i * 3 + 2).map_or(0.0, |f| *f));
        }
        indices.extend(m.mesh.indices.iter().map(|i| i + base));
    }

    MeshData::new(positions, tex_coords, normals, indices)
}

/// Load an OBJ file from `assets/` and upload it as a mesh.
pub async fn load_mesh_obj(file_name: &str, device: &wgpu::Device) -> anyhow::Result<Mesh> {
    let obj_text = load_string(file_name).await?;
    let data = mesh_data_from_obj(&obj_text)?;
    Ok(Mesh::new(device, &data, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_OBJ: &str = "\
v -1.0 -1.0 0.0
v 1.0 -1.0 0.0
v 1.0 1.0 0.0
v -1.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn quad_is_triangulated_and_reindexed() {
        let data = mesh_data_from_obj(QUAD_OBJ).unwrap();
        assert_eq!(data.vertex_count(), 4);
        assert_eq!(data.indices.len(), 6);
        assert!(data.indices.iter().all(|&i| i < 4));
    }

    #[test]
    fn texture_coordinates_are_flipped_vertically() {
        let data = mesh_data_from_obj(QUAD_OBJ).unwrap();
        // The vertex with vt (0, 0) must come out as (0, 1).
        let v = data
            .tex_coords
            .chunks(2)
            .find(|uv| uv[0] == 0.0 && uv[1] == 1.0);
        assert!(v.is_some());
    }

    #[test]
    fn garbage_input_is_an_error() {
        assert!(mesh_data_from_obj("f 1/1/1 2//").is_err());
    }

    #[test]
    fn missing_normals_fall_back_to_zero() {
        let obj = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";
        let data = mesh_data_from_obj(obj).unwrap();
        assert_eq!(data.vertex_count(), 3);
        assert!(data.normals.iter().all(|&n| n == 0.0));
        assert!(data.tex_coords.chunks(2).all(|uv| uv == [0.0, 1.0]));
    }
}

//! CPU-side mesh pipeline tests: OBJ parsing, procedural tessellation and
//! the validation rules they all pass through.

use approx::assert_relative_eq;
use shoreline::data_structures::model::MeshData;
use shoreline::geometry;
use shoreline::resources::mesh_data_from_obj;

const TWO_CUBES_OBJ: &str = "\
o first
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
vn 0.0 0.0 1.0
vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
f 1/1/1 2/2/1 3/3/1
o second
v 2.0 0.0 0.0
v 3.0 0.0 0.0
v 2.0 1.0 0.0
f 4/1/1 5/2/1 6/3/1
";

#[test]
fn multiple_obj_objects_merge_into_one_mesh() {
    let data = mesh_data_from_obj(TWO_CUBES_OBJ).unwrap();
    assert_eq!(data.vertex_count(), 6);
    assert_eq!(data.indices.len(), 6);
    // Indices of the second object must be offset past the first.
    assert!(data.indices.iter().all(|&i| i < 6));
    assert!(data.indices.iter().any(|&i| i >= 3));
}

#[test]
fn parsed_obj_satisfies_mesh_data_invariants() {
    let data = mesh_data_from_obj(TWO_CUBES_OBJ).unwrap();
    // Re-validating through the constructor must succeed.
    let rebuilt = MeshData::new(
        data.positions.clone(),
        data.tex_coords.clone(),
        data.normals.clone(),
        data.indices.clone(),
    );
    assert!(rebuilt.is_ok());
}

#[test]
fn tessellators_produce_valid_mesh_data() {
    for data in [
        geometry::plane().unwrap(),
        geometry::cube().unwrap(),
        geometry::sphere(2.5).unwrap(),
        geometry::uv_sphere(1.0, 16, 12, 0.0, std::f32::consts::TAU, 0.0, std::f32::consts::PI)
            .unwrap(),
    ] {
        let count = data.vertex_count() as u32;
        assert!(count > 0);
        assert_eq!(data.indices.len() % 3, 0);
        assert!(data.indices.iter().all(|&i| i < count));
        assert_eq!(data.vertices().len(), count as usize);
    }
}

#[test]
fn sphere_radius_scales_positions() {
    let unit = geometry::sphere(1.0).unwrap();
    let double = geometry::sphere(2.0).unwrap();
    for (a, b) in unit.positions.iter().zip(double.positions.iter()) {
        assert_relative_eq!(a * 2.0, *b, epsilon = 1e-5);
    }
}

//! Pure matrix builders for the forward renderer.
//!
//! Everything here is a free function of its inputs: matrices are recomputed
//! on every call, there is no caching and no invalidation tracking. Angles are
//! stored in degrees throughout the crate and converted at the call site.

use cgmath::{Deg, Matrix4, Vector3};

use crate::{camera::Camera, data_structures::item::GameItem};

/// Maps OpenGL clip space (z in -1..1) to the wgpu convention (z in 0..1).
/// `cgmath::perspective` produces the former, so every projection matrix is
/// pre-multiplied with this.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Vertical field of view of the scene camera.
pub const FOV: Deg<f32> = Deg(60.0);
pub const Z_NEAR: f32 = 0.01;
pub const Z_FAR: f32 = 1000.0;

/// Perspective projection for the given viewport, in wgpu clip space.
pub fn projection_matrix(
    fov: Deg<f32>,
    width: f32,
    height: f32,
    z_near: f32,
    z_far: f32,
) -> Matrix4<f32> {
    let aspect_ratio = width / height;
    OPENGL_TO_WGPU_MATRIX * cgmath::perspective(fov, aspect_ratio, z_near, z_far)
}

/// View matrix for a camera: rotate around the camera position first (pitch,
/// then yaw), then translate by the negated position.
pub fn view_matrix(camera: &Camera) -> Matrix4<f32> {
    Matrix4::from_angle_x(Deg(camera.rotation.x))
        * Matrix4::from_angle_y(Deg(camera.rotation.y))
        * Matrix4::from_translation(-camera.position)
}

/// Model matrix for an item: translate, rotate X/Y/Z, scale.
///
/// The rotation sign is negated relative to the stored item rotation; item
/// rotations follow the camera-space convention.
pub fn model_matrix(item: &GameItem) -> Matrix4<f32> {
    let rotation: Vector3<f32> = item.rotation;
    let scale = item.scale;
    Matrix4::from_translation(item.position)
        * Matrix4::from_angle_x(Deg(-rotation.x))
        * Matrix4::from_angle_y(Deg(-rotation.y))
        * Matrix4::from_angle_z(Deg(-rotation.z))
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
}

/// Combined model-view matrix: `view * model`.
pub fn model_view_matrix(item: &GameItem, view: &Matrix4<f32>) -> Matrix4<f32> {
    view * model_matrix(item)
}

/// The view matrix with its translation stripped, used for the skybox so it
/// stays centered on the camera.
pub fn rotation_only(view: &Matrix4<f32>) -> Matrix4<f32> {
    let mut m = *view;
    m.w.x = 0.0;
    m.w.y = 0.0;
    m.w.z = 0.0;
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{Matrix4, SquareMatrix, Vector3, Vector4};

    fn assert_matrix_eq(a: &Matrix4<f32>, b: &Matrix4<f32>) {
        for col in 0..4 {
            for row in 0..4 {
                assert_relative_eq!(a[col][row], b[col][row], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn view_matrix_is_identity_for_origin_camera() {
        let camera = Camera::new();
        assert_matrix_eq(&view_matrix(&camera), &Matrix4::identity());
    }

    #[test]
    fn view_matrix_negates_camera_translation() {
        let mut camera = Camera::new();
        camera.position = Vector3::new(1.0, 2.0, 3.0);
        let v = view_matrix(&camera);
        let expected = Matrix4::from_translation(Vector3::new(-1.0, -2.0, -3.0));
        assert_matrix_eq(&v, &expected);
    }

    #[test]
    fn model_view_under_identity_view_is_pure_translation() {
        let mut item = GameItem::default();
        item.set_position(4.0, -2.0, 7.5);
        let mv = model_view_matrix(&item, &Matrix4::identity());
        let expected = Matrix4::from_translation(Vector3::new(4.0, -2.0, 7.5));
        assert_matrix_eq(&mv, &expected);
    }

    #[test]
    fn uniform_and_vector_scale_produce_the_same_model_matrix() {
        let mut a = GameItem::default();
        let mut b = GameItem::default();
        a.set_position(1.0, 2.0, 3.0);
        b.set_position(1.0, 2.0, 3.0);
        a.set_rotation(10.0, 20.0, 30.0);
        b.set_rotation(10.0, 20.0, 30.0);
        a.set_scale(0.25);
        b.set_scale_vec(Vector3::new(0.25, 0.25, 0.25));
        assert_matrix_eq(&model_matrix(&a), &model_matrix(&b));
    }

    #[test]
    fn projection_maps_near_and_far_planes_to_depth_bounds() {
        let proj = projection_matrix(FOV, 800.0, 600.0, Z_NEAR, Z_FAR);

        // A point straight ahead on the near plane lands at NDC z = 0 in the
        // wgpu convention, and a point on the far plane at NDC z = 1.
        let near = proj * Vector4::new(0.0, 0.0, -Z_NEAR, 1.0);
        let far = proj * Vector4::new(0.0, 0.0, -Z_FAR, 1.0);
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-4);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn skybox_view_keeps_rotation_but_drops_translation() {
        let mut camera = Camera::new();
        camera.position = Vector3::new(5.0, 1.0, -3.0);
        camera.rotation = Vector3::new(15.0, 40.0, 0.0);
        let stripped = rotation_only(&view_matrix(&camera));
        assert_relative_eq!(stripped.w.x, 0.0);
        assert_relative_eq!(stripped.w.y, 0.0);
        assert_relative_eq!(stripped.w.z, 0.0);

        let mut rotated_only = camera.clone();
        rotated_only.position = Vector3::new(0.0, 0.0, 0.0);
        assert_matrix_eq(&stripped, &view_matrix(&rotated_only));
    }
}

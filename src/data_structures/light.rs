//! Scene lighting: one point light, one directional light, ambient terms.

use cgmath::{Matrix4, Vector3, Vector4};

/// Quadratic attenuation for point lights: `constant + linear*d + exponent*d^2`.
#[derive(Clone, Copy, Debug)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub exponent: f32,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.0,
            exponent: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub color: Vector3<f32>,
    pub position: Vector3<f32>,
    pub intensity: f32,
    pub attenuation: Attenuation,
}

impl PointLight {
    pub fn new(color: Vector3<f32>, position: Vector3<f32>, intensity: f32) -> Self {
        Self {
            color,
            position,
            intensity,
            attenuation: Attenuation::default(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DirectionalLight {
    pub color: Vector3<f32>,
    pub direction: Vector3<f32>,
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn new(color: Vector3<f32>, direction: Vector3<f32>, intensity: f32) -> Self {
        Self {
            color,
            direction,
            intensity,
        }
    }
}

/// All light state for a scene.
#[derive(Clone, Debug)]
pub struct SceneLight {
    pub ambient_light: Vector3<f32>,
    /// Tint applied to the skybox, driven by the day cycle.
    pub skybox_light: Vector3<f32>,
    pub point_light: PointLight,
    pub directional_light: DirectionalLight,
    pub specular_power: f32,
}

impl Default for SceneLight {
    fn default() -> Self {
        Self {
            ambient_light: Vector3::new(0.3, 0.3, 0.3),
            skybox_light: Vector3::new(1.0, 1.0, 1.0),
            point_light: PointLight::new(
                Vector3::new(1.0, 1.0, 1.0),
                Vector3::new(0.0, 1.0, 0.0),
                1.0,
            ),
            directional_light: DirectionalLight::new(
                Vector3::new(1.0, 1.0, 1.0),
                Vector3::new(0.0, 1.0, 0.0),
                1.0,
            ),
            specular_power: 10.0,
        }
    }
}

/// Light data as laid out in the scene shader. Positions and directions are
/// pre-transformed into view space on the CPU before upload, so the shader
/// never needs the view matrix for lighting.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    /// rgb ambient, w unused.
    ambient: [f32; 4],
    /// rgb colour, w intensity.
    dir_color: [f32; 4],
    /// xyz view-space direction, w unused.
    dir_direction: [f32; 4],
    /// rgb colour, w intensity.
    point_color: [f32; 4],
    /// xyz view-space position, w unused.
    point_position: [f32; 4],
    /// constant, linear, exponent, specular power.
    attenuation: [f32; 4],
}

impl LightsUniform {
    pub fn from_scene_light(light: &SceneLight, view: &Matrix4<f32>) -> Self {
        let dl = &light.directional_light;
        let pl = &light.point_light;

        // w = 0 transforms a direction, w = 1 a position.
        let dir_view = view * Vector4::new(dl.direction.x, dl.direction.y, dl.direction.z, 0.0);
        let pos_view = view * Vector4::new(pl.position.x, pl.position.y, pl.position.z, 1.0);

        Self {
            ambient: [
                light.ambient_light.x,
                light.ambient_light.y,
                light.ambient_light.z,
                0.0,
            ],
            dir_color: [dl.color.x, dl.color.y, dl.color.z, dl.intensity],
            dir_direction: [dir_view.x, dir_view.y, dir_view.z, 0.0],
            point_color: [pl.color.x, pl.color.y, pl.color.z, pl.intensity],
            point_position: [pos_view.x, pos_view.y, pos_view.z, 1.0],
            attenuation: [
                pl.attenuation.constant,
                pl.attenuation.linear,
                pl.attenuation.exponent,
                light.specular_power,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::SquareMatrix;

    #[test]
    fn point_light_position_is_transformed_as_a_position() {
        let mut light = SceneLight::default();
        light.point_light.position = Vector3::new(0.0, 1.0, -5.0);
        // A pure translation view must move the position but not the
        // directional light's direction.
        let view = Matrix4::from_translation(Vector3::new(0.0, 0.0, 2.0));
        let uniform = LightsUniform::from_scene_light(&light, &view);
        assert_eq!(uniform.point_position[2], -3.0);
        let identity = LightsUniform::from_scene_light(&light, &Matrix4::identity());
        assert_eq!(uniform.dir_direction, identity.dir_direction);
    }
}

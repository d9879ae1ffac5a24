//! Exponential distance fog.

use cgmath::Vector3;

#[derive(Clone, Copy, Debug)]
pub struct Fog {
    pub active: bool,
    pub color: Vector3<f32>,
    pub density: f32,
}

impl Fog {
    pub fn new(active: bool, color: Vector3<f32>, density: f32) -> Self {
        Self {
            active,
            color,
            density,
        }
    }
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            active: false,
            color: Vector3::new(0.5, 0.5, 0.5),
            density: 0.0,
        }
    }
}

/// Fog data as laid out in the scene shader: rgb colour + density in one
/// vec4, the active flag in the second.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FogUniform {
    color_density: [f32; 4],
    params: [f32; 4],
}

impl FogUniform {
    /// `enabled` gates the fog globally (the HUD toggle) on top of the
    /// scene's own `active` flag.
    pub fn from_fog(fog: &Fog, enabled: bool) -> Self {
        let active = if fog.active && enabled { 1.0 } else { 0.0 };
        Self {
            color_density: [fog.color.x, fog.color.y, fog.color.z, fog.density],
            params: [active, 0.0, 0.0, 0.0],
        }
    }
}

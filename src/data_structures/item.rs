//! Scene items: a transform plus shared mesh and material references.

use std::sync::Arc;

use cgmath::Vector3;

use crate::data_structures::model::{Material, Mesh};

/// A renderable object in the scene.
///
/// Position and rotation (degrees) are mutated directly by scene logic every
/// frame; the mesh and material are shared, so several items can reference
/// the same geometry.
#[derive(Clone, Debug)]
pub struct GameItem {
    pub mesh: Option<Arc<Mesh>>,
    pub material: Option<Arc<Material>>,
    pub position: Vector3<f32>,
    /// Degrees around X, Y, Z.
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl GameItem {
    pub fn new(mesh: Arc<Mesh>, material: Arc<Material>) -> Self {
        Self {
            mesh: Some(mesh),
            material: Some(material),
            ..Self::default()
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vector3::new(x, y, z);
    }

    pub fn set_rotation(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Vector3::new(x, y, z);
    }

    /// Uniform scale; equivalent to `set_scale_vec` with equal components.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = Vector3::new(scale, scale, scale);
    }

    pub fn set_scale_vec(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
    }
}

impl Default for GameItem {
    fn default() -> Self {
        Self {
            mesh: None,
            material: None,
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

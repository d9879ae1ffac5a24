//! Scene data types.
//!
//! - `model` holds the unified vertex layout, validated CPU geometry,
//!   GPU meshes and materials
//! - `texture` wraps GPU textures and samplers
//! - `item` is the scene-graph leaf: a transform plus shared mesh/material
//! - `light` contains the point/directional light model and its uniform
//! - `fog` contains the fog parameters and uniform

pub mod fog;
pub mod item;
pub mod light;
pub mod model;
pub mod texture;

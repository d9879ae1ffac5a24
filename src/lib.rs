//! shoreline
//!
//! A small forward-rendered 3D scene sandbox: free-flying camera, Phong-style
//! lighting with one point and one directional light, distance fog, a skybox
//! and a minimal clickable settings overlay. Scenes are built from shared
//! meshes and materials and driven by a [`app::SceneFlow`] implementation.
//!
//! High-level modules
//! - `app`: the window/event loop and the `SceneFlow` trait scenes implement
//! - `camera`: camera state, the input controller and the camera uniform
//! - `context`: GPU context owning surface, device, queue and settings
//! - `data_structures`: meshes, materials, textures, items, lights and fog
//! - `geometry`: procedural sphere, plane and cube tessellators
//! - `hud`: the clickable settings overlay
//! - `pipelines`: the scene, skybox and HUD render pipelines
//! - `renderer`: per-frame uniform upload and the single render pass
//! - `resources`: OBJ and image loading from `assets/`
//! - `scene` / `skybox`: scene container and skybox resources
//! - `transform`: pure matrix builders (projection, view, model)
//!

pub mod app;
pub mod camera;
pub mod context;
pub mod data_structures;
pub mod geometry;
pub mod hud;
pub mod pipelines;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod settings;
pub mod skybox;
pub mod transform;

// Re-exports commonly used types for convenience in downstream code.
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
pub use winit::keyboard::KeyCode;
pub use cgmath::*;
pub use wgpu::*;

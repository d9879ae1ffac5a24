//! Loading of meshes and textures from external files.
//!
//! All loaders resolve file names relative to the `assets/` directory next
//! to the executable, which the build script populates.

pub mod mesh;
pub mod texture;

pub use mesh::{load_mesh_obj, mesh_data_from_obj};
pub use texture::{load_binary, load_string, load_texture};

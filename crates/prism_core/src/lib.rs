//! Prism Core - renderer-agnostic scene data.
//!
//! This crate provides:
//!
//! - **Geometry**: `MeshData`, indexed triangle geometry loaded from OBJ files
//! - **Scene descriptions**: `SceneDescription`, a serde/JSON description of
//!   spheres, meshes, lights and the camera that the renderer turns into a
//!   traceable scene
//!
//! # Example
//!
//! ```ignore
//! use prism_core::SceneDescription;
//!
//! let description = SceneDescription::load("scene.json")?;
//! println!("{} spheres, {} lights",
//!     description.spheres.len(),
//!     description.lights.len());
//! ```

pub mod description;
pub mod error;
pub mod mesh;
pub mod obj;

// Re-export commonly used types
pub use description::{
    CameraDescription, LightDescription, MaterialDescription, MeshDescription,
    SceneDescription, SphereDescription,
};
pub use error::{LoadError, LoadResult};
pub use mesh::MeshData;
pub use obj::{load_obj, parse_obj};

//! Serializable scene descriptions.
//!
//! A `SceneDescription` is plain data: the renderer decides how to turn it
//! into intersectable primitives. JSON is the on-disk format.
//!
//! ```json
//! {
//!   "camera": { "position": [0, 0, 10], "target": [0, 0, 0], "fov_degrees": 90,
//!               "width": 200, "height": 200 },
//!   "background": [0.2, 0.7, 0.8],
//!   "lights": [{ "position": [0, 20, 0], "intensity": 5.0 }],
//!   "spheres": [{ "center": [0, 0, 0], "radius": 5,
//!                 "material": { "albedo": [0.9, 0.1, 0, 0], "diffuse_color": [0.3, 0.1, 0.1] } }]
//! }
//! ```

use std::path::{Path, PathBuf};

use prism_math::{Albedo, Color, Point3, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LoadResult};

/// Surface response parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDescription {
    /// Weights of {diffuse, specular, reflective, refractive}
    pub albedo: Albedo,
    pub diffuse_color: Color,
    pub specular_exponent: f32,
    pub refractive_index: f32,
}

impl Default for MaterialDescription {
    fn default() -> Self {
        Self {
            albedo: Vec4::new(1.0, 0.0, 0.0, 0.0),
            diffuse_color: Color::splat(0.5),
            specular_exponent: 50.0,
            refractive_index: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: Point3,
    pub radius: f32,
    #[serde(default)]
    pub material: MaterialDescription,
}

/// An OBJ model placed in the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshDescription {
    /// Path to the OBJ file, relative to the description file
    pub path: PathBuf,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub offset: Vec3,
    #[serde(default)]
    pub material: MaterialDescription,
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightDescription {
    pub position: Point3,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub position: Point3,
    pub target: Point3,
    pub fov_degrees: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            fov_degrees: 90.0,
            width: 200,
            height: 200,
        }
    }
}

/// Everything needed to build a traceable scene and its camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraDescription,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
    #[serde(default)]
    pub meshes: Vec<MeshDescription>,
}

fn default_background() -> Color {
    Color::new(0.2, 0.7, 0.8)
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            camera: CameraDescription::default(),
            background: default_background(),
            lights: Vec::new(),
            spheres: Vec::new(),
            meshes: Vec::new(),
        }
    }
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json(text: &str) -> LoadResult<Self> {
        let description: Self = serde_json::from_str(text)?;
        description.validate()?;
        Ok(description)
    }

    /// Reject geometry that cannot produce a well-defined surface.
    ///
    /// Sphere radii and mesh scales must be finite and positive.
    pub fn validate(&self) -> LoadResult<()> {
        for (i, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius > 0.0 && sphere.radius.is_finite()) {
                return Err(LoadError::InvalidGeometry(format!(
                    "sphere {i} has radius {}",
                    sphere.radius
                )));
            }
        }
        for mesh in &self.meshes {
            if !(mesh.scale > 0.0 && mesh.scale.is_finite()) {
                return Err(LoadError::InvalidGeometry(format!(
                    "mesh {} has scale {}",
                    mesh.path.display(),
                    mesh.scale
                )));
            }
        }
        Ok(())
    }

    /// Load a description from a JSON file.
    ///
    /// Relative mesh paths are resolved against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> LoadResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut description = Self::from_json(&text)?;

        if let Some(dir) = path.parent() {
            for mesh in &mut description.meshes {
                if mesh.path.is_relative() {
                    mesh.path = dir.join(&mesh.path);
                }
            }
        }

        log::info!(
            "Loaded scene description {}: {} spheres, {} meshes, {} lights",
            path.display(),
            description.spheres.len(),
            description.meshes.len(),
            description.lights.len()
        );

        Ok(description)
    }

    /// Serialize the description as pretty-printed JSON.
    pub fn to_json(&self) -> LoadResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

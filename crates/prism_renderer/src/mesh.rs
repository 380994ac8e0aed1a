//! Triangle meshes.
//!
//! A mesh is a named, ordered list of triangles tested by brute force.
//! There is no acceleration structure, so this only suits small models.

use crate::{Hit, Intersect, Material, Triangle};
use prism_core::MeshData;
use prism_math::Ray;

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    name: String,
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, triangles: Vec<Triangle>) -> Self {
        Self {
            name: name.into(),
            triangles,
        }
    }

    /// Build a mesh from indexed geometry, giving every face `material`.
    ///
    /// Face normals follow the counter-clockwise winding of each face.
    /// Degenerate faces are dropped.
    pub fn from_data(data: &MeshData, material: Material) -> Self {
        let faces = data.triangles();
        let total = faces.len();
        let triangles: Vec<Triangle> = faces
            .into_iter()
            .filter_map(|[a, b, c]| Triangle::new(a, b, c, material))
            .collect();

        if triangles.len() < total {
            log::warn!(
                "Mesh '{}': skipped {} degenerate faces",
                data.name,
                total - triangles.len()
            );
        }

        Self::new(data.name.clone(), triangles)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl Intersect for Mesh {
    fn ray_intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut nearest: Option<Hit<'_>> = None;

        for triangle in &self.triangles {
            if let Some(hit) = triangle.ray_intersect(ray) {
                if nearest.map_or(true, |n| hit.t < n.t) {
                    nearest = Some(hit);
                }
            }
        }

        nearest
    }
}

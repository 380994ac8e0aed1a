//! Indexed triangle geometry.
//!
//! `MeshData` is the format-agnostic geometry produced by loaders (OBJ today)
//! and consumed by the renderer, which turns each face into a traceable
//! triangle with its own material.

use prism_math::{Point3, Vec3};

/// A named mesh of vertex positions and triangle indices.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// Mesh name (OBJ object/group name, or the file stem)
    pub name: String,

    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Point3>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Create a new mesh from positions and indices.
    pub fn new(name: impl Into<String>, positions: Vec<Point3>, indices: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            positions,
            indices,
        }
    }

    /// Build a mesh from the flat `[x, y, z, x, y, z, ...]` layout loaders emit.
    pub fn from_flat(name: impl Into<String>, positions: &[f32], indices: Vec<u32>) -> Self {
        let positions = positions
            .chunks_exact(3)
            .map(Vec3::from_slice)
            .collect();
        Self::new(name, positions, indices)
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Check if the mesh has no faces.
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Extract triangle vertices as `[a, b, c]` triplets in face order.
    ///
    /// Faces referencing vertices out of range are skipped with a warning.
    pub fn triangles(&self) -> Vec<[Point3; 3]> {
        let mut triangles = Vec::with_capacity(self.triangle_count());

        for chunk in self.indices.chunks_exact(3) {
            let i0 = chunk[0] as usize;
            let i1 = chunk[1] as usize;
            let i2 = chunk[2] as usize;

            if i0 >= self.positions.len()
                || i1 >= self.positions.len()
                || i2 >= self.positions.len()
            {
                log::warn!(
                    "Invalid triangle indices in '{}': [{}, {}, {}], vertex count: {}",
                    self.name,
                    i0,
                    i1,
                    i2,
                    self.positions.len()
                );
                continue;
            }

            triangles.push([self.positions[i0], self.positions[i1], self.positions[i2]]);
        }

        triangles
    }

    /// Translate and uniformly scale every vertex in place.
    ///
    /// Scene descriptions use this to place imported models.
    pub fn transform(&mut self, scale: f32, offset: Vec3) {
        for p in &mut self.positions {
            *p = *p * scale + offset;
        }
    }
}

//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.
//! Triangles are single-sided: only rays arriving against the face
//! normal can hit them.

use crate::{Hit, Intersect, Material};
use prism_math::{Interval, Point3, Ray, Vec3};

/// Rays whose determinant falls below this are back-facing or parallel.
const DET_EPSILON: f32 = 1e-8;

/// A single-sided triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    a: Point3,
    b: Point3,
    c: Point3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    material: Material,
}

impl Triangle {
    /// Create a new triangle from three counter-clockwise vertices.
    ///
    /// Returns `None` for degenerate (zero-area) triangles.
    pub fn new(a: Point3, b: Point3, c: Point3, material: Material) -> Option<Self> {
        let normal = (b - a).cross(c - a).try_normalize()?;
        Some(Self {
            a,
            b,
            c,
            normal,
            material,
        })
    }

    /// Create a triangle with a pre-computed face normal.
    ///
    /// The normal is only used for shading; visibility still follows the
    /// vertex winding, so callers must keep the two consistent.
    /// Returns `None` when `normal` cannot be normalized.
    pub fn with_normal(a: Point3, b: Point3, c: Point3, normal: Vec3, material: Material) -> Option<Self> {
        Some(Self {
            a,
            b,
            c,
            normal: normal.try_normalize()?,
            material,
        })
    }

    pub fn vertices(&self) -> [Point3; 3] {
        [self.a, self.b, self.c]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Intersect for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn ray_intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        let v0v1 = self.b - self.a;
        let v0v2 = self.c - self.a;

        let pvec = ray.direction().cross(v0v2);
        let det = v0v1.dot(pvec);

        // Back-facing or parallel
        if det < DET_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let tvec = ray.origin() - self.a;
        let u = tvec.dot(pvec) * inv_det;
        if !Interval::UNIT.contains(u) {
            return None;
        }

        let qvec = tvec.cross(v0v1);
        let v = ray.direction().dot(qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = v0v2.dot(qvec) * inv_det;
        if t < 0.0 {
            return None;
        }

        Some(Hit {
            t,
            point: ray.at(t),
            normal: self.normal,
            material: &self.material,
        })
    }
}

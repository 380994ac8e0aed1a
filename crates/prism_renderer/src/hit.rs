//! Intersect trait and Hit record for ray-object intersection.

use crate::Material;
use prism_math::{Point3, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// The material is borrowed from the object that was hit, so a `Hit`
/// cannot outlive the scene it came from. A miss is `None`, never a
/// sentinel record.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Parameter t where the intersection occurs (always >= 0)
    pub t: f32,
    /// Point of intersection
    pub point: Point3,
    /// Unit surface normal (outward for spheres, the face normal for triangles)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// Trait for objects that can be hit by rays.
pub trait Intersect: Send + Sync {
    /// Find the nearest intersection with non-negative `t`, if any.
    fn ray_intersect(&self, ray: &Ray) -> Option<Hit<'_>>;
}

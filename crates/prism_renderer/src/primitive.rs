//! Closed set of traceable geometry.
//!
//! `Scene<Primitive>` holds mixed geometry with a single match-based
//! dispatch; homogeneous scenes can use `Scene<Sphere>` etc. directly.

use crate::{Hit, Intersect, Mesh, Sphere, Triangle};
use prism_math::Ray;

#[derive(Debug, Clone)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
    Mesh(Mesh),
}

impl Intersect for Primitive {
    #[inline]
    fn ray_intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        match self {
            Primitive::Sphere(sphere) => sphere.ray_intersect(ray),
            Primitive::Triangle(triangle) => triangle.ray_intersect(ray),
            Primitive::Mesh(mesh) => mesh.ray_intersect(ray),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Triangle> for Primitive {
    fn from(triangle: Triangle) -> Self {
        Primitive::Triangle(triangle)
    }
}

impl From<Mesh> for Primitive {
    fn from(mesh: Mesh) -> Self {
        Primitive::Mesh(mesh)
    }
}

//! Sphere primitive for ray tracing.

use crate::{Hit, Intersect, Material};
use prism_core::SphereDescription;
use prism_math::{Point3, Ray};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. Non-positive radii are clamped to zero and such
    /// a sphere is never hit.
    pub fn new(center: Point3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Intersect for Sphere {
    fn ray_intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        let l = self.center - ray.origin();
        let tca = l.dot(ray.direction());
        let d2 = l.dot(l) - tca * tca;
        let r2 = self.radius * self.radius;
        if r2 <= 0.0 || d2 > r2 {
            return None;
        }

        let thc = (r2 - d2).sqrt();

        // Near root first; from inside the sphere only the far root is ahead.
        let mut t = tca - thc;
        if t < 0.0 {
            t = tca + thc;
        }
        if t < 0.0 {
            return None;
        }

        let point = ray.at(t);
        Some(Hit {
            t,
            point,
            normal: (point - self.center).normalize(),
            material: &self.material,
        })
    }
}

impl From<&SphereDescription> for Sphere {
    fn from(desc: &SphereDescription) -> Self {
        Self::new(desc.center, desc.radius, desc.material.into())
    }
}

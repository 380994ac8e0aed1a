//! Point lights.

use crate::material::reflect;
use prism_core::LightDescription;
use prism_math::{Point3, Vec3};

/// An omnidirectional point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point3,
    pub intensity: f32,
}

impl Light {
    pub const fn new(position: Point3, intensity: f32) -> Self {
        Self { position, intensity }
    }

    /// Unit direction from `point` towards the light.
    #[inline]
    pub fn direction_from(&self, point: Point3) -> Vec3 {
        (self.position - point).normalize_or_zero()
    }

    /// Lambertian contribution at `point`. Zero when the light is behind the surface.
    pub fn diffuse(&self, point: Point3, normal: Vec3) -> f32 {
        self.intensity * self.direction_from(point).dot(normal).max(0.0)
    }

    /// Phong highlight seen along `ray_direction`. Zero when the light is behind the surface.
    pub fn specular(&self, point: Point3, normal: Vec3, ray_direction: Vec3, exponent: f32) -> f32 {
        let to_light = self.direction_from(point);
        if to_light.dot(normal) <= 0.0 {
            return 0.0;
        }

        let reflected = reflect(-to_light, normal);
        (-reflected.dot(ray_direction)).max(0.0).powf(exponent) * self.intensity
    }
}

impl From<LightDescription> for Light {
    fn from(desc: LightDescription) -> Self {
        Self::new(desc.position, desc.intensity)
    }
}

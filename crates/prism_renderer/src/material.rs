//! Surface materials and the optics helpers shared by lights and the integrator.

use prism_core::MaterialDescription;
use prism_math::{Albedo, Color, Vec3, Vec4};

/// How a surface responds to light.
///
/// The albedo weights the four shading terms {diffuse, specular,
/// reflective, refractive}. The weights are not required to sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub albedo: Albedo,
    pub diffuse_color: Color,
    /// Phong shininess
    pub specular_exponent: f32,
    /// Index of refraction (1.0 = no bending, 1.5 = glass)
    pub refractive_index: f32,
}

impl Material {
    pub fn new(albedo: Albedo, diffuse_color: Color, specular_exponent: f32, refractive_index: f32) -> Self {
        Self {
            albedo,
            diffuse_color,
            specular_exponent,
            refractive_index,
        }
    }

    /// Matte off-white with a soft highlight.
    pub fn ivory() -> Self {
        Self::new(Vec4::new(0.6, 0.3, 0.1, 0.0), Color::new(0.4, 0.4, 0.3), 50.0, 1.0)
    }

    /// Mostly transparent, slightly reflective.
    pub fn glass() -> Self {
        Self::new(Vec4::new(0.0, 0.5, 0.1, 0.8), Color::new(0.6, 0.7, 0.8), 125.0, 1.5)
    }

    pub fn red_rubber() -> Self {
        Self::new(Vec4::new(0.9, 0.1, 0.0, 0.0), Color::new(0.3, 0.1, 0.1), 10.0, 1.0)
    }

    /// Perfect mirror: all energy goes to the reflected ray.
    pub fn mirror() -> Self {
        Self::new(Vec4::new(0.0, 0.0, 1.0, 0.0), Color::ONE, 1425.0, 1.0)
    }
}

impl Default for Material {
    fn default() -> Self {
        MaterialDescription::default().into()
    }
}

impl From<MaterialDescription> for Material {
    fn from(desc: MaterialDescription) -> Self {
        Self::new(desc.albedo, desc.diffuse_color, desc.specular_exponent, desc.refractive_index)
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal: d - 2(d·n)n.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - 2.0 * d.dot(n) * n
}

/// Refract a unit vector through a surface with the given index of refraction.
///
/// `n` is the outward surface normal. When the ray travels from inside the
/// surface the normal is flipped and the indices swapped. Returns the zero
/// vector on total internal reflection.
pub fn refract(incident: Vec3, n: Vec3, refractive_index: f32) -> Vec3 {
    let mut cos_i = -incident.dot(n).clamp(-1.0, 1.0);
    let (mut eta_i, mut eta_t, mut normal) = (1.0, refractive_index, n);

    if cos_i < 0.0 {
        cos_i = -cos_i;
        std::mem::swap(&mut eta_i, &mut eta_t);
        normal = -n;
    }

    let eta = eta_i / eta_t;
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        Vec3::ZERO
    } else {
        incident * eta + normal * (eta * cos_i - k.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect() {
        let d = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = reflect(d, Vec3::Y);
        assert!((r - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_refract_unit_index_passes_straight_through() {
        let d = Vec3::new(0.3, -1.0, 0.2).normalize();
        let r = refract(d, Vec3::Y, 1.0);
        assert!((r - d).length() < 1e-6);
    }

    #[test]
    fn test_refract_bends_towards_normal_when_entering() {
        let d = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = refract(d, Vec3::Y, 1.5);

        // sin(theta_t) = sin(45°) / 1.5
        let sin_t = r.x / r.length();
        assert!((sin_t - (0.5f32.sqrt() / 1.5)).abs() < 1e-5);
        assert!(r.y < 0.0);
    }

    #[test]
    fn test_refract_exiting_swaps_indices() {
        // Leaving glass at a shallow angle: refracted ray bends away from the normal.
        let d = Vec3::new(0.3, 1.0, 0.0).normalize();
        let r = refract(d, Vec3::Y, 1.5);
        assert!(r.x / r.length() > d.x);
        assert!(r.y > 0.0);
    }

    #[test]
    fn test_total_internal_reflection_is_zero() {
        let d = Vec3::new(1.0, 0.2, 0.0).normalize();
        assert_eq!(refract(d, Vec3::Y, 1.5), Vec3::ZERO);
    }

    #[test]
    fn test_from_description() {
        let desc = MaterialDescription {
            refractive_index: 1.33,
            ..Default::default()
        };
        let material = Material::from(desc);
        assert_eq!(material.refractive_index, 1.33);
        assert_eq!(material.albedo, desc.albedo);
    }
}

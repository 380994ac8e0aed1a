// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB color, channels nominally in [0, 1].
pub type Color = Vec3;

/// Weights of the {diffuse, specular, reflective, refractive} shading terms.
pub type Albedo = Vec4;

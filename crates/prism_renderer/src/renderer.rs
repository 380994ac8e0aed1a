//! Whitted-style recursive shading.
//!
//! Every hit spawns exactly one reflection ray and one refraction ray,
//! then adds Phong-like direct lighting from each unoccluded point light.
//! The four terms are weighted by the material albedo.

use crate::{Camera, Hit, Intersect, Light, Scene};
use crate::material::{reflect, refract};
use prism_math::{Color, Point3, Ray, Vec3};

/// Deepest recursion level that is still shaded; deeper rays see the background.
pub const MAX_DEPTH: u32 = 4;

/// Offset applied along the normal to secondary ray origins to avoid self-intersection.
pub const EPSILON: f32 = 1e-4;

/// Compute the color seen by a ray.
///
/// Misses and rays deeper than `MAX_DEPTH` return `background`.
pub fn cast_ray<T: Intersect>(scene: &Scene<T>, ray: &Ray, depth: u32, background: Color) -> Color {
    if depth > MAX_DEPTH {
        return background;
    }
    let Some(hit) = scene.ray_intersect(ray) else {
        return background;
    };
    let material = hit.material;

    let reflect_dir = reflect(ray.direction(), hit.normal).normalize_or_zero();
    let reflect_ray = Ray::new(offset_origin(&hit, reflect_dir), reflect_dir);
    let reflect_color = cast_ray(scene, &reflect_ray, depth + 1, background);

    // Total internal reflection yields a zero direction; the ray is still
    // cast and simply misses.
    let refract_dir = refract(ray.direction(), hit.normal, material.refractive_index).normalize_or_zero();
    let refract_ray = Ray::new(offset_origin(&hit, refract_dir), refract_dir);
    let refract_color = cast_ray(scene, &refract_ray, depth + 1, background);

    let mut diffuse_intensity = 0.0;
    let mut specular_intensity = 0.0;
    for light in scene.lights() {
        if is_shaded(scene, &hit, light) {
            continue;
        }
        diffuse_intensity += light.diffuse(hit.point, hit.normal);
        specular_intensity +=
            light.specular(hit.point, hit.normal, ray.direction(), material.specular_exponent);
    }

    let albedo = material.albedo;
    material.diffuse_color * diffuse_intensity * albedo.x
        + Color::ONE * specular_intensity * albedo.y
        + reflect_color * albedo.z
        + refract_color * albedo.w
}

/// Check whether anything blocks the segment from `hit` to `light`.
///
/// Occluders past the light do not count.
pub fn is_shaded<T: Intersect>(scene: &Scene<T>, hit: &Hit<'_>, light: &Light) -> bool {
    let to_light = light.position - hit.point;
    let distance = to_light.length();
    let direction = to_light.normalize_or_zero();

    let origin = offset_origin(hit, direction);
    match scene.ray_intersect(&Ray::new(origin, direction)) {
        Some(blocker) => (blocker.point - origin).length() < distance,
        None => false,
    }
}

/// Nudge the hit point off the surface, to the side `direction` leaves through.
#[inline]
fn offset_origin(hit: &Hit<'_>, direction: Vec3) -> Point3 {
    if direction.dot(hit.normal) < 0.0 {
        hit.point - hit.normal * EPSILON
    } else {
        hit.point + hit.normal * EPSILON
    }
}

/// Shade a single pixel.
#[inline]
pub fn render_pixel<T: Intersect>(
    camera: &Camera,
    scene: &Scene<T>,
    row: u32,
    col: u32,
    background: Color,
) -> Color {
    let ray = camera.emit_ray(row, col);
    cast_ray(scene, &ray, 0, background)
}

//! Scene aggregate: an ordered list of one primitive type plus point lights.

use crate::{Hit, Intersect, Light};
use prism_math::{Interval, Ray};

/// Hits at or beyond this distance are treated as misses.
pub const LIMIT: f32 = 1000.0;

/// Accepted range of hit distances.
const ACCEPT: Interval = Interval::new(0.0, LIMIT);

/// A collection of intersectable objects and the lights illuminating them.
///
/// The scene is built once and only read while rendering, so it can be
/// shared across worker threads.
#[derive(Debug, Clone)]
pub struct Scene<T> {
    objects: Vec<T>,
    lights: Vec<Light>,
}

impl<T> Scene<T> {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Create a scene from prebuilt object and light lists.
    pub fn from_parts(objects: Vec<T>, lights: Vec<Light>) -> Self {
        Self { objects, lights }
    }

    pub fn add_object(&mut self, object: T) {
        self.objects.push(object);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn objects(&self) -> &[T] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<T> Default for Scene<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Intersect> Scene<T> {
    /// Find the nearest hit of `ray` against every object.
    ///
    /// Objects are tested in insertion order and an exact tie in `t` keeps
    /// the first object found, so results are reproducible for a given
    /// object order.
    pub fn ray_intersect(&self, ray: &Ray) -> Option<Hit<'_>> {
        let mut nearest: Option<Hit<'_>> = None;

        for object in &self.objects {
            let Some(hit) = object.ray_intersect(ray) else {
                continue;
            };
            if !ACCEPT.accepts(hit.t) {
                continue;
            }
            if nearest.map_or(true, |n| hit.t < n.t) {
                nearest = Some(hit);
            }
        }

        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Primitive, Sphere, Triangle};
    use prism_math::Vec3;

    fn ray_down_z() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z)
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene: Scene<Sphere> = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.ray_intersect(&ray_down_z()).is_none());
    }

    #[test]
    fn test_nearest_hit_wins_regardless_of_order() {
        let mut scene: Scene<Sphere> = Scene::new();
        scene.add_object(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Material::ivory()));
        scene.add_object(Sphere::new(Vec3::ZERO, 1.0, Material::glass()));

        let hit = scene.ray_intersect(&ray_down_z()).unwrap();
        assert!((hit.t - 9.0).abs() < 1e-5);
        assert_eq!(*hit.material, Material::glass());
    }

    #[test]
    fn test_exact_tie_keeps_first_object() {
        let scene = Scene::from_parts(
            vec![
                Sphere::new(Vec3::ZERO, 1.0, Material::ivory()),
                Sphere::new(Vec3::ZERO, 1.0, Material::mirror()),
            ],
            Vec::new(),
        );

        let hit = scene.ray_intersect(&ray_down_z()).unwrap();
        assert_eq!(*hit.material, Material::ivory());
    }

    #[test]
    fn test_hits_beyond_limit_are_misses() {
        let mut scene: Scene<Sphere> = Scene::new();
        scene.add_object(Sphere::new(Vec3::new(0.0, 0.0, -1500.0), 10.0, Material::ivory()));

        assert!(scene.ray_intersect(&ray_down_z()).is_none());
    }

    #[test]
    fn test_mixed_primitives() {
        let mut scene: Scene<Primitive> = Scene::new();
        scene.add_object(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Material::ivory()).into());
        scene.add_object(
            Triangle::new(
                Vec3::new(-1.0, -1.0, 2.0),
                Vec3::new(1.0, -1.0, 2.0),
                Vec3::new(0.0, 1.0, 2.0),
                Material::red_rubber(),
            )
            .unwrap()
            .into(),
        );
        scene.add_light(Light::new(Vec3::Y * 10.0, 1.0));

        assert_eq!(scene.len(), 2);
        assert_eq!(scene.lights().len(), 1);

        let hit = scene.ray_intersect(&ray_down_z()).unwrap();
        assert!((hit.t - 8.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Z);
    }
}

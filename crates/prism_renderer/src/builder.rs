//! Ready-made scenes and the bridge from `SceneDescription` to a traceable scene.

use prism_core::{load_obj, MeshData, SceneDescription};
use prism_math::{Color, Vec3, Vec4};

use crate::{Camera, Light, Material, Mesh, Primitive, RenderResult, Scene, Sphere};

/// A single matte red sphere at the origin lit from straight above.
pub fn default_scene() -> Scene<Sphere> {
    let material = Material::new(
        Vec4::new(0.9, 0.1, 0.0, 0.0),
        Color::new(0.3, 0.1, 0.1),
        10.0,
        1.0,
    );
    Scene::from_parts(
        vec![Sphere::new(Vec3::ZERO, 5.0, material)],
        vec![Light::new(Vec3::new(0.0, 20.0, 0.0), 5.0)],
    )
}

/// Four spheres of different materials over a ground quad, lit by three lights.
///
/// Meant to be viewed from around `(0, 2, 12)` looking down -Z.
pub fn showcase_scene() -> Scene<Primitive> {
    let mut scene: Scene<Primitive> = Scene::new();

    scene.add_object(Sphere::new(Vec3::new(-3.0, 0.0, -16.0), 2.0, Material::ivory()).into());
    scene.add_object(Sphere::new(Vec3::new(-1.0, -1.5, -12.0), 2.0, Material::glass()).into());
    scene.add_object(Sphere::new(Vec3::new(1.5, -0.5, -18.0), 3.0, Material::red_rubber()).into());
    scene.add_object(Sphere::new(Vec3::new(7.0, 5.0, -18.0), 4.0, Material::mirror()).into());

    let ground = MeshData::new(
        "ground",
        vec![
            Vec3::new(-10.0, -4.0, -30.0),
            Vec3::new(-10.0, -4.0, -5.0),
            Vec3::new(10.0, -4.0, -5.0),
            Vec3::new(10.0, -4.0, -30.0),
        ],
        vec![0, 1, 2, 0, 2, 3],
    );
    let ground_material = Material::new(
        Vec4::new(0.6, 0.1, 0.3, 0.0),
        Color::new(0.3, 0.2, 0.1),
        20.0,
        1.0,
    );
    scene.add_object(Mesh::from_data(&ground, ground_material).into());

    scene.add_light(Light::new(Vec3::new(-20.0, 20.0, 20.0), 1.5));
    scene.add_light(Light::new(Vec3::new(30.0, 50.0, -25.0), 1.8));
    scene.add_light(Light::new(Vec3::new(30.0, 20.0, 30.0), 1.7));

    scene
}

/// Build a scene and camera from a description, loading any referenced OBJ files.
pub fn build_scene(description: &SceneDescription) -> RenderResult<(Scene<Primitive>, Camera)> {
    description.validate()?;
    let mut scene: Scene<Primitive> = Scene::new();

    for sphere in &description.spheres {
        scene.add_object(Sphere::from(sphere).into());
    }

    for mesh in &description.meshes {
        let material = Material::from(mesh.material);
        for mut data in load_obj(&mesh.path)? {
            data.transform(mesh.scale, mesh.offset);
            let built = Mesh::from_data(&data, material);
            log::debug!("Mesh '{}': {} triangles", built.name(), built.len());
            scene.add_object(built.into());
        }
    }

    for light in &description.lights {
        scene.add_light(Light::from(*light));
    }

    let camera = Camera::from(&description.camera);
    log::info!(
        "Built scene: {} objects, {} lights",
        scene.len(),
        scene.lights().len()
    );

    Ok((scene, camera))
}

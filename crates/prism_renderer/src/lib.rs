//! Prism Renderer - Whitted-style CPU ray tracing.
//!
//! A recursive ray tracer with Phong-like local lighting, hard shadows,
//! mirror reflection and Snell refraction. Frames are rendered by one of
//! three interchangeable strategies: a single-threaded reference pass,
//! column tiles on fresh OS threads, or spiral-ordered buckets on rayon.

mod bucket;
mod builder;
mod camera;
mod driver;
mod error;
mod framebuffer;
mod hit;
mod light;
mod material;
mod mesh;
mod primitive;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use bucket::{column_tiles, generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use builder::{build_scene, default_scene, showcase_scene};
pub use camera::{Camera, Direction, MOVE_SPEED, ROTATE_SPEED};
pub use error::{RenderError, RenderResult};
pub use framebuffer::{color_to_rgb, Framebuffer};
pub use hit::{Hit, Intersect};
pub use light::Light;
pub use material::{reflect, refract, Material};
pub use mesh::Mesh;
pub use primitive::Primitive;
pub use driver::{RenderConfig, Renderer, Strategy};
pub use renderer::{cast_ray, is_shaded, render_pixel, EPSILON, MAX_DEPTH};
pub use scene::{Scene, LIMIT};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export math types from prism_math
pub use prism_math::{Albedo, Color, Interval, Point3, Ray, Vec3, Vec4};

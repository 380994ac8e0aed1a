//! Frame drivers.
//!
//! `Renderer` owns a scene, a camera and a framebuffer and fills the whole
//! framebuffer on every `render()` call using one of three strategies.
//! All strategies evaluate the same per-pixel function, so their output is
//! identical; only the work partitioning differs.

use std::str::FromStr;
use std::thread;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bucket::{column_tiles, generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::renderer::{cast_ray, render_pixel};
use crate::{Camera, Framebuffer, Intersect, RenderError, RenderResult, Scene};
use prism_math::{Color, Ray};

/// How a frame is split across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Single-threaded nested loop; the reference output.
    Sequential,
    /// One full-height column tile per worker, on threads spawned for the frame.
    #[default]
    Tiled,
    /// Square buckets in spiral order on the rayon pool.
    Bucketed,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" => Ok(Strategy::Sequential),
            "tiled" => Ok(Strategy::Tiled),
            "bucketed" => Ok(Strategy::Bucketed),
            other => Err(format!("unknown render strategy '{other}'")),
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Color returned by rays that miss everything
    pub background: Color,
    pub strategy: Strategy,
    /// Worker count; `None` uses the detected hardware concurrency
    pub threads: Option<usize>,
    /// Bucket edge length for `Strategy::Bucketed`
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Color::new(0.2, 0.7, 0.8),
            strategy: Strategy::default(),
            threads: None,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Number of workers to use, falling back to the hardware thread count.
    pub fn worker_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// A renderer bound to one scene and camera.
pub struct Renderer<T> {
    scene: Scene<T>,
    camera: Camera,
    config: RenderConfig,
    framebuffer: Framebuffer,
    /// Dedicated pool when a bucketed render asks for an explicit thread count
    pool: Option<rayon::ThreadPool>,
    last_frame_time: Duration,
}

impl<T: Intersect> Renderer<T> {
    /// Create a renderer, rejecting configurations that cannot produce a frame.
    pub fn new(scene: Scene<T>, camera: Camera, config: RenderConfig) -> RenderResult<Self> {
        camera.validate()?;
        if config.threads == Some(0) {
            return Err(RenderError::ZeroWorkerThreads);
        }
        if config.bucket_size == 0 {
            return Err(RenderError::ZeroBucketSize);
        }

        let pool = match (config.strategy, config.threads) {
            (Strategy::Bucketed, Some(threads)) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("prism-bucket-{i}"))
                    .build()?,
            ),
            _ => None,
        };

        let framebuffer = Framebuffer::new(camera.width(), camera.height());
        log::debug!(
            "Renderer ready: {}x{}, {} objects, {} lights, {:?}",
            camera.width(),
            camera.height(),
            scene.len(),
            scene.lights().len(),
            config.strategy
        );

        Ok(Self {
            scene,
            camera,
            config,
            framebuffer,
            pool,
            last_frame_time: Duration::ZERO,
        })
    }

    /// Render a full frame into the framebuffer. Blocks until every pixel is written.
    ///
    /// The camera is re-checked first since `camera_mut` can replace it
    /// between frames; an invalid camera leaves the previous frame untouched.
    pub fn render(&mut self) -> RenderResult<()> {
        self.camera.validate()?;
        if self.framebuffer.width() != self.camera.width()
            || self.framebuffer.height() != self.camera.height()
        {
            self.framebuffer = Framebuffer::new(self.camera.width(), self.camera.height());
        }

        let start = Instant::now();
        let background = self.config.background;
        match self.config.strategy {
            Strategy::Sequential => {
                render_sequential(&self.scene, &self.camera, background, &mut self.framebuffer)
            }
            Strategy::Tiled => render_tiled(
                &self.scene,
                &self.camera,
                background,
                self.config.worker_count(),
                &mut self.framebuffer,
            ),
            Strategy::Bucketed => {
                let (scene, camera, bucket_size) = (&self.scene, &self.camera, self.config.bucket_size);
                let framebuffer = &mut self.framebuffer;
                match &self.pool {
                    Some(pool) => pool.install(|| {
                        render_bucketed(scene, camera, background, bucket_size, framebuffer)
                    }),
                    None => render_bucketed(scene, camera, background, bucket_size, framebuffer),
                }
            }
        }
        self.last_frame_time = start.elapsed();

        log::info!(
            "Rendered {}x{} frame ({:?}) in {:.2?}",
            self.camera.width(),
            self.camera.height(),
            self.config.strategy,
            self.last_frame_time
        );
        Ok(())
    }

    /// Color seen along an arbitrary ray, from the top of the recursion.
    pub fn cast_ray(&self, ray: &Ray) -> Color {
        cast_ray(&self.scene, ray, 0, self.config.background)
    }
}

impl<T> Renderer<T> {
    /// The most recently rendered frame.
    pub fn buffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable camera access for the input layer, between frames.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn scene(&self) -> &Scene<T> {
        &self.scene
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Wall-clock time of the last `render()` call.
    pub fn last_frame_time(&self) -> Duration {
        self.last_frame_time
    }
}

/// Reference single-threaded pass.
fn render_sequential<T: Intersect>(
    scene: &Scene<T>,
    camera: &Camera,
    background: Color,
    framebuffer: &mut Framebuffer,
) {
    let width = framebuffer.width() as usize;
    for (row, line) in framebuffer.pixels_mut().chunks_exact_mut(width).enumerate() {
        for (col, pixel) in line.iter_mut().enumerate() {
            *pixel = render_pixel(camera, scene, row as u32, col as u32, background);
        }
    }
}

/// Fork-join pass with one freshly spawned thread per column tile.
///
/// Each worker renders its own disjoint tile; tiles are copied into the
/// framebuffer once all workers have joined.
fn render_tiled<T: Intersect>(
    scene: &Scene<T>,
    camera: &Camera,
    background: Color,
    workers: usize,
    framebuffer: &mut Framebuffer,
) {
    let tiles = column_tiles(framebuffer.width(), framebuffer.height(), workers);
    log::debug!("Tiled render: {} workers, tile width {}", tiles.len(), tiles[0].width);

    let results: Vec<BucketResult> = thread::scope(|s| {
        let handles: Vec<_> = tiles
            .iter()
            .map(|tile| {
                s.spawn(move || {
                    BucketResult::new(*tile, render_bucket(tile, camera, scene, background))
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    for result in &results {
        framebuffer.write_bucket(result);
    }
}

/// Spiral-ordered buckets on the current rayon pool.
fn render_bucketed<T: Intersect>(
    scene: &Scene<T>,
    camera: &Camera,
    background: Color,
    bucket_size: u32,
    framebuffer: &mut Framebuffer,
) {
    let buckets = generate_buckets(framebuffer.width(), framebuffer.height(), bucket_size);
    log::debug!(
        "Bucketed render: {} buckets of {}px on {} threads",
        buckets.len(),
        bucket_size,
        rayon::current_num_threads()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| BucketResult::new(*bucket, render_bucket(bucket, camera, scene, background)))
        .collect();

    for result in &results {
        framebuffer.write_bucket(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{default_scene, showcase_scene, Direction, Sphere};
    use prism_math::Vec3;

    fn reference_camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 200, 200)
    }

    fn config(strategy: Strategy, threads: Option<usize>) -> RenderConfig {
        RenderConfig {
            strategy,
            threads,
            ..Default::default()
        }
    }

    fn render_with<T: Intersect + Clone>(scene: &Scene<T>, camera: &Camera, config: RenderConfig) -> Framebuffer {
        let mut renderer = Renderer::new(scene.clone(), camera.clone(), config).unwrap();
        renderer.render().unwrap();
        renderer.buffer().clone()
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("Tiled".parse::<Strategy>(), Ok(Strategy::Tiled));
        assert_eq!("sequential".parse::<Strategy>(), Ok(Strategy::Sequential));
        assert_eq!("bucketed".parse::<Strategy>(), Ok(Strategy::Bucketed));
        assert!("spiral".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_config_json() {
        let config: RenderConfig = serde_json::from_str(r#"{ "strategy": "bucketed", "threads": 2 }"#).unwrap();
        assert_eq!(config.strategy, Strategy::Bucketed);
        assert_eq!(config.worker_count(), 2);
        assert_eq!(config.bucket_size, DEFAULT_BUCKET_SIZE);
    }

    #[test]
    fn test_rejects_misconfiguration() {
        let scene: Scene<Sphere> = default_scene();

        let zero = Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 0, 200);
        assert!(matches!(
            Renderer::new(scene.clone(), zero, RenderConfig::default()),
            Err(RenderError::ZeroResolution { .. })
        ));

        assert!(matches!(
            Renderer::new(scene.clone(), reference_camera(), config(Strategy::Tiled, Some(0))),
            Err(RenderError::ZeroWorkerThreads)
        ));

        let no_buckets = RenderConfig {
            bucket_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            Renderer::new(scene, reference_camera(), no_buckets),
            Err(RenderError::ZeroBucketSize)
        ));
    }

    #[test]
    fn test_tiled_matches_sequential() {
        let scene = default_scene();
        let camera = reference_camera();

        let reference = render_with(&scene, &camera, config(Strategy::Sequential, None));
        for threads in [1, 3, 7, 16] {
            let tiled = render_with(&scene, &camera, config(Strategy::Tiled, Some(threads)));
            assert!(tiled == reference, "tiled render with {threads} threads differs");
        }
        let detected = render_with(&scene, &camera, config(Strategy::Tiled, None));
        assert!(detected == reference);
    }

    #[test]
    fn test_bucketed_matches_sequential() {
        let _ = env_logger::builder().is_test(true).try_init();
        let scene = showcase_scene();
        let camera = Camera::new(Vec3::new(0.0, 2.0, 12.0), Vec3::new(0.0, 0.0, -8.0), 97, 61);

        let reference = render_with(&scene, &camera, config(Strategy::Sequential, None));
        let bucketed = render_with(
            &scene,
            &camera,
            RenderConfig {
                strategy: Strategy::Bucketed,
                threads: Some(3),
                bucket_size: 16,
                ..Default::default()
            },
        );
        let tiled = render_with(&scene, &camera, config(Strategy::Tiled, Some(5)));

        assert!(bucketed == reference);
        assert!(tiled == reference);
    }

    #[test]
    fn test_moving_left_changes_the_frame() {
        let mut renderer = Renderer::new(default_scene(), reference_camera(), RenderConfig::default()).unwrap();
        renderer.render().unwrap();
        let before = renderer.buffer().clone();
        let center_before = before.get(100, 100);

        while renderer.camera().position().x > -10.0 {
            renderer.camera_mut().step(Direction::Left);
        }
        renderer.render().unwrap();
        let after = renderer.buffer();

        assert!(before != *after);
        // The center ray now passes beside the sphere.
        assert_eq!(after.get(100, 100), renderer.config().background);
        assert_ne!(center_before, after.get(100, 100));
    }

    #[test]
    fn test_resolution_change_resizes_buffer() {
        let mut renderer = Renderer::new(default_scene(), reference_camera(), config(Strategy::Sequential, None)).unwrap();
        renderer.render().unwrap();
        assert_eq!(renderer.buffer().pixels().len(), 200 * 200);

        renderer.camera_mut().set_resolution(40, 30).unwrap();
        renderer.render().unwrap();
        assert_eq!(renderer.buffer().width(), 40);
        assert_eq!(renderer.buffer().pixels().len(), 40 * 30);
    }

    #[test]
    fn test_render_rejects_invalid_camera_swap() {
        let mut renderer = Renderer::new(default_scene(), reference_camera(), RenderConfig::default()).unwrap();
        renderer.render().unwrap();
        let previous = renderer.buffer().clone();

        *renderer.camera_mut() = Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 0, 200);
        assert!(matches!(renderer.render(), Err(RenderError::ZeroResolution { width: 0, height: 200 })));
        assert!(*renderer.buffer() == previous);

        *renderer.camera_mut() = reference_camera().with_fov(0.0);
        assert!(matches!(renderer.render(), Err(RenderError::InvalidFov(_))));
    }

    #[test]
    fn test_cast_ray_uses_configured_background() {
        let renderer = Renderer::new(default_scene(), reference_camera(), RenderConfig::default()).unwrap();
        let away = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert_eq!(renderer.cast_ray(&away), renderer.config().background);
    }
}

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use prism_core::SceneDescription;
use prism_renderer::{
    build_scene, default_scene, Camera, Direction, Intersect, RenderConfig, Renderer, Scene,
    Strategy, Vec3,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a scene with the Prism ray tracer", long_about = None)]
struct Args {
    /// JSON scene description; the built-in single-sphere scene when omitted
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Output width in pixels, overriding the scene camera
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels, overriding the scene camera
    #[arg(long)]
    height: Option<u32>,

    /// sequential, tiled or bucketed
    #[arg(long, default_value = "tiled")]
    strategy: Strategy,

    /// Worker threads; hardware concurrency when omitted
    #[arg(long)]
    threads: Option<usize>,

    /// Camera moves applied before rendering, one key per step:
    /// w/s forward/back, a/d strafe, q/e turn
    #[arg(long, default_value = "")]
    moves: String,

    /// Where to write the PNG
    #[arg(long, short, default_value = "render.png")]
    output: PathBuf,
}

/// Translate viewer-style keys into camera steps.
fn parse_moves(keys: &str) -> Result<Vec<Direction>> {
    keys.chars()
        .filter(|c| !c.is_whitespace())
        .map(|key| match key.to_ascii_lowercase() {
            'w' => Ok(Direction::Forward),
            's' => Ok(Direction::Backward),
            'a' => Ok(Direction::Left),
            'd' => Ok(Direction::Right),
            'q' => Ok(Direction::RotateLeft),
            'e' => Ok(Direction::RotateRight),
            other => bail!("unknown move key '{other}'"),
        })
        .collect()
}

fn run<T: Intersect>(
    scene: Scene<T>,
    mut camera: Camera,
    config: RenderConfig,
    args: &Args,
) -> Result<()> {
    let width = args.width.unwrap_or(camera.width());
    let height = args.height.unwrap_or(camera.height());
    camera.set_resolution(width, height)?;

    let moves = parse_moves(&args.moves)?;
    let mut renderer = Renderer::new(scene, camera, config)?;

    for direction in moves {
        renderer.camera_mut().step(direction);
    }
    if !args.moves.is_empty() {
        let position = renderer.camera().position();
        log::info!("Camera at ({:.2}, {:.2}, {:.2})", position.x, position.y, position.z);
    }

    renderer.render()?;
    renderer
        .buffer()
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!(
        "Frame took {:.2?}, saved to {}",
        renderer.last_frame_time(),
        args.output.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting Prism");

    let mut config = RenderConfig {
        strategy: args.strategy,
        threads: args.threads,
        ..Default::default()
    };

    match &args.scene {
        Some(path) => {
            let description = SceneDescription::load(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?;
            config.background = description.background;
            let (scene, camera) = build_scene(&description)?;
            run(scene, camera, config, &args)
        }
        None => {
            let camera = Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 200, 200);
            run(default_scene(), camera, config, &args)
        }
    }
}

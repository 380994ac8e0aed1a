//! Renderer error types.

use prism_core::LoadError;
use thiserror::Error;

/// Errors raised when a renderer or its inputs are misconfigured.
///
/// Rendering itself cannot fail: misses and degenerate numerics are
/// ordinary control flow inside the integrator.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Resolution must be non-zero, got {width}x{height}")]
    ZeroResolution { width: u32, height: u32 },

    #[error("Field of view must be within (0, pi) radians, got {0}")]
    InvalidFov(f32),

    #[error("Camera forward direction is parallel to its up vector")]
    DegenerateView,

    #[error("Worker thread count must be at least 1")]
    ZeroWorkerThreads,

    #[error("Bucket size must be at least 1")]
    ZeroBucketSize,

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Scene load error: {0}")]
    Load(#[from] LoadError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for renderer construction and output.
pub type RenderResult<T> = Result<T, RenderError>;

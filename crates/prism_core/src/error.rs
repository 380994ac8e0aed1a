//! Errors raised while loading scene data from disk.

use thiserror::Error;

/// Errors that can occur while loading meshes or scene descriptions.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("Scene description error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No geometry found in {0}")]
    NoGeometry(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

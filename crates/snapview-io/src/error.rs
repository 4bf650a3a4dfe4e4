use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

/// The "could not open file" surface the viewer shows for a bad document.
///
/// The core never sees partially-decoded data: loading either yields a
/// fully valid collection or one of these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("trace file not found: {0}")]
    NotFound(PathBuf),
}

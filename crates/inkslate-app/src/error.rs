//! Application errors.

use inkslate_core::{CodecError, ShapeError, StorageError};
use inkslate_render::RendererError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Drawing file error: {0}")]
    Codec(#[from] CodecError),
    #[error("Input error: {0}")]
    Shape(#[from] ShapeError),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
    #[error("Invalid session script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

//! Storage abstraction for drawing files.

pub mod codec;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use codec::{CodecError, decode, encode};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Drawing not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<CodecError> for StorageError {
    fn from(e: CodecError) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for drawing storage backends.
///
/// Backends store the bytes produced by [`codec::encode`], keyed by a
/// drawing id.
pub trait Storage: Send + Sync {
    /// Save a drawing.
    fn save(&self, id: &str, bytes: &[u8]) -> StorageResult<()>;

    /// Load a drawing.
    fn load(&self, id: &str) -> StorageResult<Vec<u8>>;

    /// Delete a drawing.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// List all drawing ids.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a drawing exists.
    fn exists(&self, id: &str) -> StorageResult<bool>;
}

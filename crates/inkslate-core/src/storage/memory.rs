//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    drawings: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, bytes: &[u8]) -> StorageResult<()> {
        let mut drawings = self.drawings.write().map_err(lock_error)?;
        drawings.insert(id.to_string(), bytes.to_vec());
        Ok(())
    }

    fn load(&self, id: &str) -> StorageResult<Vec<u8>> {
        let drawings = self.drawings.read().map_err(lock_error)?;
        drawings
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut drawings = self.drawings.write().map_err(lock_error)?;
        drawings.remove(id);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let drawings = self.drawings.read().map_err(lock_error)?;
        let mut ids: Vec<String> = drawings.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        let drawings = self.drawings.read().map_err(lock_error)?;
        Ok(drawings.contains_key(id))
    }
}

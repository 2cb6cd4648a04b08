pub mod app_config;
pub mod document;
pub mod json_file;
pub mod memory;

pub use document::{DbClient, DocumentCollection};
pub use json_file::JsonFileCollection;
pub use memory::MemoryCollection;

use aerodesk_core::repository::{Collection, Record, StoreError};
use app_config::{Config, StorageBackend};
use std::any::Any;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Clone)]
enum Medium {
    Memory,
    File(PathBuf),
    Document(DbClient),
}

type Handles = HashMap<&'static str, Arc<dyn Any + Send + Sync>>;

/// The persistence medium picked by `storage.backend`.
///
/// Hands out one shared [`Collection`] per collection name, so every caller
/// asking for the same records goes through the same single writer.
#[derive(Clone)]
pub struct Storage {
    medium: Medium,
    handles: Arc<Mutex<Handles>>,
}

impl Storage {
    fn with_medium(medium: Medium) -> Self {
        Self {
            medium,
            handles: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn memory() -> Self {
        Self::with_medium(Medium::Memory)
    }

    pub fn files(dir: impl Into<PathBuf>) -> Self {
        Self::with_medium(Medium::File(dir.into()))
    }

    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        match config.storage.backend {
            StorageBackend::Memory => Ok(Self::memory()),
            StorageBackend::File => Ok(Self::files(config.storage.data_dir.clone())),
            StorageBackend::Document => {
                let url = config.database.url.as_deref().ok_or_else(|| {
                    StoreError::Backend("storage.backend = \"document\" requires database.url".into())
                })?;
                let db = DbClient::new(url)
                    .await
                    .map_err(|e| StoreError::Backend(e.to_string()))?;
                db.migrate()
                    .await
                    .map_err(|e| StoreError::Backend(e.to_string()))?;
                Ok(Self::with_medium(Medium::Document(db)))
            }
        }
    }

    pub fn collection<T: Record>(&self) -> Arc<dyn Collection<T>> {
        match &self.medium {
            Medium::Memory => self.shared(MemoryCollection::<T>::new),
            Medium::File(dir) => self.shared(|| JsonFileCollection::<T>::in_dir(dir)),
            Medium::Document(db) => self.shared(|| DocumentCollection::<T>::new(db)),
        }
    }

    fn shared<T, C>(&self, create: impl FnOnce() -> C) -> Arc<dyn Collection<T>>
    where
        T: Record,
        C: Collection<T> + 'static,
    {
        // The map is never left half-updated, so a poisoned lock is still usable.
        let mut handles = self.handles.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(existing) = handles.get(T::COLLECTION) {
            match Arc::clone(existing).downcast::<C>() {
                Ok(handle) => return handle,
                Err(_) => {
                    warn!("Collection {} requested with a different record type", T::COLLECTION);
                    return Arc::new(create());
                }
            }
        }

        let handle = Arc::new(create());
        handles.insert(T::COLLECTION, handle.clone());
        handle
    }

    pub fn describe(&self) -> String {
        match &self.medium {
            Medium::Memory => "memory".to_string(),
            Medium::File(dir) => format!("json files in {}", dir.display()),
            Medium::Document(_) => "postgres documents".to_string(),
        }
    }
}

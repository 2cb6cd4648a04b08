use aerodesk_core::repository::{Collection, Predicate, Record, StoreError, StoreResult};
use async_trait::async_trait;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// A collection kept as one JSON array in a single file.
///
/// Every mutation rewrites the whole file. Mutations are serialized through
/// `write_lock` and land via temp file + rename, so readers never see a
/// half-written array and concurrent writers can't drop each other's update.
pub struct JsonFileCollection<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> JsonFileCollection<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// `<dir>/<collection>.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", T::COLLECTION)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> StoreResult<Vec<T>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    async fn write(&self, records: &[T]) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &content)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        debug!("Wrote {} {} record(s) to {}", records.len(), T::COLLECTION, self.path.display());
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl<T: Record> Collection<T> for JsonFileCollection<T> {
    async fn list(&self) -> StoreResult<Vec<T>> {
        self.read().await
    }

    async fn append(&self, mut record: T) -> StoreResult<T> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read().await?;
        record.assign_id(&records);
        records.push(record.clone());
        self.write(&records).await?;

        Ok(record)
    }

    async fn remove(&self, predicate: Predicate<'_, T>) -> StoreResult<usize> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read().await?;
        let before = records.len();
        records.retain(|r| !predicate(r));
        let removed = before - records.len();

        // Rewrite even when nothing matched, mirroring the wholesale-rewrite contract.
        self.write(&records).await?;
        if removed > 0 {
            info!("Removed {} record(s) from {}", removed, T::COLLECTION);
        }

        Ok(removed)
    }
}

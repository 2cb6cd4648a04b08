use aerodesk_core::repository::{Collection, Predicate, Record, StoreResult};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Process-local collection. Backs tests and `storage.backend = "memory"`.
pub struct MemoryCollection<T> {
    records: RwLock<Vec<T>>,
}

impl<T> MemoryCollection<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl<T> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Collection<T> for MemoryCollection<T> {
    async fn list(&self) -> StoreResult<Vec<T>> {
        Ok(self.records.read().await.clone())
    }

    async fn append(&self, mut record: T) -> StoreResult<T> {
        let mut records = self.records.write().await;
        record.assign_id(&records);
        records.push(record.clone());
        Ok(record)
    }

    async fn remove(&self, predicate: Predicate<'_, T>) -> StoreResult<usize> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| !predicate(r));
        Ok(before - records.len())
    }
}

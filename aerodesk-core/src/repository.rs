use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// A record type that can live in a [`Collection`].
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Name of the collection (file stem / document collection) holding this record.
    const COLLECTION: &'static str;

    /// Called by the store while it holds the collection's write lock, right
    /// before `self` is appended after `existing`.
    fn assign_id(&mut self, _existing: &[Self]) {}
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed JSON in {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub type Predicate<'a, T> = &'a (dyn Fn(&T) -> bool + Send + Sync);

/// Storage-medium independent access to a list of records.
///
/// Implementations serialize their mutations: two concurrent `append`/`remove`
/// calls never observe the same snapshot.
#[async_trait]
pub trait Collection<T: Record>: Send + Sync {
    /// Full contents in insertion order.
    async fn list(&self) -> StoreResult<Vec<T>>;

    /// Append `record` (after [`Record::assign_id`]) and return what was stored.
    async fn append(&self, record: T) -> StoreResult<T>;

    /// Remove every record matching `predicate`, returning how many went away.
    async fn remove(&self, predicate: Predicate<'_, T>) -> StoreResult<usize>;
}

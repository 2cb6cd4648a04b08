use aerodesk_core::repository::Collection;
use aerodesk_core::{Flight, Profile};
use aerodesk_store::{MemoryCollection, Storage};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub flights: Arc<dyn Collection<Flight>>,
    pub profiles: Arc<dyn Collection<Profile>>,
}

impl AppState {
    pub fn new(storage: &Storage) -> Self {
        Self {
            flights: storage.collection(),
            profiles: storage.collection(),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            flights: Arc::new(MemoryCollection::new()),
            profiles: Arc::new(MemoryCollection::new()),
        }
    }
}

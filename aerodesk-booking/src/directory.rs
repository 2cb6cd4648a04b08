use aerodesk_core::repository::Collection;
use aerodesk_core::Flight;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Flight directory unreachable: {0}")]
    Unreachable(String),
    #[error("Unexpected flight directory response: {0}")]
    BadResponse(String),
}

/// Read-only source of the flight list the booking workflow picks from.
#[async_trait]
pub trait FlightDirectory: Send + Sync {
    async fn flights(&self) -> Result<Vec<Flight>, DirectoryError>;
}

/// Reads flights straight out of a local collection, bypassing HTTP.
pub struct CollectionDirectory {
    flights: Arc<dyn Collection<Flight>>,
}

impl CollectionDirectory {
    pub fn new(flights: Arc<dyn Collection<Flight>>) -> Self {
        Self { flights }
    }
}

#[async_trait]
impl FlightDirectory for CollectionDirectory {
    async fn flights(&self) -> Result<Vec<Flight>, DirectoryError> {
        self.flights
            .list()
            .await
            .map_err(|e| DirectoryError::Unreachable(e.to_string()))
    }
}

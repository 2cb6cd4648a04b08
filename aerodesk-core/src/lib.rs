pub mod booking;
pub mod flight;
pub mod listing;
pub mod payment;
pub mod profile;
pub mod repository;

pub use booking::Booking;
pub use flight::{Flight, NewFlight};
pub use listing::{FlightListing, ListingEnricher};
pub use payment::PaymentMethod;
pub use profile::Profile;
pub use repository::{Collection, Record, StoreError, StoreResult};

/// Rejection of a record that is missing required data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

pub(crate) fn require(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

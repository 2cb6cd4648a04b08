use aerodesk_core::repository::{Collection, StoreResult};
use aerodesk_core::Booking;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// The user's booking history, kept in whatever collection the caller injects.
#[derive(Clone)]
pub struct BookingLedger {
    store: Arc<dyn Collection<Booking>>,
}

impl BookingLedger {
    pub fn new(store: Arc<dyn Collection<Booking>>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> StoreResult<Vec<Booking>> {
        self.store.list().await
    }

    pub async fn record(&self, booking: Booking) -> StoreResult<Booking> {
        let booking = self.store.append(booking).await?;
        info!(
            "Booking {} recorded for flight {} ({} pax, account {})",
            booking.booking_id,
            booking.flight_number(),
            booking.passengers,
            booking.account_number.hint()
        );
        Ok(booking)
    }

    /// Remove by position in [`BookingLedger::list`] order. `None` when out of range.
    pub async fn remove_at(&self, index: usize) -> StoreResult<Option<Booking>> {
        let bookings = self.store.list().await?;
        let Some(target) = bookings.into_iter().nth(index) else {
            return Ok(None);
        };

        self.remove(target.booking_id).await?;
        Ok(Some(target))
    }

    /// Returns whether a booking with `booking_id` existed.
    pub async fn remove(&self, booking_id: Uuid) -> StoreResult<bool> {
        let removed = self
            .store
            .remove(&|b: &Booking| b.booking_id == booking_id)
            .await?;
        Ok(removed > 0)
    }
}

use aerodesk_shared::Masked;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flight::Flight;
use crate::payment::PaymentMethod;
use crate::repository::Record;

/// A confirmed reservation. Only ever stored client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: Uuid,
    /// Snapshot of the flight at booking time.
    #[serde(flatten)]
    pub flight: Flight,
    pub booked_at: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub account_number: Masked<String>,
    /// Amount as typed by the user; not reconciled with `total`.
    pub amount: String,
    pub passengers: u32,
    pub total: f64,
}

impl Booking {
    pub fn new(
        flight: Flight,
        payment_method: PaymentMethod,
        account_number: String,
        amount: String,
        passengers: u32,
        total: f64,
    ) -> Self {
        Self {
            booking_id: Uuid::new_v4(),
            flight,
            booked_at: Utc::now(),
            payment_method,
            account_number: Masked(account_number),
            amount,
            passengers,
            total,
        }
    }

    pub fn flight_number(&self) -> &str {
        &self.flight.flight_number
    }
}

impl Record for Booking {
    const COLLECTION: &'static str = "myBookings";
}

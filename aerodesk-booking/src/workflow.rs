use aerodesk_core::repository::StoreError;
use aerodesk_core::{Booking, Flight, FlightListing, ListingEnricher, PaymentMethod};
use aerodesk_shared::Masked;
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

use crate::directory::FlightDirectory;
use crate::ledger::BookingLedger;
use crate::pricing::{Fare, FareCalculator};

/// Where the reservation wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
    SelectingFlight,
    AwaitingPayment,
    Confirmed,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::SelectingFlight => "SELECTING_FLIGHT",
            Step::AwaitingPayment => "AWAITING_PAYMENT",
            Step::Confirmed => "CONFIRMED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Please select a flight first.")]
    NoFlightSelected,

    #[error("No flight with number {0} in the directory")]
    UnknownFlight(String),

    #[error("Passenger count must be at least 1")]
    InvalidPassengerCount,

    #[error("Please select a payment method to proceed.")]
    MissingPaymentMethod,

    #[error("Please enter account number and amount.")]
    MissingPaymentDetails,

    #[error("Not allowed while {actual}, expected {expected}")]
    WrongStep { expected: Step, actual: Step },

    #[error("Could not save booking: {0}")]
    Storage(#[from] StoreError),
}

/// Drives one reservation: pick a flight, enter mock payment, confirm.
///
/// The only durable effect is the ledger append made by [`BookingWorkflow::confirm`].
pub struct BookingWorkflow {
    ledger: BookingLedger,
    fares: FareCalculator,
    enricher: ListingEnricher,
    listings: Vec<FlightListing>,
    step: Step,
    selected: Option<usize>,
    passengers: u32,
    payment_method: Option<PaymentMethod>,
    account_number: Masked<String>,
    amount: String,
    confirmed: Option<Booking>,
}

impl BookingWorkflow {
    pub fn new(ledger: BookingLedger, fares: FareCalculator) -> Self {
        Self::with_enricher(ledger, fares, ListingEnricher::new())
    }

    pub fn with_enricher(ledger: BookingLedger, fares: FareCalculator, enricher: ListingEnricher) -> Self {
        Self {
            ledger,
            fares,
            enricher,
            listings: Vec::new(),
            step: Step::SelectingFlight,
            selected: None,
            passengers: 1,
            payment_method: None,
            account_number: Masked::default(),
            amount: String::new(),
            confirmed: None,
        }
    }

    /// Fetch the directory once. A failed fetch is logged and leaves an empty list.
    pub async fn load(&mut self, directory: &dyn FlightDirectory) -> usize {
        match directory.flights().await {
            Ok(flights) => self.set_flights(flights),
            Err(e) => {
                warn!("Failed to load flight directory: {}", e);
                self.set_flights(Vec::new())
            }
        }
    }

    /// Replace the directory. The old selection points into the old list, so
    /// the wizard starts over from SelectingFlight.
    pub fn set_flights(&mut self, flights: Vec<Flight>) -> usize {
        self.listings = self.enricher.enrich_all(flights);
        self.reset();
        self.listings.len()
    }

    pub fn listings(&self) -> &[FlightListing] {
        &self.listings
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn selected(&self) -> Option<&FlightListing> {
        self.selected.and_then(|i| self.listings.get(i))
    }

    pub fn passengers(&self) -> u32 {
        self.passengers
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// The booking written by the last successful confirmation, until reset.
    pub fn confirmed(&self) -> Option<&Booking> {
        self.confirmed.as_ref()
    }

    pub fn select_flight(&mut self, flight_number: &str) -> Result<&FlightListing, WorkflowError> {
        self.expect_step(Step::SelectingFlight)?;

        let index = self
            .listings
            .iter()
            .position(|l| l.flight.flight_number == flight_number)
            .ok_or_else(|| WorkflowError::UnknownFlight(flight_number.to_string()))?;

        self.selected = Some(index);
        Ok(&self.listings[index])
    }

    pub fn set_passengers(&mut self, passengers: u32) -> Result<(), WorkflowError> {
        if self.step == Step::Confirmed {
            return Err(WorkflowError::WrongStep {
                expected: Step::SelectingFlight,
                actual: self.step,
            });
        }
        if passengers == 0 {
            return Err(WorkflowError::InvalidPassengerCount);
        }
        self.passengers = passengers;
        Ok(())
    }

    /// SelectingFlight → AwaitingPayment
    pub fn proceed_to_payment(&mut self) -> Result<(), WorkflowError> {
        self.expect_step(Step::SelectingFlight)?;
        if self.selected().is_none() {
            return Err(WorkflowError::NoFlightSelected);
        }
        self.step = Step::AwaitingPayment;
        Ok(())
    }

    pub fn choose_payment_method(&mut self, method: PaymentMethod) -> Result<(), WorkflowError> {
        self.expect_step(Step::AwaitingPayment)?;
        self.payment_method = Some(method);
        Ok(())
    }

    pub fn enter_payment_details(
        &mut self,
        account_number: impl Into<String>,
        amount: impl Into<String>,
    ) -> Result<(), WorkflowError> {
        self.expect_step(Step::AwaitingPayment)?;
        self.account_number = Masked(account_number.into());
        self.amount = amount.into();
        Ok(())
    }

    /// AwaitingPayment → SelectingFlight, keeping the selection.
    pub fn back(&mut self) -> Result<(), WorkflowError> {
        self.expect_step(Step::AwaitingPayment)?;
        self.step = Step::SelectingFlight;
        Ok(())
    }

    pub fn quote(&self) -> Option<Fare> {
        self.selected()
            .map(|listing| self.fares.quote(listing.price, self.passengers))
    }

    /// AwaitingPayment → Confirmed. Nothing is written unless every check passes.
    pub async fn confirm(&mut self) -> Result<&Booking, WorkflowError> {
        self.expect_step(Step::AwaitingPayment)?;

        let method = self.payment_method.ok_or(WorkflowError::MissingPaymentMethod)?;
        if self.account_number.is_blank() || self.amount.trim().is_empty() {
            return Err(WorkflowError::MissingPaymentDetails);
        }
        let listing = self.selected().ok_or(WorkflowError::NoFlightSelected)?;
        let fare = self.fares.quote(listing.price, self.passengers);

        let booking = Booking::new(
            listing.flight.clone(),
            method,
            self.account_number.expose().to_string(),
            self.amount.trim().to_string(),
            self.passengers,
            fare.total,
        );
        let booking = self.ledger.record(booking).await?;

        info!("Booking {} confirmed, total {:.2}", booking.booking_id, booking.total);
        self.step = Step::Confirmed;
        self.account_number = Masked::default();
        self.amount.clear();
        Ok(self.confirmed.insert(booking))
    }

    /// Back to a fresh SelectingFlight ("Book Another Flight"). The fetched
    /// directory is kept.
    pub fn reset(&mut self) {
        self.step = Step::SelectingFlight;
        self.selected = None;
        self.passengers = 1;
        self.payment_method = None;
        self.account_number = Masked::default();
        self.amount.clear();
        self.confirmed = None;
    }

    fn expect_step(&self, expected: Step) -> Result<(), WorkflowError> {
        if self.step != expected {
            return Err(WorkflowError::WrongStep {
                expected,
                actual: self.step,
            });
        }
        Ok(())
    }
}

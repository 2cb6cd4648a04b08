use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::flight::Flight;

/// A flight decorated for display. The `price`, `seats` and `duration` values
/// here are not authoritative and must never be written back to a store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightListing {
    pub flight: Flight,
    pub price: f64,
    pub seats: u32,
    pub duration: String,
}

/// Fills in display values the directory doesn't carry.
///
/// Values present on the flight win; the rest are drawn from the RNG.
pub struct ListingEnricher<R = StdRng> {
    rng: R,
}

impl ListingEnricher<StdRng> {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Reproducible listings, used by tests and demos.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for ListingEnricher<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ListingEnricher<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn enrich(&mut self, flight: Flight) -> FlightListing {
        let price = flight
            .price
            .unwrap_or_else(|| self.rng.gen_range(2500..=12000) as f64);
        let seats = flight.seats.unwrap_or_else(|| self.rng.gen_range(5..=180));
        let duration = match &flight.duration {
            Some(d) => d.clone(),
            None => {
                let hours = self.rng.gen_range(1..=5);
                let minutes = self.rng.gen_range(0..12) * 5;
                format!("{}h {:02}m", hours, minutes)
            }
        };

        FlightListing { flight, price, seats, duration }
    }

    pub fn enrich_all(&mut self, flights: Vec<Flight>) -> Vec<FlightListing> {
        flights.into_iter().map(|f| self.enrich(f)).collect()
    }
}

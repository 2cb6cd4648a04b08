use aerodesk_store::app_config::FareRules;
use serde::Serialize;

/// Price breakdown shown before and stored after checkout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fare {
    pub base: f64,
    pub passengers: u32,
    pub subtotal: f64,
    pub tax: f64,
    pub service_fee: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FareCalculator {
    rules: FareRules,
}

impl FareCalculator {
    pub fn new(rules: FareRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> FareRules {
        self.rules
    }

    /// `base * passengers * (1 + tax_rate) + service_fee`
    pub fn quote(&self, base: f64, passengers: u32) -> Fare {
        let subtotal = base * passengers as f64;
        let total = subtotal * (1.0 + self.rules.tax_rate) + self.rules.service_fee;

        Fare {
            base,
            passengers,
            subtotal,
            tax: subtotal * self.rules.tax_rate,
            service_fee: self.rules.service_fee,
            total,
        }
    }
}

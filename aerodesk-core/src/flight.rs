use serde::{Deserialize, Serialize};

use crate::repository::Record;
use crate::{require, ValidationResult};

/// A scheduled flight as kept by the directory service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: u64,
    pub flight_number: String,
    pub departure: String,
    pub arrival: String,
    pub date: String,
    pub time: String,
    pub airline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl Record for Flight {
    const COLLECTION: &'static str = "flights";

    fn assign_id(&mut self, existing: &[Self]) {
        self.id = existing.iter().map(|f| f.id).max().unwrap_or(0) + 1;
    }
}

/// Body of `POST /api/flights`. Every field defaults to empty so a missing
/// field is reported by [`NewFlight::validate`] instead of the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewFlight {
    pub flight_number: String,
    pub departure: String,
    pub arrival: String,
    pub date: String,
    pub time: String,
    pub airline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl NewFlight {
    pub fn validate(&self) -> ValidationResult<()> {
        require("flightNumber", &self.flight_number)?;
        require("departure", &self.departure)?;
        require("arrival", &self.arrival)?;
        require("date", &self.date)?;
        require("time", &self.time)?;
        require("airline", &self.airline)?;
        Ok(())
    }

    /// Validated flight with a placeholder id; the store assigns the real one.
    pub fn into_flight(self) -> ValidationResult<Flight> {
        self.validate()?;
        Ok(Flight {
            id: 0,
            flight_number: self.flight_number.trim().to_string(),
            departure: self.departure,
            arrival: self.arrival,
            date: self.date,
            time: self.time,
            airline: self.airline,
            price: self.price,
            seats: self.seats,
            duration: self.duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    fn draft() -> NewFlight {
        NewFlight {
            flight_number: "AA100".into(),
            departure: "Delhi".into(),
            arrival: "Mumbai".into(),
            date: "2025-08-01".into(),
            time: "09:30".into(),
            airline: "Air India".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_airline_is_rejected() {
        let json = r#"{"flightNumber":"AA100","departure":"Delhi","arrival":"Mumbai","date":"2025-08-01","time":"09:30"}"#;
        let flight: NewFlight = serde_json::from_str(json).unwrap();
        assert_eq!(flight.validate(), Err(ValidationError::MissingField("airline")));
    }

    #[test]
    fn test_blank_field_counts_as_missing() {
        let mut flight = draft();
        flight.departure = "   ".into();
        assert_eq!(flight.into_flight(), Err(ValidationError::MissingField("departure")));
    }

    #[test]
    fn test_assign_id_uses_max_plus_one() {
        let mut first = draft().into_flight().unwrap();
        first.assign_id(&[]);
        assert_eq!(first.id, 1);

        let mut existing = vec![first.clone(), first.clone()];
        existing[1].id = 7;
        let mut next = draft().into_flight().unwrap();
        next.assign_id(&existing);
        assert_eq!(next.id, 8);
    }

    #[test]
    fn test_optional_display_fields_are_omitted() {
        let flight = draft().into_flight().unwrap();
        let value = serde_json::to_value(&flight).unwrap();
        assert_eq!(value["flightNumber"], "AA100");
        assert!(value.get("price").is_none());
        assert!(value.get("seats").is_none());
    }
}

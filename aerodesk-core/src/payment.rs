use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mock payment methods offered at checkout. Nothing is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Net Banking")]
    NetBanking,
    #[serde(rename = "PayPal")]
    PayPal,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Upi,
        PaymentMethod::NetBanking,
        PaymentMethod::PayPal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::NetBanking => "Net Banking",
            PaymentMethod::PayPal => "PayPal",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    /// Accepts labels ("Credit Card") and short forms ("credit", "net-banking").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "credit" | "creditcard" => Ok(PaymentMethod::CreditCard),
            "debit" | "debitcard" => Ok(PaymentMethod::DebitCard),
            "upi" => Ok(PaymentMethod::Upi),
            "netbanking" => Ok(PaymentMethod::NetBanking),
            "paypal" => Ok(PaymentMethod::PayPal),
            _ => Err(UnknownPaymentMethod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_label_forms() {
        assert_eq!("credit".parse::<PaymentMethod>().unwrap(), PaymentMethod::CreditCard);
        assert_eq!("Net Banking".parse::<PaymentMethod>().unwrap(), PaymentMethod::NetBanking);
        assert_eq!("net-banking".parse::<PaymentMethod>().unwrap(), PaymentMethod::NetBanking);
        assert_eq!("PAYPAL".parse::<PaymentMethod>().unwrap(), PaymentMethod::PayPal);
        assert!("cash".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_labels_round_trip_through_parse() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.label().parse::<PaymentMethod>().unwrap(), method);
        }
        assert_eq!(serde_json::to_string(&PaymentMethod::Upi).unwrap(), "\"UPI\"");
    }
}

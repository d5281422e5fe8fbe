//! Type-safe monetary value with embedded currency.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::error::PaymentError;

/// Currencies accepted for bookings.
///
/// EUR is the default billing currency; XOF is carried for the
/// mobile money flow and has no minor unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    EUR,
    USD,
    GBP,
    XOF,
}

impl Currency {
    /// Returns the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::EUR | Currency::USD | Currency::GBP => 2,
            Currency::XOF => 0,
        }
    }

    /// Returns the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "€",
            Currency::USD => "$",
            Currency::GBP => "£",
            Currency::XOF => "CFA ",
        }
    }

    /// Minor units per major unit (100 for two-decimal currencies, 1 for XOF).
    pub fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places() as u32)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Type-safe money representation with embedded currency.
///
/// Amount is stored in the smallest unit of the currency (cents for EUR,
/// whole francs for XOF) to avoid floating-point precision issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Money {
    amount: i64,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value. Amounts must be strictly positive:
    /// zero-value payments are rejected at the boundary.
    pub fn new(amount: i64, currency: Currency) -> Result<Self, PaymentError> {
        if amount <= 0 {
            return Err(PaymentError::InvalidAmount);
        }
        Ok(Self { amount, currency })
    }

    /// Returns the amount in smallest currency unit.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_major = self.currency.minor_per_major();
        let major = self.amount / per_major;
        if self.currency.decimal_places() == 0 {
            write!(f, "{}{}", self.currency.symbol(), major)
        } else {
            let minor = (self.amount % per_major).abs();
            write!(
                f,
                "{}{}.{:0width$}",
                self.currency.symbol(),
                major,
                minor,
                width = self.currency.decimal_places() as usize
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let money = Money::new(10000, Currency::EUR).unwrap();
        assert_eq!(money.amount(), 10000);
        assert_eq!(money.currency(), Currency::EUR);
    }

    #[test]
    fn test_negative_money_fails() {
        let result = Money::new(-100, Currency::EUR);
        assert!(matches!(result, Err(PaymentError::InvalidAmount)));
    }

    #[test]
    fn test_zero_money_fails() {
        let result = Money::new(0, Currency::EUR);
        assert!(matches!(result, Err(PaymentError::InvalidAmount)));
    }

    #[test]
    fn test_money_display() {
        let money = Money::new(1050, Currency::EUR).unwrap();
        assert_eq!(format!("{}", money), "€10.50");
    }

    #[test]
    fn test_xof_has_no_minor_unit() {
        let money = Money::new(5000, Currency::XOF).unwrap();
        assert_eq!(format!("{}", money), "CFA 5000");
        assert_eq!(Currency::XOF.minor_per_major(), 1);
    }
}

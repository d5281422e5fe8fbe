//! Payment domain model: transaction identifiers, payment methods and the
//! ledger records produced by authorizations and refunds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use super::card::{CardExpiry, CardNumber, Cvv};
use super::money::Money;
use crate::error::{PaymentError, RefundError};

/// Opaque identifier correlating a payment authorization with later refunds.
///
/// Freshly minted identifiers are `txn_`-prefixed, but the type accepts any
/// non-empty string: refunds may reference transactions issued elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Mints a new random transaction identifier.
    pub fn generate() -> Self {
        Self(format!("txn_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TransactionId {
    type Err = RefundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(RefundError::InvalidTransactionId);
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A subscriber phone number in E.164 shape: `+` followed by 8-15 digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(input: &str) -> Result<Self, PaymentError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or("");
        if digits.len() < 8 || digits.len() > 15 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PaymentError::InvalidPhone(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mobile money operators accepted for bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MobileOperator {
    Orange,
    Mtn,
    Moov,
    Wave,
}

impl FromStr for MobileOperator {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orange" => Ok(Self::Orange),
            "mtn" => Ok(Self::Mtn),
            "moov" => Ok(Self::Moov),
            "wave" => Ok(Self::Wave),
            other => Err(PaymentError::UnsupportedOperator(other.to_string())),
        }
    }
}

/// Wallet providers behind the wallet payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WalletProvider {
    ApplePay,
    GooglePay,
}

/// A validated payment method, ready for authorization.
#[derive(Debug, Clone)]
pub enum PaymentMethod {
    Card {
        number: CardNumber,
        expiry: CardExpiry,
        cvv: Cvv,
    },
    MobileMoney {
        phone: PhoneNumber,
        operator: MobileOperator,
    },
    Wallet {
        provider: WalletProvider,
        token: String,
    },
}

impl PaymentMethod {
    pub fn kind(&self) -> PaymentMethodKind {
        match self {
            PaymentMethod::Card { .. } => PaymentMethodKind::Card,
            PaymentMethod::MobileMoney { .. } => PaymentMethodKind::MobileMoney,
            PaymentMethod::Wallet {
                provider: WalletProvider::ApplePay,
                ..
            } => PaymentMethodKind::ApplePay,
            PaymentMethod::Wallet {
                provider: WalletProvider::GooglePay,
                ..
            } => PaymentMethodKind::GooglePay,
        }
    }
}

/// The payment method family, as recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    Card,
    MobileMoney,
    ApplePay,
    GooglePay,
}

impl std::fmt::Display for PaymentMethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentMethodKind::Card => "card",
            PaymentMethodKind::MobileMoney => "mobile_money",
            PaymentMethodKind::ApplePay => "apple_pay",
            PaymentMethodKind::GooglePay => "google_pay",
        };
        write!(f, "{}", s)
    }
}

/// Lifecycle status of a recorded payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Authorized,
    PartiallyRefunded,
    Refunded,
}

/// A recorded payment authorization.
///
/// Payments are immutable once created except for their refund status -
/// they represent a historical record of what happened.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    /// Opaque transaction identifier
    pub transaction_id: TransactionId,
    /// Authorized amount
    pub amount: Money,
    /// Payment method family used
    pub method: PaymentMethodKind,
    /// Free-text description supplied by the caller
    pub description: Option<String>,
    /// Current status
    pub status: PaymentStatus,
    /// When the authorization happened
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a freshly authorized payment record.
    pub fn authorized(
        transaction_id: TransactionId,
        amount: Money,
        method: PaymentMethodKind,
        description: Option<String>,
    ) -> Self {
        Self {
            transaction_id,
            amount,
            method,
            description,
            status: PaymentStatus::Authorized,
            created_at: Utc::now(),
        }
    }
}

/// A recorded refund against a prior transaction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Refund {
    /// The transaction being refunded
    pub transaction_id: TransactionId,
    /// Refunded amount in minor units; `None` means a full refund
    pub amount: Option<i64>,
    /// When the refund happened
    pub created_at: DateTime<Utc>,
}

impl Refund {
    pub fn new(transaction_id: TransactionId, amount: Option<i64>) -> Self {
        Self {
            transaction_id,
            amount,
            created_at: Utc::now(),
        }
    }

    /// True when no explicit amount was given.
    pub fn is_full(&self) -> bool {
        self.amount.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_prefixed_and_unique() {
        let a = TransactionId::generate();
        let b = TransactionId::generate();
        assert!(a.as_str().starts_with("txn_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_opaque_ids_are_accepted() {
        let id: TransactionId = "txn_123456".parse().unwrap();
        assert_eq!(id.as_str(), "txn_123456");
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let result = "   ".parse::<TransactionId>();
        assert!(matches!(result, Err(RefundError::InvalidTransactionId)));
    }

    #[test]
    fn test_phone_number_parsing() {
        assert!(PhoneNumber::parse("+221701234567").is_ok());
        assert!(PhoneNumber::parse("221701234567").is_err());
        assert!(PhoneNumber::parse("+123").is_err());
        assert!(PhoneNumber::parse("+12345abc8901").is_err());
    }

    #[test]
    fn test_operator_parsing() {
        assert_eq!("orange".parse::<MobileOperator>(), Ok(MobileOperator::Orange));
        assert_eq!("MTN".parse::<MobileOperator>(), Ok(MobileOperator::Mtn));
        assert!(matches!(
            "vodafone".parse::<MobileOperator>(),
            Err(PaymentError::UnsupportedOperator(_))
        ));
    }

    #[test]
    fn test_wallet_method_kinds() {
        let method = PaymentMethod::Wallet {
            provider: WalletProvider::ApplePay,
            token: "tok_abc".into(),
        };
        assert_eq!(method.kind(), PaymentMethodKind::ApplePay);
    }

    #[test]
    fn test_full_refund_has_no_amount() {
        let refund = Refund::new("txn_123456".parse().unwrap(), None);
        assert!(refund.is_full());
        let partial = Refund::new("txn_123456".parse().unwrap(), Some(50));
        assert!(!partial.is_full());
    }
}

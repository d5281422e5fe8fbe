//! Error types for the booking payments service.

use crate::domain::TransactionId;

/// Card validation failures.
///
/// These are local, caller-recoverable rejections: the user re-enters
/// their card details and retries. They are never retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    #[error("Card number is malformed")]
    MalformedNumber,

    #[error("Card number failed the checksum")]
    FailedChecksum,

    #[error("Card is expired")]
    Expired,

    #[error("Expiry date is not a valid month/year")]
    InvalidExpiry,

    #[error("CVV must be 3 or 4 digits")]
    InvalidCvv,
}

/// Gateway-level failures, surfaced by outbound adapters.
///
/// The simulated gateway never produces these; a real integration reports
/// them through the same port.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway rejected the request: {0}")]
    Rejected(String),

    #[error("Unknown transaction: {0}")]
    UnknownTransaction(TransactionId),
}

/// Payment authorization failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Invalid card: {0}")]
    InvalidCard(#[from] CardError),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("Unsupported mobile money operator: {0}")]
    UnsupportedOperator(String),

    #[error("Wallet token cannot be empty")]
    InvalidWalletToken,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Refund failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefundError {
    #[error("Refund amount must be positive")]
    InvalidAmount,

    #[error("Transaction identifier cannot be empty")]
    InvalidTransactionId,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Store-level errors (ledger and appointment adapters).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Entity not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Cache-level errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Gateway(GatewayError::UnknownTransaction(id)) => {
                AppError::NotFound(format!("Transaction not found: {}", id))
            }
            e => AppError::BadRequest(e.to_string()),
        }
    }
}

impl From<RefundError> for AppError {
    fn from(err: RefundError) -> Self {
        match err {
            RefundError::Gateway(GatewayError::UnknownTransaction(id)) => {
                AppError::NotFound(format!("Transaction not found: {}", id))
            }
            e => AppError::BadRequest(e.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound("Resource not found".into()),
            StoreError::Conflict(msg) => AppError::BadRequest(msg),
            StoreError::Validation(msg) => AppError::BadRequest(msg),
            StoreError::Backend(msg) => AppError::Internal(msg),
        }
    }
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        AppError::Internal(err.to_string())
    }
}


//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AppointmentStatus, Currency, PaymentStatus, TransactionId};

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to charge a payment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentRequest {
    /// Amount in smallest currency unit (cents for EUR)
    #[schema(example = 10000)]
    pub amount: i64,
    pub currency: Currency,
    /// Payment method details
    pub method: PaymentMethodDto,
    /// Optional free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Wire shape of a payment method, validated by the service layer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentMethodDto {
    /// A payment card
    Card {
        /// Card number (digits, whitespace tolerated)
        #[schema(example = "4242424242424242")]
        card_number: String,
        /// Expiry as MM/YY or MM/YYYY
        #[schema(example = "12/25")]
        expiry: String,
        /// 3-4 digit verification value
        #[schema(example = "123")]
        cvv: String,
    },
    /// Mobile money subscriber account
    MobileMoney {
        /// Subscriber phone in E.164 form
        #[schema(example = "+221701234567")]
        phone: String,
        /// Operator name (orange, mtn, moov, wave)
        #[schema(example = "orange")]
        operator: String,
    },
    /// Apple Pay payment token
    ApplePay {
        /// Opaque tokenized payload from the wallet
        token: String,
    },
    /// Google Pay payment token
    GooglePay {
        /// Opaque tokenized payload from the wallet
        token: String,
    },
}

/// Response after a successful authorization.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    /// Opaque transaction identifier, used later for refunds
    pub transaction_id: TransactionId,
    pub status: PaymentStatus,
    /// Authorized amount in smallest currency unit
    #[schema(example = 10000)]
    pub amount: i64,
    pub currency: Currency,
}

/// Request to refund a prior transaction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefundRequest {
    /// Transaction identifier issued at authorization time
    #[schema(example = "txn_123456")]
    pub transaction_id: String,
    /// Amount to refund in smallest currency unit; omit for a full refund
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 5000)]
    pub amount: Option<i64>,
}

/// Response after a refund.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RefundResponse {
    /// The refunded transaction
    pub transaction_id: TransactionId,
    /// Whether the refund went through
    pub success: bool,
    /// Refunded amount; `null` means the full original amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Appointment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to book an appointment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAppointmentRequest {
    /// When the appointment takes place
    pub starts_at: DateTime<Utc>,
    /// Client display name
    #[schema(example = "Awa Diop")]
    pub client_name: String,
    /// Client email address
    #[schema(example = "awa@example.com")]
    pub client_email: String,
    /// Booked service
    #[schema(example = "Consultation")]
    pub service: String,
    /// Provider delivering the service
    #[schema(example = "Dr Ndiaye")]
    pub provider: String,
    /// Initial booking status
    #[serde(default)]
    pub status: AppointmentStatus,
}

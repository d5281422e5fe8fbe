//! # RDV Types
//!
//! Domain types and port traits for the booking payments service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Money, card details, payments, appointments)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Appointment, AppointmentId, AppointmentStatus, CardExpiry, CardNumber, Currency, Cvv,
    MobileOperator, Money, Payment, PaymentMethod, PaymentMethodKind, PaymentStatus, PhoneNumber,
    Refund, TransactionId, WalletProvider,
};
pub use dto::*;
pub use error::{
    AppError, CacheError, CardError, GatewayError, PaymentError, RefundError, StoreError,
};
pub use ports::{AppointmentRepository, Cache, PaymentGateway, TransactionLedger};

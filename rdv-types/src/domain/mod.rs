//! Domain models for the booking payments service.

pub mod appointment;
pub mod card;
pub mod money;
pub mod payment;

pub use appointment::{Appointment, AppointmentId, AppointmentStatus};
pub use card::{CardExpiry, CardNumber, Cvv};
pub use money::{Currency, Money};
pub use payment::{
    MobileOperator, Payment, PaymentMethod, PaymentMethodKind, PaymentStatus, PhoneNumber, Refund,
    TransactionId, WalletProvider,
};

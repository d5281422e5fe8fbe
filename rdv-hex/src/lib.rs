//! # RDV Hex
//!
//! Application service layer and HTTP adapter for the booking payments
//! service.
//!
//! ## Architecture
//!
//! - `service` - Payment application service (validate, authorize, refund)
//! - `appointments` - Appointment application service (bookings + cached exports)
//! - `export` - CSV / Excel-compatible export formatting
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! Services are generic over their port traits, allowing different
//! gateway/store/cache implementations to be injected.

pub mod appointments;
pub mod export;
pub mod inbound;
pub mod service;

mod openapi;


pub use appointments::AppointmentService;
pub use service::PaymentService;

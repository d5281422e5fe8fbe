//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod appointments;
mod cache;
mod gateway;
mod ledger;

pub use appointments::AppointmentRepository;
pub use cache::{Cache, DEFAULT_CACHE_TTL, sanitize_cache_key};
pub use gateway::PaymentGateway;
pub use ledger::TransactionLedger;

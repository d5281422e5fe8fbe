//! # RDV Store
//!
//! Concrete adapters for the booking payments service: the in-memory
//! transaction ledger, appointment store and TTL cache, plus the simulated
//! payment gateway. Each implements a port trait from `rdv-types`, so the
//! application layer never sees these types directly.

pub mod appointments;
pub mod cache;
pub mod gateway;
pub mod ledger;
pub mod security;

pub use appointments::MemoryAppointments;
pub use cache::MemoryCache;
pub use gateway::SimulatedGateway;
pub use ledger::MemoryLedger;

//! Appointment repository port.

use crate::domain::Appointment;
use crate::error::StoreError;

/// Port trait for appointment storage.
#[async_trait::async_trait]
pub trait AppointmentRepository: Send + Sync + 'static {
    /// Stores a new appointment.
    async fn create(&self, appointment: Appointment) -> Result<Appointment, StoreError>;

    /// Lists all appointments, ordered by start time.
    async fn list(&self) -> Result<Vec<Appointment>, StoreError>;
}

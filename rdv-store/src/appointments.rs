//! In-memory appointment store.

use dashmap::DashMap;

use rdv_types::{Appointment, AppointmentId, AppointmentRepository, StoreError};

/// Appointment store backed by a concurrent map.
#[derive(Default)]
pub struct MemoryAppointments {
    appointments: DashMap<AppointmentId, Appointment>,
}

impl MemoryAppointments {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AppointmentRepository for MemoryAppointments {
    async fn create(&self, appointment: Appointment) -> Result<Appointment, StoreError> {
        self.appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn list(&self) -> Result<Vec<Appointment>, StoreError> {
        let mut appointments: Vec<Appointment> =
            self.appointments.iter().map(|entry| entry.value().clone()).collect();
        appointments.sort_by_key(|a| a.starts_at);
        Ok(appointments)
    }
}

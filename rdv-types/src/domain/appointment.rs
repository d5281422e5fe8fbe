//! Appointment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::StoreError;

/// Unique identifier for an Appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AppointmentId(Uuid);

impl AppointmentId {
    /// Creates a new random AppointmentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an AppointmentId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AppointmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AppointmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Booking status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A booked appointment between a client and a provider.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    /// Unique identifier
    pub id: AppointmentId,
    /// When the appointment takes place
    pub starts_at: DateTime<Utc>,
    /// Client display name
    pub client_name: String,
    /// Client email address
    pub client_email: String,
    /// Booked service name
    pub service: String,
    /// Provider delivering the service
    pub provider: String,
    /// Booking status
    pub status: AppointmentStatus,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Creates a new appointment.
    ///
    /// # Validation
    /// - Client name, service and provider cannot be empty
    /// - Email must contain a local part and a domain
    pub fn new(
        starts_at: DateTime<Utc>,
        client_name: String,
        client_email: String,
        service: String,
        provider: String,
        status: AppointmentStatus,
    ) -> Result<Self, StoreError> {
        if client_name.trim().is_empty() {
            return Err(StoreError::Validation("Client name cannot be empty".into()));
        }
        if !is_plausible_email(&client_email) {
            return Err(StoreError::Validation(format!(
                "Invalid email address: {}",
                client_email
            )));
        }
        if service.trim().is_empty() {
            return Err(StoreError::Validation("Service cannot be empty".into()));
        }
        if provider.trim().is_empty() {
            return Err(StoreError::Validation("Provider cannot be empty".into()));
        }

        Ok(Self {
            id: AppointmentId::new(),
            starts_at,
            client_name,
            client_email,
            service,
            provider,
            status,
            created_at: Utc::now(),
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

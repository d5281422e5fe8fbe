//! Appointment Application Service
//!
//! Bookings plus cached exports. Export output is cached through the
//! cache port and invalidated whenever an appointment changes, so a
//! download never serves stale rows for longer than one write.

use std::time::Duration;

use rdv_types::ports::DEFAULT_CACHE_TTL;
use rdv_types::{AppError, Appointment, AppointmentRepository, Cache, CreateAppointmentRequest};

use crate::export::{self, ExportFormat};

/// Raw cache-key prefix shared by every export format.
const EXPORT_KEY_PREFIX: &str = "export";

/// Application service for appointments and their exports.
pub struct AppointmentService<A: AppointmentRepository, C: Cache> {
    repo: A,
    cache: C,
    export_ttl: Duration,
}

impl<A: AppointmentRepository, C: Cache> AppointmentService<A, C> {
    /// Creates a new appointment service with the default export TTL.
    pub fn new(repo: A, cache: C) -> Self {
        Self {
            repo,
            cache,
            export_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Overrides the export cache TTL.
    pub fn with_export_ttl(mut self, ttl: Duration) -> Self {
        self.export_ttl = ttl;
        self
    }

    /// Books a new appointment and invalidates cached exports.
    pub async fn create_appointment(
        &self,
        req: CreateAppointmentRequest,
    ) -> Result<Appointment, AppError> {
        let appointment = Appointment::new(
            req.starts_at,
            req.client_name,
            req.client_email,
            req.service,
            req.provider,
            req.status,
        )?;

        let created = self.repo.create(appointment).await?;

        if let Err(err) = self.cache.flush_prefix(EXPORT_KEY_PREFIX).await {
            tracing::warn!(error = %err, "failed to invalidate export cache");
        }

        Ok(created)
    }

    /// Lists all appointments.
    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, AppError> {
        self.repo.list().await.map_err(Into::into)
    }

    /// Renders the appointment export in the requested format.
    ///
    /// Serves from cache when a fresh copy exists; otherwise formats the
    /// current rows and caches the result for `export_ttl`.
    pub async fn export(&self, format: ExportFormat) -> Result<String, AppError> {
        let key = format.cache_key();

        if let Some(serde_json::Value::String(cached)) = self.cache.get(key).await? {
            tracing::debug!(%key, "export served from cache");
            return Ok(cached);
        }

        let appointments = self.repo.list().await?;
        let body = match format {
            ExportFormat::Csv => export::to_csv(&appointments)?,
            ExportFormat::Excel => export::to_excel_tsv(&appointments)?,
        };

        if let Err(err) = self
            .cache
            .set(key, serde_json::Value::String(body.clone()), self.export_ttl)
            .await
        {
            tracing::warn!(error = %err, "failed to cache export");
        }

        Ok(body)
    }
}

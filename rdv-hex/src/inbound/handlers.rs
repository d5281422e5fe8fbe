//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use rdv_types::{
    AppError, AppointmentRepository, Cache, CreateAppointmentRequest, PaymentGateway,
    PaymentRequest, RefundRequest, TransactionLedger,
};

use crate::appointments::AppointmentService;
use crate::export::ExportFormat;
use crate::service::PaymentService;

/// Application state shared across handlers.
pub struct AppState<G, L, A, C>
where
    G: PaymentGateway,
    L: TransactionLedger,
    A: AppointmentRepository,
    C: Cache,
{
    pub payments: PaymentService<G, L>,
    pub appointments: AppointmentService<A, C>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Payments
// ─────────────────────────────────────────────────────────────────────────────

/// Charge a payment.
#[tracing::instrument(skip(state, req), fields(amount = req.amount, currency = %req.currency))]
pub async fn create_payment<G, L, A, C>(
    State(state): State<Arc<AppState<G, L, A, C>>>,
    Json(req): Json<PaymentRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    G: PaymentGateway,
    L: TransactionLedger,
    A: AppointmentRepository,
    C: Cache,
{
    let result = state.payments.process_payment(req).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Refund a prior transaction.
#[tracing::instrument(skip(state), fields(transaction_id = %req.transaction_id))]
pub async fn refund_payment<G, L, A, C>(
    State(state): State<Arc<AppState<G, L, A, C>>>,
    Json(req): Json<RefundRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    G: PaymentGateway,
    L: TransactionLedger,
    A: AppointmentRepository,
    C: Cache,
{
    let result = state.payments.process_refund(req).await?;
    Ok(Json(result))
}

/// Get a recorded payment by transaction identifier.
#[tracing::instrument(skip(state), fields(transaction_id = %id))]
pub async fn get_payment<G, L, A, C>(
    State(state): State<Arc<AppState<G, L, A, C>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    G: PaymentGateway,
    L: TransactionLedger,
    A: AppointmentRepository,
    C: Cache,
{
    let payment = state.payments.get_payment(&id).await?;
    Ok(Json(payment))
}

/// List all recorded payments.
#[tracing::instrument(skip(state))]
pub async fn list_payments<G, L, A, C>(
    State(state): State<Arc<AppState<G, L, A, C>>>,
) -> Result<impl IntoResponse, ApiError>
where
    G: PaymentGateway,
    L: TransactionLedger,
    A: AppointmentRepository,
    C: Cache,
{
    let payments = state.payments.list_payments().await?;
    Ok(Json(payments))
}

// ─────────────────────────────────────────────────────────────────────────────
// Appointments
// ─────────────────────────────────────────────────────────────────────────────

/// Book an appointment.
#[tracing::instrument(skip(state, req), fields(service = %req.service, provider = %req.provider))]
pub async fn create_appointment<G, L, A, C>(
    State(state): State<Arc<AppState<G, L, A, C>>>,
    Json(req): Json<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    G: PaymentGateway,
    L: TransactionLedger,
    A: AppointmentRepository,
    C: Cache,
{
    let appointment = state.appointments.create_appointment(req).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// List all appointments.
#[tracing::instrument(skip(state))]
pub async fn list_appointments<G, L, A, C>(
    State(state): State<Arc<AppState<G, L, A, C>>>,
) -> Result<impl IntoResponse, ApiError>
where
    G: PaymentGateway,
    L: TransactionLedger,
    A: AppointmentRepository,
    C: Cache,
{
    let appointments = state.appointments.list_appointments().await?;
    Ok(Json(appointments))
}

/// Query string for the export endpoint.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// `csv` (default) or `excel`
    pub format: Option<String>,
}

/// Download the appointment export.
#[tracing::instrument(skip(state))]
pub async fn export_appointments<G, L, A, C>(
    State(state): State<Arc<AppState<G, L, A, C>>>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError>
where
    G: PaymentGateway,
    L: TransactionLedger,
    A: AppointmentRepository,
    C: Cache,
{
    let format: ExportFormat = query
        .format
        .as_deref()
        .unwrap_or("csv")
        .parse()
        .map_err(AppError::from)?;

    let body = state.appointments.export(format).await?;

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
        ],
        body,
    )
        .into_response())
}

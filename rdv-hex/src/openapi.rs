//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use rdv_types::domain::{Appointment, Payment};
use rdv_types::dto::{
    CreateAppointmentRequest, PaymentMethodDto, PaymentRequest, PaymentResponse, RefundRequest,
    RefundResponse,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Charge a payment
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "payments",
    request_body = PaymentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Payment authorized", body = PaymentResponse),
        (status = 400, description = "Invalid amount or payment method"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn create_payment() {}

/// List recorded payments
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "payments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Recorded payments, most recent first", body = Vec<Payment>),
        (status = 401, description = "Unauthorized")
    )
)]
async fn list_payments() {}

/// Get a recorded payment
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Transaction identifier")
    ),
    responses(
        (status = 200, description = "The recorded payment", body = Payment),
        (status = 404, description = "Unknown transaction"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn get_payment() {}

/// Refund a prior transaction
#[utoipa::path(
    post,
    path = "/api/payments/refund",
    tag = "payments",
    request_body = RefundRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Refund processed", body = RefundResponse),
        (status = 400, description = "Invalid refund request"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn refund_payment() {}

/// Book an appointment
#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "appointments",
    request_body = CreateAppointmentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Invalid appointment"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn create_appointment() {}

/// List appointments
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "appointments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Appointments ordered by start time", body = Vec<Appointment>),
        (status = 401, description = "Unauthorized")
    )
)]
async fn list_appointments() {}

/// Download the appointment export
#[utoipa::path(
    get,
    path = "/api/appointments/export",
    tag = "appointments",
    security(("bearer_auth" = [])),
    params(
        ("format" = Option<String>, Query, description = "Export format: csv (default) or excel")
    ),
    responses(
        (status = 200, description = "Delimiter-separated export", body = String),
        (status = 400, description = "Unknown export format"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn export_appointments() {}

/// Adds the bearer API key scheme to the generated document.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

/// The OpenAPI document for the booking payments API.
#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        create_payment,
        list_payments,
        get_payment,
        refund_payment,
        create_appointment,
        list_appointments,
        export_appointments,
    ),
    components(schemas(
        PaymentRequest,
        PaymentMethodDto,
        PaymentResponse,
        RefundRequest,
        RefundResponse,
        CreateAppointmentRequest,
        Payment,
        Appointment,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness"),
        (name = "payments", description = "Payment authorization and refunds"),
        (name = "appointments", description = "Bookings and exports"),
    )
)]
pub struct ApiDoc;

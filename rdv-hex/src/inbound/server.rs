//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use rdv_types::{AppointmentRepository, Cache, PaymentGateway, TransactionLedger};

use super::auth::{ApiKeyAuth, auth_middleware};
use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::appointments::AppointmentService;
use crate::openapi::ApiDoc;
use crate::service::PaymentService;

/// HTTP Server for the booking payments API.
pub struct HttpServer<G, L, A, C>
where
    G: PaymentGateway,
    L: TransactionLedger,
    A: AppointmentRepository,
    C: Cache,
{
    state: Arc<AppState<G, L, A, C>>,
    rate_limiter: Arc<RateLimiterState>,
    auth: Arc<ApiKeyAuth>,
}

impl<G, L, A, C> HttpServer<G, L, A, C>
where
    G: PaymentGateway,
    L: TransactionLedger,
    A: AppointmentRepository,
    C: Cache,
{
    /// Creates a new HTTP server with the given services and API key.
    pub fn new(
        payments: PaymentService<G, L>,
        appointments: AppointmentService<A, C>,
        api_key: &str,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                payments,
                appointments,
            }),
            rate_limiter: Arc::new(RateLimiterState::default()), // 100 req/min default
            auth: Arc::new(ApiKeyAuth::new(api_key)),
        }
    }

    /// Creates a new HTTP server with custom rate limiting.
    pub fn with_rate_limit(
        payments: PaymentService<G, L>,
        appointments: AppointmentService<A, C>,
        api_key: &str,
        requests_per_minute: u32,
    ) -> Self {
        use std::time::Duration;
        Self {
            state: Arc::new(AppState {
                payments,
                appointments,
            }),
            rate_limiter: Arc::new(RateLimiterState::new(
                requests_per_minute,
                Duration::from_secs(60),
            )),
            auth: Arc::new(ApiKeyAuth::new(api_key)),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        let api = Router::new()
            .route("/health", get(handlers::health))
            .route("/api/payments", post(handlers::create_payment::<G, L, A, C>))
            .route("/api/payments", get(handlers::list_payments::<G, L, A, C>))
            .route(
                "/api/payments/refund",
                post(handlers::refund_payment::<G, L, A, C>),
            )
            .route("/api/payments/{id}", get(handlers::get_payment::<G, L, A, C>))
            .route(
                "/api/appointments",
                post(handlers::create_appointment::<G, L, A, C>),
            )
            .route(
                "/api/appointments",
                get(handlers::list_appointments::<G, L, A, C>),
            )
            .route(
                "/api/appointments/export",
                get(handlers::export_appointments::<G, L, A, C>),
            )
            .with_state(self.state.clone());

        Router::new()
            .merge(api)
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(metrics)
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(middleware::from_fn_with_state(
                self.auth.clone(),
                auth_middleware,
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}

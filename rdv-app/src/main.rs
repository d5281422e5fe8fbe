//! # RDV Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the in-memory adapters and the simulated gateway
//! - Create the payment and appointment services
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rdv_hex::{AppointmentService, PaymentService, inbound::HttpServer};
use rdv_store::{MemoryAppointments, MemoryCache, MemoryLedger, SimulatedGateway};

fn init_tracer() -> (sdktrace::Tracer, sdktrace::SdkTracerProvider) {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .expect("failed to create OTLP span exporter");

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    (provider.tracer("rdv-payments"), provider)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize OpenTelemetry tracing
    let (otel_tracer, otel_provider) = init_tracer();
    let telemetry = tracing_opentelemetry::layer().with_tracer(otel_tracer);

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rdv_app=debug,rdv_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting booking payments server on port {}", config.port);

    // Wire the adapters: simulated gateway, in-memory ledger/appointments/cache
    let payments = PaymentService::new(SimulatedGateway::new(), MemoryLedger::new());
    let appointments = AppointmentService::new(MemoryAppointments::new(), MemoryCache::new())
        .with_export_ttl(config.export_ttl);

    // Create and run the HTTP server
    let server = HttpServer::with_rate_limit(
        payments,
        appointments,
        &config.api_key,
        config.rate_limit_per_minute,
    );
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    let _ = otel_provider.shutdown();
    Ok(())
}

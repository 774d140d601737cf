//! Subscriber setup
//!
//! A process initializes telemetry exactly once; later calls are no-ops.

use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn service_resource(service_name: &str) -> opentelemetry_sdk::Resource {
    opentelemetry_sdk::Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        service_name.to_string(),
    )])
}

/// Console logging filtered by `RUST_LOG` (default `info`)
///
/// ```
/// use pagegen_telemetry::init_telemetry;
/// init_telemetry("pagegen-worker").expect("telemetry init");
/// ```
pub fn init_telemetry(service_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();

        tracing::info!(service.name = service_name, "telemetry initialized");
    });

    Ok(())
}

/// JSON-formatted logging for log aggregators
pub fn init_telemetry_json(service_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init();

        tracing::info!(service.name = service_name, "telemetry initialized");
    });

    Ok(())
}

/// Console logging plus OTLP span and metric export
///
/// `endpoint` is the OTLP collector, e.g. `http://localhost:4317`.
///
/// ```no_run
/// use pagegen_telemetry::init_with_otlp;
/// init_with_otlp("pagegen-worker", "http://localhost:4317").expect("telemetry init");
/// ```
pub fn init_with_otlp(
    service_name: &str,
    endpoint: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    use opentelemetry_otlp::WithExportConfig;
    use tracing_opentelemetry::OpenTelemetryLayer;

    INIT.call_once(|| {
        let tracer = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(opentelemetry_otlp::new_exporter().tonic().with_endpoint(endpoint))
            .with_trace_config(
                opentelemetry_sdk::trace::config().with_resource(service_resource(service_name)),
            )
            .install_batch(opentelemetry_sdk::runtime::Tokio)
            .expect("OTLP tracer install");

        let meter_provider = opentelemetry_otlp::new_pipeline()
            .metrics(opentelemetry_sdk::runtime::Tokio)
            .with_exporter(opentelemetry_otlp::new_exporter().tonic().with_endpoint(endpoint))
            .with_resource(service_resource(service_name))
            .build()
            .expect("OTLP meter provider build");
        opentelemetry::global::set_meter_provider(meter_provider);

        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .with(OpenTelemetryLayer::new(tracer))
            .init();

        tracing::info!(
            service.name = service_name,
            otlp.endpoint = endpoint,
            "telemetry initialized with otlp export"
        );
    });

    Ok(())
}

/// Flush pending spans; call before process exit
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}

//! # PageGen Telemetry
//!
//! Structured logging and distributed tracing for PageGen services.
//!
//! The pipeline instruments its runs with the span helpers in [`spans`];
//! a binary picks one of the [`init`] entry points at startup:
//!
//! ```rust
//! use pagegen_telemetry::{info, init_telemetry};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_telemetry("pagegen-worker")?;
//!     info!("worker started");
//!     Ok(())
//! }
//! ```
//!
//! OTLP export ([`init_with_otlp`]) ships spans and metrics to a collector
//! for backends like Jaeger or Datadog.

pub mod init;
pub mod spans;

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, trace, warn, Span};

pub use init::{init_telemetry, init_telemetry_json, init_with_otlp, shutdown_telemetry};
pub use spans::*;

// Re-export metrics
pub use opentelemetry::global;
pub use opentelemetry::metrics::{Meter, MeterProvider};

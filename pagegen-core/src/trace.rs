//! Stage-boundary trace events
//!
//! The scheduler emits one event entering and one leaving every stage. Sinks
//! are external collaborators; they must tolerate concurrent, order-independent
//! appends from multiple in-flight requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether the event marks entry into or exit from a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TracePhase {
    /// Entering the stage
    In,
    /// Leaving the stage
    Out,
}

/// One stage-boundary event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    /// When the event occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Correlation id of the request
    pub correlation_id: String,
    /// Stage name
    pub stage: String,
    /// Entry or exit
    pub phase: TracePhase,
    /// Stage-specific data (duration, outcome, ...)
    pub data: Value,
}

impl TraceEvent {
    /// Create an event stamped with the current time
    pub fn now(correlation_id: &str, stage: &str, phase: TracePhase, data: Value) -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            correlation_id: correlation_id.to_string(),
            stage: stage.to_string(),
            phase,
            data,
        }
    }
}

/// Destination for trace events
pub trait TraceSink: Send + Sync {
    /// Accept one event; must not fail the caller
    fn emit(&self, event: TraceEvent);
}

/// Sink that drops all events
#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&self, _event: TraceEvent) {}
}

/// Sink that forwards events to the `tracing` subscriber
#[derive(Debug, Default)]
pub struct TracingTraceSink;

impl TraceSink for TracingTraceSink {
    fn emit(&self, event: TraceEvent) {
        tracing::debug!(
            correlation_id = %event.correlation_id,
            stage = %event.stage,
            phase = ?event.phase,
            data = %event.data,
            "stage boundary"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct VecSink(Mutex<Vec<TraceEvent>>);

    impl TraceSink for VecSink {
        fn emit(&self, event: TraceEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_event_serializes_phase_uppercase() {
        let event =
            TraceEvent::now("corr-1", "layout", TracePhase::In, serde_json::json!({}));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"IN\""));
    }

    #[test]
    fn test_sink_collects_events() {
        let sink = VecSink::default();
        sink.emit(TraceEvent::now("c", "design", TracePhase::In, serde_json::json!({})));
        sink.emit(TraceEvent::now("c", "design", TracePhase::Out, serde_json::json!({"ms": 3})));
        assert_eq!(sink.0.lock().unwrap().len(), 2);
    }
}
